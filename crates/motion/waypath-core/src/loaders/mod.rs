//! Path document loaders
//!
//! Converts the JSON documents produced by route generators into
//! [`MotionObject`](crate::MotionObject)s ready for sampling.

pub mod waypoints;

pub use waypoints::*;
