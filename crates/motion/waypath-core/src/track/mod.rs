//! Scalar keyframe channels.

pub mod channel;
pub mod keyframe;

pub use channel::{Bracket, Track};
pub use keyframe::Keyframe;
