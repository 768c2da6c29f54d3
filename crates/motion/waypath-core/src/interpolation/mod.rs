//! Interpolation kernels and the mode selector shared by a path's axes.

pub mod kernels;
pub mod types;

pub use kernels::*;
pub use types::*;
