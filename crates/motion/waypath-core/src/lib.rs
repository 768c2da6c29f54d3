//! Waypath Core
//!
//! Keyframed 3-D path motion for objects driven by sparse waypoints:
//!
//! - scalar [`Track`]s evaluated with linear, Catmull-Rom or Hermite kernels,
//! - a [`Path`] of three independent axis tracks plus coherent-noise
//!   oscillation,
//! - arc-length reparametrization so objects move at a prescribed pace,
//! - a tangent-frame orientation solver with optional banking.
//!
//! [`MotionObject`] ties these together per animated object; hosts call
//! [`MotionObject::sample`] once per frame, or [`bake`] a whole frame range.

pub mod arc_length;
pub mod baking;
pub mod config;
pub mod error;
pub mod interpolation;
pub mod loaders;
pub mod motion;
pub mod noise;
pub mod orientation;
pub mod oscillation;
pub mod path;
pub mod track;

pub use arc_length::{remap_time, ArcLengthCache, ArcLengthSample, ArcLengthTable};
pub use baking::{bake, BakeStatistics, BakedMotion, BakedSample};
pub use config::{FrameRange, MotionConfig};
pub use error::MotionError;
pub use interpolation::InterpolationMode;
pub use loaders::{load_path_document_json, PathDocument};
pub use motion::{MotionObject, MotionSample};
pub use orientation::{
    quat_from_wxyz, quat_to_wxyz, shortest_arc, solve_orientation, tangent_frame, turn_angle_xy,
    Axis, OrientationConfig, TangentFrame,
};
pub use oscillation::{AxisMask, OscillationConfig};
pub use path::{Component, Path, PathConfig, Waypoint};
pub use track::{Keyframe, Track};

pub type Result<T> = core::result::Result<T, MotionError>;
