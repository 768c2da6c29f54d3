//! Per-object motion driver.
//!
//! A [`MotionObject`] is what the host keeps for each animated object: the
//! path, orientation settings, optional distance pacing and the rotation
//! carried between frames. The host calls [`MotionObject::sample`] once per
//! frame and applies the result to its own scene.

use nalgebra::{UnitQuaternion, Vector3};

use crate::arc_length::{remap_time, ArcLengthCache};
use crate::config::{FrameRange, MotionConfig};
use crate::orientation::{solve_orientation, OrientationConfig};
use crate::path::Path;
use crate::track::Track;
use crate::Result;

/// Position and rotation of an object at one query time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    pub frame: f64,
    pub position: Vector3<f64>,
    pub rotation: UnitQuaternion<f64>,
}

#[derive(Debug, Clone)]
pub struct MotionObject {
    name: String,
    path: Path,
    orientation: OrientationConfig,
    distance_curve: Option<Track>,
    distance_control: bool,
    frame_range: FrameRange,
    cache: ArcLengthCache,
    current_rotation: UnitQuaternion<f64>,
}

impl MotionObject {
    pub fn new(name: impl Into<String>, path: Path, frame_range: FrameRange) -> Result<Self> {
        frame_range.validate()?;
        Ok(Self {
            name: name.into(),
            path,
            orientation: OrientationConfig::default(),
            distance_curve: None,
            distance_control: false,
            frame_range,
            cache: ArcLengthCache::new(),
            current_rotation: UnitQuaternion::identity(),
        })
    }

    /// Apply a full [`MotionConfig`]; the path config replaces the path's own.
    pub fn configure(&mut self, config: MotionConfig) -> Result<()> {
        config.validate()?;
        self.path.set_config(config.path)?;
        self.orientation = config.orientation;
        self.distance_control = config.distance_control;
        Ok(())
    }

    pub fn with_orientation(mut self, orientation: OrientationConfig) -> Result<Self> {
        orientation.validate()?;
        self.orientation = orientation;
        Ok(self)
    }

    /// Pace the object by `curve` (distance as a function of clock time) and
    /// switch distance control on.
    pub fn with_distance_curve(mut self, curve: Track) -> Self {
        self.distance_curve = Some(curve);
        self.distance_control = true;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mutable access; edits bump the path revision and so invalidate the
    /// arc-length table.
    #[inline]
    pub fn path_mut(&mut self) -> &mut Path {
        &mut self.path
    }

    pub fn set_path(&mut self, path: Path) {
        self.path = path;
        self.cache.invalidate();
    }

    #[inline]
    pub fn orientation_config(&self) -> &OrientationConfig {
        &self.orientation
    }

    #[inline]
    pub fn distance_curve(&self) -> Option<&Track> {
        self.distance_curve.as_ref()
    }

    pub fn set_distance_curve(&mut self, curve: Option<Track>) {
        self.distance_curve = curve;
    }

    #[inline]
    pub fn distance_control(&self) -> bool {
        self.distance_control
    }

    pub fn set_distance_control(&mut self, enabled: bool) {
        self.distance_control = enabled;
    }

    #[inline]
    pub fn frame_range(&self) -> FrameRange {
        self.frame_range
    }

    pub fn set_frame_range(&mut self, range: FrameRange) -> Result<()> {
        range.validate()?;
        self.frame_range = range;
        Ok(())
    }

    #[inline]
    pub fn current_rotation(&self) -> UnitQuaternion<f64> {
        self.current_rotation
    }

    /// Forget the held rotation, e.g. before re-baking from the first frame.
    pub fn reset_rotation(&mut self) {
        self.current_rotation = UnitQuaternion::identity();
    }

    pub fn invalidate_cache(&mut self) {
        self.cache.invalidate();
    }

    /// Path time for clock time `t`; identity unless distance control is on
    /// and a distance curve is present.
    pub fn remapped_time(&mut self, t: f64) -> Result<f64> {
        match (&self.distance_curve, self.distance_control) {
            (Some(curve), true) => {
                let table = self.cache.table(&self.path, self.frame_range)?;
                remap_time(curve, t, table)
            }
            _ => Ok(t),
        }
    }

    pub fn position(&mut self, t: f64) -> Result<Vector3<f64>> {
        let time = self.remapped_time(t)?;
        self.path.position(time)
    }

    /// Rotation at `t`; updates and returns the held rotation.
    pub fn orientation(&mut self, t: f64) -> Result<UnitQuaternion<f64>> {
        Ok(self.sample(t)?.rotation)
    }

    pub fn sample(&mut self, t: f64) -> Result<MotionSample> {
        let previous = self.position(t - 1.0)?;
        let current = self.position(t)?;
        let next = self.position(t + 1.0)?;
        let rotation = solve_orientation(
            &previous,
            &current,
            &next,
            &self.orientation,
            self.current_rotation,
        );
        self.current_rotation = rotation;
        Ok(MotionSample {
            frame: t,
            position: current,
            rotation,
        })
    }

    /// Path length over the frame range, from the arc-length table.
    pub fn travelled_distance(&mut self) -> Result<f64> {
        Ok(self
            .cache
            .table(&self.path, self.frame_range)?
            .total_length())
    }
}
