//! Loader for waypoint path documents
//!
//! A document carries the waypoints for one object together with its motion
//! configuration and optional pacing data:
//!
//! ```json
//! {
//!   "name": "car_01",
//!   "waypoints": [ { "frame": 1, "position": [0, 0, 0] }, ... ],
//!   "config": { "path": { "mode": { "type": "hermite" } } },
//!   "velocities": [ [1, 0, 0], ... ],
//!   "distance_curve": [ { "frame": 1, "distance": 0 }, ... ],
//!   "frame_range": { "start": 1, "end": 250 }
//! }
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::{FrameRange, MotionConfig};
use crate::interpolation::InterpolationMode;
use crate::motion::MotionObject;
use crate::path::{Path, Waypoint};
use crate::track::{Keyframe, Track};
use crate::{MotionError, Result};

/// Desired travelled distance at a clock frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceKey {
    pub frame: f64,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathDocument {
    #[serde(default)]
    pub name: String,
    pub waypoints: Vec<Waypoint>,
    #[serde(default)]
    pub config: MotionConfig,
    /// Per-waypoint `[vx, vy, vz]` Hermite velocities
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocities: Option<Vec<[f64; 3]>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_curve: Option<Vec<DistanceKey>>,
    /// Defaults to the first..last waypoint frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_range: Option<FrameRange>,
}

impl PathDocument {
    /// Build the motion object described by this document.
    ///
    /// Hermite paths without explicit velocities get velocities derived from
    /// their waypoints.
    pub fn into_motion_object(self) -> Result<MotionObject> {
        self.config.validate()?;
        let mut path = Path::from_waypoints(&self.waypoints, self.config.path)?;

        match &self.velocities {
            Some(velocities) => path.set_velocity_tracks(Some(velocity_tracks(
                &self.waypoints,
                velocities,
            )?)),
            None if self.config.path.mode == InterpolationMode::Hermite => path.sync_velocities(),
            None => {}
        }

        let frame_range = match self.frame_range {
            Some(range) => range,
            None => waypoint_span(&self.waypoints)?,
        };

        let mut object = MotionObject::new(self.name, path, frame_range)?;
        object.configure(self.config)?;
        if let Some(keys) = self.distance_curve {
            let curve = Track::new(
                keys.iter()
                    .map(|k| Keyframe::new(k.frame, k.distance))
                    .collect(),
            )?;
            object.set_distance_curve(Some(curve));
        }
        debug!(
            "loaded path '{}' ({} waypoints, frames {}..={})",
            object.name(),
            self.waypoints.len(),
            frame_range.start,
            frame_range.end
        );
        Ok(object)
    }
}

fn waypoint_span(waypoints: &[Waypoint]) -> Result<FrameRange> {
    match (waypoints.first(), waypoints.last()) {
        (Some(first), Some(last)) => FrameRange::new(first.frame, last.frame),
        _ => Err(MotionError::invalid_keyframes("no waypoints supplied")),
    }
}

fn velocity_tracks(waypoints: &[Waypoint], velocities: &[[f64; 3]]) -> Result<[Track; 3]> {
    if velocities.len() != waypoints.len() {
        return Err(MotionError::invalid_keyframes(format!(
            "{} velocities supplied for {} waypoints",
            velocities.len(),
            waypoints.len()
        )));
    }
    let axis = |i: usize| {
        Track::new(
            waypoints
                .iter()
                .zip(velocities)
                .map(|(w, v)| Keyframe::new(w.frame as f64, v[i]))
                .collect(),
        )
    };
    Ok([axis(0)?, axis(1)?, axis(2)?])
}

/// Load a [`PathDocument`] from JSON and build its motion object.
///
/// # Example
/// ```rust
/// use waypath_core::loaders::load_path_document_json;
///
/// let json = r#"
/// {
///   "name": "walker",
///   "waypoints": [
///     { "frame": 0, "position": [0.0, 0.0, 0.0] },
///     { "frame": 24, "position": [10.0, 0.0, 0.0] }
///   ]
/// }
/// "#;
///
/// let mut object = load_path_document_json(json).unwrap();
/// assert_eq!(object.name(), "walker");
/// assert_eq!(object.position(12.0).unwrap().x, 5.0);
/// ```
pub fn load_path_document_json(json: &str) -> Result<MotionObject> {
    let document: PathDocument = serde_json::from_str(json)?;
    document.into_motion_object()
}
