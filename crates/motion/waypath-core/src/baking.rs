//! Baking API: sample a motion object at every frame of a range.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::config::FrameRange;
use crate::motion::MotionObject;
use crate::orientation::{direction, quat_to_wxyz, turn_angle_xy};
use crate::Result;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BakedSample {
    pub frame: i64,
    pub position: [f64; 3],
    /// Unit quaternion as `[w, x, y, z]`
    pub rotation: [f64; 4],
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BakedMotion {
    pub name: String,
    pub frame_range: FrameRange,
    pub samples: Vec<BakedSample>,
}

/// Diagnostics over a baked sample run
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BakeStatistics {
    pub sample_count: usize,
    /// Sum of straight-line distances between consecutive samples
    pub total_distance: f64,
    /// Largest absolute XY turn angle (radians) between consecutive segments
    pub max_turn_angle: f64,
}

/// Bake `object` over `range`, one sample per integer frame in order.
///
/// Rotation state carries across frames, so frames where the object stands
/// still keep the last rotation.
pub fn bake(object: &mut MotionObject, range: FrameRange) -> Result<BakedMotion> {
    range.validate()?;
    let mut samples = Vec::with_capacity(range.len());
    for frame in range.frames() {
        let sample = object.sample(frame as f64)?;
        samples.push(BakedSample {
            frame,
            position: sample.position.into(),
            rotation: quat_to_wxyz(&sample.rotation),
        });
    }
    Ok(BakedMotion {
        name: object.name().to_string(),
        frame_range: range,
        samples,
    })
}

impl BakedMotion {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Export as serde_json::Value (stable schema for host persistence).
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    pub fn sample_at(&self, frame: i64) -> Option<&BakedSample> {
        if !self.frame_range.contains(frame) {
            return None;
        }
        let idx = (frame - self.frame_range.start) as usize;
        match self.samples.get(idx) {
            Some(sample) if sample.frame == frame => Some(sample),
            _ => self.samples.iter().find(|s| s.frame == frame),
        }
    }

    pub fn statistics(&self) -> BakeStatistics {
        let positions: Vec<Vector3<f64>> = self
            .samples
            .iter()
            .map(|s| Vector3::from(s.position))
            .collect();
        let total_distance = positions.windows(2).map(|w| (w[1] - w[0]).norm()).sum();
        let max_turn_angle = positions
            .windows(3)
            .map(|w| {
                turn_angle_xy(&direction(&w[0], &w[1]), &direction(&w[1], &w[2])).abs()
            })
            .fold(0.0, f64::max);
        BakeStatistics {
            sample_count: self.samples.len(),
            total_distance,
            max_turn_angle,
        }
    }
}
