use serde::{Deserialize, Serialize};

/// A fixed `(time, value)` anchor a track passes through exactly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Time in frames
    pub time: f64,
    pub value: f64,
    /// Slope per frame, read by Hermite when no velocity track is attached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tangent: Option<f64>,
}

impl Keyframe {
    #[inline]
    pub fn new(time: f64, value: f64) -> Self {
        Self {
            time,
            value,
            tangent: None,
        }
    }

    /// Set the Hermite tangent
    #[inline]
    pub fn with_tangent(mut self, tangent: f64) -> Self {
        self.tangent = Some(tangent);
        self
    }
}

impl From<(f64, f64)> for Keyframe {
    #[inline]
    fn from((time, value): (f64, f64)) -> Self {
        Self::new(time, value)
    }
}
