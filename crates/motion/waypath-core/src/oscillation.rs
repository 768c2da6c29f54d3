//! Deterministic per-axis jitter added on top of interpolated positions.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::noise::noise3;
use crate::{MotionError, Result};

/// Which world axes receive oscillation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisMask {
    #[serde(default)]
    pub x: bool,
    #[serde(default)]
    pub y: bool,
    #[serde(default)]
    pub z: bool,
}

impl AxisMask {
    pub const NONE: Self = Self {
        x: false,
        y: false,
        z: false,
    };
    pub const ALL: Self = Self {
        x: true,
        y: true,
        z: true,
    };

    #[inline]
    pub fn any(&self) -> bool {
        self.x || self.y || self.z
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OscillationConfig {
    pub axes: AxisMask,
    /// Noise-space distance travelled per frame
    pub frequency: f64,
    /// Scale applied to the signed noise sample
    pub amplitude: f64,
}

impl Default for OscillationConfig {
    fn default() -> Self {
        Self {
            axes: AxisMask::NONE,
            frequency: 1.0,
            amplitude: 0.0,
        }
    }
}

impl OscillationConfig {
    pub fn new(axes: AxisMask, frequency: f64, amplitude: f64) -> Self {
        Self {
            axes,
            frequency,
            amplitude,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.frequency.is_finite() || self.frequency < 0.0 {
            return Err(MotionError::invalid_config(format!(
                "oscillation frequency must be finite and >= 0, got {}",
                self.frequency
            )));
        }
        if !self.amplitude.is_finite() || self.amplitude < 0.0 {
            return Err(MotionError::invalid_config(format!(
                "oscillation amplitude must be finite and >= 0, got {}",
                self.amplitude
            )));
        }
        Ok(())
    }

    /// Offset for `frame`; each enabled axis samples the noise field along its
    /// own coordinate axis, disabled axes contribute zero.
    pub fn offset(&self, frame: f64) -> Vector3<f64> {
        if !self.axes.any() || self.amplitude == 0.0 {
            return Vector3::zeros();
        }
        let t = frame * self.frequency;
        let sample = |enabled: bool, x: f64, y: f64, z: f64| {
            if enabled {
                self.amplitude * noise3(x, y, z)
            } else {
                0.0
            }
        };
        Vector3::new(
            sample(self.axes.x, t, 0.0, 0.0),
            sample(self.axes.y, 0.0, t, 0.0),
            sample(self.axes.z, 0.0, 0.0, t),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_axes_contribute_nothing() {
        let cfg = OscillationConfig::new(
            AxisMask {
                x: true,
                y: false,
                z: false,
            },
            0.37,
            2.0,
        );
        let mut moved = false;
        for f in 0..50 {
            let o = cfg.offset(f as f64);
            assert_eq!(o.y, 0.0);
            assert_eq!(o.z, 0.0);
            assert!(o.x.abs() <= 2.2);
            moved |= o.x != 0.0;
        }
        assert!(moved);
    }

    #[test]
    fn default_is_inert() {
        assert_eq!(OscillationConfig::default().offset(12.5), Vector3::zeros());
    }

    #[test]
    fn negative_values_rejected() {
        assert!(OscillationConfig::new(AxisMask::ALL, -1.0, 1.0)
            .validate()
            .is_err());
        assert!(OscillationConfig::new(AxisMask::ALL, 1.0, -1.0)
            .validate()
            .is_err());
        assert!(OscillationConfig::new(AxisMask::ALL, 0.0, 0.0)
            .validate()
            .is_ok());
    }
}
