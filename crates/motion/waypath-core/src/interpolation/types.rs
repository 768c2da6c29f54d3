use serde::{Deserialize, Serialize};

use crate::{MotionError, Result};

/// Catmull-Rom tension that yields the standard spline.
pub const DEFAULT_TENSION: f64 = 0.5;

fn default_tension() -> f64 {
    DEFAULT_TENSION
}

/// Interpolation family used for every axis of a path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InterpolationMode {
    #[default]
    Linear,
    CatmullRom {
        #[serde(default = "default_tension")]
        tension: f64,
    },
    Hermite,
}

impl InterpolationMode {
    /// Standard Catmull-Rom (tension 0.5)
    #[inline]
    pub fn catmull_rom() -> Self {
        Self::CatmullRom {
            tension: DEFAULT_TENSION,
        }
    }

    /// Parse a mode name; `tension` only applies to Catmull-Rom.
    pub fn from_name(name: &str, tension: f64) -> Result<Self> {
        let mode = match name.trim().to_lowercase().as_str() {
            "linear" | "lineal" => Self::Linear,
            "catmull_rom" | "catmull-rom" | "catmullrom" => Self::CatmullRom { tension },
            "hermite" => Self::Hermite,
            _ => {
                return Err(MotionError::UnknownInterpolation {
                    name: name.to_string(),
                })
            }
        };
        mode.validate()?;
        Ok(mode)
    }

    /// Get the name of this interpolation mode
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::CatmullRom { .. } => "catmull_rom",
            Self::Hermite => "hermite",
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Self::CatmullRom { tension } = self {
            if !tension.is_finite() || *tension < 0.0 {
                return Err(MotionError::invalid_config(format!(
                    "catmull-rom tension must be finite and >= 0, got {tension}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for mode in [
            InterpolationMode::Linear,
            InterpolationMode::catmull_rom(),
            InterpolationMode::Hermite,
        ] {
            let parsed = InterpolationMode::from_name(mode.name(), DEFAULT_TENSION).unwrap();
            assert_eq!(parsed, mode);
        }
        assert_eq!(
            InterpolationMode::from_name("Catmull-Rom", 0.2).unwrap(),
            InterpolationMode::CatmullRom { tension: 0.2 }
        );
    }

    #[test]
    fn unknown_and_invalid_modes_are_rejected() {
        assert!(matches!(
            InterpolationMode::from_name("bspline", 0.5),
            Err(MotionError::UnknownInterpolation { .. })
        ));
        assert!(matches!(
            InterpolationMode::from_name("catmull_rom", -1.0),
            Err(MotionError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn serde_tagged_form() {
        let mode: InterpolationMode = serde_json::from_str(r#"{"type":"catmull_rom"}"#).unwrap();
        assert_eq!(mode, InterpolationMode::catmull_rom());
        let json = serde_json::to_string(&InterpolationMode::Hermite).unwrap();
        assert_eq!(json, r#"{"type":"hermite"}"#);
    }
}
