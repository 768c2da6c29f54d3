//! Per-object configuration bundles

use serde::{Deserialize, Serialize};

use crate::orientation::OrientationConfig;
use crate::path::PathConfig;
use crate::{MotionError, Result};

/// Longest frame range accepted, matching common DCC scene limits
pub const MAX_FRAME_SPAN: usize = 1 << 20;

/// Inclusive span of integer scene frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRange {
    pub start: i64,
    pub end: i64,
}

impl FrameRange {
    pub fn new(start: i64, end: i64) -> Result<Self> {
        let range = Self { start, end };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<()> {
        if self.end < self.start {
            return Err(MotionError::invalid_config(format!(
                "frame range end {} precedes start {}",
                self.end, self.start
            )));
        }
        if self.span().map_or(true, |n| n > MAX_FRAME_SPAN) {
            return Err(MotionError::invalid_config(format!(
                "frame range {}..={} exceeds {MAX_FRAME_SPAN} frames",
                self.start, self.end
            )));
        }
        Ok(())
    }

    /// Frame count, `None` when it does not fit in `usize`
    #[inline]
    fn span(&self) -> Option<usize> {
        let last = self.end.checked_sub(self.start)?;
        usize::try_from(last).ok()?.checked_add(1)
    }

    /// Number of frames in the range; saturates for spans `validate` rejects
    #[inline]
    pub fn len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        self.span().unwrap_or(usize::MAX)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    #[inline]
    pub fn contains(&self, frame: i64) -> bool {
        (self.start..=self.end).contains(&frame)
    }

    pub fn frames(&self) -> impl Iterator<Item = i64> {
        self.start..=self.end
    }
}

impl Default for FrameRange {
    fn default() -> Self {
        Self { start: 1, end: 250 }
    }
}

/// Everything the host configures for one animated object.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub path: PathConfig,
    pub orientation: OrientationConfig,
    /// Drive time from the desired-distance curve instead of the clock
    pub distance_control: bool,
}

impl MotionConfig {
    pub fn validate(&self) -> Result<()> {
        self.path.validate()?;
        self.orientation.validate()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolation::InterpolationMode;
    use crate::orientation::Axis;

    #[test]
    fn frame_range_validation() {
        assert!(FrameRange::new(10, 1).is_err());
        let r = FrameRange::new(0, 24).unwrap();
        assert_eq!(r.len(), 25);
        assert!(r.contains(24));
        assert!(!r.contains(25));
        assert_eq!(r.frames().count(), 25);
    }

    #[test]
    fn extreme_ranges_are_rejected_without_overflow() {
        let huge = FrameRange {
            start: i64::MIN,
            end: i64::MAX,
        };
        assert_eq!(huge.len(), usize::MAX);
        assert!(matches!(
            huge.validate(),
            Err(MotionError::InvalidConfig { .. })
        ));
        assert!(FrameRange::new(i64::MIN, i64::MAX).is_err());
        assert!(FrameRange::new(0, i64::MAX).is_err());
        assert!(FrameRange::new(0, MAX_FRAME_SPAN as i64 - 1).is_ok());
        assert!(FrameRange::new(0, MAX_FRAME_SPAN as i64).is_err());

        let backwards = FrameRange {
            start: i64::MAX,
            end: i64::MIN,
        };
        assert_eq!(backwards.len(), 0);
        assert!(backwards.validate().is_err());

        assert_eq!(FrameRange::new(-3, -3).unwrap().len(), 1);
    }

    #[test]
    fn motion_config_defaults_fill_missing_fields() {
        let config = MotionConfig::from_json(
            r#"{ "path": { "mode": { "type": "catmull_rom" } }, "distance_control": true }"#,
        )
        .unwrap();
        assert_eq!(config.path.mode, InterpolationMode::CatmullRom { tension: 0.5 });
        assert_eq!(config.orientation.align_axis, Axis::PosY);
        assert_eq!(config.orientation.up_axis, Axis::PosZ);
        assert!(config.distance_control);
    }

    #[test]
    fn motion_config_rejects_bad_values() {
        let err = MotionConfig::from_json(
            r#"{ "path": { "oscillation": { "amplitude": -1.0 } } }"#,
        )
        .unwrap_err();
        assert_eq!(err.category(), "config");
        let err = MotionConfig::from_json(r#"{ "orientation": { "align_axis": "W" } }"#)
            .unwrap_err();
        assert_eq!(err.category(), "serialization");
    }
}
