//! Error types for path evaluation

use serde::{Deserialize, Serialize};

/// Errors raised while building or evaluating keyframed motion.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum MotionError {
    /// A kernel was handed a zero-length time interval
    #[error("Division by zero: {context}")]
    DivisionByZero { context: String },

    /// Zero-length direction vector or degenerate control times
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// A query resolved to no bracketing keyframes
    #[error("Time {time} is out of range [{start}, {end}]")]
    OutOfRange { time: f64, start: f64, end: f64 },

    /// Track construction rejected the supplied keyframes
    #[error("Invalid keyframes: {reason}")]
    InvalidKeyframes { reason: String },

    /// Interpolation mode name not recognised
    #[error("Unknown interpolation mode: {name}")]
    UnknownInterpolation { name: String },

    /// Axis name not recognised
    #[error("Unknown axis: {name}")]
    UnknownAxis { name: String },

    /// Configuration value outside its domain
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl MotionError {
    pub(crate) fn division_by_zero(context: impl Into<String>) -> Self {
        Self::DivisionByZero {
            context: context.into(),
        }
    }

    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_keyframes(reason: impl Into<String>) -> Self {
        Self::InvalidKeyframes {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Kernel-level numeric failures have a local fallback and never need to
    /// abort evaluation of a whole frame range.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::DivisionByZero { .. } | Self::InvalidArgument { .. }
        )
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::DivisionByZero { .. } | Self::InvalidArgument { .. } => "numeric",
            Self::OutOfRange { .. } | Self::InvalidKeyframes { .. } => "track",
            Self::UnknownInterpolation { .. }
            | Self::UnknownAxis { .. }
            | Self::InvalidConfig { .. } => "config",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for MotionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}
