use log::warn;
use serde::{Deserialize, Serialize};

use crate::interpolation::{kernels, InterpolationMode};
use crate::track::Keyframe;
use crate::{MotionError, Result};

/// One scalar channel: keyframes in strictly increasing time order.
///
/// Construction validates the ordering so queries never have to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct Track {
    keyframes: Vec<Keyframe>,
}

/// The segment containing a query time plus its outer neighbours.
///
/// At the first and last segment the missing neighbour is the nearest
/// existing keyframe repeated (`before == a` or `after == b`), which makes
/// Catmull-Rom behave like a clamped spline at the track ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket<'a> {
    pub before: &'a Keyframe,
    pub a: &'a Keyframe,
    pub b: &'a Keyframe,
    pub after: &'a Keyframe,
}

impl Track {
    /// Build a track, rejecting empty input, non-finite data and
    /// non-increasing times.
    pub fn new(keyframes: Vec<Keyframe>) -> Result<Self> {
        if keyframes.is_empty() {
            return Err(MotionError::invalid_keyframes(
                "a track needs at least one keyframe",
            ));
        }
        for (i, kf) in keyframes.iter().enumerate() {
            if !kf.time.is_finite() || !kf.value.is_finite() {
                return Err(MotionError::invalid_keyframes(format!(
                    "keyframe {i} is not finite ({}, {})",
                    kf.time, kf.value
                )));
            }
            if kf.tangent.is_some_and(|v| !v.is_finite()) {
                return Err(MotionError::invalid_keyframes(format!(
                    "keyframe {i} has a non-finite tangent"
                )));
            }
        }
        if let Some(pair) = keyframes.windows(2).find(|w| w[1].time <= w[0].time) {
            return Err(MotionError::invalid_keyframes(format!(
                "keyframe times must be strictly increasing ({} then {})",
                pair[0].time, pair[1].time
            )));
        }
        Ok(Self { keyframes })
    }

    /// Build from `(time, value)` pairs
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self> {
        Self::new(pairs.iter().copied().map(Keyframe::from).collect())
    }

    /// A single-keyframe track holding `value` at every time
    pub fn constant(value: f64) -> Self {
        Self {
            keyframes: vec![Keyframe::new(0.0, value)],
        }
    }

    #[inline]
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    #[inline]
    pub fn first(&self) -> &Keyframe {
        &self.keyframes[0]
    }

    #[inline]
    pub fn last(&self) -> &Keyframe {
        &self.keyframes[self.keyframes.len() - 1]
    }

    /// Locate the keyframe pair with `a.time <= time <= b.time`.
    ///
    /// Linear scan; tracks are expected to be small.
    pub fn bracket(&self, time: f64) -> Result<Bracket<'_>> {
        let kfs = &self.keyframes;
        for i in 0..kfs.len().saturating_sub(1) {
            let (a, b) = (&kfs[i], &kfs[i + 1]);
            if a.time <= time && time <= b.time {
                let before = if i > 0 { &kfs[i - 1] } else { a };
                let after = kfs.get(i + 2).unwrap_or(b);
                return Ok(Bracket {
                    before,
                    a,
                    b,
                    after,
                });
            }
        }
        Err(MotionError::OutOfRange {
            time,
            start: self.first().time,
            end: self.last().time,
        })
    }

    /// Evaluate the track at `time`.
    ///
    /// Times outside the keyframe span clamp to the boundary value. Hermite
    /// slopes come from `velocity` sampled at the segment ends, else from the
    /// keyframes' own tangents, else zero. A kernel failure falls back to the
    /// left keyframe's value.
    pub fn evaluate(
        &self,
        time: f64,
        mode: InterpolationMode,
        velocity: Option<&Track>,
    ) -> Result<f64> {
        if self.keyframes.len() == 1 {
            return Ok(self.first().value);
        }
        if time < self.first().time {
            return Ok(self.first().value);
        }
        if time > self.last().time {
            return Ok(self.last().value);
        }

        let Bracket {
            before,
            a,
            b,
            after,
        } = self.bracket(time)?;

        let result = match mode {
            InterpolationMode::Linear => kernels::linear(time, a.time, b.time, a.value, b.value),
            InterpolationMode::CatmullRom { tension } => kernels::catmull_rom(
                time,
                [before.time, a.time, b.time, after.time],
                [before.value, a.value, b.value, after.value],
                tension,
            ),
            InterpolationMode::Hermite => {
                let (v0, v1) = match velocity {
                    Some(track) => (track.sample_linear(a.time)?, track.sample_linear(b.time)?),
                    None => (a.tangent.unwrap_or(0.0), b.tangent.unwrap_or(0.0)),
                };
                kernels::hermite(time, a.time, b.time, a.value, b.value, v0, v1)
            }
        };

        match result {
            Ok(value) => Ok(value),
            Err(err) if err.is_recoverable() => {
                warn!(
                    "{} kernel failed at t={time}: {err}; holding keyframe value",
                    mode.name()
                );
                Ok(a.value)
            }
            Err(err) => Err(err),
        }
    }

    #[inline]
    fn sample_linear(&self, time: f64) -> Result<f64> {
        self.evaluate(time, InterpolationMode::Linear, None)
    }

    /// Per-keyframe slope track: each keyframe gets the slope of its outgoing
    /// segment, the last one repeats the final slope.
    pub fn derive_velocity_track(&self) -> Track {
        let kfs = &self.keyframes;
        if kfs.len() == 1 {
            return Track {
                keyframes: vec![Keyframe::new(kfs[0].time, 0.0)],
            };
        }
        let mut out = Vec::with_capacity(kfs.len());
        let mut slope = 0.0;
        for pair in kfs.windows(2) {
            let dt = pair[1].time - pair[0].time;
            slope = if dt != 0.0 {
                (pair[1].value - pair[0].value) / dt
            } else {
                0.0
            };
            out.push(Keyframe::new(pair[0].time, slope));
        }
        out.push(Keyframe::new(self.last().time, slope));
        Track { keyframes: out }
    }
}

impl TryFrom<Vec<Keyframe>> for Track {
    type Error = MotionError;

    fn try_from(keyframes: Vec<Keyframe>) -> Result<Self> {
        Self::new(keyframes)
    }
}

impl From<Track> for Vec<Keyframe> {
    fn from(track: Track) -> Self {
        track.keyframes
    }
}
