//! Arc-length reparametrization: travelled distance to keyframe time.

use log::{debug, trace, warn};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::config::FrameRange;
use crate::interpolation::InterpolationMode;
use crate::path::Path;
use crate::track::Track;
use crate::{MotionError, Result};

/// Cumulative distance travelled up to `frame`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcLengthSample {
    pub frame: i64,
    pub distance: f64,
}

/// Per-frame cumulative distance table over an inclusive frame range.
///
/// Distances are non-decreasing for tables produced by [`ArcLengthTable::build`]
/// but may repeat when the path pauses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcLengthTable {
    frame_range: FrameRange,
    samples: Vec<ArcLengthSample>,
}

impl ArcLengthTable {
    /// Sample `path` at every integer frame of `range` and accumulate the
    /// straight-line distance between consecutive samples.
    pub fn build(path: &Path, range: FrameRange) -> Result<Self> {
        range.validate()?;
        let mut samples = Vec::with_capacity(range.len());
        let mut previous: Option<Vector3<f64>> = None;
        let mut distance = 0.0;
        for frame in range.frames() {
            let position = path.position(frame as f64)?;
            if let Some(prev) = previous {
                distance += (position - prev).norm();
            }
            samples.push(ArcLengthSample { frame, distance });
            previous = Some(position);
        }
        let table = Self {
            frame_range: range,
            samples,
        };
        table.warn_if_not_monotonic();
        debug!(
            "arc-length table rebuilt for frames {}..={} (length {:.4})",
            range.start,
            range.end,
            table.total_length()
        );
        Ok(table)
    }

    /// Wrap externally computed samples, e.g. a table restored from disk.
    pub fn from_samples(samples: Vec<ArcLengthSample>) -> Result<Self> {
        let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
            return Err(MotionError::invalid_keyframes("arc-length table is empty"));
        };
        if samples.windows(2).any(|w| w[1].frame <= w[0].frame) {
            return Err(MotionError::invalid_keyframes(
                "arc-length frames must be strictly increasing",
            ));
        }
        let table = Self {
            frame_range: FrameRange {
                start: first.frame,
                end: last.frame,
            },
            samples,
        };
        table.warn_if_not_monotonic();
        Ok(table)
    }

    fn warn_if_not_monotonic(&self) {
        if !self.is_monotonic() {
            warn!(
                "arc-length table over {}..={} is not monotonic; inversion uses the first bracket",
                self.frame_range.start, self.frame_range.end
            );
        }
    }

    #[inline]
    pub fn samples(&self) -> &[ArcLengthSample] {
        &self.samples
    }

    #[inline]
    pub fn frame_range(&self) -> FrameRange {
        self.frame_range
    }

    /// Cumulative distance at the last frame
    #[inline]
    pub fn total_length(&self) -> f64 {
        self.samples.last().map_or(0.0, |s| s.distance)
    }

    pub fn is_monotonic(&self) -> bool {
        self.samples
            .windows(2)
            .all(|w| w[1].distance >= w[0].distance)
    }

    /// Frame (possibly fractional) at which `distance` has been travelled.
    ///
    /// Samples are scanned in frame order. At each sample an exact match
    /// wins, then a bracket with the previous sample in either order is
    /// interpolated linearly. Distances no pair brackets resolve to the last
    /// frame.
    pub fn time_for_distance(&self, distance: f64) -> f64 {
        let mut previous: Option<&ArcLengthSample> = None;
        for b in &self.samples {
            if b.distance == distance {
                return b.frame as f64;
            }
            if let Some(a) = previous {
                let rising = a.distance <= distance && distance <= b.distance;
                let falling = a.distance >= distance && distance >= b.distance;
                if (rising || falling) && b.distance != a.distance {
                    let span = (b.frame - a.frame) as f64;
                    return a.frame as f64
                        + (distance - a.distance) * span / (b.distance - a.distance);
                }
            }
            previous = Some(b);
        }
        self.samples.last().map_or(0.0, |s| s.frame as f64)
    }
}

/// Map clock `time` to the path time at which the distance requested by
/// `distance_curve` is reached.
pub fn remap_time(distance_curve: &Track, time: f64, table: &ArcLengthTable) -> Result<f64> {
    let target = distance_curve.evaluate(time, InterpolationMode::Linear, None)?;
    let remapped = table.time_for_distance(target);
    trace!("remap t={time} -> distance {target:.4} -> t={remapped:.4}");
    Ok(remapped)
}

#[derive(Debug, Clone)]
struct CachedTable {
    revision: u64,
    range: FrameRange,
    table: ArcLengthTable,
}

/// Lazily built table tied to the path revision and frame range it was
/// sampled from.
#[derive(Debug, Clone, Default)]
pub struct ArcLengthCache {
    entry: Option<CachedTable>,
}

impl ArcLengthCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table for `path` over `range`, rebuilt if either changed since the
    /// last call.
    pub fn table(&mut self, path: &Path, range: FrameRange) -> Result<&ArcLengthTable> {
        let entry = match self.entry.take() {
            Some(cached) if cached.revision == path.revision() && cached.range == range => cached,
            _ => CachedTable {
                revision: path.revision(),
                range,
                table: ArcLengthTable::build(path, range)?,
            },
        };
        Ok(&self.entry.insert(entry).table)
    }

    pub fn is_valid_for(&self, path: &Path, range: FrameRange) -> bool {
        self.entry
            .as_ref()
            .is_some_and(|c| c.revision == path.revision() && c.range == range)
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
