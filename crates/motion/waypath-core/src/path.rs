//! Three independent axis tracks evaluated as one 3-D position.

use std::sync::atomic::{AtomicU64, Ordering};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::interpolation::InterpolationMode;
use crate::oscillation::OscillationConfig;
use crate::track::{Keyframe, Track};
use crate::{MotionError, Result};

/// World-space coordinate selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    X,
    Y,
    Z,
}

impl Component {
    pub const ALL: [Component; 3] = [Component::X, Component::Y, Component::Z];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// Evaluation settings shared by all three axes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PathConfig {
    #[serde(default)]
    pub mode: InterpolationMode,
    #[serde(default)]
    pub oscillation: OscillationConfig,
}

impl PathConfig {
    pub fn with_mode(mode: InterpolationMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.mode.validate()?;
        self.oscillation.validate()
    }
}

/// A keyframed position sample supplied by the host's route generator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub frame: i64,
    pub position: [f64; 3],
}

impl Waypoint {
    #[inline]
    pub fn new(frame: i64, position: [f64; 3]) -> Self {
        Self { frame, position }
    }
}

static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

/// Revisions are unique across all paths in the process.
#[inline]
fn next_revision() -> u64 {
    NEXT_REVISION.fetch_add(1, Ordering::Relaxed)
}

/// Per-object path: one track per axis plus optional Hermite velocity tracks.
///
/// Construction and every mutation draw a fresh [`Path::revision`] so derived
/// data (arc-length tables) can tell when it is stale.
#[derive(Debug, Clone)]
pub struct Path {
    tracks: [Track; 3],
    velocity: Option<[Track; 3]>,
    config: PathConfig,
    revision: u64,
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.tracks == other.tracks && self.velocity == other.velocity && self.config == other.config
    }
}

impl Path {
    pub fn new(x: Track, y: Track, z: Track, config: PathConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            tracks: [x, y, z],
            velocity: None,
            config,
            revision: next_revision(),
        })
    }

    /// Build one keyframe per waypoint on each axis.
    pub fn from_waypoints(waypoints: &[Waypoint], config: PathConfig) -> Result<Self> {
        if waypoints.is_empty() {
            return Err(MotionError::invalid_keyframes("no waypoints supplied"));
        }
        if let Some(pair) = waypoints.windows(2).find(|w| w[1].frame <= w[0].frame) {
            return Err(MotionError::invalid_keyframes(format!(
                "waypoint frames must be strictly increasing ({} then {})",
                pair[0].frame, pair[1].frame
            )));
        }
        let axis = |i: usize| {
            Track::new(
                waypoints
                    .iter()
                    .map(|w| Keyframe::new(w.frame as f64, w.position[i]))
                    .collect(),
            )
        };
        Self::new(axis(0)?, axis(1)?, axis(2)?, config)
    }

    /// Attach explicit per-axis velocity tracks used by Hermite.
    pub fn with_velocity_tracks(mut self, velocity: [Track; 3]) -> Self {
        self.set_velocity_tracks(Some(velocity));
        self
    }

    pub fn set_velocity_tracks(&mut self, velocity: Option<[Track; 3]>) {
        self.velocity = velocity;
        self.revision = next_revision();
    }

    /// Derive velocity tracks from the position keyframes' segment slopes.
    pub fn sync_velocities(&mut self) {
        let [x, y, z] = &self.tracks;
        let derived = [
            x.derive_velocity_track(),
            y.derive_velocity_track(),
            z.derive_velocity_track(),
        ];
        self.set_velocity_tracks(Some(derived));
    }

    pub fn set_track(&mut self, component: Component, track: Track) {
        self.tracks[component.index()] = track;
        self.revision = next_revision();
    }

    pub fn set_config(&mut self, config: PathConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.revision = next_revision();
        Ok(())
    }

    #[inline]
    pub fn track(&self, component: Component) -> &Track {
        &self.tracks[component.index()]
    }

    #[inline]
    pub fn velocity_track(&self, component: Component) -> Option<&Track> {
        self.velocity.as_ref().map(|v| &v[component.index()])
    }

    #[inline]
    pub fn config(&self) -> &PathConfig {
        &self.config
    }

    #[inline]
    pub fn mode(&self) -> InterpolationMode {
        self.config.mode
    }

    /// Content revision; changes whenever tracks or config change and never
    /// repeats between independently built paths. Clones share it.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Span covered by any axis' keyframes, as `(first, last)` time.
    pub fn time_span(&self) -> (f64, f64) {
        self.tracks.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| {
            (lo.min(t.first().time), hi.max(t.last().time))
        })
    }

    /// Interpolated position at `time` with oscillation applied.
    pub fn position(&self, time: f64) -> Result<Vector3<f64>> {
        let mode = self.config.mode;
        let mut out = Vector3::zeros();
        for c in Component::ALL {
            out[c.index()] = self
                .track(c)
                .evaluate(time, mode, self.velocity_track(c))?;
        }
        Ok(out + self.config.oscillation.offset(time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oscillation::AxisMask;

    fn straight() -> Path {
        Path::from_waypoints(
            &[Waypoint::new(0, [0.0, 0.0, 0.0]), Waypoint::new(24, [10.0, 0.0, 0.0])],
            PathConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn linear_midpoint() {
        let p = straight().position(12.0).unwrap();
        assert_eq!(p, Vector3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn axes_keep_independent_keyframes() {
        let x = Track::from_pairs(&[(0.0, 0.0), (24.0, 10.0)]).unwrap();
        let path = Path::new(
            x,
            Track::constant(2.0),
            Track::from_pairs(&[(0.0, 1.0), (6.0, 4.0), (12.0, 1.0)]).unwrap(),
            PathConfig::default(),
        )
        .unwrap();
        let p = path.position(6.0).unwrap();
        assert_eq!(p, Vector3::new(2.5, 2.0, 4.0));
        assert_eq!(path.time_span(), (0.0, 24.0));
    }

    #[test]
    fn rejects_unordered_waypoints() {
        let err = Path::from_waypoints(
            &[Waypoint::new(5, [0.0; 3]), Waypoint::new(5, [1.0; 3])],
            PathConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, MotionError::InvalidKeyframes { .. }));
        assert!(Path::from_waypoints(&[], PathConfig::default()).is_err());
    }

    #[test]
    fn mutations_bump_revision() {
        let mut path = straight();
        let r0 = path.revision();
        path.set_track(Component::Y, Track::constant(1.0));
        assert!(path.revision() > r0);
        let r1 = path.revision();
        path.sync_velocities();
        assert!(path.revision() > r1);
        assert!(path.velocity_track(Component::X).is_some());

        let r2 = path.revision();
        let bad = PathConfig::with_mode(InterpolationMode::CatmullRom { tension: -1.0 });
        assert!(path.set_config(bad).is_err());
        assert_eq!(path.revision(), r2);
    }

    #[test]
    fn independently_built_paths_never_share_a_revision() {
        let a = straight();
        let b = straight();
        assert_eq!(a, b);
        assert_ne!(a.revision(), b.revision());
        assert_eq!(a.clone().revision(), a.revision());
    }

    #[test]
    fn oscillation_is_added_after_interpolation() {
        let mut path = straight();
        let config = PathConfig {
            oscillation: OscillationConfig::new(
                AxisMask {
                    x: false,
                    y: true,
                    z: false,
                },
                0.37,
                2.0,
            ),
            ..PathConfig::default()
        };
        path.set_config(config).unwrap();
        let p = path.position(12.0).unwrap();
        assert_eq!(p.x, 5.0);
        assert_eq!(p.z, 0.0);
        assert_eq!(p.y, config.oscillation.offset(12.0).y);
    }
}
