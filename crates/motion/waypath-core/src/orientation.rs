//! Tangent-frame orientation for an object travelling along a path.
//!
//! The solver looks at three consecutive positions, derives the direction of
//! travel and the previous direction, and builds a rotation that
//!
//! 1. aligns the configured local axis with the direction of travel (`q1`),
//! 2. twists about it so the configured local up axis meets the frame's up
//!    vector (`q2`),
//! 3. optionally leans into turns proportionally to the XY turn angle (`q3`).
//!
//! World up is fixed to `+Z`. When the object is not moving the last rotation
//! is held.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use nalgebra::{Quaternion, Unit, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::{MotionError, Result};

/// Differences shorter than this count as "not moving".
pub const DIRECTION_EPSILON: f64 = 1e-12;

/// Signed principal axis in object-local space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Axis {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Axis {
    pub fn vector(self) -> Vector3<f64> {
        match self {
            Self::PosX => Vector3::x(),
            Self::NegX => -Vector3::x(),
            Self::PosY => Vector3::y(),
            Self::NegY => -Vector3::y(),
            Self::PosZ => Vector3::z(),
            Self::NegZ => -Vector3::z(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::PosX => "X",
            Self::NegX => "-X",
            Self::PosY => "Y",
            Self::NegY => "-Y",
            Self::PosZ => "Z",
            Self::NegZ => "-Z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Axis {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "X" | "+X" => Ok(Self::PosX),
            "-X" => Ok(Self::NegX),
            "Y" | "+Y" => Ok(Self::PosY),
            "-Y" => Ok(Self::NegY),
            "Z" | "+Z" => Ok(Self::PosZ),
            "-Z" => Ok(Self::NegZ),
            _ => Err(MotionError::UnknownAxis {
                name: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Axis {
    type Error = MotionError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Axis> for String {
    fn from(axis: Axis) -> Self {
        axis.name().to_string()
    }
}

/// Which local axes track the path and how much the object banks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationConfig {
    /// Local axis kept tangent to the path
    pub align_axis: Axis,
    /// Local axis kept pointing towards the frame's up vector
    pub up_axis: Axis,
    /// Bank angle per radian of XY turn
    pub bank_coefficient: f64,
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self {
            align_axis: Axis::PosY,
            up_axis: Axis::PosZ,
            bank_coefficient: 0.0,
        }
    }
}

impl OrientationConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.bank_coefficient.is_finite() {
            return Err(MotionError::invalid_config(format!(
                "bank coefficient must be finite, got {}",
                self.bank_coefficient
            )));
        }
        Ok(())
    }
}

/// Orthonormal basis derived from the direction of travel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentFrame {
    pub tangent: Vector3<f64>,
    pub lateral: Vector3<f64>,
    pub up: Vector3<f64>,
}

#[inline]
fn normalize_or_zero(v: Vector3<f64>) -> Vector3<f64> {
    let n = v.norm();
    if n < DIRECTION_EPSILON {
        Vector3::zeros()
    } else {
        v / n
    }
}

/// Unit vector from `from` to `to`, or zero when the points coincide.
#[inline]
pub fn direction(from: &Vector3<f64>, to: &Vector3<f64>) -> Vector3<f64> {
    normalize_or_zero(to - from)
}

/// Tangent/lateral/up frame for a unit `tangent`; `None` for the zero vector.
///
/// A tangent parallel to world up has no defined lateral; lateral and up are
/// then zero.
pub fn tangent_frame(tangent: &Vector3<f64>) -> Option<TangentFrame> {
    if tangent.norm() < DIRECTION_EPSILON {
        return None;
    }
    let lateral = normalize_or_zero(Vector3::z().cross(tangent));
    let mut up = normalize_or_zero(tangent.cross(&lateral));
    if up.z < 0.0 {
        up = -up;
    }
    Some(TangentFrame {
        tangent: *tangent,
        lateral,
        up,
    })
}

/// Signed angle between the XY projections of two directions.
///
/// Positive when `current` is counter-clockwise from `previous` seen from
/// `+Z`; zero when either projection vanishes.
pub fn turn_angle_xy(previous: &Vector3<f64>, current: &Vector3<f64>) -> f64 {
    let a = normalize_or_zero(Vector3::new(previous.x, previous.y, 0.0));
    let b = normalize_or_zero(Vector3::new(current.x, current.y, 0.0));
    if a == Vector3::zeros() || b == Vector3::zeros() {
        return 0.0;
    }
    let cross_z = a.x * b.y - a.y * b.x;
    cross_z.atan2(a.dot(&b))
}

/// Shortest-arc rotation taking direction `from` onto direction `to`.
pub fn shortest_arc(from: &Vector3<f64>, to: &Vector3<f64>) -> Result<UnitQuaternion<f64>> {
    let (Some(a), Some(b)) = (
        Unit::try_new(*from, DIRECTION_EPSILON),
        Unit::try_new(*to, DIRECTION_EPSILON),
    ) else {
        return Err(MotionError::invalid_argument(format!(
            "cannot align zero-length vectors ({from:?} -> {to:?})"
        )));
    };

    let (a, b) = (a.into_inner(), b.into_inner());
    let axis = a.cross(&b);
    if axis.norm() < DIRECTION_EPSILON {
        if a.dot(&b) > 0.0 {
            return Ok(UnitQuaternion::identity());
        }
        // Antiparallel: half turn about any perpendicular.
        let helper = if a.x.abs() < 0.9 {
            Vector3::x()
        } else {
            Vector3::y()
        };
        let perpendicular = Unit::new_normalize(a.cross(&helper));
        return Ok(UnitQuaternion::from_axis_angle(&perpendicular, PI));
    }
    Ok(UnitQuaternion::from_axis_angle(
        &Unit::new_normalize(axis),
        a.angle(&b),
    ))
}

fn shortest_arc_or_identity(from: &Vector3<f64>, to: &Vector3<f64>) -> UnitQuaternion<f64> {
    shortest_arc(from, to).unwrap_or_else(|err| {
        warn!("orientation [{}]: {err}; using identity", err.category());
        UnitQuaternion::identity()
    })
}

/// Rotation for an object at `current`, arriving from `previous` and heading
/// to `next`.
///
/// Returns `previous_rotation` unchanged when `current == next`.
pub fn solve_orientation(
    previous: &Vector3<f64>,
    current: &Vector3<f64>,
    next: &Vector3<f64>,
    config: &OrientationConfig,
    previous_rotation: UnitQuaternion<f64>,
) -> UnitQuaternion<f64> {
    let tangent = direction(current, next);
    let Some(frame) = tangent_frame(&tangent) else {
        debug!("orientation: zero tangent at {current:?}, holding rotation");
        return previous_rotation;
    };

    let mut previous_tangent = direction(previous, current);
    if previous_tangent == Vector3::zeros() {
        previous_tangent = tangent;
    }
    let turn = turn_angle_xy(&previous_tangent, &tangent);

    let q1 = shortest_arc_or_identity(&config.align_axis.vector(), &frame.tangent);
    let rotated_up = q1 * config.up_axis.vector();
    let q2 = shortest_arc_or_identity(&rotated_up, &frame.up);
    let rotation = q2 * q1;

    if turn.abs() > 0.0 {
        let q3 = UnitQuaternion::from_axis_angle(
            &Unit::new_unchecked(frame.tangent),
            config.bank_coefficient * turn,
        );
        q3 * rotation
    } else {
        rotation
    }
}

/// `[w, x, y, z]` component layout
#[inline]
pub fn quat_to_wxyz(q: &UnitQuaternion<f64>) -> [f64; 4] {
    [q.w, q.i, q.j, q.k]
}

/// Inverse of [`quat_to_wxyz`]; renormalizes the input.
#[inline]
pub fn quat_from_wxyz(wxyz: [f64; 4]) -> UnitQuaternion<f64> {
    let [w, x, y, z] = wxyz;
    UnitQuaternion::new_normalize(Quaternion::new(w, x, y, z))
}
