//! Scalar curve-segment kernels.
//!
//! Every kernel is a pure function of its control data. Degenerate time
//! intervals are reported as errors; callers decide on the fallback.

use crate::{MotionError, Result};

/// Rows of the tension-parameterised Catmull-Rom basis, applied as
/// `[u^3, u^2, u, 1] * M * [p0, p1, p2, p3]`.
#[inline]
fn catmull_rom_basis(tension: f64) -> [[f64; 4]; 4] {
    let s = tension;
    [
        [-s, 2.0 - s, s - 2.0, s],
        [2.0 * s, s - 3.0, 3.0 - 2.0 * s, -s],
        [-s, 0.0, s, 0.0],
        [0.0, 1.0, 0.0, 0.0],
    ]
}

const HERMITE_BASIS: [[f64; 4]; 4] = [
    [2.0, -2.0, 1.0, 1.0],
    [-3.0, 3.0, -2.0, -1.0],
    [0.0, 0.0, 1.0, 0.0],
    [1.0, 0.0, 0.0, 0.0],
];

/// Evaluate `[u^3, u^2, u, 1] * basis * control`.
#[inline]
fn cubic_form(u: f64, basis: &[[f64; 4]; 4], control: [f64; 4]) -> f64 {
    let powers = [u * u * u, u * u, u, 1.0];
    let mut out = 0.0;
    for (col, c) in control.iter().enumerate() {
        let weight: f64 = powers
            .iter()
            .zip(basis.iter())
            .map(|(p, row)| p * row[col])
            .sum();
        out += weight * c;
    }
    out
}

/// Linear interpolation through `(t0, x0)` and `(t1, x1)`.
///
/// Extrapolates linearly outside `[t0, t1]`.
#[inline]
pub fn linear(t: f64, t0: f64, t1: f64, x0: f64, x1: f64) -> Result<f64> {
    if t1 == t0 {
        return Err(MotionError::division_by_zero(format!(
            "linear segment has zero duration at t={t0}"
        )));
    }
    Ok(x0 + (t - t0) / (t1 - t0) * (x1 - x0))
}

/// Catmull-Rom segment between `p1` (at `times[1]`) and `p2` (at `times[2]`).
///
/// `p0` and `p3` shape the tangents; `times[0]` and `times[3]` are carried for
/// symmetry with the control points but do not enter the uniform basis.
/// A tension of `0.5` gives the standard Catmull-Rom spline.
pub fn catmull_rom(t: f64, times: [f64; 4], points: [f64; 4], tension: f64) -> Result<f64> {
    let [_, t1, t2, _] = times;
    if t2 == t1 {
        return Err(MotionError::division_by_zero(format!(
            "catmull-rom segment has zero duration at t={t1}"
        )));
    }
    let u = (t - t1) / (t2 - t1);
    Ok(cubic_form(u, &catmull_rom_basis(tension), points))
}

/// Cubic Hermite segment from `(t0, p0)` to `(t1, p1)`.
///
/// `v0` and `v1` are slopes per unit of time; they are scaled by the segment
/// duration before entering the normalised basis.
pub fn hermite(t: f64, t0: f64, t1: f64, p0: f64, p1: f64, v0: f64, v1: f64) -> Result<f64> {
    if t0 == t1 {
        return Err(MotionError::invalid_argument(format!(
            "hermite control times must differ (t0 = t1 = {t0})"
        )));
    }
    let duration = t1 - t0;
    let u = (t - t0) / duration;
    Ok(cubic_form(
        u,
        &HERMITE_BASIS,
        [p0, p1, v0 * duration, v1 * duration],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_hits_endpoints_and_extrapolates() {
        assert_eq!(linear(2.0, 2.0, 6.0, -1.0, 7.0).unwrap(), -1.0);
        assert_eq!(linear(6.0, 2.0, 6.0, -1.0, 7.0).unwrap(), 7.0);
        assert_eq!(linear(8.0, 2.0, 6.0, -1.0, 7.0).unwrap(), 11.0);
    }

    #[test]
    fn zero_duration_segments_fail() {
        assert!(matches!(
            linear(1.0, 3.0, 3.0, 0.0, 1.0),
            Err(MotionError::DivisionByZero { .. })
        ));
        assert!(matches!(
            catmull_rom(1.0, [0.0, 3.0, 3.0, 4.0], [0.0; 4], 0.5),
            Err(MotionError::DivisionByZero { .. })
        ));
        assert!(matches!(
            hermite(1.0, 3.0, 3.0, 0.0, 1.0, 0.0, 0.0),
            Err(MotionError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn catmull_rom_half_tension_matches_textbook_form() {
        let p = [1.0, 4.0, -2.0, 5.0];
        for i in 0..=10 {
            let u = i as f64 / 10.0;
            let expected = 0.5
                * ((2.0 * p[1])
                    + (-p[0] + p[2]) * u
                    + (2.0 * p[0] - 5.0 * p[1] + 4.0 * p[2] - p[3]) * u * u
                    + (-p[0] + 3.0 * p[1] - 3.0 * p[2] + p[3]) * u * u * u);
            let got = catmull_rom(u, [-1.0, 0.0, 1.0, 2.0], p, 0.5).unwrap();
            assert!((got - expected).abs() < 1e-12, "u={u}: {got} vs {expected}");
        }
    }

    #[test]
    fn hermite_flat_tangents_ease() {
        let mid = hermite(5.0, 0.0, 10.0, 0.0, 10.0, 0.0, 0.0).unwrap();
        assert!((mid - 5.0).abs() < 1e-12);
        let quarter = hermite(2.5, 0.0, 10.0, 0.0, 10.0, 0.0, 0.0).unwrap();
        assert!(quarter < 2.5);
    }
}
