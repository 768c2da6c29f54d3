//! Coherent 3-D gradient noise (improved Perlin).
//!
//! The permutation table is a constant, so every caller shares the same
//! immutable field and results are reproducible across objects and runs.

#[rustfmt::skip]
const PERM: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252,
    219, 203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168,
    68, 175, 74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211,
    133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80,
    73, 209, 76, 132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100,
    109, 198, 173, 186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82,
    85, 212, 207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248,
    152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98,
    108, 110, 79, 113, 224, 232, 178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238,
    210, 144, 12, 191, 179, 162, 241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31,
    181, 199, 106, 157, 184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205,
    93, 222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

#[inline]
fn perm(i: usize) -> usize {
    PERM[i & 255] as usize
}

#[inline]
fn hash(x: usize, y: usize, z: usize) -> usize {
    perm(perm(perm(x) + y) + z)
}

#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Dot product of the offset with one of 12 cube-edge gradients.
#[inline]
fn grad(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { v } else { -v };
    u + v
}

/// Signed noise in roughly `[-1, 1]`; zero on integer lattice points.
pub fn noise3(x: f64, y: f64, z: f64) -> f64 {
    let (fx, fy, fz) = (x.floor(), y.floor(), z.floor());
    // Lattice coordinates wrap every 256 cells; `as i64` then masking keeps
    // negative cells in range.
    let xi = (fx as i64 & 255) as usize;
    let yi = (fy as i64 & 255) as usize;
    let zi = (fz as i64 & 255) as usize;
    let (x, y, z) = (x - fx, y - fy, z - fz);
    let (u, v, w) = (fade(x), fade(y), fade(z));

    let c000 = grad(hash(xi, yi, zi), x, y, z);
    let c100 = grad(hash(xi + 1, yi, zi), x - 1.0, y, z);
    let c010 = grad(hash(xi, yi + 1, zi), x, y - 1.0, z);
    let c110 = grad(hash(xi + 1, yi + 1, zi), x - 1.0, y - 1.0, z);
    let c001 = grad(hash(xi, yi, zi + 1), x, y, z - 1.0);
    let c101 = grad(hash(xi + 1, yi, zi + 1), x - 1.0, y, z - 1.0);
    let c011 = grad(hash(xi, yi + 1, zi + 1), x, y - 1.0, z - 1.0);
    let c111 = grad(hash(xi + 1, yi + 1, zi + 1), x - 1.0, y - 1.0, z - 1.0);

    lerp(
        lerp(lerp(c000, c100, u), lerp(c010, c110, u), v),
        lerp(lerp(c001, c101, u), lerp(c011, c111, u), v),
        w,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lattice_points_are_zero() {
        for i in -3..3 {
            let f = i as f64;
            assert_eq!(noise3(f, 0.0, 0.0), 0.0);
            assert_eq!(noise3(0.0, f, 0.0), 0.0);
            assert_eq!(noise3(0.0, 0.0, f), 0.0);
        }
    }

    #[test]
    fn deterministic_and_bounded() {
        let mut any_nonzero = false;
        for i in 0..500 {
            let t = i as f64 * 0.137 - 20.0;
            let a = noise3(t, 0.3, -1.7);
            assert_eq!(a, noise3(t, 0.3, -1.7));
            assert!(a.abs() <= 1.1, "noise({t}) = {a}");
            any_nonzero |= a != 0.0;
        }
        assert!(any_nonzero);
    }

    #[test]
    fn continuous() {
        for i in 0..200 {
            let t = i as f64 * 0.05;
            let d = (noise3(t + 1e-6, 0.0, 0.0) - noise3(t, 0.0, 0.0)).abs();
            assert!(d < 1e-4);
        }
    }
}
