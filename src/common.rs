// Copyright 2026 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common mathematical operations

use arrayvec::ArrayVec;

/// Curve precision used when none is given.
pub const DEFAULT_PRECISION: u32 = 3;

/// The relative tolerance `10^-precision`.
#[inline]
pub fn precision_ratio(precision: u32) -> f64 {
    let exp = i32::try_from(precision).unwrap_or(i32::MAX);
    10f64.powi(-exp)
}

/// Convert degrees to radians.
#[inline]
pub fn to_rad(deg: f64) -> f64 {
    deg.to_radians()
}

/// Convert radians to degrees.
#[inline]
pub fn to_deg(rad: f64) -> f64 {
    rad.to_degrees()
}

/// Map an angle in degrees onto `[0, 360)`.
///
/// ```
/// use planar::common::normalize_angle;
///
/// assert_eq!(normalize_angle(-90.0), 270.0);
/// assert_eq!(normalize_angle(720.0), 0.0);
/// ```
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle % 360.0;
    if a < 0.0 {
        a + 360.0
    } else {
        a
    }
}

/// Snap a value to the nearest multiple of `grid`.
#[inline]
pub fn snap_to_grid(value: f64, grid: f64) -> f64 {
    grid * (value / grid).round()
}

/// Round a value to `precision` decimal places.
#[inline]
pub fn round_to(value: f64, precision: u32) -> f64 {
    let f = match precision {
        0 => 1.0,
        1 => 10.0,
        2 => 100.0,
        3 => 1000.0,
        _ => 10f64.powi(i32::try_from(precision).unwrap_or(i32::MAX)),
    };
    (value * f).round() / f
}

/// Determinant of a 2x2 matrix given in row-major order.
#[inline]
pub fn det2(m: [[f64; 2]; 2]) -> f64 {
    m[0][0] * m[1][1] - m[0][1] * m[1][0]
}

/// Determinant of a 3x3 matrix given in row-major order.
#[inline]
pub fn det3(m: [[f64; 3]; 3]) -> f64 {
    m[0][0] * m[1][1] * m[2][2] - m[0][0] * m[1][2] * m[2][1] - m[0][1] * m[1][0] * m[2][2]
        + m[0][1] * m[1][2] * m[2][0]
        + m[0][2] * m[1][0] * m[2][1]
        - m[0][2] * m[1][1] * m[2][0]
}

/// Find the parameters in the open interval `(0, 1)` where the derivative of
/// a one-dimensional cubic Bézier with control values `p0..p3` vanishes.
///
/// The derivative is the quadratic `a t² + b t + c`. When `a` is numerically
/// zero the linear equation is solved instead; when `b` is too, there is no
/// extremum.
pub fn cubic_extrema(p0: f64, p1: f64, p2: f64, p3: f64) -> ArrayVec<f64, 2> {
    const EPSILON: f64 = 1e-12;
    let mut result = ArrayVec::new();
    let a = -3.0 * p0 + 9.0 * p1 - 9.0 * p2 + 3.0 * p3;
    let b = 6.0 * p0 - 12.0 * p1 + 6.0 * p2;
    let c = 3.0 * p1 - 3.0 * p0;
    let in_range = |t: f64| 0.0 < t && t < 1.0;

    if a.abs() < EPSILON {
        if b.abs() < EPSILON {
            return result;
        }
        let t = -c / b;
        if in_range(t) {
            result.push(t);
        }
        return result;
    }

    let disc = b * b - 4.0 * c * a;
    if disc < 0.0 {
        return result;
    }
    let sqrt_disc = disc.sqrt();
    for t in [(-b + sqrt_disc) / (2.0 * a), (-b - sqrt_disc) / (2.0 * a)] {
        if in_range(t) {
            result.push(t);
        }
    }
    result
}
