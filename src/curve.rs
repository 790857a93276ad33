// Copyright 2026 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier curves.
//!
//! Arc length has no closed form for cubics, so everything here that depends
//! on distance along the curve works on its *subdivisions*: the curve is
//! repeatedly halved at `t = 0.5` until the summed chord length stops
//! changing by more than `10^-precision` relative, and lengths, points and
//! tangents at a length are then found by walking those chords and bisecting
//! within the one that contains the target.

use std::fmt;

use crate::common::{cubic_extrema, precision_ratio};
use crate::log::{debug, trace};
use crate::{CurveOpts, Error, Line, Point, Polyline, Rect, Result};

/// A cubic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Curve {
    /// The start point.
    pub start: Point,
    /// The control point leaving the start.
    pub control_point1: Point,
    /// The control point arriving at the end.
    pub control_point2: Point,
    /// The end point.
    pub end: Point,
}

/// The intermediate points of de Casteljau's construction at some `t`.
///
/// The two halves of the curve divided at `t` are
/// `start, start_control_point1, start_control_point2, divider` and
/// `divider, divider_control_point1, divider_control_point2, end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkeletonPoints {
    /// First control point of the first half.
    pub start_control_point1: Point,
    /// Second control point of the first half.
    pub start_control_point2: Point,
    /// The point on the curve at `t`.
    pub divider: Point,
    /// First control point of the second half.
    pub divider_control_point1: Point,
    /// Second control point of the second half.
    pub divider_control_point2: Point,
}

impl Curve {
    /// Create a new cubic Bézier segment.
    #[inline]
    pub fn new<P: Into<Point>>(start: P, control_point1: P, control_point2: P, end: P) -> Curve {
        Curve {
            start: start.into(),
            control_point1: control_point1.into(),
            control_point2: control_point2.into(),
            end: end.into(),
        }
    }

    /// A degenerate curve with all four points at `p`.
    #[inline]
    pub fn point(p: Point) -> Curve {
        Curve::new(p, p, p, p)
    }

    /// A smooth open spline passing through every knot.
    ///
    /// The first control points solve a tridiagonal system so that
    /// consecutive curves share first and second derivatives at the knots.
    /// Two knots give a single straight curve.
    ///
    /// # Errors
    ///
    /// [`Error::TooFewPoints`] when given fewer than two knots.
    pub fn through_points(knots: &[Point]) -> Result<Vec<Curve>> {
        if knots.len() < 2 {
            return Err(Error::TooFewPoints {
                required: 2,
                found: knots.len(),
            });
        }
        let n = knots.len() - 1;

        if n == 1 {
            let c1 = Point::new(
                (2.0 * knots[0].x + knots[1].x) / 3.0,
                (2.0 * knots[0].y + knots[1].y) / 3.0,
            );
            let c2 = Point::new(2.0 * c1.x - knots[0].x, 2.0 * c1.y - knots[0].y);
            return Ok(vec![Curve::new(knots[0], c1, c2, knots[1])]);
        }

        let rhs = |coord: fn(&Point) -> f64| {
            let mut rhs = vec![0.0; n];
            for i in 1..n - 1 {
                rhs[i] = 4.0 * coord(&knots[i]) + 2.0 * coord(&knots[i + 1]);
            }
            rhs[0] = coord(&knots[0]) + 2.0 * coord(&knots[1]);
            rhs[n - 1] = (8.0 * coord(&knots[n - 1]) + coord(&knots[n])) / 2.0;
            rhs
        };
        let xs = solve_first_control_points(&rhs(|p| p.x));
        let ys = solve_first_control_points(&rhs(|p| p.y));

        let curves = (0..n)
            .map(|i| {
                let c1 = Point::new(xs[i], ys[i]);
                let c2 = if i < n - 1 {
                    Point::new(
                        2.0 * knots[i + 1].x - xs[i + 1],
                        2.0 * knots[i + 1].y - ys[i + 1],
                    )
                } else {
                    Point::new((knots[n].x + xs[n - 1]) / 2.0, (knots[n].y + ys[n - 1]) / 2.0)
                };
                Curve::new(knots[i], c1, c2, knots[i + 1])
            })
            .collect();
        Ok(curves)
    }

    /// Whether the curve is more than a single point.
    #[inline]
    pub fn is_differentiable(&self) -> bool {
        !(self.start == self.control_point1
            && self.control_point1 == self.control_point2
            && self.control_point2 == self.end)
    }

    /// Distance between start and end.
    #[inline]
    pub fn endpoint_distance(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Evaluate the curve at `t` from the polynomial form.
    fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        Point::new(
            a * self.start.x + b * self.control_point1.x + c * self.control_point2.x + d * self.end.x,
            a * self.start.y + b * self.control_point1.y + c * self.control_point2.y + d * self.end.y,
        )
    }

    /// The tight bounding box.
    ///
    /// The box is found from the endpoints and the points where either
    /// coordinate's derivative vanishes, not from the control polygon.
    pub fn bbox(&self) -> Rect {
        let mut points = vec![self.start, self.end];
        let xs = cubic_extrema(
            self.start.x,
            self.control_point1.x,
            self.control_point2.x,
            self.end.x,
        );
        let ys = cubic_extrema(
            self.start.y,
            self.control_point1.y,
            self.control_point2.y,
            self.end.y,
        );
        points.extend(xs.iter().chain(ys.iter()).map(|&t| self.eval(t)));
        Rect::from_point_union(&points).unwrap_or_default()
    }

    /// The points of de Casteljau's construction at `t`.
    ///
    /// Values of `t` outside `(0, 1)` give the construction at the nearer
    /// end, so the divider is the start or the end point.
    pub fn skeleton_points(&self, t: f64) -> SkeletonPoints {
        let Curve {
            start,
            control_point1: c1,
            control_point2: c2,
            end,
        } = *self;
        if t <= 0.0 {
            return SkeletonPoints {
                start_control_point1: start,
                start_control_point2: start,
                divider: start,
                divider_control_point1: c1,
                divider_control_point2: c2,
            };
        }
        if t >= 1.0 {
            return SkeletonPoints {
                start_control_point1: c1,
                start_control_point2: c2,
                divider: end,
                divider_control_point1: end,
                divider_control_point2: end,
            };
        }
        let m1 = start.lerp(c1, t);
        let m2 = c1.lerp(c2, t);
        let m3 = c2.lerp(end, t);
        let s1 = m1.lerp(m2, t);
        let s2 = m2.lerp(m3, t);
        SkeletonPoints {
            start_control_point1: m1,
            start_control_point2: s1,
            divider: s1.lerp(s2, t),
            divider_control_point1: s2,
            divider_control_point2: m3,
        }
    }

    /// Split the curve at parameter `t`.
    ///
    /// At `t <= 0` the first half is a point at the start and the second the
    /// whole curve; at `t >= 1` the other way around.
    pub fn divide_at_t(&self, t: f64) -> (Curve, Curve) {
        if t <= 0.0 {
            return (Curve::point(self.start), *self);
        }
        if t >= 1.0 {
            return (*self, Curve::point(self.end));
        }
        let s = self.skeleton_points(t);
        (
            Curve::new(
                self.start,
                s.start_control_point1,
                s.start_control_point2,
                s.divider,
            ),
            Curve::new(
                s.divider,
                s.divider_control_point1,
                s.divider_control_point2,
                self.end,
            ),
        )
    }

    /// Split the curve at `ratio` of its length.
    pub fn divide_at(&self, ratio: f64, opts: CurveOpts<'_>) -> (Curve, Curve) {
        if ratio <= 0.0 {
            return self.divide_at_t(0.0);
        }
        if ratio >= 1.0 {
            return self.divide_at_t(1.0);
        }
        self.divide_at_t(self.t_at(ratio, opts))
    }

    /// Split the curve at `length` along it; negative lengths count from the
    /// end.
    pub fn divide_at_length(&self, length: f64, opts: CurveOpts<'_>) -> (Curve, Curve) {
        self.divide_at_t(self.t_at_length(length, opts))
    }

    /// Halve the curve repeatedly until its flattened length converges.
    ///
    /// Every round splits each subdivision at `t = 0.5` and sums the chord
    /// lengths. After at least two rounds, iteration stops once the relative
    /// change of that sum drops below `10^-precision`. A curve whose control
    /// points lie on the line through its endpoints never changes its sum, so
    /// it is always split `2 * precision` times instead.
    ///
    /// A precision of 0, or a curve that is a single point, yields the curve
    /// itself.
    pub fn subdivisions(&self, precision: u32) -> Vec<Curve> {
        let mut subdivisions = vec![*self];
        if precision == 0 || !self.is_differentiable() {
            return subdivisions;
        }

        let ratio = precision_ratio(precision);
        let is_line = self.control_point1.cross(self.start, self.end) == 0.0
            && self.control_point2.cross(self.start, self.end) == 0.0;
        // An S-shaped curve can measure the same after one round as before.
        let min_iterations = if is_line {
            precision.saturating_mul(2)
        } else {
            2
        };

        let mut previous_length = self.endpoint_distance();
        let mut iteration = 0;
        loop {
            iteration += 1;
            let next: Vec<Curve> = subdivisions
                .iter()
                .flat_map(|c| {
                    let (a, b) = c.divide_at_t(0.5);
                    [a, b]
                })
                .collect();
            let length: f64 = next.iter().map(Curve::endpoint_distance).sum();
            trace!(iteration, length, "curve subdivision round");

            if iteration >= min_iterations {
                let observed = if length != 0.0 {
                    (length - previous_length) / length
                } else {
                    0.0
                };
                if observed < ratio || !observed.is_finite() {
                    debug!(iteration, count = next.len(), "curve subdivided");
                    return next;
                }
            }
            subdivisions = next;
            previous_length = length;
        }
    }

    /// Flattened length of the curve.
    pub fn length(&self, opts: CurveOpts<'_>) -> f64 {
        opts.subdivisions_of(self)
            .iter()
            .map(Curve::endpoint_distance)
            .sum()
    }

    /// Length of the curve up to parameter `t`.
    ///
    /// Cached subdivisions in `opts` describe the whole curve and are not
    /// used; the part up to `t` is subdivided afresh.
    pub fn length_at_t(&self, t: f64, opts: CurveOpts<'_>) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        let (head, _) = self.divide_at_t(t);
        head.length(CurveOpts::new(opts.precision))
    }

    /// The parameter at `length` along the curve.
    ///
    /// Negative lengths are measured backwards from the end. A length beyond
    /// the curve gives 1 (or 0 when measuring from the end).
    pub fn t_at_length(&self, length: f64, opts: CurveOpts<'_>) -> f64 {
        let from_start = length >= 0.0;
        let length = length.abs();
        let subdivisions = opts.subdivisions_of(self);
        let n = subdivisions.len();
        let mut size = 1.0 / n as f64;

        // Find the chord containing the target. `dist_from_start` and
        // `dist_from_end` locate the target on it.
        let mut found = None;
        let mut l = 0.0;
        for i in 0..n {
            let index = if from_start { i } else { n - 1 - i };
            let sub = subdivisions[index];
            let d = sub.endpoint_distance();
            if length <= l + d {
                let (ds, de) = if from_start {
                    (length - l, d + l - length)
                } else {
                    (d + l - length, length - l)
                };
                found = Some((sub, index, ds, de));
                break;
            }
            l += d;
        }
        let Some((mut sub, index, mut dist_from_start, mut dist_from_end)) = found else {
            return if from_start { 1.0 } else { 0.0 };
        };

        let curve_length: f64 = subdivisions.iter().map(Curve::endpoint_distance).sum();
        let relative = |d: f64| {
            if curve_length != 0.0 {
                d / curve_length
            } else {
                0.0
            }
        };
        let ratio = precision_ratio(opts.precision);
        let mut start_t = index as f64 * size;
        let mut end_t = (index + 1) as f64 * size;
        loop {
            if relative(dist_from_start) < ratio {
                return start_t;
            }
            if relative(dist_from_end) < ratio {
                return end_t;
            }
            let (first, second) = sub.divide_at_t(0.5);
            size /= 2.0;
            let first_length = first.endpoint_distance();
            let second_length = second.endpoint_distance();
            if dist_from_start <= first_length {
                sub = first;
                end_t -= size;
                dist_from_end = first_length - dist_from_start;
            } else {
                sub = second;
                start_t += size;
                dist_from_start -= first_length;
                dist_from_end = second_length - dist_from_start;
            }
        }
    }

    /// The parameter at `ratio` of the curve's length.
    pub fn t_at(&self, ratio: f64, opts: CurveOpts<'_>) -> f64 {
        if ratio <= 0.0 {
            return 0.0;
        }
        if ratio >= 1.0 {
            return 1.0;
        }
        let subdivisions = opts.subdivisions_of(self);
        let opts = CurveOpts::new(opts.precision).with_subdivisions(&subdivisions);
        self.t_at_length(self.length(opts) * ratio, opts)
    }

    /// The point at parameter `t`, clamped to the endpoints.
    pub fn point_at_t(&self, t: f64) -> Point {
        if t <= 0.0 {
            return self.start;
        }
        if t >= 1.0 {
            return self.end;
        }
        self.skeleton_points(t).divider
    }

    /// The point at `ratio` of the curve's length.
    pub fn point_at(&self, ratio: f64, opts: CurveOpts<'_>) -> Point {
        if ratio <= 0.0 {
            return self.start;
        }
        if ratio >= 1.0 {
            return self.end;
        }
        self.point_at_t(self.t_at(ratio, opts))
    }

    /// The point at `length` along the curve; negative lengths count from
    /// the end.
    pub fn point_at_length(&self, length: f64, opts: CurveOpts<'_>) -> Point {
        self.point_at_t(self.t_at_length(length, opts))
    }

    /// The tangent at parameter `t`, clamped to `[0, 1]`.
    ///
    /// The tangent starts on the curve and has the direction and length of
    /// the inner de Casteljau segment at `t`. A curve that is a single point
    /// has no tangent.
    pub fn tangent_at_t(&self, t: f64) -> Option<Line> {
        if !self.is_differentiable() {
            return None;
        }
        let s = self.skeleton_points(t.clamp(0.0, 1.0));
        let p1 = s.start_control_point2;
        let p2 = s.divider_control_point1;
        let d = s.divider - p1;
        Some(Line::new(p1, p2).translate(d.x, d.y))
    }

    /// The tangent at `ratio` of the curve's length.
    pub fn tangent_at(&self, ratio: f64, opts: CurveOpts<'_>) -> Option<Line> {
        if !self.is_differentiable() {
            return None;
        }
        self.tangent_at_t(self.t_at(ratio.clamp(0.0, 1.0), opts))
    }

    /// The tangent at `length` along the curve.
    pub fn tangent_at_length(&self, length: f64, opts: CurveOpts<'_>) -> Option<Line> {
        if !self.is_differentiable() {
            return None;
        }
        self.tangent_at_t(self.t_at_length(length, opts))
    }

    /// The parameter of the point on the curve nearest to `p`.
    ///
    /// Starting from the subdivision whose endpoints are together closest to
    /// `p`, the search keeps halving and following the nearer half. It stops
    /// once the distances to the two ends agree to within `10^-precision`, or
    /// one end is closer than that fraction of the initial chord, and reports
    /// the nearer end.
    pub fn closest_point_t(&self, p: Point, opts: CurveOpts<'_>) -> f64 {
        let subdivisions = opts.subdivisions_of(self);
        let n = subdivisions.len();
        let mut size = 1.0 / n as f64;

        let mut best: Option<(usize, f64, f64)> = None;
        for (i, sub) in subdivisions.iter().enumerate() {
            let ds = sub.start.distance(p);
            let de = sub.end.distance(p);
            if best.map_or(true, |(_, s, e)| ds + de < s + e) {
                best = Some((i, ds, de));
            }
        }
        let Some((index, mut dist_from_start, mut dist_from_end)) = best else {
            return 0.0;
        };

        let mut sub = subdivisions[index];
        let chord = sub.endpoint_distance();
        let ratio = precision_ratio(opts.precision);
        let mut start_t = index as f64 * size;
        let mut end_t = (index + 1) as f64 * size;
        loop {
            let diff = (dist_from_start - dist_from_end).abs();
            let start_ratio = if dist_from_start != 0.0 {
                diff / dist_from_start
            } else {
                0.0
            };
            let end_ratio = if dist_from_end != 0.0 {
                diff / dist_from_end
            } else {
                0.0
            };
            let precise = start_ratio < ratio || end_ratio < ratio;
            let near_start = dist_from_start == 0.0 || dist_from_start < chord * ratio;
            let near_end = dist_from_end == 0.0 || dist_from_end < chord * ratio;
            if precise || near_start || near_end {
                return if dist_from_start <= dist_from_end {
                    start_t
                } else {
                    end_t
                };
            }

            let (first, second) = sub.divide_at_t(0.5);
            size /= 2.0;
            let (s1, e1) = (first.start.distance(p), first.end.distance(p));
            let (s2, e2) = (second.start.distance(p), second.end.distance(p));
            if s1 + e1 <= s2 + e2 {
                sub = first;
                end_t -= size;
                (dist_from_start, dist_from_end) = (s1, e1);
            } else {
                sub = second;
                start_t += size;
                (dist_from_start, dist_from_end) = (s2, e2);
            }
        }
    }

    /// The point on the curve nearest to `p`.
    pub fn closest_point(&self, p: Point, opts: CurveOpts<'_>) -> Point {
        self.point_at_t(self.closest_point_t(p, opts))
    }

    /// Length along the curve to the point nearest to `p`.
    pub fn closest_point_length(&self, p: Point, opts: CurveOpts<'_>) -> f64 {
        let subdivisions = opts.subdivisions_of(self);
        let opts = CurveOpts::new(opts.precision).with_subdivisions(&subdivisions);
        self.length_at_t(self.closest_point_t(p, opts), opts)
    }

    /// [`closest_point_length`](Curve::closest_point_length) as a fraction of
    /// the curve's length; 0 for a curve of zero length.
    pub fn closest_point_normalized_length(&self, p: Point, opts: CurveOpts<'_>) -> f64 {
        let subdivisions = opts.subdivisions_of(self);
        let opts = CurveOpts::new(opts.precision).with_subdivisions(&subdivisions);
        let cp_length = self.closest_point_length(p, opts);
        if cp_length == 0.0 {
            return 0.0;
        }
        let length = self.length(opts);
        if length == 0.0 {
            return 0.0;
        }
        cp_length / length
    }

    /// The tangent at the point nearest to `p`.
    pub fn closest_point_tangent(&self, p: Point, opts: CurveOpts<'_>) -> Option<Line> {
        self.tangent_at_t(self.closest_point_t(p, opts))
    }

    /// Whether `p` is inside the region bounded by the curve and the chord
    /// closing it, by the even-odd rule.
    pub fn contains_point(&self, p: Point, opts: CurveOpts<'_>) -> bool {
        self.to_polyline(opts).contains_point(p)
    }

    /// The flattened curve: the start point, then every subdivision's end.
    pub fn to_points(&self, opts: CurveOpts<'_>) -> Vec<Point> {
        let subdivisions = opts.subdivisions_of(self);
        let mut points = Vec::with_capacity(subdivisions.len() + 1);
        if let Some(first) = subdivisions.first() {
            points.push(first.start);
        }
        points.extend(subdivisions.iter().map(|c| c.end));
        points
    }

    /// The flattened curve as a polyline.
    pub fn to_polyline(&self, opts: CurveOpts<'_>) -> Polyline {
        Polyline::new(self.to_points(opts))
    }

    /// Offset all four points by `(dx, dy)`.
    #[must_use]
    pub fn translate(self, dx: f64, dy: f64) -> Curve {
        self.map(|p| p.translate(dx, dy))
    }

    /// Scale all four points relative to `origin`.
    #[must_use]
    pub fn scale(self, sx: f64, sy: f64, origin: Point) -> Curve {
        self.map(|p| p.scale(sx, sy, origin))
    }

    /// Round all four points to `precision` decimal places.
    #[must_use]
    pub fn round(self, precision: u32) -> Curve {
        self.map(|p| p.round(precision))
    }

    fn map(self, f: impl Fn(Point) -> Point) -> Curve {
        Curve::new(
            f(self.start),
            f(self.control_point1),
            f(self.control_point2),
            f(self.end),
        )
    }
}

/// Solve the tridiagonal system of the spline's first control points for
/// one coordinate.
fn solve_first_control_points(rhs: &[f64]) -> Vec<f64> {
    let n = rhs.len();
    let mut x = vec![0.0; n];
    let mut tmp = vec![0.0; n];
    let mut b = 2.0;
    x[0] = rhs[0] / b;
    for i in 1..n {
        tmp[i] = 1.0 / b;
        b = (if i < n - 1 { 4.0 } else { 3.5 }) - tmp[i];
        x[i] = (rhs[i] - x[i - 1]) / b;
    }
    for i in 1..n {
        x[n - i - 1] -= tmp[n - i] * x[n - i];
    }
    x
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.start, self.control_point1, self.control_point2, self.end
        )
    }
}
