// Copyright 2026 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lines.

use std::fmt;

use crate::{Bearing, Point, Rect, Vec2};

/// A single directed line segment.
///
/// A line whose endpoints coincide is a point: it has no tangent and is not
/// [differentiable](Line::is_differentiable).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// The line's start point.
    pub start: Point,
    /// The line's end point.
    pub end: Point,
}

impl Line {
    /// Create a new line.
    #[inline]
    pub fn new(start: impl Into<Point>, end: impl Into<Point>) -> Line {
        Line {
            start: start.into(),
            end: end.into(),
        }
    }

    /// The vector from start to end.
    #[inline]
    pub fn vector(&self) -> Vec2 {
        self.end - self.start
    }

    /// Length of the line.
    #[inline]
    pub fn length(&self) -> f64 {
        self.vector().hypot()
    }

    /// Squared length of the line, for comparisons.
    #[inline]
    pub fn squared_length(&self) -> f64 {
        self.vector().hypot2()
    }

    /// The midpoint of the line.
    #[inline]
    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }

    /// Whether the line has a well-defined direction.
    #[inline]
    pub fn is_differentiable(&self) -> bool {
        self.start != self.end
    }

    /// Incline of the line in degrees, counterclockwise from the x axis.
    pub fn angle(&self) -> f64 {
        let horizontal = Point::new(self.start.x + 1.0, self.start.y);
        self.start.angle_between(self.end, horizontal)
    }

    /// Compass direction of the line.
    pub fn bearing(&self) -> Bearing {
        self.start.bearing(self.end)
    }

    /// The smallest rectangle containing both endpoints.
    pub fn bbox(&self) -> Rect {
        let left = self.start.x.min(self.end.x);
        let top = self.start.y.min(self.end.y);
        let right = self.start.x.max(self.end.x);
        let bottom = self.start.y.max(self.end.y);
        Rect::new(left, top, right - left, bottom - top)
    }

    /// The point at parameter `t`, clamped to `[0, 1]`.
    pub fn point_at(&self, t: f64) -> Point {
        if t <= 0.0 {
            return self.start;
        }
        if t >= 1.0 {
            return self.end;
        }
        self.start.lerp(self.end, t)
    }

    /// The point at `length` along the line, clamped to the line.
    ///
    /// A negative length is measured backwards from the end.
    pub fn point_at_length(&self, length: f64) -> Point {
        let from_start = length >= 0.0;
        let length = length.abs();
        let line_length = self.length();
        if length >= line_length {
            return if from_start { self.end } else { self.start };
        }
        let along = if from_start {
            length
        } else {
            line_length - length
        };
        self.point_at(along / line_length)
    }

    /// Parameter of the point on the line nearest to `p`, in `[0, 1]`.
    ///
    /// A zero-length line reports 0.
    pub fn closest_point_normalized_length(&self, p: Point) -> f64 {
        let product = self.vector().dot(p - self.start);
        let t = (product / self.squared_length()).clamp(0.0, 1.0);
        if t.is_nan() {
            0.0
        } else {
            t
        }
    }

    /// Distance along the line to the point nearest to `p`.
    pub fn closest_point_length(&self, p: Point) -> f64 {
        self.closest_point_normalized_length(p) * self.length()
    }

    /// The point on the line nearest to `p`.
    pub fn closest_point(&self, p: Point) -> Point {
        self.point_at(self.closest_point_normalized_length(p))
    }

    /// The tangent at the point nearest to `p`.
    pub fn closest_point_tangent(&self, p: Point) -> Option<Line> {
        self.tangent_at(self.closest_point_normalized_length(p))
    }

    /// Whether `p` lies on the segment.
    pub fn contains_point(&self, p: Point) -> bool {
        if self.start.cross(p, self.end) != 0.0 {
            return false;
        }
        let length = self.length();
        self.start.distance(p) <= length && p.distance(self.end) <= length
    }

    /// Split the line at parameter `t`.
    pub fn divide_at(&self, t: f64) -> (Line, Line) {
        let divider = self.point_at(t);
        (Line::new(self.start, divider), Line::new(divider, self.end))
    }

    /// Split the line at `length`; negative lengths count from the end.
    pub fn divide_at_length(&self, length: f64) -> (Line, Line) {
        let divider = self.point_at_length(length);
        (Line::new(self.start, divider), Line::new(divider, self.end))
    }

    /// The crossing point of two segments.
    ///
    /// Parallel segments, including collinear overlapping ones, have no
    /// crossing point. Endpoints count as part of each segment.
    pub fn intersection_with_line(&self, other: &Line) -> Option<Point> {
        let d1 = self.vector();
        let d2 = other.vector();
        let det = d1.cross(d2);
        let delta = other.start - self.start;
        let alpha = delta.cross(d2);
        let beta = delta.cross(d1);
        if det == 0.0 || alpha * det < 0.0 || beta * det < 0.0 {
            return None;
        }
        if det > 0.0 {
            if alpha > det || beta > det {
                return None;
            }
        } else if alpha < det || beta < det {
            return None;
        }
        Some(Point::new(
            self.start.x + alpha * d1.x / det,
            self.start.y + alpha * d1.y / det,
        ))
    }

    /// Shorthand for [`intersection_with_line`](Line::intersection_with_line).
    #[inline]
    pub fn intersect(&self, other: &Line) -> Option<Point> {
        self.intersection_with_line(other)
    }

    /// Signed distance of `p` from the infinite line through this segment.
    ///
    /// Positive on the right side (as seen on screen, facing from start to
    /// end), negative on the left.
    pub fn point_offset(&self, p: Point) -> f64 {
        self.vector().cross(p - self.start) / self.length()
    }

    /// The tangent line at parameter `t`: this line moved to start at the
    /// point at `t`.
    pub fn tangent_at(&self, t: f64) -> Option<Line> {
        if !self.is_differentiable() {
            return None;
        }
        let p = self.point_at(t);
        let d = p - self.start;
        Some(self.translate(d.x, d.y))
    }

    /// The tangent line at `length`.
    pub fn tangent_at_length(&self, length: f64) -> Option<Line> {
        if !self.is_differentiable() {
            return None;
        }
        let p = self.point_at_length(length);
        let d = p - self.start;
        Some(self.translate(d.x, d.y))
    }

    /// A line parallel to this one, offset by `distance` to its right.
    #[must_use]
    pub fn parallel(&self, distance: f64) -> Line {
        if !self.is_differentiable() {
            return *self;
        }
        let end_ref = self.start.rotate(self.end, 270.0);
        let start_ref = self.end.rotate(self.start, 90.0);
        Line::new(
            self.start.move_towards(start_ref, distance),
            self.end.move_towards(end_ref, distance),
        )
    }

    /// Scale the line about its start so that it has the given length.
    ///
    /// Zero-length lines are returned unchanged.
    #[must_use]
    pub fn set_length(self, length: f64) -> Line {
        let current = self.length();
        if current == 0.0 {
            return self;
        }
        let s = length / current;
        self.scale(s, s, self.start)
    }

    /// Offset both endpoints.
    #[inline]
    #[must_use]
    pub fn translate(self, dx: f64, dy: f64) -> Line {
        Line::new(self.start.translate(dx, dy), self.end.translate(dx, dy))
    }

    /// Rotate both endpoints around `origin` by `angle` degrees.
    #[must_use]
    pub fn rotate(self, origin: Point, angle: f64) -> Line {
        Line::new(
            self.start.rotate(origin, angle),
            self.end.rotate(origin, angle),
        )
    }

    /// Scale both endpoints relative to `origin`.
    #[must_use]
    pub fn scale(self, sx: f64, sy: f64, origin: Point) -> Line {
        Line::new(
            self.start.scale(sx, sy, origin),
            self.end.scale(sx, sy, origin),
        )
    }

    /// Round both endpoints to `precision` decimal places.
    #[must_use]
    pub fn round(self, precision: u32) -> Line {
        Line::new(self.start.round(precision), self.end.round(precision))
    }

    /// The `x1,y1 x2,y2` form.
    pub fn serialize(&self) -> String {
        format!("{} {}", self.start.serialize(), self.end.serialize())
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossing_lines() {
        let a = Line::new((0., 0.), (10., 0.));
        let b = Line::new((5., -5.), (5., 5.));
        assert_eq!(a.intersect(&b), Some(Point::new(5., 0.)));
        assert_eq!(b.intersect(&a), Some(Point::new(5., 0.)));
    }

    #[test]
    fn intersection_boundaries() {
        let a = Line::new((0., 0.), (10., 0.));
        // Touching at an endpoint counts.
        let touching = Line::new((10., 0.), (10., 10.));
        assert_eq!(a.intersect(&touching), Some(Point::new(10., 0.)));
        // Falls short of the segment.
        let short = Line::new((5., 1.), (5., 10.));
        assert_eq!(a.intersect(&short), None);
        // Parallel and collinear segments never intersect.
        assert_eq!(a.intersect(&Line::new((0., 1.), (10., 1.))), None);
        assert_eq!(a.intersect(&Line::new((2., 0.), (8., 0.))), None);
    }

    #[test]
    fn sampling() {
        let l = Line::new((0., 0.), (10., 0.));
        assert_eq!(l.length(), 10.);
        assert_eq!(l.midpoint(), Point::new(5., 0.));
        assert_eq!(l.point_at(-1.), l.start);
        assert_eq!(l.point_at(2.), l.end);
        assert_eq!(l.point_at_length(3.), Point::new(3., 0.));
        assert_eq!(l.point_at_length(-3.), Point::new(7., 0.));
        assert_eq!(l.point_at_length(30.), l.end);
        assert_eq!(l.point_at_length(-30.), l.start);
    }

    #[test]
    fn closest_point() {
        let l = Line::new((0., 0.), (10., 0.));
        assert_eq!(l.closest_point_normalized_length(Point::new(2., 5.)), 0.2);
        assert_eq!(l.closest_point_normalized_length(Point::new(-5., 5.)), 0.);
        assert_eq!(l.closest_point(Point::new(20., 5.)), l.end);
        assert_eq!(l.closest_point_length(Point::new(4., -1.)), 4.);

        let degenerate = Line::new((1., 1.), (1., 1.));
        assert_eq!(degenerate.closest_point_normalized_length(Point::ZERO), 0.);
        assert_eq!(degenerate.closest_point_tangent(Point::ZERO), None);
    }

    #[test]
    fn containment() {
        let l = Line::new((0., 0.), (10., 10.));
        assert!(l.contains_point(Point::new(5., 5.)));
        assert!(l.contains_point(Point::new(10., 10.)));
        assert!(!l.contains_point(Point::new(11., 11.)));
        assert!(!l.contains_point(Point::new(5., 6.)));
    }

    #[test]
    fn tangents() {
        let l = Line::new((0., 0.), (10., 0.));
        let t = l.tangent_at(0.5).unwrap();
        assert_eq!(t, Line::new((5., 0.), (15., 0.)));
        let t = l.tangent_at_length(-2.).unwrap();
        assert_eq!(t.start, Point::new(8., 0.));
        assert!(Line::new((1., 1.), (1., 1.)).tangent_at(0.5).is_none());
    }

    #[test]
    fn division() {
        let l = Line::new((0., 0.), (10., 0.));
        let (a, b) = l.divide_at(0.25);
        assert_eq!(a.end, Point::new(2.5, 0.));
        assert_eq!(a.end, b.start);
        let (a, b) = l.divide_at_length(-4.);
        assert_eq!(a.end, Point::new(6., 0.));
        assert_eq!(b.end, l.end);
    }

    #[test]
    fn offset_and_parallel() {
        let l = Line::new((0., 0.), (10., 0.));
        assert_eq!(l.point_offset(Point::new(5., 3.)), 3.);
        assert_eq!(l.point_offset(Point::new(5., -3.)), -3.);

        let p = l.parallel(5.);
        assert!(p.start.distance(Point::new(0., 5.)) < 1e-9, "{p:?}");
        assert!(p.end.distance(Point::new(10., 5.)) < 1e-9, "{p:?}");
    }

    #[test]
    fn angle_and_bbox() {
        let l = Line::new((0., 0.), (10., -10.));
        assert!((l.angle() - 315.).abs() < 1e-9);
        assert_eq!(l.bbox(), Rect::new(0., -10., 10., 10.));
        assert_eq!(Line::new((0., 0.), (0., 10.)).bearing(), Bearing::N);
    }

    #[test]
    fn transforms() {
        let l = Line::new((0., 0.), (3., 4.)).set_length(10.);
        assert_eq!(l.end, Point::new(6., 8.));
        let l = l.translate(1., 1.).scale(2., 2., Point::ZERO);
        assert_eq!(l, Line::new((2., 2.), (14., 18.)));
        assert_eq!(l.to_string(), "2@2 14@18");
        assert_eq!(l.serialize(), "2,2 14,18");
    }
}
