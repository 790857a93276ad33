// Copyright 2026 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A 2D point.

use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use crate::common::{normalize_angle, round_to, snap_to_grid, to_deg, to_rad};
use crate::{Error, Rect, Vec2};

/// A 2D point.
///
/// Equality is exact floating point comparison of both coordinates.
#[derive(Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// The x coordinate.
    pub x: f64,
    /// The y coordinate.
    pub y: f64,
}

/// One of the eight compass directions, see [`Point::bearing`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs, reason = "compass directions are self-describing")]
pub enum Bearing {
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
    N,
}

impl Point {
    /// The point (0, 0).
    pub const ZERO: Point = Point::new(0., 0.);

    /// The point at the origin; (0, 0).
    pub const ORIGIN: Point = Point::new(0., 0.);

    /// Create a new `Point` with the provided `x` and `y` coordinates.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Create a point from polar coordinates around `origin`.
    ///
    /// The angle is in radians and, like [`theta`](Point::theta), is measured
    /// counterclockwise on screen.
    pub fn from_polar(distance: f64, angle: f64, origin: Point) -> Point {
        let mut x = (distance * angle.cos()).abs();
        let mut y = (distance * angle.sin()).abs();
        let deg = normalize_angle(to_deg(angle));
        if deg < 90.0 {
            y = -y;
        } else if deg < 180.0 {
            x = -x;
            y = -y;
        } else if deg < 270.0 {
            x = -x;
        }
        Point::new(origin.x + x, origin.y + y)
    }

    /// Convert this point into a `Vec2`.
    #[inline]
    pub const fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Linearly interpolate between two points.
    #[inline]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(
            (1.0 - t) * self.x + t * other.x,
            (1.0 - t) * self.y + t * other.y,
        )
    }

    /// Determine the midpoint of two points.
    #[inline]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new(0.5 * (self.x + other.x), 0.5 * (self.y + other.y))
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self - other).hypot()
    }

    /// This point moved back by the coordinates of `other`.
    #[inline]
    #[must_use]
    pub fn difference(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    /// Squared Euclidean distance.
    #[inline]
    pub fn squared_distance(self, other: Point) -> f64 {
        (self - other).hypot2()
    }

    /// Taxicab distance.
    #[inline]
    pub fn manhattan_distance(self, other: Point) -> f64 {
        (other.x - self.x).abs() + (other.y - self.y).abs()
    }

    /// Dot product, treating both points as vectors from the origin.
    #[inline]
    pub fn dot(self, other: Point) -> f64 {
        self.to_vec2().dot(other.to_vec2())
    }

    /// Cross product of the vectors from this point to `p1` and to `p2`.
    ///
    /// In the y-down coordinate system a positive result is a clockwise turn
    /// from the first vector to the second, a negative one counterclockwise,
    /// and zero means the three points are collinear.
    #[inline]
    pub fn cross(self, p1: Point, p2: Point) -> f64 {
        (p2 - self).cross(p1 - self)
    }

    /// Length of the vector from the origin to this point.
    ///
    /// The zero vector reports `0.01` so that it can still be normalized.
    pub fn magnitude(self) -> f64 {
        let m = self.to_vec2().hypot();
        if m == 0.0 {
            0.01
        } else {
            m
        }
    }

    /// The angle in degrees of the direction from this point to `p`,
    /// counterclockwise from the positive x axis as seen on screen.
    ///
    /// The result is in `[0, 360)`. Coincident points give 0.
    pub fn theta(self, p: Point) -> f64 {
        let y = -(p.y - self.y);
        let x = p.x - self.x;
        // Adding zero turns a -0.0 from `atan2` into 0.0.
        let mut rad = y.atan2(x) + 0.0;
        if rad < 0.0 {
            rad += 2.0 * std::f64::consts::PI;
        }
        to_deg(rad)
    }

    /// The angle in degrees from the direction towards `p1` to the direction
    /// towards `p2`, in `[0, 360)`.
    ///
    /// NaN if either point coincides with this one.
    pub fn angle_between(self, p1: Point, p2: Point) -> f64 {
        if self == p1 || self == p2 {
            return f64::NAN;
        }
        let angle = self.theta(p2) - self.theta(p1);
        if angle < 0.0 {
            angle + 360.0
        } else {
            angle
        }
    }

    /// The angle between this point and `p`, both taken as vectors from the
    /// origin.
    pub fn vector_angle(self, p: Point) -> f64 {
        Point::ZERO.angle_between(self, p)
    }

    /// Change in [`theta`](Point::theta) relative to `reference` caused by the
    /// translation `(dx, dy)` that moved the point here.
    pub fn change_in_angle(self, dx: f64, dy: f64, reference: Point) -> f64 {
        self.translate(-dx, -dy).theta(reference) - self.theta(reference)
    }

    /// Compass direction from this point to `p`.
    ///
    /// Coordinates are interpreted as degrees of longitude (x) and latitude (y).
    pub fn bearing(self, p: Point) -> Bearing {
        const BEARINGS: [Bearing; 8] = [
            Bearing::NE,
            Bearing::E,
            Bearing::SE,
            Bearing::S,
            Bearing::SW,
            Bearing::W,
            Bearing::NW,
            Bearing::N,
        ];
        let lat1 = to_rad(self.y);
        let lat2 = to_rad(p.y);
        let dlon = to_rad(p.x - self.x);
        let y = dlon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
        let mut index = to_deg(y.atan2(x)) - 22.5;
        if index < 0.0 {
            index += 360.0;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "the sector index is in 0..8"
        )]
        let sector = (index / 45.0) as usize;
        BEARINGS[sector.min(7)]
    }

    /// The closest of `points` to this one, or `None` if there are none.
    pub fn choose_closest(self, points: &[Point]) -> Option<Point> {
        let mut closest = None;
        let mut min_dist = f64::INFINITY;
        for &p in points {
            let d = self.squared_distance(p);
            if d < min_dist {
                closest = Some(p);
                min_dist = d;
            }
        }
        closest.or_else(|| points.first().copied())
    }

    /// Clamp the point onto `rect`; points already inside are unchanged.
    #[must_use]
    pub fn adhere_to_rect(self, rect: Rect) -> Point {
        if rect.contains_point(self) {
            return self;
        }
        Point::new(
            self.x.max(rect.x).min(rect.x + rect.width),
            self.y.max(rect.y).min(rect.y + rect.height),
        )
    }

    /// Offset the point by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn translate(self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Move this point away from `reference` by `distance`, along the
    /// direction from `reference` to this point.
    #[must_use]
    pub fn move_towards(self, reference: Point, distance: f64) -> Point {
        let theta = to_rad(reference.theta(self));
        self.translate(theta.cos() * distance, -theta.sin() * distance)
    }

    /// The mirror image of this point through `reference`.
    #[must_use]
    pub fn reflection(self, reference: Point) -> Point {
        reference.move_towards(self, self.distance(reference))
    }

    /// Scale the point so that its distance from the origin is `length`.
    ///
    /// A `length` of zero is treated as 1.
    #[must_use]
    pub fn normalize(self, length: f64) -> Point {
        let length = if length == 0.0 { 1.0 } else { length };
        let s = length / self.magnitude();
        self.scale(s, s, Point::ORIGIN)
    }

    /// Rotate the point around `origin` by `angle` degrees.
    ///
    /// Positive angles turn counterclockwise as seen on screen.
    #[must_use]
    pub fn rotate(self, origin: Point, angle: f64) -> Point {
        if angle == 0.0 {
            return self;
        }
        let angle = to_rad(normalize_angle(-angle));
        let (sin, cos) = angle.sin_cos();
        let d = self - origin;
        Point::new(
            cos * d.x - sin * d.y + origin.x,
            sin * d.x + cos * d.y + origin.y,
        )
    }

    /// Scale the point relative to `origin`.
    #[inline]
    #[must_use]
    pub fn scale(self, sx: f64, sy: f64, origin: Point) -> Point {
        Point::new(
            origin.x + sx * (self.x - origin.x),
            origin.y + sy * (self.y - origin.y),
        )
    }

    /// Round both coordinates to `precision` decimal places.
    #[must_use]
    pub fn round(self, precision: u32) -> Point {
        Point::new(round_to(self.x, precision), round_to(self.y, precision))
    }

    /// Snap the point to a grid of `gx` by `gy`.
    #[must_use]
    pub fn snap_to_grid(self, gx: f64, gy: f64) -> Point {
        Point::new(snap_to_grid(self.x, gx), snap_to_grid(self.y, gy))
    }

    /// Convert to polar coordinates around `origin`.
    ///
    /// The returned point holds the radius in `x` and the angle in radians
    /// in `y`.
    #[must_use]
    pub fn to_polar(self, origin: Point) -> Point {
        Point::new(self.distance(origin), to_rad(origin.theta(self)))
    }

    /// Is this point finite?
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// The `x,y` form used in points lists.
    pub fn serialize(self) -> String {
        format!("{},{}", self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from(v: (f64, f64)) -> Point {
        Point { x: v.0, y: v.1 }
    }
}

impl From<Point> for (f64, f64) {
    #[inline]
    fn from(v: Point) -> (f64, f64) {
        (v.x, v.y)
    }
}

impl Add<Vec2> for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Vec2) -> Self {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign<Vec2> for Point {
    #[inline]
    fn add_assign(&mut self, other: Vec2) {
        *self = Point::new(self.x + other.x, self.y + other.y);
    }
}

impl Sub<Vec2> for Point {
    type Output = Point;

    #[inline]
    fn sub(self, other: Vec2) -> Self {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign<Vec2> for Point {
    #[inline]
    fn sub_assign(&mut self, other: Vec2) {
        *self = Point::new(self.x - other.x, self.y - other.y);
    }
}

impl Sub<Point> for Point {
    type Output = Vec2;

    #[inline]
    fn sub(self, other: Point) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl FromStr for Point {
    type Err = Error;

    /// Parse `"x@y"` or `"x y"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (x, y) = s
            .split_once('@')
            .or_else(|| s.split_once(char::is_whitespace))
            .ok_or_else(|| Error::InvalidNumber(s.to_string()))?;
        let parse = |t: &str| {
            let t = t.trim();
            t.parse::<f64>()
                .map_err(|_| Error::InvalidNumber(t.to_string()))
        };
        Ok(Point::new(parse(x)?, parse(y)?))
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.x, formatter)?;
        write!(formatter, "@")?;
        fmt::Display::fmt(&self.y, formatter)
    }
}

#[cfg(feature = "mint")]
impl From<Point> for mint::Point2<f64> {
    #[inline]
    fn from(p: Point) -> mint::Point2<f64> {
        mint::Point2 { x: p.x, y: p.y }
    }
}

#[cfg(feature = "mint")]
impl From<mint::Point2<f64>> for Point {
    #[inline]
    fn from(p: mint::Point2<f64>) -> Point {
        Point { x: p.x, y: p.y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(p: Point, q: Point) {
        assert!(p.distance(q) < 1e-9, "{p:?} != {q:?}");
    }

    #[test]
    fn point_arithmetic() {
        assert_eq!(
            Point::new(0., 0.) - Vec2::new(10., 0.),
            Point::new(-10., 0.)
        );
        assert_eq!(
            Point::new(0., 0.) - Point::new(-5., 101.),
            Vec2::new(5., -101.)
        );
    }

    #[test]
    fn distance() {
        let p1 = Point::new(0., 10.);
        let p2 = Point::new(0., 5.);
        assert_eq!(p1.distance(p2), 5.);
        assert_eq!(p1.difference(p2), Point::new(0., 5.));

        let p1 = Point::new(-11., 1.);
        let p2 = Point::new(-7., -2.);
        assert_eq!(p1.distance(p2), 5.);
        assert_eq!(p1.squared_distance(p2), 25.);
        assert_eq!(p1.manhattan_distance(p2), 7.);
    }

    #[test]
    fn theta_is_counterclockwise_on_screen() {
        let o = Point::ZERO;
        assert_eq!(o.theta(Point::new(10., 0.)), 0.);
        // Up on screen is negative y.
        assert_eq!(o.theta(Point::new(0., -10.)), 90.);
        assert_eq!(o.theta(Point::new(-10., 0.)), 180.);
        assert_eq!(o.theta(Point::new(0., 10.)), 270.);
        assert_eq!(o.theta(o), 0.);
        assert!(o.theta(Point::new(10., 0.)).is_sign_positive());
        assert!(Point::new(5., 3.).theta(Point::new(8., 3.)).is_sign_positive());
        assert!(o.theta(o).is_sign_positive());
    }

    #[test]
    fn angle_between() {
        let o = Point::ZERO;
        let a = o.angle_between(Point::new(10., 0.), Point::new(0., -10.));
        assert!((a - 90.).abs() < 1e-12);
        let b = o.angle_between(Point::new(0., -10.), Point::new(10., 0.));
        assert!((b - 270.).abs() < 1e-12);
        assert!(o.angle_between(o, Point::new(1., 1.)).is_nan());
    }

    #[test]
    fn cross_sign() {
        let o = Point::ZERO;
        // Right, then down on screen: a clockwise turn.
        assert!(o.cross(Point::new(10., 0.), Point::new(0., 10.)) > 0.);
        assert!(o.cross(Point::new(0., 10.), Point::new(10., 0.)) < 0.);
        assert_eq!(o.cross(Point::new(1., 1.), Point::new(2., 2.)), 0.);
    }

    #[test]
    fn rotate_and_polar() {
        let p = Point::new(10., 0.);
        assert_near(p.rotate(Point::ZERO, 90.), Point::new(0., -10.));
        assert_near(p.rotate(Point::ZERO, -90.), Point::new(0., 10.));
        assert_eq!(p.rotate(Point::ZERO, 0.), p);

        let q = Point::new(3., -4.);
        let polar = q.to_polar(Point::ZERO);
        assert_eq!(polar.x, 5.);
        assert_near(Point::from_polar(polar.x, polar.y, Point::ZERO), q);
        assert_near(
            Point::from_polar(2., std::f64::consts::PI, Point::new(1., 1.)),
            Point::new(-1., 1.),
        );
    }

    #[test]
    fn moves() {
        let p = Point::new(10., 0.);
        assert_near(p.move_towards(Point::ZERO, 5.), Point::new(15., 0.));
        assert_near(p.reflection(Point::ZERO), Point::new(-10., 0.));
        assert_near(Point::new(3., 4.).normalize(10.), Point::new(6., 8.));
        assert_eq!(Point::ZERO.magnitude(), 0.01);
        assert_eq!(
            Point::new(2., 2.).scale(2., 3., Point::new(1., 1.)),
            Point::new(3., 4.)
        );
    }

    #[test]
    fn rounding_and_grid() {
        let p = Point::new(1.23456, -7.891);
        assert_eq!(p.round(0), Point::new(1., -8.));
        assert_eq!(p.round(2), Point::new(1.23, -7.89));
        assert_eq!(
            Point::new(14., 26.).snap_to_grid(10., 20.),
            Point::new(10., 20.)
        );
    }

    #[test]
    fn bearings() {
        let o = Point::ZERO;
        assert_eq!(o.bearing(Point::new(0., 10.)), Bearing::N);
        assert_eq!(o.bearing(Point::new(10., 0.)), Bearing::E);
        assert_eq!(o.bearing(Point::new(0., -10.)), Bearing::S);
        assert_eq!(o.bearing(Point::new(-10., 0.)), Bearing::W);
    }

    #[test]
    fn closest_and_adhere() {
        let p = Point::new(5., 5.);
        let pts = [Point::new(0., 0.), Point::new(6., 6.), Point::new(10., 10.)];
        assert_eq!(p.choose_closest(&pts), Some(Point::new(6., 6.)));
        assert_eq!(p.choose_closest(&[]), None);

        let r = Rect::new(0., 0., 10., 10.);
        assert_eq!(Point::new(15., -5.).adhere_to_rect(r), Point::new(10., 0.));
        assert_eq!(p.adhere_to_rect(r), p);
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("10@20".parse::<Point>().unwrap(), Point::new(10., 20.));
        assert_eq!("1.5 -2".parse::<Point>().unwrap(), Point::new(1.5, -2.));
        assert!("nope".parse::<Point>().is_err());
        assert!("1@x".parse::<Point>().is_err());

        let p = Point::new(10., 0.5);
        assert_eq!(p.to_string(), "10@0.5");
        assert_eq!(p.serialize(), "10,0.5");
        assert_eq!(format!("{p:?}"), "(10.0, 0.5)");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_form() {
        let p = Point::new(1., 2.);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"x":1.0,"y":2.0}"#);
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
