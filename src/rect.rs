// Copyright 2026 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A rectangle.

use std::fmt;

use smallvec::SmallVec;

use crate::common::{round_to, to_rad};
use crate::{Ellipse, Line, Point};

/// An axis-aligned rectangle, stored as origin and size.
///
/// Width and height may be negative until the rect is
/// [normalized](Rect::normalize). Equality compares the normalized forms, so
/// `Rect::new(10., 10., -10., -10.) == Rect::new(0., 0., 10., 10.)`.
#[derive(Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// The x coordinate of the origin (left edge when normalized).
    pub x: f64,
    /// The y coordinate of the origin (top edge when normalized, y-down).
    pub y: f64,
    /// The width.
    pub width: f64,
    /// The height.
    pub height: f64,
}

/// A side of a [`Rect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RectSide {
    /// The left edge.
    Left,
    /// The right edge.
    Right,
    /// The top edge.
    Top,
    /// The bottom edge.
    Bottom,
}

/// Per-axis scale factors, see [`Rect::max_rect_scale_to_fit`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleFactors {
    /// Horizontal scale.
    pub sx: f64,
    /// Vertical scale.
    pub sy: f64,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Rect = Rect::new(0., 0., 0., 0.);

    /// A new rectangle from origin and size.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Rect {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// The bounding box of an ellipse.
    pub fn from_ellipse(e: &Ellipse) -> Rect {
        Rect::new(e.x - e.a, e.y - e.b, 2.0 * e.a, 2.0 * e.b)
    }

    /// The smallest rectangle containing all the points, `None` if there are
    /// none.
    pub fn from_point_union(points: &[Point]) -> Option<Rect> {
        let first = points.first()?;
        let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
    }

    /// The smallest rectangle containing all the rects, `None` if there are
    /// none.
    pub fn from_rect_union(rects: &[Rect]) -> Option<Rect> {
        let first = rects.first()?;
        Some(rects[1..].iter().fold(*first, |acc, r| acc.union(r)))
    }

    /// The top left corner.
    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The bottom right corner.
    #[inline]
    pub fn corner(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    /// The top right corner.
    #[inline]
    pub fn top_right(&self) -> Point {
        Point::new(self.x + self.width, self.y)
    }

    /// The bottom left corner.
    #[inline]
    pub fn bottom_left(&self) -> Point {
        Point::new(self.x, self.y + self.height)
    }

    /// The center point of the rectangle.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Midpoint of the top edge.
    #[inline]
    pub fn top_middle(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y)
    }

    /// Midpoint of the bottom edge.
    #[inline]
    pub fn bottom_middle(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height)
    }

    /// Midpoint of the left edge.
    #[inline]
    pub fn left_middle(&self) -> Point {
        Point::new(self.x, self.y + self.height / 2.0)
    }

    /// Midpoint of the right edge.
    #[inline]
    pub fn right_middle(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height / 2.0)
    }

    /// The top edge, left to right.
    pub fn top_line(&self) -> Line {
        Line::new(self.origin(), self.top_right())
    }

    /// The right edge, top to bottom.
    pub fn right_line(&self) -> Line {
        Line::new(self.top_right(), self.corner())
    }

    /// The bottom edge, left to right.
    pub fn bottom_line(&self) -> Line {
        Line::new(self.bottom_left(), self.corner())
    }

    /// The left edge, top to bottom.
    pub fn left_line(&self) -> Line {
        Line::new(self.origin(), self.bottom_left())
    }

    /// The four edges, clockwise from the top.
    pub fn sides(&self) -> [Line; 4] {
        [
            self.top_line(),
            self.right_line(),
            self.bottom_line(),
            self.left_line(),
        ]
    }

    /// The bounding box of this rect rotated by `angle` degrees about its
    /// center.
    pub fn bbox(&self, angle: f64) -> Rect {
        if angle == 0.0 {
            return *self;
        }
        let (sin, cos) = to_rad(angle).sin_cos();
        let (st, ct) = (sin.abs(), cos.abs());
        let w = self.width * ct + self.height * st;
        let h = self.width * st + self.height * ct;
        Rect::new(
            self.x + (self.width - w) / 2.0,
            self.y + (self.height - h) / 2.0,
            w,
            h,
        )
    }

    /// Whether `p` is inside the rect or on its boundary.
    #[inline]
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x
            && p.x <= self.x + self.width
            && p.y >= self.y
            && p.y <= self.y + self.height
    }

    /// Whether `other` lies entirely within this rect.
    ///
    /// Always false when either rect has a zero dimension.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        let r0 = self.normalize();
        let r1 = other.normalize();
        if r0.width == 0.0 || r0.height == 0.0 || r1.width == 0.0 || r1.height == 0.0 {
            return false;
        }
        r0.x <= r1.x
            && r1.x + r1.width <= r0.x + r0.width
            && r0.y <= r1.y
            && r1.y + r1.height <= r0.y + r0.height
    }

    /// The overlap of two rects.
    ///
    /// Rects that only share an edge or corner do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let (o1, c1) = (self.origin(), self.corner());
        let (o2, c2) = (other.origin(), other.corner());
        if c2.x <= o1.x || c2.y <= o1.y || o2.x >= c1.x || o2.y >= c1.y {
            return None;
        }
        let x = o1.x.max(o2.x);
        let y = o1.y.max(o2.y);
        Some(Rect::new(x, y, c1.x.min(c2.x) - x, c1.y.min(c2.y) - y))
    }

    /// The points where `line` crosses the rect's boundary.
    ///
    /// Points are reported in top, right, bottom, left side order, without
    /// duplicates, so a line through a corner yields that corner once.
    pub fn intersection_with_line(&self, line: &Line) -> Option<SmallVec<[Point; 4]>> {
        let mut points = SmallVec::<[Point; 4]>::new();
        for side in self.sides() {
            if let Some(p) = line.intersect(&side) {
                if !points.contains(&p) {
                    points.push(p);
                }
            }
        }
        if points.is_empty() {
            None
        } else {
            Some(points)
        }
    }

    /// The point where the segment from the center to `p` leaves the rect.
    ///
    /// A nonzero `angle` (degrees) treats the rect as rotated by that angle
    /// about its center.
    pub fn intersection_with_line_from_center_to_point(
        &self,
        p: Point,
        angle: f64,
    ) -> Option<Point> {
        let center = self.center();
        let p = p.rotate(center, angle);
        let connector = Line::new(center, p);
        let result = self
            .sides()
            .iter()
            .rev()
            .find_map(|side| side.intersect(&connector))?;
        Some(result.rotate(center, -angle))
    }

    /// Which side `p` is closest to.
    ///
    /// Ties resolve in left, right, top, bottom order.
    pub fn side_nearest_to_point(&self, p: Point) -> RectSide {
        let distances = [
            (p.x - self.x, RectSide::Left),
            (self.x + self.width - p.x, RectSide::Right),
            (p.y - self.y, RectSide::Top),
            (self.y + self.height - p.y, RectSide::Bottom),
        ];
        let mut closest = distances[0];
        for d in &distances[1..] {
            if d.0 < closest.0 {
                closest = *d;
            }
        }
        closest.1
    }

    /// The point on the boundary nearest to `p`.
    pub fn point_nearest_to_point(&self, p: Point) -> Point {
        if self.contains_point(p) {
            return match self.side_nearest_to_point(p) {
                RectSide::Right => Point::new(self.x + self.width, p.y),
                RectSide::Left => Point::new(self.x, p.y),
                RectSide::Bottom => Point::new(p.x, self.y + self.height),
                RectSide::Top => Point::new(p.x, self.y),
            };
        }
        p.adhere_to_rect(*self)
    }

    /// The largest per-axis scale about `origin` that keeps `rect` inside
    /// this rect.
    ///
    /// `origin` defaults to the center of `rect`. An axis with no limiting
    /// corner scales by infinity.
    pub fn max_rect_scale_to_fit(&self, rect: &Rect, origin: Option<Point>) -> ScaleFactors {
        let o = origin.unwrap_or_else(|| rect.center());
        let left = self.x - o.x;
        let right = self.x + self.width - o.x;
        let top = self.y - o.y;
        let bottom = self.y + self.height - o.y;

        // Each corner only limits the scale along the directions it points
        // away from the origin.
        let mut sx = f64::INFINITY;
        let mut sy = f64::INFINITY;
        let tl = rect.origin();
        if tl.x < o.x {
            sx = sx.min(left / (tl.x - o.x));
        }
        if tl.y < o.y {
            sy = sy.min(top / (tl.y - o.y));
        }
        let br = rect.corner();
        if br.x > o.x {
            sx = sx.min(right / (br.x - o.x));
        }
        if br.y > o.y {
            sy = sy.min(bottom / (br.y - o.y));
        }
        let tr = rect.top_right();
        if tr.x > o.x {
            sx = sx.min(right / (tr.x - o.x));
        }
        if tr.y < o.y {
            sy = sy.min(top / (tr.y - o.y));
        }
        let bl = rect.bottom_left();
        if bl.x < o.x {
            sx = sx.min(left / (bl.x - o.x));
        }
        if bl.y > o.y {
            sy = sy.min(bottom / (bl.y - o.y));
        }
        ScaleFactors { sx, sy }
    }

    /// The largest uniform scale, see [`max_rect_scale_to_fit`](Rect::max_rect_scale_to_fit).
    pub fn max_rect_uniform_scale_to_fit(&self, rect: &Rect, origin: Option<Point>) -> f64 {
        let s = self.max_rect_scale_to_fit(rect, origin);
        s.sx.min(s.sy)
    }

    /// Grow the rect by `dx` on the left and right and `dy` on the top and
    /// bottom.
    #[must_use]
    pub fn inflate(self, dx: f64, dy: f64) -> Rect {
        Rect::new(
            self.x - dx,
            self.y - dy,
            self.width + 2.0 * dx,
            self.height + 2.0 * dy,
        )
    }

    /// Add `delta`'s fields to the corresponding fields of this rect.
    #[must_use]
    pub fn move_and_expand(self, delta: &Rect) -> Rect {
        Rect::new(
            self.x + delta.x,
            self.y + delta.y,
            self.width + delta.width,
            self.height + delta.height,
        )
    }

    /// The same rect with non-negative width and height.
    #[must_use]
    pub fn normalize(&self) -> Rect {
        let mut r = *self;
        if r.width < 0.0 {
            r.x += r.width;
            r.width = -r.width;
        }
        if r.height < 0.0 {
            r.y += r.height;
            r.height = -r.height;
        }
        r
    }

    /// Offset the origin by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn translate(self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Round all four fields to `precision` decimal places.
    #[must_use]
    pub fn round(self, precision: u32) -> Rect {
        Rect::new(
            round_to(self.x, precision),
            round_to(self.y, precision),
            round_to(self.width, precision),
            round_to(self.height, precision),
        )
    }

    /// Scale the rect relative to `origin`.
    #[must_use]
    pub fn scale(self, sx: f64, sy: f64, origin: Point) -> Rect {
        let o = self.origin().scale(sx, sy, origin);
        Rect::new(o.x, o.y, self.width * sx, self.height * sy)
    }

    /// Snap the origin and corner to a grid of `gx` by `gy`.
    #[must_use]
    pub fn snap_to_grid(self, gx: f64, gy: f64) -> Rect {
        let o = self.origin().snap_to_grid(gx, gy);
        let c = self.corner().snap_to_grid(gx, gy);
        Rect::new(o.x, o.y, c.x - o.x, c.y - o.y)
    }

    /// The smallest rectangle containing both rects.
    pub fn union(&self, other: &Rect) -> Rect {
        let x0 = self.x.min(other.x);
        let y0 = self.y.min(other.y);
        let x1 = (self.x + self.width).max(other.x + other.width);
        let y1 = (self.y + self.height).max(other.y + other.height);
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }
}

impl PartialEq for Rect {
    fn eq(&self, other: &Rect) -> bool {
        let a = self.normalize();
        let b = other.normalize();
        a.x == b.x && a.y == b.y && a.width == b.width && a.height == b.height
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.origin(), self.corner())
    }
}
