// Copyright 2026 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polylines and polygons.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Line, Point, Rect, Result};

/// An open sequence of points joined by straight lines.
#[derive(Clone, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polyline {
    points: Vec<Point>,
}

/// A closed sequence of points.
///
/// The edge from the last point back to the first is implied: it takes part
/// in length, sampling and containment, but is not stored.
#[derive(Clone, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    points: Vec<Point>,
}

/// Parse an SVG `points` list such as `"10,10 20,5 30 10"`.
fn parse_points(s: &str) -> Result<Vec<Point>> {
    let coords = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|t| t.parse::<f64>().map_err(|_| Error::InvalidNumber(t.to_string())))
        .collect::<Result<Vec<_>>>()?;
    if coords.len() % 2 != 0 {
        return Err(Error::OddCoordinateCount(coords.len()));
    }
    Ok(coords
        .chunks_exact(2)
        .map(|c| Point::new(c[0], c[1]))
        .collect())
}

/// Even-odd containment of `p` in the outline through `points`, closed by an
/// edge from the last point back to the first.
pub(crate) fn even_odd_contains(points: &[Point], p: Point) -> bool {
    let Some(&last) = points.last() else {
        return false;
    };
    let mut start = last;
    let mut crossings = 0_usize;
    for &end in points {
        if p == start {
            return true;
        }
        let segment = Line::new(start, end);
        if segment.contains_point(p) {
            return true;
        }
        // A ray through a vertex touches two edges; the half-open test
        // counts only one of them.
        if (p.y <= start.y && p.y > end.y) || (p.y > start.y && p.y <= end.y) {
            let x_diff = (start.x - p.x).max(end.x - p.x);
            if x_diff >= 0.0 {
                let ray = Line::new(p, Point::new(p.x + x_diff, p.y));
                if segment.intersect(&ray).is_some() {
                    crossings += 1;
                }
            }
        }
        start = end;
    }
    crossings % 2 == 1
}

fn serialize_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| p.serialize())
        .collect::<Vec<_>>()
        .join(" ")
}

impl Polyline {
    /// Create a polyline from its points.
    pub fn new(points: Vec<Point>) -> Polyline {
        Polyline { points }
    }

    /// Parse an SVG `points` list.
    ///
    /// Coordinates are separated by commas, whitespace, or both. An empty
    /// string gives an empty polyline.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidNumber`] for a token that is not a number, and
    /// [`Error::OddCoordinateCount`] when the coordinates do not pair up.
    pub fn parse(s: &str) -> Result<Polyline> {
        parse_points(s).map(Polyline::new)
    }

    /// The points.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Take the points out of the polyline.
    #[inline]
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// The first point.
    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// The last point.
    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// The lines between consecutive points.
    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        self.points.windows(2).map(|w| Line::new(w[0], w[1]))
    }

    /// The smallest rect containing every point, `None` when empty.
    pub fn bbox(&self) -> Option<Rect> {
        Rect::from_point_union(&self.points)
    }

    /// Total length of the lines.
    pub fn length(&self) -> f64 {
        self.lines().map(|l| l.length()).sum()
    }

    /// Whether any line between consecutive points has nonzero length.
    pub fn is_differentiable(&self) -> bool {
        self.lines().any(|l| l.is_differentiable())
    }

    /// The point at `ratio` of the length.
    ///
    /// An empty polyline has no points; a single point is returned for any
    /// ratio.
    pub fn point_at(&self, ratio: f64) -> Option<Point> {
        match self.points.as_slice() {
            [] => None,
            [p] => Some(*p),
            [first, .., last] => {
                if ratio <= 0.0 {
                    Some(*first)
                } else if ratio >= 1.0 {
                    Some(*last)
                } else {
                    self.point_at_length(self.length() * ratio)
                }
            }
        }
    }

    /// The point at `length` along the polyline, clamped to its ends.
    ///
    /// Negative lengths are measured backwards from the end.
    pub fn point_at_length(&self, length: f64) -> Option<Point> {
        let (first, last) = match self.points.as_slice() {
            [] => return None,
            [p] => return Some(*p),
            [first, .., last] => (*first, *last),
        };
        let from_start = length >= 0.0;
        let length = length.abs();
        let n = self.points.len() - 1;
        let mut l = 0.0;
        for i in 0..n {
            let index = if from_start { i } else { n - 1 - i };
            let line = Line::new(self.points[index], self.points[index + 1]);
            let d = line.length();
            if length <= l + d {
                let along = length - l;
                return Some(line.point_at_length(if from_start { along } else { -along }));
            }
            l += d;
        }
        Some(if from_start { last } else { first })
    }

    /// The tangent at `ratio` of the length.
    pub fn tangent_at(&self, ratio: f64) -> Option<Line> {
        if self.points.len() < 2 {
            return None;
        }
        self.tangent_at_length(self.length() * ratio.clamp(0.0, 1.0))
    }

    /// The tangent at `length` along the polyline.
    ///
    /// Zero-length lines are skipped. Past either end, the tangent at the
    /// end of the last line with a direction is returned.
    pub fn tangent_at_length(&self, length: f64) -> Option<Line> {
        if self.points.len() < 2 {
            return None;
        }
        let from_start = length >= 0.0;
        let length = length.abs();
        let n = self.points.len() - 1;
        let mut last_valid = None;
        let mut l = 0.0;
        for i in 0..n {
            let index = if from_start { i } else { n - 1 - i };
            let line = Line::new(self.points[index], self.points[index + 1]);
            let d = line.length();
            if line.is_differentiable() {
                if length <= l + d {
                    let along = length - l;
                    return line.tangent_at_length(if from_start { along } else { -along });
                }
                last_valid = Some(line);
            }
            l += d;
        }
        last_valid.and_then(|line| line.tangent_at(if from_start { 1.0 } else { 0.0 }))
    }

    /// Length along the polyline to the point nearest to `p`.
    ///
    /// Polylines with fewer than two points report 0.
    pub fn closest_point_length(&self, p: Point) -> f64 {
        let mut cp_length = 0.0;
        let mut min_distance = f64::INFINITY;
        let mut length = 0.0;
        for line in self.lines() {
            let line_length = line.length();
            let t = line.closest_point_normalized_length(p);
            let distance = line.point_at(t).squared_distance(p);
            if distance < min_distance {
                min_distance = distance;
                cp_length = length + t * line_length;
            }
            length += line_length;
        }
        cp_length
    }

    /// [`closest_point_length`](Polyline::closest_point_length) as a fraction
    /// of the total length; 0 for a polyline of zero length.
    pub fn closest_point_normalized_length(&self, p: Point) -> f64 {
        let cp_length = self.closest_point_length(p);
        if cp_length == 0.0 {
            return 0.0;
        }
        let length = self.length();
        if length == 0.0 {
            return 0.0;
        }
        cp_length / length
    }

    /// The point on the polyline nearest to `p`.
    pub fn closest_point(&self, p: Point) -> Option<Point> {
        self.point_at_length(self.closest_point_length(p))
    }

    /// The tangent at the point nearest to `p`.
    pub fn closest_point_tangent(&self, p: Point) -> Option<Line> {
        self.tangent_at_length(self.closest_point_length(p))
    }

    /// Whether `p` is inside the polyline closed by an edge from its last
    /// point back to its first.
    ///
    /// Uses the even-odd rule with a ray cast to the right of `p`, so the
    /// overlap of a self-intersecting outline counts as outside. Points on
    /// the outline are inside.
    pub fn contains_point(&self, p: Point) -> bool {
        even_odd_contains(&self.points, p)
    }

    /// The points where `line` crosses the polyline, in polyline order.
    pub fn intersection_with_line(&self, line: &Line) -> Option<Vec<Point>> {
        let points: Vec<Point> = self
            .lines()
            .filter_map(|segment| line.intersect(&segment))
            .collect();
        if points.is_empty() {
            None
        } else {
            Some(points)
        }
    }

    /// The convex hull, see [`convex_hull`].
    pub fn convex_hull(&self) -> Polyline {
        Polyline::new(convex_hull(&self.points))
    }

    /// Append the first point at the end, unless the polyline is already
    /// closed or empty.
    #[must_use]
    pub fn close(mut self) -> Polyline {
        if let (Some(start), Some(end)) = (self.start(), self.end()) {
            if start != end {
                self.points.push(start);
            }
        }
        self
    }

    /// Remove every point that lies within `threshold` of the chord between
    /// its neighbors.
    ///
    /// After a removal the same first point is tried with the next pair, so
    /// runs of nearly collinear points collapse to their ends.
    #[must_use]
    pub fn simplify(mut self, threshold: f64) -> Polyline {
        let mut i = 0;
        while i + 2 < self.points.len() {
            let chord = Line::new(self.points[i], self.points[i + 2]);
            let middle = self.points[i + 1];
            if chord.closest_point(middle).distance(middle) <= threshold {
                self.points.remove(i + 1);
            } else {
                i += 1;
            }
        }
        self
    }

    /// Offset every point by `(dx, dy)`.
    #[must_use]
    pub fn translate(self, dx: f64, dy: f64) -> Polyline {
        self.map(|p| p.translate(dx, dy))
    }

    /// Scale every point relative to `origin`.
    #[must_use]
    pub fn scale(self, sx: f64, sy: f64, origin: Point) -> Polyline {
        self.map(|p| p.scale(sx, sy, origin))
    }

    /// Round every point to `precision` decimal places.
    #[must_use]
    pub fn round(self, precision: u32) -> Polyline {
        self.map(|p| p.round(precision))
    }

    fn map(mut self, f: impl Fn(Point) -> Point) -> Polyline {
        for p in &mut self.points {
            *p = f(*p);
        }
        self
    }

    /// The SVG `points` list, `"x1,y1 x2,y2 ..."`.
    pub fn serialize(&self) -> String {
        serialize_points(&self.points)
    }
}

impl From<Vec<Point>> for Polyline {
    fn from(points: Vec<Point>) -> Polyline {
        Polyline::new(points)
    }
}

impl FromStr for Polyline {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Polyline::parse(s)
    }
}

impl fmt::Display for Polyline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{p}")?;
        }
        Ok(())
    }
}

impl Polygon {
    /// Create a polygon from its vertices.
    pub fn new(points: Vec<Point>) -> Polygon {
        Polygon { points }
    }

    /// Parse an SVG `points` list, see [`Polyline::parse`].
    ///
    /// # Errors
    ///
    /// As for [`Polyline::parse`].
    pub fn parse(s: &str) -> Result<Polygon> {
        parse_points(s).map(Polygon::new)
    }

    /// The four corners of a rect, clockwise from its origin.
    pub fn from_rect(rect: &Rect) -> Polygon {
        Polygon::new(vec![
            rect.origin(),
            rect.top_right(),
            rect.corner(),
            rect.bottom_left(),
        ])
    }

    /// The stored vertices, without the closing point.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The first vertex.
    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// The last stored vertex.
    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// The outline as an explicitly closed polyline.
    pub fn to_polyline(&self) -> Polyline {
        Polyline::new(self.points.clone()).close()
    }

    /// The smallest rect containing every vertex, `None` when empty.
    pub fn bbox(&self) -> Option<Rect> {
        Rect::from_point_union(&self.points)
    }

    /// Perimeter length, closing edge included.
    pub fn length(&self) -> f64 {
        self.to_polyline().length()
    }

    /// Whether any edge has nonzero length.
    pub fn is_differentiable(&self) -> bool {
        self.to_polyline().is_differentiable()
    }

    /// Whether `p` is inside the polygon or on its outline (even-odd rule).
    pub fn contains_point(&self, p: Point) -> bool {
        even_odd_contains(&self.points, p)
    }

    /// The point at `ratio` of the perimeter.
    pub fn point_at(&self, ratio: f64) -> Option<Point> {
        self.to_polyline().point_at(ratio)
    }

    /// The point at `length` along the perimeter.
    pub fn point_at_length(&self, length: f64) -> Option<Point> {
        self.to_polyline().point_at_length(length)
    }

    /// The tangent at `ratio` of the perimeter.
    pub fn tangent_at(&self, ratio: f64) -> Option<Line> {
        self.to_polyline().tangent_at(ratio)
    }

    /// The tangent at `length` along the perimeter.
    pub fn tangent_at_length(&self, length: f64) -> Option<Line> {
        self.to_polyline().tangent_at_length(length)
    }

    /// Length along the perimeter to the point nearest to `p`.
    pub fn closest_point_length(&self, p: Point) -> f64 {
        self.to_polyline().closest_point_length(p)
    }

    /// See [`Polyline::closest_point_normalized_length`].
    pub fn closest_point_normalized_length(&self, p: Point) -> f64 {
        self.to_polyline().closest_point_normalized_length(p)
    }

    /// The point on the outline nearest to `p`.
    pub fn closest_point(&self, p: Point) -> Option<Point> {
        self.to_polyline().closest_point(p)
    }

    /// The tangent at the point on the outline nearest to `p`.
    pub fn closest_point_tangent(&self, p: Point) -> Option<Line> {
        self.to_polyline().closest_point_tangent(p)
    }

    /// The points where `line` crosses the outline.
    pub fn intersection_with_line(&self, line: &Line) -> Option<Vec<Point>> {
        self.to_polyline().intersection_with_line(line)
    }

    /// The convex hull of the vertices.
    pub fn convex_hull(&self) -> Polygon {
        Polygon::new(convex_hull(&self.points))
    }

    /// Offset every vertex by `(dx, dy)`.
    #[must_use]
    pub fn translate(self, dx: f64, dy: f64) -> Polygon {
        Polygon::new(Polyline::new(self.points).translate(dx, dy).into_points())
    }

    /// Scale every vertex relative to `origin`.
    #[must_use]
    pub fn scale(self, sx: f64, sy: f64, origin: Point) -> Polygon {
        Polygon::new(
            Polyline::new(self.points)
                .scale(sx, sy, origin)
                .into_points(),
        )
    }

    /// Round every vertex to `precision` decimal places.
    #[must_use]
    pub fn round(self, precision: u32) -> Polygon {
        Polygon::new(Polyline::new(self.points).round(precision).into_points())
    }

    /// The SVG `points` list of the stored vertices.
    pub fn serialize(&self) -> String {
        serialize_points(&self.points)
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(points: Vec<Point>) -> Polygon {
        Polygon::new(points)
    }
}

impl FromStr for Polygon {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Polygon::parse(s)
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Polyline::new(self.points.clone()), f)
    }
}

/// The convex hull of a set of points, by Graham scan.
///
/// The pivot is the point with the lowest y, the highest x breaking ties.
/// The result contains only hull vertices (no collinear points), goes
/// clockwise in y-down space, and starts with the hull vertex that comes
/// first in `points`.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    const THRESHOLD: f64 = 1e-10;

    let Some(&first) = points.first() else {
        return Vec::new();
    };
    let mut pivot = first;
    for &p in &points[1..] {
        if p.y < pivot.y || (p.y == pivot.y && p.x > pivot.x) {
            pivot = p;
        }
    }

    // (point, original index, angle from pivot). The pivot itself sorts last.
    let mut sorted: Vec<(Point, usize, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            let angle = pivot.theta(p);
            (p, i, if angle == 0.0 { 360.0 } else { angle })
        })
        .collect();
    sorted.sort_by(|a, b| a.2.total_cmp(&b.2).then(b.1.cmp(&a.1)));
    // The scan pops from the back; repeating the pivot at the front closes
    // the loop.
    if sorted.len() > 2 {
        sorted.insert(0, sorted[sorted.len() - 1]);
    }

    let mut inside = vec![false; points.len()];
    let mut hull: Vec<(Point, usize, f64)> = Vec::new();
    while let Some(current) = sorted.pop() {
        if inside[current.1] {
            continue;
        }
        loop {
            let n = hull.len();
            if n < 2 {
                hull.push(current);
                break;
            }
            let last = hull[n - 1];
            let second_last = hull[n - 2];
            let cross = second_last.0.cross(last.0, current.0);
            if cross < 0.0 {
                hull.push(current);
                break;
            }
            hull.pop();
            let coincident = last.0 == current.0 || second_last.0 == last.0;
            let angle = last.0.angle_between(second_last.0, current.0);
            if cross == 0.0 && !coincident && (((angle + 1.0) % 360.0) - 1.0).abs() < THRESHOLD {
                // Doubling back: revisit `last` after `current`.
                sorted.push(last);
            } else {
                inside[last.1] = true;
            }
        }
    }

    if hull.len() > 2 {
        hull.pop();
    }
    if let Some((offset, _)) = hull.iter().enumerate().min_by_key(|(_, r)| r.1) {
        hull.rotate_left(offset);
    }
    hull.into_iter().map(|r| r.0).collect()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0., 0.),
            Point::new(10., 0.),
            Point::new(10., 10.),
            Point::new(0., 10.),
        ]
    }

    #[test]
    fn parse_points_list() {
        let p = Polyline::parse(" 10,10 20 , 5  30 10 ").unwrap();
        assert_eq!(
            p.points(),
            &[Point::new(10., 10.), Point::new(20., 5.), Point::new(30., 10.)]
        );
        assert_eq!(p.serialize(), "10,10 20,5 30,10");
        assert_eq!(p.to_string(), "10@10,20@5,30@10");
        assert_eq!(Polyline::parse("").unwrap(), Polyline::default());
        assert_eq!(
            Polyline::parse("1,2 3"),
            Err(Error::OddCoordinateCount(3))
        );
        assert_eq!(
            Polyline::parse("1,2 x,4"),
            Err(Error::InvalidNumber("x".to_string()))
        );
    }

    #[test]
    fn polygon_containment() {
        let polygon = Polygon::new(square());
        assert!(polygon.contains_point(Point::new(5., 5.)));
        assert!(!polygon.contains_point(Point::new(15., 5.)));
        // The outline is inside.
        assert!(polygon.contains_point(Point::new(10., 5.)));
        assert!(polygon.contains_point(Point::new(0., 0.)));
    }

    #[test]
    fn even_odd_self_intersection() {
        // The pentagram's points are inside, its doubly covered middle is not.
        let star = Polyline::new(vec![
            Point::new(50., 0.),
            Point::new(79., 90.),
            Point::new(2., 35.),
            Point::new(98., 35.),
            Point::new(21., 90.),
        ]);
        assert!(!star.contains_point(Point::new(50., 50.)));
        assert!(star.contains_point(Point::new(50., 15.)));
    }

    #[test]
    fn ray_through_vertex() {
        // A diamond whose side vertices lie on the ray from the center.
        let diamond = Polyline::new(vec![
            Point::new(5., 0.),
            Point::new(10., 5.),
            Point::new(5., 10.),
            Point::new(0., 5.),
        ]);
        assert!(diamond.contains_point(Point::new(5., 5.)));
        assert!(!diamond.contains_point(Point::new(-5., 5.)));
    }

    #[test]
    fn hull_drops_interior_points() {
        let mut points = square();
        points.push(Point::new(5., 5.));
        assert_eq!(convex_hull(&points), square());
    }

    #[test]
    fn hull_drops_collinear_and_duplicate_points() {
        let points = vec![
            Point::new(0., 0.),
            Point::new(5., 0.),
            Point::new(10., 0.),
            Point::new(10., 10.),
            Point::new(10., 10.),
            Point::new(0., 10.),
            Point::new(0., 5.),
        ];
        assert_eq!(convex_hull(&points), square());
    }

    #[test]
    fn hull_starts_at_first_hull_point() {
        let points = vec![
            Point::new(5., 5.),
            Point::new(10., 10.),
            Point::new(0., 10.),
            Point::new(0., 0.),
            Point::new(10., 0.),
        ];
        assert_eq!(
            convex_hull(&points),
            vec![
                Point::new(10., 10.),
                Point::new(0., 10.),
                Point::new(0., 0.),
                Point::new(10., 0.),
            ]
        );
        assert!(convex_hull(&[]).is_empty());
        assert_eq!(convex_hull(&[Point::ZERO]), vec![Point::ZERO]);
    }

    #[test]
    fn hull_is_valid_for_random_points() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..30 {
            let points: Vec<Point> = (0..20)
                .map(|_| {
                    Point::new(
                        rng.random_range(-50.0..50.0_f64).round(),
                        rng.random_range(-50.0..50.0_f64).round(),
                    )
                })
                .collect();
            let hull = convex_hull(&points);
            assert!(hull.len() >= 3, "{points:?}");
            for p in &hull {
                assert!(points.contains(p));
            }
            let outline = Polyline::new(hull.clone());
            for p in &points {
                assert!(outline.contains_point(*p), "{p:?} outside {hull:?}");
            }
            // Clockwise on screen: every turn is negative.
            for i in 0..hull.len() {
                let a = hull[i];
                let b = hull[(i + 1) % hull.len()];
                let c = hull[(i + 2) % hull.len()];
                assert!(a.cross(b, c) < 0., "{hull:?}");
            }
        }
    }

    #[test]
    fn measurement() {
        let l = Polyline::new(vec![Point::ZERO, Point::new(10., 0.), Point::new(10., 10.)]);
        assert_eq!(l.length(), 20.);
        assert_eq!(l.point_at(0.75), Some(Point::new(10., 5.)));
        assert_eq!(l.point_at_length(-5.), Some(Point::new(10., 5.)));
        assert_eq!(l.point_at_length(50.), Some(Point::new(10., 10.)));
        assert_eq!(l.point_at_length(-50.), Some(Point::ZERO));
        assert_eq!(Polyline::default().point_at(0.5), None);
        assert_eq!(
            Polyline::new(vec![Point::ZERO]).point_at_length(3.),
            Some(Point::ZERO)
        );

        let t = l.tangent_at_length(15.).unwrap();
        assert_eq!(t, Line::new((10., 5.), (10., 15.)));
        let t = l.tangent_at_length(100.).unwrap();
        assert_eq!(t.start, Point::new(10., 10.));
        assert_eq!(l.tangent_at(-1.).unwrap().start, Point::ZERO);
        assert!(Polyline::new(vec![Point::ZERO, Point::ZERO])
            .tangent_at_length(0.)
            .is_none());

        let polygon = Polygon::new(square());
        assert_eq!(polygon.length(), 40.);
        assert_eq!(polygon.point_at_length(35.), Some(Point::new(0., 5.)));
    }

    #[test]
    fn closest() {
        let l = Polyline::new(vec![Point::ZERO, Point::new(10., 0.), Point::new(10., 10.)]);
        assert_eq!(l.closest_point_length(Point::new(12., 4.)), 14.);
        assert_eq!(l.closest_point(Point::new(12., 4.)), Some(Point::new(10., 4.)));
        assert_eq!(l.closest_point_normalized_length(Point::new(5., -3.)), 0.25);
        assert_eq!(Polyline::default().closest_point_length(Point::ZERO), 0.);
        let t = l.closest_point_tangent(Point::new(5., -3.)).unwrap();
        assert_eq!(t.start, Point::new(5., 0.));
    }

    #[test]
    fn crossings() {
        let l = Polyline::new(square());
        let points = l
            .intersection_with_line(&Line::new((5., -5.), (5., 15.)))
            .unwrap();
        assert_eq!(points, vec![Point::new(5., 0.), Point::new(5., 10.)]);
        assert!(l.intersection_with_line(&Line::new((-5., 5.), (-1., 5.))).is_none());
        // The polygon's closing edge counts.
        let polygon = Polygon::new(square());
        let points = polygon
            .intersection_with_line(&Line::new((-5., 5.), (5., 5.)))
            .unwrap();
        assert_eq!(points, vec![Point::new(0., 5.)]);
    }

    #[test]
    fn simplify_and_close() {
        let l = Polyline::new(vec![
            Point::ZERO,
            Point::new(5., 0.1),
            Point::new(10., 0.),
            Point::new(10., 5.),
            Point::new(10., 10.),
        ]);
        assert_eq!(
            l.clone().simplify(0.5).points(),
            &[Point::ZERO, Point::new(10., 0.), Point::new(10., 10.)]
        );
        assert_eq!(l.clone().simplify(0.).points().len(), 4);

        let closed = Polyline::new(square()).close();
        assert_eq!(closed.points().len(), 5);
        assert_eq!(closed.clone().close(), closed);
    }

    #[test]
    fn polygon_from_rect() {
        let polygon = Polygon::from_rect(&Rect::new(0., 0., 10., 10.));
        assert_eq!(polygon.points(), square().as_slice());
        assert_eq!(polygon.bbox(), Some(Rect::new(0., 0., 10., 10.)));
        assert_eq!(polygon.serialize(), "0,0 10,0 10,10 0,10");
        assert_eq!(polygon.to_polyline().points().len(), 5);
    }

    #[test]
    fn transforms() {
        let l = Polyline::new(vec![Point::new(1., 1.), Point::new(2.26, 2.)])
            .translate(1., 0.)
            .scale(2., 1., Point::ZERO)
            .round(1);
        assert_eq!(l.points(), &[Point::new(4., 1.), Point::new(6.5, 2.)]);
        assert_eq!(Polyline::default().bbox(), None);
    }
}
