// Copyright 2026 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for whether two shapes overlap.
//!
//! [`exists`] answers for any supported pair of shapes, in either order.
//! Each pair also has its own function, named for the pair in the order the
//! test is written.
//!
//! Filled shapes (rects, ellipses, polygons and closed subpaths of paths)
//! overlap anything with a point inside them. Lines and polylines only
//! overlap what crosses or touches them, so a line lying entirely inside an
//! ellipse does not intersect it.

use std::borrow::Cow;

use crate::common::{det2, det3};
use crate::polyline::even_odd_contains;
use crate::{Curve, Ellipse, Error, Line, Path, PathOpts, Point, Polygon, Polyline, Rect, Result, Segment};

/// The kind of a [`Shape`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// A [`Line`].
    Line,
    /// An [`Ellipse`].
    Ellipse,
    /// A [`Rect`].
    Rect,
    /// A [`Polyline`].
    Polyline,
    /// A [`Polygon`].
    Polygon,
    /// A [`Path`].
    Path,
    /// A [`Curve`]. No pair involving a curve is supported.
    Curve,
}

/// Any shape that can be passed to [`exists`].
#[derive(Clone, Copy, Debug)]
pub enum Shape<'a> {
    /// A line segment.
    Line(Line),
    /// An ellipse.
    Ellipse(Ellipse),
    /// A rectangle.
    Rect(Rect),
    /// An open polyline.
    Polyline(&'a Polyline),
    /// A closed polygon.
    Polygon(&'a Polygon),
    /// A path.
    Path(&'a Path),
    /// A cubic Bézier curve.
    Curve(Curve),
}

impl Shape<'_> {
    /// The kind of shape.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Line(_) => ShapeKind::Line,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::Rect(_) => ShapeKind::Rect,
            Shape::Polyline(_) => ShapeKind::Polyline,
            Shape::Polygon(_) => ShapeKind::Polygon,
            Shape::Path(_) => ShapeKind::Path,
            Shape::Curve(_) => ShapeKind::Curve,
        }
    }
}

macro_rules! shape_from_copy {
    ($($ty:ident),*) => {
        $(
            impl From<$ty> for Shape<'_> {
                fn from(shape: $ty) -> Self {
                    Shape::$ty(shape)
                }
            }

            impl From<&$ty> for Shape<'_> {
                fn from(shape: &$ty) -> Self {
                    Shape::$ty(*shape)
                }
            }
        )*
    };
}

shape_from_copy!(Line, Ellipse, Rect, Curve);

impl<'a> From<&'a Polyline> for Shape<'a> {
    fn from(shape: &'a Polyline) -> Self {
        Shape::Polyline(shape)
    }
}

impl<'a> From<&'a Polygon> for Shape<'a> {
    fn from(shape: &'a Polygon) -> Self {
        Shape::Polygon(shape)
    }
}

impl<'a> From<&'a Path> for Shape<'a> {
    fn from(shape: &'a Path) -> Self {
        Shape::Path(shape)
    }
}

/// Whether two shapes overlap, measuring paths with default options.
///
/// # Errors
///
/// [`Error::UnsupportedIntersection`] if there is no test for the pair.
pub fn exists<'a, 'b>(a: impl Into<Shape<'a>>, b: impl Into<Shape<'b>>) -> Result<bool> {
    exists_with(a, b, PathOpts::default(), PathOpts::default())
}

/// Whether two shapes overlap, with options for flattening either shape if
/// it is a path.
///
/// # Errors
///
/// [`Error::UnsupportedIntersection`] if there is no test for the pair.
pub fn exists_with<'a, 'b>(
    a: impl Into<Shape<'a>>,
    b: impl Into<Shape<'b>>,
    a_opts: PathOpts<'_>,
    b_opts: PathOpts<'_>,
) -> Result<bool> {
    let (a, b) = (a.into(), b.into());
    if let Some(result) = dispatch(a, b, a_opts, b_opts) {
        return Ok(result);
    }
    let swappable = matches!(
        b.kind(),
        ShapeKind::Ellipse | ShapeKind::Rect | ShapeKind::Polyline | ShapeKind::Polygon | ShapeKind::Path
    );
    if swappable {
        if let Some(result) = dispatch(b, a, b_opts, a_opts) {
            return Ok(result);
        }
    }
    Err(Error::UnsupportedIntersection {
        first: a.kind(),
        second: b.kind(),
    })
}

fn dispatch(a: Shape<'_>, b: Shape<'_>, a_opts: PathOpts<'_>, b_opts: PathOpts<'_>) -> Option<bool> {
    Some(match (a, b) {
        (Shape::Line(a), Shape::Line(b)) => line_with_line(&a, &b),
        (Shape::Ellipse(a), Shape::Line(b)) => ellipse_with_line(&a, &b),
        (Shape::Ellipse(a), Shape::Ellipse(b)) => ellipse_with_ellipse(&a, &b),
        (Shape::Rect(a), Shape::Line(b)) => rect_with_line(&a, &b),
        (Shape::Rect(a), Shape::Ellipse(b)) => rect_with_ellipse(&a, &b),
        (Shape::Rect(a), Shape::Rect(b)) => rect_with_rect(&a, &b),
        (Shape::Polyline(a), Shape::Line(b)) => polyline_with_line(a, &b),
        (Shape::Polyline(a), Shape::Ellipse(b)) => polyline_with_ellipse(a, &b),
        (Shape::Polyline(a), Shape::Rect(b)) => polyline_with_rect(a, &b),
        (Shape::Polyline(a), Shape::Polyline(b)) => polyline_with_polyline(a, b),
        (Shape::Polygon(a), Shape::Line(b)) => polygon_with_line(a, &b),
        (Shape::Polygon(a), Shape::Ellipse(b)) => polygon_with_ellipse(a, &b),
        (Shape::Polygon(a), Shape::Rect(b)) => polygon_with_rect(a, &b),
        (Shape::Polygon(a), Shape::Polyline(b)) => polygon_with_polyline(a, b),
        (Shape::Polygon(a), Shape::Polygon(b)) => polygon_with_polygon(a, b),
        (Shape::Path(a), Shape::Line(b)) => path_with_line(a, &b, a_opts),
        (Shape::Path(a), Shape::Ellipse(b)) => path_with_ellipse(a, &b, a_opts),
        (Shape::Path(a), Shape::Rect(b)) => path_with_rect(a, &b, a_opts),
        (Shape::Path(a), Shape::Polyline(b)) => path_with_polyline(a, b, a_opts),
        (Shape::Path(a), Shape::Polygon(b)) => path_with_polygon(a, b, a_opts),
        (Shape::Path(a), Shape::Path(b)) => path_with_path(a, b, a_opts, b_opts),
        _ => return None,
    })
}

/// Whether two line segments cross or touch.
///
/// Parallel segments never intersect, even when they overlap.
pub fn line_with_line(line1: &Line, line2: &Line) -> bool {
    let s1 = line1.end - line1.start;
    let s2 = line2.end - line2.start;
    let s3 = line1.start - line2.start;
    let p = s1.x * s2.y - s2.x * s1.y;
    let s = (s1.x * s3.y - s1.y * s3.x) / p;
    let t = (s2.x * s3.y - s2.y * s3.x) / p;
    (0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&t)
}

/// Whether a line segment crosses or touches the outline of an ellipse.
pub fn ellipse_with_line(ellipse: &Ellipse, line: &Line) -> bool {
    let x1 = line.start.x - ellipse.x;
    let y1 = line.start.y - ellipse.y;
    let dx = line.end.x - line.start.x;
    let dy = line.end.y - line.start.y;
    let a2 = ellipse.a * ellipse.a;
    let b2 = ellipse.b * ellipse.b;
    let qa = dx * dx / a2 + dy * dy / b2;
    let qb = 2.0 * x1 * dx / a2 + 2.0 * y1 * dy / b2;
    let qc = x1 * x1 / a2 + y1 * y1 / b2 - 1.0;
    let d = qb * qb - 4.0 * qa * qc;
    let in_range = |t: f64| (0.0..=1.0).contains(&t);
    if d == 0.0 {
        in_range(-qb / 2.0 / qa)
    } else if d > 0.0 {
        let sqrt = d.sqrt();
        in_range((-qb + sqrt) / 2.0 / qa) || in_range((-qb - sqrt) / 2.0 / qa)
    } else {
        false
    }
}

/// Whether two ellipses overlap.
///
/// Classifies the pencil of the two conics without solving for the
/// intersection points.
pub fn ellipse_with_ellipse(ellipse1: &Ellipse, ellipse2: &Ellipse) -> bool {
    // Implicit form `A x² + 2C xy + B y² + 2D x + 2E y + F = 0` as a
    // symmetric matrix. The ellipses are axis-aligned, so C is zero.
    fn conic(e: &Ellipse) -> [[f64; 3]; 3] {
        let a2 = e.a * e.a;
        let b2 = e.b * e.b;
        let a = b2;
        let b = a2;
        let d = -a * e.x;
        let e_ = -b * e.y;
        let f = a * e.x * e.x + b * e.y * e.y - a2 * b2;
        [[a, 0.0, d], [0.0, b, e_], [d, e_, f]]
    }
    // `m` with the columns selected by `cols` taken from `n`.
    fn mix(m: &[[f64; 3]; 3], n: &[[f64; 3]; 3], cols: [bool; 3]) -> [[f64; 3]; 3] {
        let mut out = *m;
        for (row, out_row) in out.iter_mut().enumerate() {
            for (col, &take) in cols.iter().enumerate() {
                if take {
                    out_row[col] = n[row][col];
                }
            }
        }
        out
    }
    const THIRD: f64 = 0.33333333;

    let m1 = conic(ellipse1);
    let m2 = conic(ellipse2);
    let l3 = det3(m1);
    let l0 = det3(m2);
    let l2 = THIRD
        * (det3(mix(&m1, &m2, [true, false, false]))
            + det3(mix(&m1, &m2, [false, true, false]))
            + det3(mix(&m1, &m2, [false, false, true])));
    let l1 = THIRD
        * (det3(mix(&m2, &m1, [true, false, false]))
            + det3(mix(&m2, &m1, [false, true, false]))
            + det3(mix(&m2, &m1, [false, false, true])));

    let delta1 = det2([[l3, l2], [l2, l1]]);
    let delta2 = det2([[l3, l1], [l2, l0]]);
    let delta3 = det2([[l2, l1], [l1, l0]]);
    let dp = det2([[2.0 * delta1, delta2], [delta2, 2.0 * delta3]]);

    !(dp > 0.0 && (l1 > 0.0 || l2 > 0.0))
}

/// Whether a line segment touches a rect or lies inside it.
pub fn rect_with_line(rect: &Rect, line: &Line) -> bool {
    let (start, end) = (line.start, line.end);
    let (x0, y0) = (rect.x, rect.y);
    let (x1, y1) = (rect.x + rect.width, rect.y + rect.height);
    if (start.x > x1 && end.x > x1)
        || (start.x < x0 && end.x < x0)
        || (start.y > y1 && end.y > y1)
        || (start.y < y0 && end.y < y0)
    {
        return false;
    }
    if rect.contains_point(start) || rect.contains_point(end) {
        return true;
    }
    rect.sides().iter().any(|side| line_with_line(side, line))
}

/// Whether a rect and an ellipse overlap.
pub fn rect_with_ellipse(rect: &Rect, ellipse: &Ellipse) -> bool {
    rect_with_rect(rect, &ellipse.bbox())
        && polygon_with_ellipse(&Polygon::from_rect(rect), ellipse)
}

/// Whether two rects overlap. Rects that only share an edge do not.
pub fn rect_with_rect(rect1: &Rect, rect2: &Rect) -> bool {
    rect1.x < rect2.x + rect2.width
        && rect1.x + rect1.width > rect2.x
        && rect1.y < rect2.y + rect2.height
        && rect1.y + rect1.height > rect2.y
}

/// Whether a line segment crosses or touches a polyline.
pub fn polyline_with_line(polyline: &Polyline, line: &Line) -> bool {
    points_with_line(polyline.points(), line, false)
}

/// Whether a polyline touches an ellipse or starts inside it.
pub fn polyline_with_ellipse(polyline: &Polyline, ellipse: &Ellipse) -> bool {
    points_with_ellipse(polyline.points(), ellipse, false)
}

/// Whether a polyline touches a rect or starts inside it.
pub fn polyline_with_rect(polyline: &Polyline, rect: &Rect) -> bool {
    points_with_polygon(polyline.points(), Polygon::from_rect(rect).points(), false)
}

/// Whether two polylines cross or touch.
pub fn polyline_with_polyline(polyline1: &Polyline, polyline2: &Polyline) -> bool {
    points_with_polyline(polyline1.points(), polyline2.points(), false)
}

/// Whether a line segment touches a polygon or starts inside it.
pub fn polygon_with_line(polygon: &Polygon, line: &Line) -> bool {
    points_with_line(polygon.points(), line, true)
}

/// Whether a polygon and an ellipse overlap.
pub fn polygon_with_ellipse(polygon: &Polygon, ellipse: &Ellipse) -> bool {
    points_with_ellipse(polygon.points(), ellipse, true)
}

/// Whether a polygon and a rect overlap.
pub fn polygon_with_rect(polygon: &Polygon, rect: &Rect) -> bool {
    points_with_polygon(polygon.points(), Polygon::from_rect(rect).points(), true)
}

/// Whether a polyline touches a polygon or starts inside it.
pub fn polygon_with_polyline(polygon: &Polygon, polyline: &Polyline) -> bool {
    points_with_polyline(polygon.points(), polyline.points(), true)
}

/// Whether two polygons overlap.
pub fn polygon_with_polygon(polygon1: &Polygon, polygon2: &Polygon) -> bool {
    points_with_polygon(polygon1.points(), polygon2.points(), true)
}

/// Whether a path and a line segment overlap.
///
/// Each subpath is flattened with `opts` and tested as a polygon if it ends
/// in a `ClosePath`, as a polyline otherwise.
pub fn path_with_line(path: &Path, line: &Line, opts: PathOpts<'_>) -> bool {
    outlines(path, opts)
        .iter()
        .any(|(points, closed)| points_with_line(points, line, *closed))
}

/// Whether a path and an ellipse overlap, see [`path_with_line`].
pub fn path_with_ellipse(path: &Path, ellipse: &Ellipse, opts: PathOpts<'_>) -> bool {
    outlines(path, opts)
        .iter()
        .any(|(points, closed)| points_with_ellipse(points, ellipse, *closed))
}

/// Whether a path and a rect overlap, see [`path_with_line`].
pub fn path_with_rect(path: &Path, rect: &Rect, opts: PathOpts<'_>) -> bool {
    path_with_polygon(path, &Polygon::from_rect(rect), opts)
}

/// Whether a path and a polyline overlap, see [`path_with_line`].
pub fn path_with_polyline(path: &Path, polyline: &Polyline, opts: PathOpts<'_>) -> bool {
    path_with_points(path, polyline.points(), false, opts)
}

/// Whether a path and a polygon overlap, see [`path_with_line`].
pub fn path_with_polygon(path: &Path, polygon: &Polygon, opts: PathOpts<'_>) -> bool {
    path_with_points(path, polygon.points(), true, opts)
}

/// Whether two paths overlap, see [`path_with_line`].
pub fn path_with_path(path1: &Path, path2: &Path, opts1: PathOpts<'_>, opts2: PathOpts<'_>) -> bool {
    outlines(path1, opts1)
        .iter()
        .any(|(points, closed)| path_with_points(path2, points, *closed, opts2))
}

fn path_with_points(path: &Path, points: &[Point], interior: bool, opts: PathOpts<'_>) -> bool {
    outlines(path, opts).iter().any(|(outline, closed)| {
        if *closed {
            points_with_polygon(points, outline, interior)
        } else {
            points_with_polyline(points, outline, interior)
        }
    })
}

/// The first point run of every subpath, and whether the subpath ends in a
/// `ClosePath`. Subpaths that draw nothing are skipped.
fn outlines(path: &Path, opts: PathOpts<'_>) -> Vec<(Vec<Point>, bool)> {
    // Cached subdivisions index the path's own segments, which only line up
    // with the subpaths if validation inserts nothing.
    let cache = opts.segment_subdivisions.filter(|_| path.is_valid());
    let mut outlines = Vec::new();
    let mut offset = 0;
    for subpath in path.subpaths() {
        let range = offset..offset + subpath.len();
        offset = range.end;
        let mut subpath_opts = PathOpts::new(opts.precision);
        if let Some(subdivisions) = cache.and_then(|all| all.get(range)) {
            subpath_opts = subpath_opts.with_segment_subdivisions(subdivisions);
        }
        let closed = subpath.segments().last() == Some(&Segment::ClosePath);
        if let Some(points) = subpath.to_points(subpath_opts).into_iter().next() {
            outlines.push((points, closed));
        }
    }
    outlines
}

/// The points with the first one repeated at the end, unless it already is.
fn closed(points: &[Point]) -> Cow<'_, [Point]> {
    match (points.first(), points.last()) {
        (Some(start), Some(end)) if start != end => {
            let mut closed = points.to_vec();
            closed.push(*start);
            Cow::Owned(closed)
        }
        _ => Cow::Borrowed(points),
    }
}

fn edges(points: &[Point]) -> impl Iterator<Item = Line> + '_ {
    points.windows(2).map(|w| Line::new(w[0], w[1]))
}

fn points_with_line(points: &[Point], line: &Line, interior: bool) -> bool {
    if interior {
        if even_odd_contains(points, line.start) {
            return true;
        }
        let outline = closed(points);
        let hit = edges(&outline).any(|edge| line_with_line(line, &edge));
        hit
    } else {
        edges(points).any(|edge| line_with_line(line, &edge))
    }
}

fn points_with_ellipse(points: &[Point], ellipse: &Ellipse, interior: bool) -> bool {
    let Some(&start) = points.first() else {
        return false;
    };
    if ellipse.contains_point(start) {
        return true;
    }
    if interior {
        if even_odd_contains(points, ellipse.center()) {
            return true;
        }
        let outline = closed(points);
        let hit = edges(&outline).any(|edge| ellipse_with_line(ellipse, &edge));
        hit
    } else {
        edges(points).any(|edge| ellipse_with_line(ellipse, &edge))
    }
}

/// `points` as the polygon if `interior`; `other` is always open.
fn points_with_polyline(points: &[Point], other: &[Point], interior: bool) -> bool {
    if interior {
        if other.first().is_some_and(|&start| even_odd_contains(points, start)) {
            return true;
        }
        let outline = closed(points);
        edges(other).any(|edge| points_with_line(&outline, &edge, false))
    } else {
        edges(other).any(|edge| points_with_line(points, &edge, false))
    }
}

fn points_with_polygon(points: &[Point], polygon: &[Point], interior: bool) -> bool {
    points
        .first()
        .is_some_and(|&start| even_odd_contains(polygon, start))
        || points_with_polyline(points, &closed(polygon), interior)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn square(x: f64, y: f64, size: f64) -> Polygon {
        Polygon::from_rect(&Rect::new(x, y, size, size))
    }

    #[test]
    fn lines() {
        let a = Line::new((0., 0.), (10., 0.));
        assert!(line_with_line(&a, &Line::new((5., -5.), (5., 5.))));
        // Touching at an endpoint counts.
        assert!(line_with_line(&a, &Line::new((10., 0.), (10., 5.))));
        assert!(!line_with_line(&a, &Line::new((11., -5.), (11., 5.))));
        assert!(!line_with_line(&a, &Line::new((0., 1.), (10., 1.))));
        // Collinear overlap is treated as parallel.
        assert!(!line_with_line(&a, &Line::new((5., 0.), (15., 0.))));
    }

    #[test]
    fn ellipse_and_line() {
        let e = Ellipse::new((0., 0.), 2., 1.);
        assert!(ellipse_with_line(&e, &Line::new((-5., 0.), (5., 0.))));
        assert!(ellipse_with_line(&e, &Line::new((0., 0.), (5., 0.))));
        // Tangent to the top.
        assert!(ellipse_with_line(&e, &Line::new((-5., 1.), (5., 1.))));
        assert!(!ellipse_with_line(&e, &Line::new((-5., 2.), (5., 2.))));
        // Inside without reaching the outline.
        assert!(!ellipse_with_line(&e, &Line::new((-0.5, 0.), (0.5, 0.))));
    }

    #[test]
    fn ellipses() {
        let e = |x, y, a, b| Ellipse::new((x, y), a, b);
        assert!(ellipse_with_ellipse(&e(0., 0., 2., 1.), &e(3., 0., 2., 1.)));
        assert!(!ellipse_with_ellipse(&e(0., 0., 2., 1.), &e(5., 0., 2., 1.)));
        assert!(!ellipse_with_ellipse(&e(0., 0., 1., 1.), &e(10., 0., 1., 1.)));
        assert!(!ellipse_with_ellipse(&e(0., 0., 1., 1.), &e(1.5, 1.5, 1., 1.)));
        assert!(ellipse_with_ellipse(&e(0., 0., 3., 1.), &e(0., 0., 1., 3.)));
        assert!(ellipse_with_ellipse(&e(0., 0., 5., 5.), &e(0., 0., 1., 1.)));
        assert!(ellipse_with_ellipse(
            &e(100., 100., 20., 10.),
            &e(130., 100., 15., 15.)
        ));
    }

    #[test]
    fn rects() {
        let r = Rect::new(0., 0., 10., 10.);
        assert!(rect_with_rect(&r, &Rect::new(5., 5., 10., 10.)));
        assert!(!rect_with_rect(&r, &Rect::new(10., 0., 10., 10.)));
        assert!(rect_with_line(&r, &Line::new((2., 2.), (3., 3.))));
        assert!(rect_with_line(&r, &Line::new((-5., 5.), (15., 5.))));
        assert!(!rect_with_line(&r, &Line::new((11., 0.), (11., 10.))));
        assert!(!rect_with_line(&r, &Line::new((12., 0.), (20., 15.))));
        assert!(rect_with_ellipse(&r, &Ellipse::new((12., 5.), 3., 2.)));
        assert!(rect_with_ellipse(&r, &Ellipse::new((5., 5.), 1., 1.)));
        // Boxes overlap but the ellipse misses the corner.
        assert!(!rect_with_ellipse(&r, &Ellipse::new((12.5, 12.5), 3., 3.)));
    }

    #[test]
    fn polylines_and_polygons() {
        let zigzag = Polyline::new(vec![p(0., 0.), p(10., 10.), p(20., 0.)]);
        let inner = Line::new((9., 1.), (11., 1.));
        assert!(!polyline_with_line(&zigzag, &inner));
        assert!(polyline_with_line(&zigzag, &Line::new((0., 5.), (20., 5.))));

        let outline = Polyline::new(vec![p(0., 0.), p(10., 0.), p(10., 10.), p(0., 10.)]);
        let polygon = Polygon::new(outline.points().to_vec());
        let small = Line::new((4., 4.), (6., 6.));
        assert!(!polyline_with_line(&outline, &small));
        assert!(polygon_with_line(&polygon, &small));

        let dot = Ellipse::new((5., 5.), 1., 1.);
        assert!(!polyline_with_ellipse(&outline, &dot));
        assert!(polygon_with_ellipse(&polygon, &dot));
        assert!(polyline_with_ellipse(&outline, &Ellipse::new((10., 5.), 1., 1.)));
        // The open side does not count.
        assert!(!polyline_with_ellipse(&outline, &Ellipse::new((0., 5.), 1., 1.)));

        assert!(polyline_with_rect(&zigzag, &Rect::new(8., 8., 4., 4.)));
        assert!(!polyline_with_rect(&zigzag, &Rect::new(30., 0., 4., 4.)));
        assert!(polygon_with_rect(&polygon, &Rect::new(2., 2., 1., 1.)));
        assert!(polygon_with_rect(&square(2., 2., 1.), &Rect::new(0., 0., 10., 10.)));

        let crossing = Polyline::new(vec![p(5., -5.), p(5., 5.)]);
        assert!(polyline_with_polyline(&outline, &crossing));
        let inside = Polyline::new(vec![p(4., 4.), p(6., 6.)]);
        assert!(!polyline_with_polyline(&outline, &inside));
        assert!(polygon_with_polyline(&polygon, &inside));

        assert!(polygon_with_polygon(&polygon, &square(2., 2., 1.)));
        assert!(polygon_with_polygon(&square(2., 2., 1.), &polygon));
        assert!(!polygon_with_polygon(&polygon, &square(20., 20., 1.)));
    }

    #[test]
    fn paths() {
        let opts = PathOpts::default();
        let closed: Path = "M 0 0 L 10 0 L 10 10 L 0 10 Z".parse().unwrap();
        let open: Path = "M 0 0 L 10 0 L 10 10 L 0 10".parse().unwrap();
        let small = Line::new((4., 4.), (6., 6.));
        assert!(path_with_line(&closed, &small, opts));
        assert!(!path_with_line(&open, &small, opts));
        let dot = Ellipse::new((5., 5.), 1., 1.);
        assert!(path_with_ellipse(&closed, &dot, opts));
        assert!(!path_with_ellipse(&open, &dot, opts));
        assert!(path_with_rect(&open, &Rect::new(-1., -1., 12., 12.), opts));
        assert!(!path_with_rect(&open, &Rect::new(20., 20., 1., 1.), opts));

        let inside = Polyline::new(vec![p(4., 4.), p(6., 6.)]);
        assert!(path_with_polyline(&closed, &inside, opts));
        assert!(!path_with_polyline(&open, &inside, opts));
        assert!(path_with_polygon(&closed, &square(2., 2., 1.), opts));
        assert!(!path_with_polygon(&open, &square(2., 2., 1.), opts));

        let far: Path = "M 20 20 L 30 30".parse().unwrap();
        assert!(!path_with_path(&closed, &far, opts, opts));
        let through: Path = "M 5 -5 C 5 0 5 5 5 15".parse().unwrap();
        assert!(path_with_path(&open, &through, opts, opts));
        let nested: Path = "M 4 4 L 6 4 L 6 6 Z".parse().unwrap();
        assert!(path_with_path(&closed, &nested, opts, opts));
        assert!(path_with_path(&nested, &closed, opts, opts));
        assert!(!path_with_path(&open, &nested, opts, opts));

        // Only the second subpath is near the line.
        let two: Path = "M 0 0 L 1 0 M 20 0 L 20 10".parse().unwrap();
        assert!(path_with_line(&two, &Line::new((15., 5.), (25., 5.)), opts));
        assert!(!path_with_line(&Path::new(), &small, opts));
    }

    #[test]
    fn cached_path_options() {
        let path: Path = "M 0 0 C 0 100 100 100 100 0 Z".parse().unwrap();
        let subdivisions = path.segment_subdivisions(2);
        let cached = PathOpts::new(2).with_segment_subdivisions(&subdivisions);
        let line = Line::new((50., 50.), (50., 200.));
        assert_eq!(
            path_with_line(&path, &line, cached),
            path_with_line(&path, &line, PathOpts::new(2))
        );
        assert!(path_with_line(&path, &line, cached));
    }

    #[test]
    fn dispatch_is_symmetric() {
        let polyline = Polyline::new(vec![p(0., 0.), p(6., 6.), p(12., 0.)]);
        let polygon = square(3., 1., 4.);
        let path: Path = "M 2 2 L 8 2 L 8 8 Z M 20 20 C 25 20 25 25 20 25"
            .parse()
            .unwrap();
        let shapes = [
            Shape::from(Line::new((-1., 3.), (9., 3.))),
            Shape::from(Line::new((30., 30.), (40., 40.))),
            Shape::from(Ellipse::new((5., 5.), 2., 1.)),
            Shape::from(Ellipse::new((22., 22.), 1., 1.)),
            Shape::from(Rect::new(4., 4., 2., 2.)),
            Shape::from(Rect::new(50., 50., 2., 2.)),
            Shape::from(&polyline),
            Shape::from(&polygon),
            Shape::from(&path),
        ];
        let mut hits = 0;
        for a in shapes {
            for b in shapes {
                let ab = exists(a, b).unwrap();
                let ba = exists(b, a).unwrap();
                assert_eq!(ab, ba, "{:?} / {:?}", a.kind(), b.kind());
                hits += usize::from(ab);
            }
        }
        assert!(hits > 0);
    }

    #[test]
    fn unsupported_pairs() {
        let curve = Curve::new((0., 0.), (0., 1.), (1., 1.), (1., 0.));
        let line = Line::new((0., 0.), (1., 1.));
        assert_eq!(
            exists(&curve, &line),
            Err(Error::UnsupportedIntersection {
                first: ShapeKind::Curve,
                second: ShapeKind::Line
            })
        );
        assert_eq!(
            exists(&line, &curve),
            Err(Error::UnsupportedIntersection {
                first: ShapeKind::Line,
                second: ShapeKind::Curve
            })
        );
        assert!(exists(&curve, &Rect::new(0., 0., 1., 1.)).is_err());
        assert_eq!(exists(&line, &Rect::new(0., 0., 2., 2.)), Ok(true));
    }
}
