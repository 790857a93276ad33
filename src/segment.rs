// Copyright 2026 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path segments.

use std::fmt;

use crate::{Curve, CurveOpts, Error, Line, Point, Rect, Result};

/// One command of a [`Path`](crate::Path).
///
/// A segment stores only the points it introduces. Its start point is the
/// end of the segment before it, and a `ClosePath` ends where its subpath's
/// `MoveTo` does, so the full geometry is only known once the segment is in
/// a path; see [`Path::resolve`](crate::Path::resolve).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Segment {
    /// Start a new subpath at the point.
    MoveTo(Point),
    /// A straight line to the point.
    LineTo(Point),
    /// A cubic Bézier through two control points to the end point.
    CurveTo(Point, Point, Point),
    /// A straight line back to the start of the subpath.
    ClosePath,
}

/// A segment with its start point filled in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSeg {
    /// A `MoveTo`: a point with no extent.
    Move(Point),
    /// A `LineTo` or `ClosePath`.
    Line(Line),
    /// A `CurveTo`.
    Cubic(Curve),
}

impl Segment {
    /// Build segments from a command letter and its coordinates.
    ///
    /// Coordinates beyond one segment's worth repeat the command, except
    /// that extra pairs after `M` become `LineTo`s.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownCommand`] for a letter other than `M`, `L`, `C`, `Z`
    /// or `z`, and [`Error::InvalidArity`] when the coordinate count is not a
    /// positive multiple of what the command takes (zero for `Z`).
    pub fn from_coords(command: char, coords: &[f64]) -> Result<Vec<Segment>> {
        let expected = match command {
            'M' | 'L' => 2,
            'C' => 6,
            'Z' | 'z' => 0,
            _ => return Err(Error::UnknownCommand(command)),
        };
        let arity_error = || Error::InvalidArity {
            command,
            expected,
            found: coords.len(),
        };
        if expected == 0 {
            return if coords.is_empty() {
                Ok(vec![Segment::ClosePath])
            } else {
                Err(arity_error())
            };
        }
        if coords.is_empty() || coords.len() % expected != 0 {
            return Err(arity_error());
        }
        Ok(coords
            .chunks_exact(expected)
            .enumerate()
            .map(|(i, c)| match (command, c) {
                ('M', &[x, y]) if i == 0 => Segment::MoveTo(Point::new(x, y)),
                ('C', &[x1, y1, x2, y2, x, y]) => {
                    Segment::CurveTo(Point::new(x1, y1), Point::new(x2, y2), Point::new(x, y))
                }
                _ => Segment::LineTo(Point::new(c[0], c[1])),
            })
            .collect())
    }

    /// The command letter.
    pub fn command(&self) -> char {
        match self {
            Segment::MoveTo(_) => 'M',
            Segment::LineTo(_) => 'L',
            Segment::CurveTo(..) => 'C',
            Segment::ClosePath => 'Z',
        }
    }

    /// Whether the segment starts a subpath, which only `MoveTo` does.
    #[inline]
    pub fn is_subpath_start(&self) -> bool {
        matches!(self, Segment::MoveTo(_))
    }

    /// Whether the segment draws anything; every segment but `MoveTo` does.
    #[inline]
    pub fn is_visible(&self) -> bool {
        !self.is_subpath_start()
    }

    /// The end point the segment stores, which `ClosePath` does not.
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            Segment::MoveTo(p) | Segment::LineTo(p) | Segment::CurveTo(_, _, p) => Some(p),
            Segment::ClosePath => None,
        }
    }

    /// Offset the stored points by `(dx, dy)`.
    #[must_use]
    pub fn translate(self, dx: f64, dy: f64) -> Segment {
        self.map(|p| p.translate(dx, dy))
    }

    /// Scale the stored points relative to `origin`.
    #[must_use]
    pub fn scale(self, sx: f64, sy: f64, origin: Point) -> Segment {
        self.map(|p| p.scale(sx, sy, origin))
    }

    /// Round the stored points to `precision` decimal places.
    #[must_use]
    pub fn round(self, precision: u32) -> Segment {
        self.map(|p| p.round(precision))
    }

    fn map(self, f: impl Fn(Point) -> Point) -> Segment {
        match self {
            Segment::MoveTo(p) => Segment::MoveTo(f(p)),
            Segment::LineTo(p) => Segment::LineTo(f(p)),
            Segment::CurveTo(p1, p2, p3) => Segment::CurveTo(f(p1), f(p2), f(p3)),
            Segment::ClosePath => Segment::ClosePath,
        }
    }

    /// The path-data token, such as `"C 1 2 3 4 5 6"`.
    pub fn serialize(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::MoveTo(p) => write!(f, "M {} {}", p.x, p.y),
            Segment::LineTo(p) => write!(f, "L {} {}", p.x, p.y),
            Segment::CurveTo(p1, p2, p3) => write!(
                f,
                "C {} {} {} {} {} {}",
                p1.x, p1.y, p2.x, p2.y, p3.x, p3.y
            ),
            Segment::ClosePath => f.write_str("Z"),
        }
    }
}

impl From<PathSeg> for Segment {
    fn from(seg: PathSeg) -> Segment {
        match seg {
            PathSeg::Move(p) => Segment::MoveTo(p),
            PathSeg::Line(l) => Segment::LineTo(l.end),
            PathSeg::Cubic(c) => Segment::CurveTo(c.control_point1, c.control_point2, c.end),
        }
    }
}

impl PathSeg {
    /// The start point. A `Move` starts where it ends.
    pub fn start(&self) -> Point {
        match self {
            PathSeg::Move(p) => *p,
            PathSeg::Line(l) => l.start,
            PathSeg::Cubic(c) => c.start,
        }
    }

    /// The end point.
    pub fn end(&self) -> Point {
        match self {
            PathSeg::Move(p) => *p,
            PathSeg::Line(l) => l.end,
            PathSeg::Cubic(c) => c.end,
        }
    }

    /// Whether the segment draws anything.
    #[inline]
    pub fn is_visible(&self) -> bool {
        !matches!(self, PathSeg::Move(_))
    }

    /// Whether the segment has a direction, i.e. is more than a point.
    pub fn is_differentiable(&self) -> bool {
        match self {
            PathSeg::Move(_) => false,
            PathSeg::Line(l) => l.is_differentiable(),
            PathSeg::Cubic(c) => c.is_differentiable(),
        }
    }

    /// The bounding box, `None` for a `Move`.
    pub fn bbox(&self) -> Option<Rect> {
        match self {
            PathSeg::Move(_) => None,
            PathSeg::Line(l) => Some(l.bbox()),
            PathSeg::Cubic(c) => Some(c.bbox()),
        }
    }

    /// Subdivisions of a curve; lines and moves have none.
    pub fn subdivisions(&self, precision: u32) -> Vec<Curve> {
        match self {
            PathSeg::Cubic(c) => c.subdivisions(precision),
            _ => Vec::new(),
        }
    }

    /// The length.
    pub fn length(&self, opts: CurveOpts<'_>) -> f64 {
        match self {
            PathSeg::Move(_) => 0.0,
            PathSeg::Line(l) => l.length(),
            PathSeg::Cubic(c) => c.length(opts),
        }
    }

    /// The length up to parameter `t`.
    pub fn length_at_t(&self, t: f64, opts: CurveOpts<'_>) -> f64 {
        match self {
            PathSeg::Move(_) => 0.0,
            PathSeg::Line(l) => l.length() * t.clamp(0.0, 1.0),
            PathSeg::Cubic(c) => c.length_at_t(t, opts),
        }
    }

    /// The point at parameter `t`, clamped to `[0, 1]`.
    pub fn point_at_t(&self, t: f64) -> Point {
        match self {
            PathSeg::Move(p) => *p,
            PathSeg::Line(l) => l.point_at(t),
            PathSeg::Cubic(c) => c.point_at_t(t),
        }
    }

    /// The point at `length`; negative lengths count from the end.
    pub fn point_at_length(&self, length: f64, opts: CurveOpts<'_>) -> Point {
        match self {
            PathSeg::Move(p) => *p,
            PathSeg::Line(l) => l.point_at_length(length),
            PathSeg::Cubic(c) => c.point_at_length(length, opts),
        }
    }

    /// The tangent at parameter `t`.
    pub fn tangent_at_t(&self, t: f64) -> Option<Line> {
        match self {
            PathSeg::Move(_) => None,
            PathSeg::Line(l) => l.tangent_at(t),
            PathSeg::Cubic(c) => c.tangent_at_t(t),
        }
    }

    /// The tangent at `length`.
    pub fn tangent_at_length(&self, length: f64, opts: CurveOpts<'_>) -> Option<Line> {
        match self {
            PathSeg::Move(_) => None,
            PathSeg::Line(l) => l.tangent_at_length(length),
            PathSeg::Cubic(c) => c.tangent_at_length(length, opts),
        }
    }

    /// The parameter of the point nearest to `p`. A `Move` reports 1.
    pub fn closest_point_t(&self, p: Point, opts: CurveOpts<'_>) -> f64 {
        match self {
            PathSeg::Move(_) => 1.0,
            PathSeg::Line(l) => l.closest_point_normalized_length(p),
            PathSeg::Cubic(c) => c.closest_point_t(p, opts),
        }
    }

    /// Split at parameter `t`. A `Move` splits into two copies of itself.
    pub fn divide_at_t(&self, t: f64) -> (PathSeg, PathSeg) {
        match self {
            PathSeg::Move(_) => (*self, *self),
            PathSeg::Line(l) => {
                let (a, b) = l.divide_at(t);
                (PathSeg::Line(a), PathSeg::Line(b))
            }
            PathSeg::Cubic(c) => {
                let (a, b) = c.divide_at_t(t);
                (PathSeg::Cubic(a), PathSeg::Cubic(b))
            }
        }
    }

    /// Split at `length`; negative lengths count from the end.
    pub fn divide_at_length(&self, length: f64, opts: CurveOpts<'_>) -> (PathSeg, PathSeg) {
        match self {
            PathSeg::Move(_) => (*self, *self),
            PathSeg::Line(l) => {
                let (a, b) = l.divide_at_length(length);
                (PathSeg::Line(a), PathSeg::Line(b))
            }
            PathSeg::Cubic(c) => {
                let (a, b) = c.divide_at_length(length, opts);
                (PathSeg::Cubic(a), PathSeg::Cubic(b))
            }
        }
    }
}
