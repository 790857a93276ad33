// Copyright 2026 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Implementation of ellipse shape.

use std::fmt;

use arrayvec::ArrayVec;

use crate::common::round_to;
use crate::{Line, Point, Rect};

/// An axis-aligned ellipse.
///
/// Rotated ellipses are handled by rotating the query points instead, see
/// [`intersection_with_line_from_center_to_point`].
///
/// [`intersection_with_line_from_center_to_point`]: Ellipse::intersection_with_line_from_center_to_point
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ellipse {
    /// The x coordinate of the center.
    pub x: f64,
    /// The y coordinate of the center.
    pub y: f64,
    /// The horizontal semi-axis.
    pub a: f64,
    /// The vertical semi-axis.
    pub b: f64,
}

impl Ellipse {
    /// A new ellipse from its center and semi-axes.
    #[inline]
    pub fn new(center: impl Into<Point>, a: f64, b: f64) -> Ellipse {
        let center = center.into();
        Ellipse {
            x: center.x,
            y: center.y,
            a,
            b,
        }
    }

    /// The ellipse inscribed in a rect.
    pub fn from_rect(rect: &Rect) -> Ellipse {
        Ellipse::new(rect.center(), rect.width / 2.0, rect.height / 2.0)
    }

    /// The center point.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The bounding box.
    pub fn bbox(&self) -> Rect {
        Rect::from_ellipse(self)
    }

    /// Less than 1 inside, 1 on the boundary, greater than 1 outside.
    pub fn normalized_distance(&self, p: Point) -> f64 {
        let dx = p.x - self.x;
        let dy = p.y - self.y;
        dx * dx / (self.a * self.a) + dy * dy / (self.b * self.b)
    }

    /// Whether `p` is inside the ellipse or on its boundary.
    #[inline]
    pub fn contains_point(&self, p: Point) -> bool {
        self.normalized_distance(p) <= 1.0
    }

    /// Grow the semi-axes by twice `dx` and `dy`.
    #[must_use]
    pub fn inflate(self, dx: f64, dy: f64) -> Ellipse {
        Ellipse {
            a: self.a + 2.0 * dx,
            b: self.b + 2.0 * dy,
            ..self
        }
    }

    /// The points where the segment crosses the boundary.
    ///
    /// Substituting the segment's parametric form into the ellipse equation
    /// gives a quadratic in the segment parameter; roots outside `[0, 1]` are
    /// discarded. A tangent segment yields a single point.
    ///
    /// A segment entirely inside the ellipse has no crossings and returns
    /// `None`.
    pub fn intersection_with_line(&self, line: &Line) -> Option<ArrayVec<Point, 2>> {
        let (rx2, ry2) = (self.a * self.a, self.b * self.b);
        let dir = line.vector();
        let diff = line.start - self.center();
        let m_dir = dir.div_components(rx2, ry2);
        let m_diff = diff.div_components(rx2, ry2);

        let a = dir.dot(m_dir);
        let b = dir.dot(m_diff);
        let c = diff.dot(m_diff) - 1.0;
        let d = b * b - a * c;

        let in_range = |t: f64| (0.0..=1.0).contains(&t);
        let mut result = ArrayVec::new();
        if d < 0.0 {
            return None;
        } else if d > 0.0 {
            let root = d.sqrt();
            let ta = (-b - root) / a;
            let tb = (-b + root) / a;
            for t in [ta, tb] {
                if in_range(t) {
                    result.push(line.start.lerp(line.end, t));
                }
            }
        } else {
            let t = -b / a;
            if in_range(t) {
                result.push(line.start.lerp(line.end, t));
            }
        }
        if result.is_empty() {
            None
        } else {
            Some(result)
        }
    }

    /// The point where the ray from the center towards `p` meets the
    /// boundary.
    ///
    /// A nonzero `angle` (degrees) treats the ellipse as rotated by that
    /// angle about its center.
    pub fn intersection_with_line_from_center_to_point(&self, p: Point, angle: f64) -> Point {
        let center = self.center();
        let p = p.rotate(center, angle);
        let dx = p.x - self.x;
        let dy = p.y - self.y;

        let result = if dx == 0.0 {
            self.bbox().point_nearest_to_point(p)
        } else {
            let m = dy / dx;
            let x = (1.0 / (1.0 / (self.a * self.a) + m * m / (self.b * self.b))).sqrt();
            let x = if dx < 0.0 { -x } else { x };
            Point::new(self.x + x, self.y + m * x)
        };
        result.rotate(center, -angle)
    }

    /// The angle in degrees between the x axis and the tangent at `p`,
    /// which must lie on the boundary.
    pub fn tangent_theta(&self, p: Point) -> f64 {
        const REF_POINT_DELTA: f64 = 30.0;
        let (x0, y0) = (p.x, p.y);
        let (a, b) = (self.a, self.b);
        let (m, n) = (self.x, self.y);

        // Near the left and right extremes the tangent is close to vertical,
        // so the reference point is stepped in y there and in x elsewhere.
        let steep = x0 > m + a / 2.0 || x0 < m - a / 2.0;
        let reference = if steep {
            let y = if x0 > m {
                y0 - REF_POINT_DELTA
            } else {
                y0 + REF_POINT_DELTA
            };
            let x = a * a / (x0 - m) - (a * a * (y0 - n) * (y - n)) / (b * b * (x0 - m)) + m;
            Point::new(x, y)
        } else {
            let x = if y0 > n {
                x0 + REF_POINT_DELTA
            } else {
                x0 - REF_POINT_DELTA
            };
            let y = b * b / (y0 - n) - (b * b * (x0 - m) * (x - m)) / (a * a * (y0 - n)) + n;
            Point::new(x, y)
        };
        reference.theta(p)
    }

    /// Offset the center by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn translate(self, dx: f64, dy: f64) -> Ellipse {
        Ellipse {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Round center and semi-axes to `precision` decimal places.
    #[must_use]
    pub fn round(self, precision: u32) -> Ellipse {
        Ellipse {
            x: round_to(self.x, precision),
            y: round_to(self.y, precision),
            a: round_to(self.a, precision),
            b: round_to(self.b, precision),
        }
    }
}

impl fmt::Display for Ellipse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.center(), self.a, self.b)
    }
}
