// Copyright 2026 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A 2D displacement.

use std::ops::{Add, Sub};

/// A 2D vector.
///
/// This is the difference of two [`Point`](crate::Point)s, and what a point
/// is translated by. Line directions and the terms of the crossing
/// equations are expressed with it.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    /// The x-coordinate.
    pub x: f64,
    /// The y-coordinate.
    pub y: f64,
}

impl Vec2 {
    /// Create a new vector.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Vec2 {
        Vec2 { x, y }
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Cross product of two vectors.
    ///
    /// Positive when `other` turns clockwise from `self` on screen, with y
    /// pointing down.
    #[inline]
    pub fn cross(self, other: Vec2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Length of the vector.
    #[inline]
    pub fn hypot(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Length squared.
    #[inline]
    pub fn hypot2(self) -> f64 {
        self.dot(self)
    }

    /// Divide each component by its own factor.
    ///
    /// Maps a displacement into the space where an ellipse with squared
    /// radii `sx` and `sy` is the unit circle.
    #[inline]
    pub fn div_components(self, sx: f64, sy: f64) -> Vec2 {
        Vec2::new(self.x / sx, self.y / sy)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    #[inline]
    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    #[inline]
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}
