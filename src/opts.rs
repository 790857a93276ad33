// Copyright 2026 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Options controlling the accuracy of curve and path measurements.

use std::borrow::Cow;

use crate::common::DEFAULT_PRECISION;
use crate::Curve;

/// Options for curve measurements.
///
/// `precision` is the number of decimal digits the flattened length must
/// agree on between successive subdivision rounds; see
/// [`Curve::subdivisions`]. Subdivisions computed once can be handed back in
/// through `subdivisions` to avoid recomputing them for every query on the
/// same curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveOpts<'a> {
    /// Convergence tolerance exponent; the relative error is below
    /// `10^-precision`.
    pub precision: u32,
    /// Previously computed subdivisions of the curve being measured.
    pub subdivisions: Option<&'a [Curve]>,
}

/// Options for path measurements.
///
/// `segment_subdivisions`, when given, holds one entry per segment of the
/// path, as returned by [`Path::segment_subdivisions`](crate::Path::segment_subdivisions).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathOpts<'a> {
    /// Convergence tolerance exponent, see [`CurveOpts::precision`].
    pub precision: u32,
    /// Previously computed subdivisions for every segment of the path.
    pub segment_subdivisions: Option<&'a [Vec<Curve>]>,
}

impl Default for CurveOpts<'_> {
    fn default() -> Self {
        CurveOpts {
            precision: DEFAULT_PRECISION,
            subdivisions: None,
        }
    }
}

impl Default for PathOpts<'_> {
    fn default() -> Self {
        PathOpts {
            precision: DEFAULT_PRECISION,
            segment_subdivisions: None,
        }
    }
}

impl<'a> CurveOpts<'a> {
    /// Options with the given precision and no cached subdivisions.
    pub fn new(precision: u32) -> Self {
        CurveOpts {
            precision,
            subdivisions: None,
        }
    }

    /// Builder method for setting the precision.
    #[must_use]
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Builder method for supplying cached subdivisions.
    #[must_use]
    pub fn with_subdivisions(mut self, subdivisions: &'a [Curve]) -> Self {
        self.subdivisions = Some(subdivisions);
        self
    }

    /// The cached subdivisions if present and non-empty, otherwise freshly
    /// computed ones.
    pub(crate) fn subdivisions_of(&self, curve: &Curve) -> Cow<'a, [Curve]> {
        match self.subdivisions {
            Some(subs) if !subs.is_empty() => Cow::Borrowed(subs),
            _ => Cow::Owned(curve.subdivisions(self.precision)),
        }
    }
}

impl<'a> PathOpts<'a> {
    /// Options with the given precision and no cached subdivisions.
    pub fn new(precision: u32) -> Self {
        PathOpts {
            precision,
            segment_subdivisions: None,
        }
    }

    /// Builder method for setting the precision.
    #[must_use]
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Builder method for supplying cached per-segment subdivisions.
    #[must_use]
    pub fn with_segment_subdivisions(mut self, subdivisions: &'a [Vec<Curve>]) -> Self {
        self.segment_subdivisions = Some(subdivisions);
        self
    }

    /// Curve options for the segment at `index`, carrying its cached
    /// subdivisions when there are any.
    pub(crate) fn for_segment(&self, index: usize) -> CurveOpts<'a> {
        let subdivisions = self
            .segment_subdivisions
            .and_then(|all| all.get(index))
            .map(Vec::as_slice);
        CurveOpts {
            precision: self.precision,
            subdivisions,
        }
    }
}

impl<'a> From<PathOpts<'a>> for CurveOpts<'a> {
    fn from(opts: PathOpts<'a>) -> Self {
        CurveOpts::new(opts.precision)
    }
}
