// Copyright 2026 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A 2D geometry kernel.
//!
//! The planar library contains the primitives a diagramming or layout engine
//! asks geometric questions of: points, lines, axis-aligned rectangles,
//! ellipses, polylines and polygons, cubic Bézier curves, and composite
//! paths built from Moveto/Lineto/Curveto/Closepath segments. On top of those
//! it provides measurement (length, point and tangent at a length), division,
//! containment, and a pairwise intersection test.
//!
//! The coordinate system is y-down: positive angles returned by [`Point::theta`]
//! are counterclockwise as seen on screen, and [`Point::cross`] is positive for
//! a clockwise turn.
//!
//! # Examples
//!
//! Measuring a path parsed from path data:
//! ```
//! use planar::{Path, PathOpts, Point};
//!
//! let path: Path = "M 0 0 L 10 0 L 10 10 Z".parse().unwrap();
//! let opts = PathOpts::default();
//! let length = path.length(opts);
//! assert!((length - (20.0 + 200f64.sqrt())).abs() < 1e-9);
//! assert_eq!(path.point_at_length(15.0, opts), Some(Point::new(10.0, 5.0)));
//! ```
//!
//! Asking whether two shapes overlap:
//! ```
//! use planar::{intersection, Ellipse, Point, Rect};
//!
//! let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
//! let ellipse = Ellipse::new(Point::new(12.0, 5.0), 3.0, 2.0);
//! assert!(intersection::exists(&rect, &ellipse).unwrap());
//! ```
//!
//! # Precision
//!
//! Curve measurements are approximations whose observed relative error is
//! below `10^-precision`. Every operation that needs one takes a
//! [`CurveOpts`] or [`PathOpts`]; both default to a precision of
//! [`common::DEFAULT_PRECISION`] and can carry precomputed subdivisions so that
//! repeated queries on the same curve do not subdivide it again.
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for every geometric type.
//! - `schemars`: JSON schemas for the serialized forms.
//! - `mint`: conversions to and from `mint::Point2`.
//! - `tracing`: debug and trace events from the subdivision, division and
//!   parsing code.

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision,
    clippy::bool_to_int_with_if,
    reason = "matches the style of the numeric code"
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod log;

pub mod common;
pub mod intersection;

mod curve;
mod ellipse;
mod error;
mod line;
mod opts;
mod path;
mod point;
mod polyline;
mod rect;
mod segment;
mod svg;
mod vec2;

pub use crate::curve::*;
pub use crate::ellipse::*;
pub use crate::error::*;
pub use crate::line::*;
pub use crate::opts::*;
pub use crate::path::*;
pub use crate::point::*;
pub use crate::polyline::*;
pub use crate::rect::*;
pub use crate::segment::*;
pub use crate::svg::*;
pub use crate::vec2::*;
