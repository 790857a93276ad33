// Copyright 2026 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The crate error type.
//!
//! Only malformed input is an error. Degenerate geometry (a zero-length line,
//! an empty polyline, two shapes that do not meet) is reported through the
//! return type instead, usually as `None`.

use thiserror::Error;

use crate::intersection::ShapeKind;

/// Errors raised by parsing, path editing and intersection dispatch.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A path-data command letter that is not one of `M`, `L`, `C`, `Z`, `z`.
    #[error("`{0}` is not a recognized path segment type")]
    UnknownCommand(char),

    /// The number of coordinates following a command is not a positive
    /// multiple of what the command takes.
    #[error("`{command}` expects a multiple of {expected} coordinates, found {found}")]
    InvalidArity {
        /// The command letter.
        command: char,
        /// Coordinates consumed by one segment of this type.
        expected: usize,
        /// Coordinates actually supplied.
        found: usize,
    },

    /// A character that cannot start a command, a number or a separator.
    #[error("unexpected character `{ch}` at offset {offset}")]
    UnexpectedCharacter {
        /// The offending character.
        ch: char,
        /// Byte offset into the input.
        offset: usize,
    },

    /// Coordinates appeared before any command letter.
    #[error("path data must start with a command, found a number at offset {0}")]
    MissingCommand(usize),

    /// A token of a points list that is not a number.
    #[error("invalid number `{0}`")]
    InvalidNumber(String),

    /// A points list whose coordinates do not pair up.
    #[error("points list has an odd number of coordinates ({0})")]
    OddCoordinateCount(usize),

    /// Curve fitting needs at least two knots.
    #[error("at least {required} points are required, found {found}")]
    TooFewPoints {
        /// Minimum number of points.
        required: usize,
        /// Points supplied.
        found: usize,
    },

    /// The path has no segments to operate on.
    #[error("path has no segments")]
    EmptyPath,

    /// A segment index outside the path.
    #[error("index {index} out of range for path with {len} segments")]
    IndexOutOfRange {
        /// The requested index, before negative indices were resolved.
        index: isize,
        /// Number of segments in the path.
        len: usize,
    },

    /// Serialization requires the first segment to be a Moveto.
    #[error("invalid path segments: a non-empty path must start with a Moveto")]
    InvalidPath,

    /// No intersection test exists for this pair of shapes.
    #[error("the intersection of {first:?} and {second:?} could not be determined")]
    UnsupportedIntersection {
        /// Kind of the first operand.
        first: ShapeKind,
        /// Kind of the second operand.
        second: ShapeKind,
    },
}

/// Result type with [`Error`] as the error.
pub type Result<T, E = Error> = std::result::Result<T, E>;
