// Copyright 2026 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paths made of segments.

use crate::log::debug;
use crate::{Curve, CurveOpts, Error, Line, PathOpts, PathSeg, Point, Polyline, Rect, Result, Segment};

/// A sequence of segments forming zero or more subpaths.
///
/// Segments are kept in a flat list. The only derived state is, for every
/// segment, the index of the `MoveTo` that starts its subpath, which is
/// recomputed from the point of every edit onwards.
///
/// A valid path is empty or starts with a `MoveTo`. Invalid paths can still
/// be built and measured: a segment with no predecessor is a single point at
/// its own end, see [`resolve`](Path::resolve).
#[derive(Clone, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "Vec<Segment>", into = "Vec<Segment>")
)]
pub struct Path {
    segments: Vec<Segment>,
    subpath_starts: Vec<Option<usize>>,
}

/// A position on a path: a segment index and a parameter within it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathT {
    /// Index of the segment.
    pub segment_index: usize,
    /// Parameter in `[0, 1]` within the segment.
    pub value: f64,
}

impl Path {
    /// An empty path.
    pub fn new() -> Path {
        Path::default()
    }

    /// A path from a sequence of segments.
    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Path {
        let mut path = Path::new();
        path.append_segments(segments);
        path
    }

    /// A path through a sequence of lines and curves.
    ///
    /// A `MoveTo` starts the path and is inserted wherever a piece does not
    /// start where the previous one ended. `PathSeg::Move` pieces are kept as
    /// `MoveTo`s.
    pub fn from_lines_and_curves(pieces: impl IntoIterator<Item = PathSeg>) -> Path {
        let mut path = Path::new();
        let mut last: Option<Point> = None;
        for piece in pieces {
            if let PathSeg::Move(p) = piece {
                path.append_segment(Segment::MoveTo(p));
                last = Some(p);
                continue;
            }
            if last != Some(piece.start()) {
                path.append_segment(Segment::MoveTo(piece.start()));
            }
            path.append_segment(piece.into());
            last = Some(piece.end());
        }
        path
    }

    /// The segments.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segment at `index`; negative indices count from the end.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyPath`] or [`Error::IndexOutOfRange`].
    pub fn segment(&self, index: isize) -> Result<&Segment> {
        let i = self.existing_index(index)?;
        Ok(&self.segments[i])
    }

    /// Append a segment.
    pub fn append_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
        self.update_subpath_starts(self.segments.len() - 1);
    }

    /// Append segments in order.
    pub fn append_segments(&mut self, segments: impl IntoIterator<Item = Segment>) {
        let from = self.segments.len();
        self.segments.extend(segments);
        self.update_subpath_starts(from);
    }

    /// Insert a segment before `index`.
    ///
    /// `index` may equal the number of segments to append. Negative indices
    /// count from the end, with `-1` also meaning "append".
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`].
    pub fn insert_segment(&mut self, index: isize, segment: Segment) -> Result<()> {
        self.insert_segments(index, [segment])
    }

    /// Insert segments in order before `index`, see
    /// [`insert_segment`](Path::insert_segment).
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`].
    pub fn insert_segments(
        &mut self,
        index: isize,
        segments: impl IntoIterator<Item = Segment>,
    ) -> Result<()> {
        let i = self.insertion_index(index)?;
        self.insert_at(i, segments);
        Ok(())
    }

    /// Remove and return the segment at `index`; negative indices count from
    /// the end.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyPath`] or [`Error::IndexOutOfRange`].
    pub fn remove_segment(&mut self, index: isize) -> Result<Segment> {
        let i = self.existing_index(index)?;
        Ok(self.remove_at(i))
    }

    /// Replace the segment at `index`, returning the old one.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyPath`] or [`Error::IndexOutOfRange`].
    pub fn replace_segment(&mut self, index: isize, segment: Segment) -> Result<Segment> {
        self.replace_segments(index, [segment])
    }

    /// Replace the segment at `index` with a sequence of segments, returning
    /// the old one.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyPath`] or [`Error::IndexOutOfRange`].
    pub fn replace_segments(
        &mut self,
        index: isize,
        segments: impl IntoIterator<Item = Segment>,
    ) -> Result<Segment> {
        let i = self.existing_index(index)?;
        let old = self.segments.remove(i);
        self.insert_at(i, segments);
        Ok(old)
    }

    fn existing_index(&self, index: isize) -> Result<usize> {
        let len = self.segments.len();
        if len == 0 {
            return Err(Error::EmptyPath);
        }
        let resolved = if index < 0 {
            index + len as isize
        } else {
            index
        };
        usize::try_from(resolved)
            .ok()
            .filter(|&i| i < len)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    fn insertion_index(&self, index: isize) -> Result<usize> {
        let len = self.segments.len();
        let resolved = if index < 0 {
            index + len as isize + 1
        } else {
            index
        };
        usize::try_from(resolved)
            .ok()
            .filter(|&i| i <= len)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    fn insert_at(&mut self, index: usize, segments: impl IntoIterator<Item = Segment>) {
        let tail = self.segments.split_off(index);
        self.segments.extend(segments);
        self.segments.extend(tail);
        self.update_subpath_starts(index);
    }

    fn remove_at(&mut self, index: usize) -> Segment {
        let removed = self.segments.remove(index);
        self.update_subpath_starts(index);
        removed
    }

    fn replace_at(&mut self, index: usize, segment: Segment) {
        self.segments[index] = segment;
        self.update_subpath_starts(index);
    }

    /// Recompute the subpath start of every segment from `from` on.
    fn update_subpath_starts(&mut self, from: usize) {
        self.subpath_starts.truncate(from);
        let mut current = from
            .checked_sub(1)
            .and_then(|i| self.subpath_starts.get(i).copied().flatten());
        for (i, segment) in self.segments.iter().enumerate().skip(from) {
            if segment.is_subpath_start() {
                current = Some(i);
            }
            self.subpath_starts.push(current);
        }
    }

    /// Index of the `MoveTo` that starts the subpath of segment `index`.
    ///
    /// `None` for segments before the first `MoveTo`, and for indices out of
    /// range.
    pub fn subpath_start_index(&self, index: usize) -> Option<usize> {
        self.subpath_starts.get(index).copied().flatten()
    }

    /// End point of segment `index`, which must be in range.
    fn end_of(&self, index: usize) -> Point {
        let mut i = index;
        loop {
            match self.segments[i] {
                Segment::MoveTo(p) | Segment::LineTo(p) | Segment::CurveTo(_, _, p) => return p,
                Segment::ClosePath => match self.subpath_starts[i] {
                    Some(start) => i = start,
                    // No subpath to close: the segment ends where it starts.
                    None if i > 0 => i -= 1,
                    None => return Point::ZERO,
                },
            }
        }
    }

    /// The start point of segment `index`: the end of the segment before it.
    ///
    /// The first segment has no start point.
    pub fn segment_start(&self, index: usize) -> Option<Point> {
        if index == 0 || index >= self.segments.len() {
            return None;
        }
        Some(self.end_of(index - 1))
    }

    /// The end point of segment `index`.
    ///
    /// A `ClosePath` ends at its subpath's `MoveTo`. Without one it ends
    /// where it starts, and a `ClosePath` that is the first segment ends at
    /// the origin.
    pub fn segment_end(&self, index: usize) -> Option<Point> {
        (index < self.segments.len()).then(|| self.end_of(index))
    }

    /// The geometry of segment `index`, with its start point filled in.
    ///
    /// A segment with no predecessor that is not a `MoveTo` resolves to a
    /// single point at its own end.
    pub fn resolve(&self, index: usize) -> Option<PathSeg> {
        let segment = self.segments.get(index)?;
        let end = self.end_of(index);
        let start = self.segment_start(index);
        Some(match (*segment, start) {
            (Segment::MoveTo(p), _) => PathSeg::Move(p),
            (Segment::CurveTo(c1, c2, _), Some(start)) => {
                PathSeg::Cubic(Curve::new(start, c1, c2, end))
            }
            (Segment::CurveTo(..), None) => PathSeg::Cubic(Curve::point(end)),
            (Segment::LineTo(_) | Segment::ClosePath, start) => {
                PathSeg::Line(Line::new(start.unwrap_or(end), end))
            }
        })
    }

    fn resolved(&self) -> impl Iterator<Item = (usize, PathSeg)> + '_ {
        (0..self.segments.len()).filter_map(|i| self.resolve(i).map(|seg| (i, seg)))
    }

    /// Subdivisions of every segment, for reuse through
    /// [`PathOpts::with_segment_subdivisions`].
    ///
    /// Lines and moves get an empty list.
    pub fn segment_subdivisions(&self, precision: u32) -> Vec<Vec<Curve>> {
        self.resolved()
            .map(|(_, seg)| seg.subdivisions(precision))
            .collect()
    }

    /// Run `f` with options that carry segment subdivisions, computing them
    /// once if `opts` has none.
    fn with_subdivisions<R>(&self, opts: PathOpts<'_>, f: impl FnOnce(PathOpts<'_>) -> R) -> R {
        if opts.segment_subdivisions.is_some() {
            return f(opts);
        }
        let subdivisions = self.segment_subdivisions(opts.precision);
        f(opts.with_segment_subdivisions(&subdivisions))
    }

    /// Whether the path is empty or starts with a `MoveTo`.
    pub fn is_valid(&self) -> bool {
        self.segments
            .first()
            .map_or(true, Segment::is_subpath_start)
    }

    /// Make the path valid by inserting `M 0 0` at the front if needed.
    #[must_use]
    pub fn validate(mut self) -> Path {
        if !self.is_valid() {
            self.insert_at(0, [Segment::MoveTo(Point::ZERO)]);
        }
        self
    }

    /// Whether any segment has a direction.
    pub fn is_differentiable(&self) -> bool {
        self.resolved().any(|(_, seg)| seg.is_differentiable())
    }

    /// The start of the first visible segment.
    ///
    /// A path with no visible segment starts at the end of its last segment.
    pub fn start(&self) -> Option<Point> {
        self.resolved()
            .find(|(_, seg)| seg.is_visible())
            .map(|(_, seg)| seg.start())
            .or_else(|| self.last_end())
    }

    /// The end of the last visible segment.
    ///
    /// A path with no visible segment ends at the end of its last segment.
    pub fn end(&self) -> Option<Point> {
        (0..self.segments.len())
            .rev()
            .filter_map(|i| self.resolve(i))
            .find(PathSeg::is_visible)
            .map(|seg| seg.end())
            .or_else(|| self.last_end())
    }

    fn last_end(&self) -> Option<Point> {
        self.segments.len().checked_sub(1).map(|i| self.end_of(i))
    }

    /// The union of the visible segments' bounding boxes.
    ///
    /// A path with only `MoveTo`s has a zero-size box at its last point.
    pub fn bbox(&self) -> Option<Rect> {
        let boxes: Vec<Rect> = self.resolved().filter_map(|(_, seg)| seg.bbox()).collect();
        Rect::from_rect_union(&boxes).or_else(|| {
            self.last_end()
                .map(|p| Rect::new(p.x, p.y, 0.0, 0.0))
        })
    }

    /// Total length.
    pub fn length(&self, opts: PathOpts<'_>) -> f64 {
        self.with_subdivisions(opts, |opts| {
            self.resolved()
                .map(|(i, seg)| seg.length(opts.for_segment(i)))
                .sum()
        })
    }

    /// Length up to a position on the path.
    ///
    /// A segment index past the end measures the whole path.
    pub fn length_at_t(&self, t: PathT, opts: PathOpts<'_>) -> f64 {
        let Some((index, value)) = self.clamp_t(t) else {
            return 0.0;
        };
        self.with_subdivisions(opts, |opts| {
            let before: f64 = self
                .resolved()
                .take(index)
                .map(|(i, seg)| seg.length(opts.for_segment(i)))
                .sum();
            let within = self
                .resolve(index)
                .map_or(0.0, |seg| seg.length_at_t(value, opts.for_segment(index)));
            before + within
        })
    }

    fn clamp_t(&self, t: PathT) -> Option<(usize, f64)> {
        let last = self.segments.len().checked_sub(1)?;
        if t.segment_index > last {
            Some((last, 1.0))
        } else {
            Some((t.segment_index, t.value.clamp(0.0, 1.0)))
        }
    }

    /// The point at a position on the path.
    pub fn point_at_t(&self, t: PathT) -> Option<Point> {
        let (index, value) = self.clamp_t(t)?;
        self.resolve(index).map(|seg| seg.point_at_t(value))
    }

    /// The tangent at a position on the path.
    pub fn tangent_at_t(&self, t: PathT) -> Option<Line> {
        let (index, value) = self.clamp_t(t)?;
        self.resolve(index).and_then(|seg| seg.tangent_at_t(value))
    }

    /// Walk the segments from the start, or from the end for a negative
    /// `length`, and call `hit` on the first segment accepted by `accept`
    /// whose extent reaches `length`.
    ///
    /// `hit` receives the segment, its index, its options and the signed
    /// length left within it. Returns the hit's result, or the last accepted
    /// segment and its index if the path is too short.
    fn walk<'o, R>(
        &self,
        length: f64,
        opts: PathOpts<'o>,
        accept: impl Fn(&PathSeg) -> bool,
        hit: impl FnOnce(PathSeg, usize, CurveOpts<'o>, f64) -> R,
    ) -> std::result::Result<R, Option<(usize, PathSeg)>> {
        let from_start = length >= 0.0;
        let length = length.abs();
        let n = self.segments.len();
        let mut last = None;
        let mut l = 0.0;
        for i in 0..n {
            let index = if from_start { i } else { n - 1 - i };
            let Some(seg) = self.resolve(index) else {
                continue;
            };
            let seg_opts = opts.for_segment(index);
            let d = seg.length(seg_opts);
            if accept(&seg) {
                if length <= l + d {
                    let along = length - l;
                    return Ok(hit(seg, index, seg_opts, if from_start { along } else { -along }));
                }
                last = Some((index, seg));
            }
            l += d;
        }
        Err(last)
    }

    /// The point at `ratio` of the length.
    pub fn point_at(&self, ratio: f64, opts: PathOpts<'_>) -> Option<Point> {
        if self.is_empty() {
            return None;
        }
        if ratio <= 0.0 {
            return self.start();
        }
        if ratio >= 1.0 {
            return self.end();
        }
        self.with_subdivisions(opts, |opts| {
            self.point_at_length(self.length(opts) * ratio, opts)
        })
    }

    /// The point at `length` along the path; negative lengths count from the
    /// end.
    ///
    /// Only visible segments are considered. Past either end, the point is
    /// the outer end of the last visible segment reached.
    pub fn point_at_length(&self, length: f64, opts: PathOpts<'_>) -> Option<Point> {
        if self.is_empty() {
            return None;
        }
        if length == 0.0 {
            return self.start();
        }
        let from_start = length >= 0.0;
        self.with_subdivisions(opts, |opts| {
            match self.walk(length, opts, PathSeg::is_visible, |seg, _, o, along| {
                seg.point_at_length(along, o)
            }) {
                Ok(p) => Some(p),
                Err(Some((_, seg))) => Some(if from_start { seg.end() } else { seg.start() }),
                Err(None) => self.last_end(),
            }
        })
    }

    /// The tangent at `ratio` of the length.
    pub fn tangent_at(&self, ratio: f64, opts: PathOpts<'_>) -> Option<Line> {
        if self.is_empty() {
            return None;
        }
        let ratio = ratio.clamp(0.0, 1.0);
        self.with_subdivisions(opts, |opts| {
            self.tangent_at_length(self.length(opts) * ratio, opts)
        })
    }

    /// The tangent at `length` along the path.
    ///
    /// Only segments with a direction are considered. Past either end, the
    /// tangent is taken at the outer end of the last such segment reached.
    pub fn tangent_at_length(&self, length: f64, opts: PathOpts<'_>) -> Option<Line> {
        let from_start = length >= 0.0;
        self.with_subdivisions(opts, |opts| {
            match self.walk(length, opts, PathSeg::is_differentiable, |seg, _, o, along| {
                seg.tangent_at_length(along, o)
            }) {
                Ok(tangent) => tangent,
                Err(last) => {
                    let (_, seg) = last?;
                    seg.tangent_at_t(if from_start { 1.0 } else { 0.0 })
                }
            }
        })
    }

    /// Index of the visible segment at `ratio` of the length.
    pub fn segment_index_at(&self, ratio: f64, opts: PathOpts<'_>) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let ratio = ratio.clamp(0.0, 1.0);
        self.with_subdivisions(opts, |opts| {
            self.segment_index_at_length(self.length(opts) * ratio, opts)
        })
    }

    /// Index of the visible segment at `length`; negative lengths count from
    /// the end. Past either end, the last visible segment reached.
    pub fn segment_index_at_length(&self, length: f64, opts: PathOpts<'_>) -> Option<usize> {
        self.with_subdivisions(opts, |opts| {
            match self.walk(length, opts, PathSeg::is_visible, |_, index, _, _| index) {
                Ok(index) => Some(index),
                Err(last) => last.map(|(index, _)| index),
            }
        })
    }

    /// The visible segment at `ratio` of the length.
    pub fn segment_at(&self, ratio: f64, opts: PathOpts<'_>) -> Option<&Segment> {
        self.segment_index_at(ratio, opts)
            .map(|i| &self.segments[i])
    }

    /// The visible segment at `length`.
    pub fn segment_at_length(&self, length: f64, opts: PathOpts<'_>) -> Option<&Segment> {
        self.segment_index_at_length(length, opts)
            .map(|i| &self.segments[i])
    }

    /// The position on the path nearest to `p`.
    ///
    /// Only visible segments are considered. A path with none reports the
    /// end of its last segment.
    pub fn closest_point_t(&self, p: Point, opts: PathOpts<'_>) -> Option<PathT> {
        let last = self.segments.len().checked_sub(1)?;
        self.with_subdivisions(opts, |opts| {
            let mut best: Option<(PathT, f64)> = None;
            for (i, seg) in self.resolved().filter(|(_, seg)| seg.is_visible()) {
                let t = seg.closest_point_t(p, opts.for_segment(i));
                let d = seg.point_at_t(t).squared_distance(p);
                if best.map_or(true, |(_, best_d)| d < best_d) {
                    best = Some((
                        PathT {
                            segment_index: i,
                            value: t,
                        },
                        d,
                    ));
                }
            }
            Some(best.map_or(
                PathT {
                    segment_index: last,
                    value: 1.0,
                },
                |(t, _)| t,
            ))
        })
    }

    /// The point on the path nearest to `p`.
    pub fn closest_point(&self, p: Point, opts: PathOpts<'_>) -> Option<Point> {
        self.closest_point_t(p, opts)
            .and_then(|t| self.point_at_t(t))
    }

    /// Length along the path to the point nearest to `p`.
    pub fn closest_point_length(&self, p: Point, opts: PathOpts<'_>) -> f64 {
        self.with_subdivisions(opts, |opts| {
            self.closest_point_t(p, opts)
                .map_or(0.0, |t| self.length_at_t(t, opts))
        })
    }

    /// [`closest_point_length`](Path::closest_point_length) as a fraction of
    /// the total length; 0 for a path of zero length.
    pub fn closest_point_normalized_length(&self, p: Point, opts: PathOpts<'_>) -> f64 {
        self.with_subdivisions(opts, |opts| {
            let cp_length = self.closest_point_length(p, opts);
            if cp_length == 0.0 {
                return 0.0;
            }
            let length = self.length(opts);
            if length == 0.0 {
                0.0
            } else {
                cp_length / length
            }
        })
    }

    /// The tangent at the point nearest to `p`, among segments with a
    /// direction.
    pub fn closest_point_tangent(&self, p: Point, opts: PathOpts<'_>) -> Option<Line> {
        self.with_subdivisions(opts, |opts| {
            let mut best: Option<(Option<Line>, f64)> = None;
            for (i, seg) in self.resolved().filter(|(_, seg)| seg.is_differentiable()) {
                let t = seg.closest_point_t(p, opts.for_segment(i));
                let d = seg.point_at_t(t).squared_distance(p);
                if best.map_or(true, |(_, best_d)| d < best_d) {
                    best = Some((seg.tangent_at_t(t), d));
                }
            }
            best.and_then(|(tangent, _)| tangent)
        })
    }

    /// Split the path at `ratio` of its length.
    pub fn divide_at(&self, ratio: f64, opts: PathOpts<'_>) -> Option<(Path, Path)> {
        if self.is_empty() {
            return None;
        }
        let ratio = ratio.clamp(0.0, 1.0);
        self.with_subdivisions(opts, |opts| {
            self.divide_at_length(self.length(opts) * ratio, opts)
        })
    }

    /// Split the path at `length`; negative lengths count from the end.
    ///
    /// The segment containing the division point is split in two and a
    /// `MoveTo` is inserted between the halves, so the second path is valid.
    /// A half that collapses to a point is dropped. A `ClosePath` in the
    /// second path whose subpath now starts at the inserted `MoveTo` becomes
    /// a `LineTo` to its old end point, so it still draws the same line.
    ///
    /// Returns `None` if no segment has a direction. A length beyond the
    /// path divides at its far end.
    pub fn divide_at_length(&self, length: f64, opts: PathOpts<'_>) -> Option<(Path, Path)> {
        if self.is_empty() {
            return None;
        }
        let from_start = length >= 0.0;
        let (index, first, second) = self.with_subdivisions(opts, |opts| {
            match self.walk(length, opts, PathSeg::is_differentiable, |seg, index, o, along| {
                let (a, b) = seg.divide_at_length(along, o);
                (index, a, b)
            }) {
                Ok(divided) => Some(divided),
                Err(last) => {
                    let (index, seg) = last?;
                    let (a, b) = seg.divide_at_t(if from_start { 1.0 } else { 0.0 });
                    Some((index, a, b))
                }
            }
        })?;
        debug!(segment = index, length, "dividing path");

        let (first_segment, second_segment) = match self.segments[index] {
            // Z stays Z, not LineTo, when the division point is its end. Both
            // draw the same closing edge.
            Segment::ClosePath if !second.is_differentiable() => {
                (Segment::ClosePath, Segment::from(second))
            }
            _ => (Segment::from(first), Segment::from(second)),
        };

        let mut copy = self.clone();
        copy.segments.remove(index);
        copy.insert_at(index, [first_segment, second_segment]);

        let mut mid = index + 1;
        let mut end = index + 2;
        if !first.is_differentiable() {
            copy.remove_at(index);
            mid -= 1;
            end -= 1;
        }
        let move_to = copy.segment_start(mid).unwrap_or(second.start());
        copy.insert_at(mid, [Segment::MoveTo(move_to)]);
        end += 1;
        if !second.is_differentiable() {
            copy.remove_at(end - 1);
            end -= 1;
        }

        let shift = end - index - 1;
        for i in end..copy.segments.len() {
            if copy.segments[i] != Segment::ClosePath {
                continue;
            }
            let original = i - shift;
            let original_start = self.subpath_start_index(original).map(|s| self.end_of(s));
            let copy_start = copy.subpath_start_index(i).map(|s| copy.end_of(s));
            if original_start != copy_start {
                copy.replace_at(i, Segment::LineTo(self.end_of(original)));
            }
        }

        let tail = copy.segments.split_off(mid);
        Some((Path::from_segments(copy.segments), Path::from_segments(tail)))
    }

    /// The subpaths, each starting at a `MoveTo`.
    ///
    /// An invalid path is validated first, so its first subpath starts at
    /// the origin.
    pub fn subpaths(&self) -> Vec<Path> {
        let validated = self.clone().validate();
        let mut subpaths: Vec<Path> = Vec::new();
        for segment in validated.segments {
            if segment.is_subpath_start() {
                subpaths.push(Path::from_segments([segment]));
            } else if let Some(current) = subpaths.last_mut() {
                current.append_segment(segment);
            }
        }
        subpaths
    }

    /// The flattened path: one point list per run of visible segments.
    ///
    /// Curves contribute the start of each subdivision, lines their start,
    /// and each run ends with the end of its last segment. A run closed by a
    /// `ClosePath` back to its first point does not repeat that point.
    pub fn to_points(&self, opts: PathOpts<'_>) -> Vec<Vec<Point>> {
        self.point_runs(opts)
            .into_iter()
            .map(|(points, _)| points)
            .collect()
    }

    /// [`to_points`](Path::to_points) as polylines.
    pub fn to_polylines(&self, opts: PathOpts<'_>) -> Vec<Polyline> {
        self.to_points(opts)
            .into_iter()
            .map(Polyline::new)
            .collect()
    }

    /// Point runs, each with whether it ends in a `ClosePath`.
    pub(crate) fn point_runs(&self, opts: PathOpts<'_>) -> Vec<(Vec<Point>, bool)> {
        self.with_subdivisions(opts, |opts| {
            let mut runs = Vec::new();
            let mut points: Vec<Point> = Vec::new();
            let mut last_seg: Option<(usize, PathSeg)> = None;
            let mut finish = |points: &mut Vec<Point>, last_seg: Option<(usize, PathSeg)>| {
                let Some((i, seg)) = last_seg else {
                    return;
                };
                if points.is_empty() {
                    return;
                }
                let closed = self.segments[i] == Segment::ClosePath;
                if !(closed && points.first() == Some(&seg.end())) {
                    points.push(seg.end());
                }
                runs.push((std::mem::take(points), closed));
            };
            for (i, seg) in self.resolved() {
                if !seg.is_visible() {
                    finish(&mut points, last_seg.take());
                    continue;
                }
                match opts.for_segment(i).subdivisions {
                    Some(subs) if !subs.is_empty() => points.extend(subs.iter().map(|c| c.start)),
                    _ => points.push(seg.start()),
                }
                last_seg = Some((i, seg));
            }
            finish(&mut points, last_seg);
            runs
        })
    }

    /// Whether `p` is inside the path, by the even-odd rule over its
    /// flattened runs. Open runs are treated as closed.
    pub fn contains_point(&self, p: Point, opts: PathOpts<'_>) -> bool {
        let inside = self
            .to_polylines(opts)
            .iter()
            .filter(|polyline| polyline.contains_point(p))
            .count();
        inside % 2 == 1
    }

    /// The points where `line` crosses the flattened path.
    pub fn intersection_with_line(&self, line: &Line, opts: PathOpts<'_>) -> Option<Vec<Point>> {
        let mut points = Vec::new();
        for (run, closed) in self.point_runs(opts) {
            let mut polyline = Polyline::new(run);
            if closed {
                polyline = polyline.close();
            }
            if let Some(hits) = polyline.intersection_with_line(line) {
                points.extend(hits);
            }
        }
        if points.is_empty() {
            None
        } else {
            Some(points)
        }
    }

    /// Offset every segment by `(dx, dy)`.
    #[must_use]
    pub fn translate(self, dx: f64, dy: f64) -> Path {
        self.map(|s| s.translate(dx, dy))
    }

    /// Scale every segment relative to `origin`.
    #[must_use]
    pub fn scale(self, sx: f64, sy: f64, origin: Point) -> Path {
        self.map(|s| s.scale(sx, sy, origin))
    }

    /// Round every segment's points to `precision` decimal places.
    #[must_use]
    pub fn round(self, precision: u32) -> Path {
        self.map(|s| s.round(precision))
    }

    fn map(mut self, f: impl Fn(Segment) -> Segment) -> Path {
        for segment in &mut self.segments {
            *segment = f(*segment);
        }
        self
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Path {
        Path::from_segments(segments)
    }
}

impl From<Path> for Vec<Segment> {
    fn from(path: Path) -> Vec<Segment> {
        path.segments
    }
}

impl From<Line> for Path {
    fn from(line: Line) -> Path {
        Path::from_segments([Segment::MoveTo(line.start), Segment::LineTo(line.end)])
    }
}

impl From<Curve> for Path {
    fn from(curve: Curve) -> Path {
        Path::from_segments([
            Segment::MoveTo(curve.start),
            Segment::CurveTo(curve.control_point1, curve.control_point2, curve.end),
        ])
    }
}

impl From<&Polyline> for Path {
    fn from(polyline: &Polyline) -> Path {
        Path::from_segments(polyline.points().iter().enumerate().map(|(i, &p)| {
            if i == 0 {
                Segment::MoveTo(p)
            } else {
                Segment::LineTo(p)
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn triangle() -> Path {
        Path::from_segments([
            Segment::MoveTo(p(0., 0.)),
            Segment::LineTo(p(10., 0.)),
            Segment::LineTo(p(10., 10.)),
            Segment::ClosePath,
        ])
    }

    #[test]
    fn subpath_bookkeeping() {
        let mut path = triangle();
        assert_eq!(path.subpath_start_index(3), Some(0));
        assert_eq!(path.segment_end(3), Some(p(0., 0.)));
        assert_eq!(path.segment_start(3), Some(p(10., 10.)));

        // A new subpath before the Z changes where it closes to.
        path.insert_segment(2, Segment::MoveTo(p(5., 5.))).unwrap();
        assert_eq!(path.subpath_start_index(4), Some(2));
        assert_eq!(path.segment_end(4), Some(p(5., 5.)));

        path.remove_segment(2).unwrap();
        assert_eq!(path, triangle());

        path.replace_segment(0, Segment::LineTo(p(1., 1.))).unwrap();
        assert!(!path.is_valid());
        assert_eq!(path.subpath_start_index(3), None);
        // Z with no subpath to close ends where it starts.
        assert_eq!(path.segment_end(3), Some(p(10., 10.)));
        assert!(!path.resolve(3).unwrap().is_differentiable());
        // The first segment is a point.
        assert_eq!(
            path.resolve(0),
            Some(PathSeg::Line(Line::new((1., 1.), (1., 1.))))
        );
    }

    #[test]
    fn index_errors() {
        let mut path = triangle();
        assert_eq!(path.segment(-1), Ok(&Segment::ClosePath));
        assert_eq!(path.segment(-4), Ok(&Segment::MoveTo(p(0., 0.))));
        assert_eq!(
            path.segment(4),
            Err(Error::IndexOutOfRange { index: 4, len: 4 })
        );
        assert_eq!(
            path.segment(-5),
            Err(Error::IndexOutOfRange { index: -5, len: 4 })
        );
        // -1 inserts at the end.
        path.insert_segment(-1, Segment::LineTo(p(3., 3.))).unwrap();
        assert_eq!(path.segment(4), Ok(&Segment::LineTo(p(3., 3.))));
        assert!(path.insert_segment(6, Segment::ClosePath).is_err());
        assert_eq!(Path::new().segment(0), Err(Error::EmptyPath));
        assert_eq!(Path::new().remove_segment(0), Err(Error::EmptyPath));
        let mut empty = Path::new();
        empty.insert_segment(0, Segment::MoveTo(p(1., 1.))).unwrap();
        assert_eq!(empty.len(), 1);
    }

    #[test]
    fn replace_with_many() {
        let mut path = triangle();
        let old = path
            .replace_segments(
                1,
                [Segment::LineTo(p(5., 0.)), Segment::MoveTo(p(5., 5.)), Segment::LineTo(p(10., 0.))],
            )
            .unwrap();
        assert_eq!(old, Segment::LineTo(p(10., 0.)));
        assert_eq!(path.len(), 6);
        assert_eq!(path.subpath_start_index(5), Some(2));
        assert_eq!(path.segment_end(5), Some(p(5., 5.)));
    }

    #[test]
    fn measurement() {
        let path = triangle();
        let opts = PathOpts::default();
        let diagonal = 200f64.sqrt();
        assert!((path.length(opts) - (20. + diagonal)).abs() < 1e-12);
        assert_eq!(path.point_at_length(15., opts), Some(p(10., 5.)));
        assert_eq!(path.point_at_length(-5., opts).map(|q| q.round(9)), Some(p(3.535533906, 3.535533906)));
        assert_eq!(path.point_at_length(0., opts), Some(p(0., 0.)));
        assert_eq!(path.point_at_length(100., opts), Some(p(0., 0.)));
        assert_eq!(path.point_at(0., opts), Some(p(0., 0.)));
        assert_eq!(path.point_at(1., opts), Some(p(0., 0.)));
        assert_eq!(path.start(), Some(p(0., 0.)));
        assert_eq!(path.end(), Some(p(0., 0.)));
        assert_eq!(path.bbox(), Some(Rect::new(0., 0., 10., 10.)));

        let t = path.tangent_at_length(15., opts).unwrap();
        assert_eq!(t, Line::new((10., 5.), (10., 15.)));
        let t = path.tangent_at_length(1000., opts).unwrap();
        assert_eq!(t.start, p(0., 0.));

        assert_eq!(path.segment_index_at_length(5., opts), Some(1));
        assert_eq!(path.segment_index_at_length(-1., opts), Some(3));
        assert_eq!(path.segment_index_at_length(1000., opts), Some(3));
        assert_eq!(path.segment_at(0.5, opts), Some(&Segment::LineTo(p(10., 10.))));
        assert_eq!(path.segment_index_at(0., opts), Some(1));

        assert_eq!(Path::new().point_at_length(1., opts), None);
        assert_eq!(Path::new().length(opts), 0.);
        assert_eq!(Path::new().bbox(), None);
    }

    #[test]
    fn invisible_only() {
        let path = Path::from_segments([Segment::MoveTo(p(1., 2.)), Segment::MoveTo(p(3., 4.))]);
        let opts = PathOpts::default();
        assert_eq!(path.bbox(), Some(Rect::new(3., 4., 0., 0.)));
        assert_eq!(path.start(), Some(p(3., 4.)));
        assert_eq!(path.point_at_length(5., opts), Some(p(3., 4.)));
        assert_eq!(path.tangent_at_length(5., opts), None);
        assert_eq!(
            path.closest_point_t(p(0., 0.), opts),
            Some(PathT {
                segment_index: 1,
                value: 1.
            })
        );
        assert!(path.divide_at_length(1., opts).is_none());
        assert!(path.to_points(opts).is_empty());
        assert!(!path.is_differentiable());
    }

    #[test]
    fn closest() {
        let path = triangle();
        let opts = PathOpts::default();
        let t = path.closest_point_t(p(12., 4.), opts).unwrap();
        assert_eq!(t.segment_index, 2);
        assert_eq!(path.closest_point(p(12., 4.), opts), Some(p(10., 4.)));
        assert_eq!(path.closest_point_length(p(12., 4.), opts), 14.);
        assert_eq!(path.closest_point_length(p(-1., -1.), opts), 0.);
        let tangent = path.closest_point_tangent(p(5., -2.), opts).unwrap();
        assert_eq!(tangent, Line::new((5., 0.), (15., 0.)));
        let normalized = path.closest_point_normalized_length(p(12., 4.), opts);
        assert!((normalized - 14. / path.length(opts)).abs() < 1e-12);
    }

    #[test]
    fn flattening() {
        let path = triangle();
        let opts = PathOpts::default();
        assert_eq!(
            path.to_points(opts),
            vec![vec![p(0., 0.), p(10., 0.), p(10., 10.)]]
        );
        let open = Path::from_segments([
            Segment::MoveTo(p(0., 0.)),
            Segment::LineTo(p(10., 0.)),
            Segment::MoveTo(p(20., 0.)),
            Segment::LineTo(p(30., 0.)),
            Segment::LineTo(p(30., 10.)),
        ]);
        assert_eq!(
            open.to_points(opts),
            vec![
                vec![p(0., 0.), p(10., 0.)],
                vec![p(20., 0.), p(30., 0.), p(30., 10.)]
            ]
        );
        let curve = Path::from(Curve::new((0., 0.), (0., 100.), (100., 100.), (100., 0.)));
        let points = &curve.to_points(PathOpts::new(1))[0];
        assert_eq!(points.first(), Some(&p(0., 0.)));
        assert_eq!(points.last(), Some(&p(100., 0.)));
        assert!(points.len() > 2);
    }

    #[test]
    fn containment_and_crossings() {
        let opts = PathOpts::default();
        let square = Path::from(&Polyline::new(vec![
            p(0., 0.),
            p(10., 0.),
            p(10., 10.),
            p(0., 10.),
        ]));
        assert!(square.contains_point(p(5., 5.), opts));
        assert!(!square.contains_point(p(15., 5.), opts));

        // A square hole inside a square.
        let mut framed = square.clone();
        framed.append_segments(Segment::from_coords('M', &[3., 3., 7., 3., 7., 7., 3., 7.]).unwrap());
        framed.append_segment(Segment::ClosePath);
        assert!(framed.contains_point(p(1., 1.), opts));
        assert!(!framed.contains_point(p(5., 5.), opts));

        let hits = triangle()
            .intersection_with_line(&Line::new((-5., 5.), (15., 5.)), opts)
            .unwrap();
        assert_eq!(hits, vec![p(10., 5.), p(5., 5.)]);
        assert!(triangle()
            .intersection_with_line(&Line::new((20., 0.), (30., 0.)), opts)
            .is_none());
    }

    #[test]
    fn divide_lines() {
        let path = triangle();
        let opts = PathOpts::default();
        let (first, second) = path.divide_at_length(5., opts).unwrap();
        assert_eq!(
            first.segments(),
            &[Segment::MoveTo(p(0., 0.)), Segment::LineTo(p(5., 0.))]
        );
        // The Z would now close to (5, 0), so it becomes an explicit line.
        assert_eq!(
            second.segments(),
            &[
                Segment::MoveTo(p(5., 0.)),
                Segment::LineTo(p(10., 0.)),
                Segment::LineTo(p(10., 10.)),
                Segment::LineTo(p(0., 0.)),
            ]
        );
        assert!(second.is_valid());

        // Dividing at a vertex drops the empty half.
        let (first, second) = path.divide_at_length(10., opts).unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(
            second.segments(),
            &[
                Segment::MoveTo(p(10., 0.)),
                Segment::LineTo(p(10., 10.)),
                Segment::LineTo(p(0., 0.)),
            ]
        );

        // Beyond the end: everything goes to the first path.
        let (first, second) = path.divide_at_length(1000., opts).unwrap();
        assert_eq!(first, path);
        assert_eq!(second.segments(), &[Segment::MoveTo(p(0., 0.))]);

        // Before the start, measured from the end.
        let (first, second) = path.divide_at_length(-1000., opts).unwrap();
        assert_eq!(first.segments(), &[Segment::MoveTo(p(0., 0.))]);
        assert_eq!(second.segments()[0], Segment::MoveTo(p(0., 0.)));
        assert_eq!(second.len(), 4);
    }

    #[test]
    fn divide_close_path() {
        let path = triangle();
        let opts = PathOpts::default();
        let diagonal = 200f64.sqrt();
        let (first, second) = path.divide_at_length(20. + diagonal / 2., opts).unwrap();
        assert_eq!(first.len(), 4);
        assert!(matches!(first.segments()[3], Segment::LineTo(_)));
        assert_eq!(second.len(), 2);
        assert_eq!(second.segments()[1], Segment::LineTo(p(0., 0.)));

        let (first, second) = path.divide_at_length(100., opts).unwrap();
        assert_eq!(first, path);
        assert_eq!(first.segments()[3], Segment::ClosePath);
        assert_eq!(second.segments(), &[Segment::MoveTo(p(0., 0.))]);
    }

    #[test]
    fn divide_conserves_length() {
        let mut rng = StdRng::seed_from_u64(11);
        let opts = PathOpts::new(4);
        for _ in 0..20 {
            let mut coords = vec![0., 0.];
            coords.extend((0..6).map(|_| rng.random_range(-100.0..100.0)));
            let mut path = Path::from_segments(Segment::from_coords('M', &coords[..2]).unwrap());
            path.append_segments(Segment::from_coords('C', &coords[2..]).unwrap());
            path.append_segment(Segment::LineTo(p(50., 50.)));
            let total = path.length(opts);
            let ratio = rng.random_range(0.05..0.95);
            let (a, b) = path.divide_at(ratio, opts).unwrap();
            let sum = a.length(opts) + b.length(opts);
            assert!((sum - total).abs() / total < 1e-3, "{sum} vs {total}");
            assert_eq!(a.end(), b.start());
        }
    }

    #[test]
    fn subpaths() {
        let path = Path::from_segments([
            Segment::LineTo(p(1., 1.)),
            Segment::MoveTo(p(5., 5.)),
            Segment::LineTo(p(6., 6.)),
            Segment::ClosePath,
        ]);
        let subpaths = path.subpaths();
        assert_eq!(subpaths.len(), 2);
        assert_eq!(
            subpaths[0].segments(),
            &[Segment::MoveTo(Point::ZERO), Segment::LineTo(p(1., 1.))]
        );
        assert_eq!(subpaths[1].len(), 3);
        assert!(Path::new().subpaths().is_empty());
    }

    #[test]
    fn construction() {
        let pieces = [
            PathSeg::Line(Line::new((0., 0.), (1., 0.))),
            PathSeg::Line(Line::new((1., 0.), (1., 1.))),
            PathSeg::Line(Line::new((5., 5.), (6., 6.))),
        ];
        let path = Path::from_lines_and_curves(pieces);
        assert_eq!(
            path.segments(),
            &[
                Segment::MoveTo(p(0., 0.)),
                Segment::LineTo(p(1., 0.)),
                Segment::LineTo(p(1., 1.)),
                Segment::MoveTo(p(5., 5.)),
                Segment::LineTo(p(6., 6.)),
            ]
        );
        assert_eq!(Path::from(&Polyline::default()), Path::new());
        let path = Path::from(Line::new((1., 2.), (3., 4.)))
            .translate(1., 1.)
            .scale(2., 2., Point::ZERO)
            .round(0);
        assert_eq!(
            path.segments(),
            &[Segment::MoveTo(p(4., 6.)), Segment::LineTo(p(8., 10.))]
        );
        assert_eq!(Path::new().validate(), Path::new());
        assert_eq!(
            Path::from_segments([Segment::LineTo(p(1., 1.))]).validate().segments()[0],
            Segment::MoveTo(Point::ZERO)
        );
    }

    #[test]
    fn cached_subdivisions_match() {
        let path = Path::from(Curve::new((0., 0.), (0., 100.), (100., 100.), (100., 0.)));
        let subdivisions = path.segment_subdivisions(3);
        assert!(subdivisions[0].is_empty());
        let cached = PathOpts::new(3).with_segment_subdivisions(&subdivisions);
        assert_eq!(path.length(cached), path.length(PathOpts::new(3)));
        assert_eq!(
            path.point_at(0.3, cached),
            path.point_at(0.3, PathOpts::new(3))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_form() {
        let path = Path::from(Line::new((0., 0.), (1., 2.)));
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(
            json,
            r#"[{"MoveTo":{"x":0.0,"y":0.0}},{"LineTo":{"x":1.0,"y":2.0}}]"#
        );
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
        assert_eq!(back.subpath_start_index(1), Some(0));
    }
}
