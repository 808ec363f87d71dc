//! Shape, stride, and slice primitives.
//!
//! The engine is fixed at rank 2: a [`Shape`] is a (rows, cols) pair and a
//! [`Layout`] maps logical (row, col) coordinates onto a flat buffer through
//! an offset and two strides. [`Slice`] carries possibly-unset bounds; a
//! [`ResolvedSlice`] has been normalized against a concrete dimension and is
//! the only form the indexing code consumes.

use std::fmt;

use crate::error::{Error, Result};

/// A 2-D array shape.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Shape { rows, cols }
    }

    /// Shape of a 1×n row vector.
    pub fn vector(len: usize) -> Self {
        Shape { rows: 1, cols: len }
    }

    /// Total number of elements.
    pub fn size(&self) -> usize {
        self.rows * self.cols
    }

    /// A vector has a single row or a single column.
    pub fn is_vector(&self) -> bool {
        self.rows == 1 || self.cols == 1
    }

    /// A matrix has more than one of each.
    pub fn is_matrix(&self) -> bool {
        self.rows > 1 && self.cols > 1
    }

    /// Dimension along the given axis (0 = rows, 1 = cols).
    pub fn dim(&self, axis: usize) -> usize {
        match axis {
            0 => self.rows,
            1 => self.cols,
            _ => panic!("axis {} out of range for rank 2", axis),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.rows, self.cols)
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Shape { rows, cols }
    }
}

/// Mapping from logical (row, col) coordinates to flat buffer positions.
///
/// Element (i, j) lives at `offset + i*row_stride + j*col_stride`. Strides
/// are signed so that negative-step slices can walk a buffer backwards; the
/// computed flat position is always in-bounds for a view produced by the
/// indexing code.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Layout {
    pub offset: usize,
    pub row_stride: isize,
    pub col_stride: isize,
}

impl Layout {
    /// Row-major contiguous layout for a freshly allocated array.
    pub fn row_major(shape: Shape) -> Self {
        Layout {
            offset: 0,
            row_stride: shape.cols as isize,
            col_stride: 1,
        }
    }

    /// Flat buffer position of logical element (i, j).
    pub fn flat(&self, i: usize, j: usize) -> usize {
        let pos = self.offset as isize + i as isize * self.row_stride + j as isize * self.col_stride;
        debug_assert!(pos >= 0, "layout computed a negative buffer position");
        pos as usize
    }

    /// A view is contiguous iff it is row-major over its own shape. Only
    /// contiguous views may be reshaped without copying.
    pub fn is_contiguous(&self, shape: Shape) -> bool {
        self.row_stride == shape.cols as isize && self.col_stride == 1
    }
}

/// A slice expression with possibly-unset bounds.
///
/// `start`/`stop` of `None` mean "from the edge in the step's direction".
/// Negative bounds count from the end of the dimension. The step may be
/// negative but never zero.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Slice {
    pub start: Option<i64>,
    pub stop: Option<i64>,
    pub step: i64,
}

impl Slice {
    pub fn new(start: Option<i64>, stop: Option<i64>, step: i64) -> Result<Self> {
        if step == 0 {
            return Err(Error::ZeroStep);
        }
        Ok(Slice { start, stop, step })
    }

    /// The full slice: every element, forward order.
    pub fn full() -> Self {
        Slice { start: None, stop: None, step: 1 }
    }

    pub fn is_full(&self) -> bool {
        self.start.is_none() && self.stop.is_none() && self.step == 1
    }

    /// Normalize against a concrete dimension: negative bounds add `dim`,
    /// unset bounds snap to the edge matching the step direction, and both
    /// are clamped into range. Resolution happens exactly once; the output
    /// type cannot be re-resolved.
    pub fn resolve(&self, dim: usize) -> ResolvedSlice {
        let d = dim as i64;
        let step = self.step;
        let mut start = match self.start {
            Some(s) if s < 0 => s + d,
            Some(s) => s,
            None => {
                if step > 0 {
                    0
                } else {
                    d - 1
                }
            }
        };
        let mut stop = match self.stop {
            Some(s) if s < 0 => s + d,
            Some(s) => s,
            None => {
                if step > 0 {
                    d
                } else {
                    -1
                }
            }
        };
        start = if step > 0 {
            start.clamp(0, d)
        } else {
            start.clamp(-1, d - 1)
        };
        stop = stop.clamp(-1, d);
        ResolvedSlice { start, stop, step }
    }
}

impl From<std::ops::Range<i64>> for Slice {
    fn from(r: std::ops::Range<i64>) -> Self {
        Slice { start: Some(r.start), stop: Some(r.end), step: 1 }
    }
}

impl From<std::ops::RangeFrom<i64>> for Slice {
    fn from(r: std::ops::RangeFrom<i64>) -> Self {
        Slice { start: Some(r.start), stop: None, step: 1 }
    }
}

impl From<std::ops::RangeTo<i64>> for Slice {
    fn from(r: std::ops::RangeTo<i64>) -> Self {
        Slice { start: None, stop: Some(r.end), step: 1 }
    }
}

impl From<std::ops::RangeFull> for Slice {
    fn from(_: std::ops::RangeFull) -> Self {
        Slice::full()
    }
}

impl From<std::ops::RangeInclusive<i64>> for Slice {
    fn from(r: std::ops::RangeInclusive<i64>) -> Self {
        Slice { start: Some(*r.start()), stop: Some(*r.end() + 1), step: 1 }
    }
}

/// A slice normalized against a concrete dimension.
///
/// Invariant: `start` is a valid iteration origin for the step direction and
/// `stop` is the exclusive bound; both already account for negative and
/// unset inputs.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ResolvedSlice {
    pub start: i64,
    pub stop: i64,
    pub step: i64,
}

impl ResolvedSlice {
    /// Number of elements the slice selects.
    pub fn len(&self) -> usize {
        if (self.step > 0 && self.start >= self.stop) || (self.step < 0 && self.start <= self.stop)
        {
            return 0;
        }
        (((self.stop - self.start).abs() + self.step.abs() - 1) / self.step.abs()) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate the selected indices in slice order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        let (start, step) = (self.start, self.step);
        (0..self.len()).map(move |k| (start + k as i64 * step) as usize)
    }
}
