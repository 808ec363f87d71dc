//! Index expressions for the nine-way select dispatch.
//!
//! Each of the row and column parts of an index expression is one of
//! integer, slice, or integer array ([`Ix`]); [`Index2`] pairs them.
//! Conversions let call sites pass plain integers, native ranges, slices,
//! and index arrays in any combination.

use crate::array::Array;
use crate::shape::Slice;

/// One axis of an index expression.
#[derive(Clone, Debug)]
pub enum Ix {
    /// A single position; negative values count from the end.
    At(i64),
    /// A slice of positions.
    Span(Slice),
    /// An integer array of positions (fancy indexing; always copies).
    Take(Array<i64>),
}

impl Ix {
    pub fn is_take(&self) -> bool {
        matches!(self, Ix::Take(_))
    }
}

impl From<i64> for Ix {
    fn from(i: i64) -> Self {
        Ix::At(i)
    }
}

impl From<i32> for Ix {
    fn from(i: i32) -> Self {
        Ix::At(i as i64)
    }
}

impl From<Slice> for Ix {
    fn from(s: Slice) -> Self {
        Ix::Span(s)
    }
}

impl From<Array<i64>> for Ix {
    fn from(a: Array<i64>) -> Self {
        Ix::Take(a)
    }
}

impl From<&Array<i64>> for Ix {
    fn from(a: &Array<i64>) -> Self {
        Ix::Take(a.clone())
    }
}

impl From<Vec<i64>> for Ix {
    fn from(v: Vec<i64>) -> Self {
        Ix::Take(Array::from_vec(v))
    }
}

impl From<&[i64]> for Ix {
    fn from(v: &[i64]) -> Self {
        Ix::Take(Array::from_vec(v.to_vec()))
    }
}

impl From<std::ops::RangeFull> for Ix {
    fn from(_: std::ops::RangeFull) -> Self {
        Ix::Span(Slice::full())
    }
}

macro_rules! range_ix {
    ($($t:ty),*) => {$(
        impl From<std::ops::Range<$t>> for Ix {
            fn from(r: std::ops::Range<$t>) -> Self {
                Ix::Span(Slice::from(r.start as i64..r.end as i64))
            }
        }

        impl From<std::ops::RangeFrom<$t>> for Ix {
            fn from(r: std::ops::RangeFrom<$t>) -> Self {
                Ix::Span(Slice::from(r.start as i64..))
            }
        }

        impl From<std::ops::RangeTo<$t>> for Ix {
            fn from(r: std::ops::RangeTo<$t>) -> Self {
                Ix::Span(Slice::from(..r.end as i64))
            }
        }

        impl From<std::ops::RangeInclusive<$t>> for Ix {
            fn from(r: std::ops::RangeInclusive<$t>) -> Self {
                Ix::Span(Slice::from(*r.start() as i64..=*r.end() as i64))
            }
        }
    )*};
}

range_ix!(i32, i64);

/// A full (row, col) index expression.
#[derive(Clone, Debug)]
pub struct Index2 {
    pub row: Ix,
    pub col: Ix,
}

impl Index2 {
    pub fn new(row: impl Into<Ix>, col: impl Into<Ix>) -> Self {
        Index2 { row: row.into(), col: col.into() }
    }

    /// Whether either part is an integer array (the copying cases).
    pub fn has_take(&self) -> bool {
        self.row.is_take() || self.col.is_take()
    }
}

impl<A: Into<Ix>, B: Into<Ix>> From<(A, B)> for Index2 {
    fn from((row, col): (A, B)) -> Self {
        Index2 { row: row.into(), col: col.into() }
    }
}

// A bare integer indexes with an implied full column slice; on vectors this
// selects the i-th logical element (the vector rule in `Array::select`).
impl From<i64> for Index2 {
    fn from(i: i64) -> Self {
        Index2 { row: Ix::At(i), col: Ix::Span(Slice::full()) }
    }
}

impl From<i32> for Index2 {
    fn from(i: i32) -> Self {
        Index2::from(i as i64)
    }
}
