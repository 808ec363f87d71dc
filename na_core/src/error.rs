//! Error types for the array engine.

use crate::shape::Shape;

/// Errors reported by array construction, indexing, and arithmetic.
///
/// Variants group into the four failure classes of the engine: shape
/// mismatches, out-of-range indices, illegal conversions/assignments, and
/// strict-mode arithmetic faults. All failures are synchronous and occur
/// before any externally visible mutation, with the single exception of
/// in-place elementwise operations, which may leave the left operand
/// partially written when the operator itself fails mid-loop.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // === Shape errors ===
    #[error("cannot broadcast shapes {lhs} and {rhs}")]
    Broadcast { lhs: Shape, rhs: Shape },

    #[error("cannot reshape {from} ({} elements) into {to} ({} elements)", .from.size(), .to.size())]
    ReshapeSize { from: Shape, to: Shape },

    #[error("cannot reshape a non-contiguous view without copying")]
    NonContiguous,

    #[error("broadcast result {result} does not match target shape {target}")]
    BroadcastTarget { result: Shape, target: Shape },

    #[error("out shape {out} does not match result shape {result}")]
    OutShape { out: Shape, result: Shape },

    #[error("row {row} has {len} elements, expected {expected}")]
    Ragged { row: usize, len: usize, expected: usize },

    #[error("{len} elements do not fit shape {shape}")]
    SizeMismatch { len: usize, shape: Shape },

    // === Index errors ===
    #[error("index {index} out of bounds for axis {axis} with size {size}")]
    IndexOutOfBounds { index: i64, axis: usize, size: usize },

    #[error("slice step cannot be zero")]
    ZeroStep,

    #[error("index arrays must be vectors here (got {shape})")]
    IndexRank { shape: Shape },

    // === Type errors ===
    #[error("illegal scalar conversion of an array of size {size}")]
    ScalarConversion { size: usize },

    #[error("fancy-indexed results are copies and cannot be assigned through")]
    NotAssignable,

    // === Arithmetic errors ===
    #[error("division by zero")]
    DivideByZero,
}

pub type Result<T> = std::result::Result<T, Error>;
