//! Shape reconciliation for elementwise operation.
//!
//! These two functions are the sole primitive every pairing of
//! differently-shaped arrays goes through: arithmetic, comparison,
//! broadcast assignment, masking, and array×array fancy indexing.

use crate::error::{Error, Result};
use crate::shape::Shape;

/// Combined shape of two operands, or an error when an axis is neither
/// equal nor 1 on one side. Per axis the result dimension is the max of the
/// two.
pub fn broadcast_shape(lhs: Shape, rhs: Shape) -> Result<Shape> {
    let rows_ok = lhs.rows == rhs.rows || lhs.rows == 1 || rhs.rows == 1;
    let cols_ok = lhs.cols == rhs.cols || lhs.cols == 1 || rhs.cols == 1;
    if !rows_ok || !cols_ok {
        return Err(Error::Broadcast { lhs, rhs });
    }
    Ok(Shape::new(lhs.rows.max(rhs.rows), lhs.cols.max(rhs.cols)))
}

/// Source index along one axis for output index `i`: a size-1 axis is
/// replayed for every output position.
pub fn broadcast_index(i: usize, dim: usize) -> usize {
    if dim == 1 {
        0
    } else {
        i
    }
}
