//! The elementwise operation engine.
//!
//! Three entry points — [`unary`], [`binary`], and [`binary_in_place`] —
//! each parameterized by an operator returning `Result` (so a strict
//! division policy can abort mid-operation), an optional caller-supplied
//! output array, and an optional boolean `where`-mask. Where the mask is
//! false the output element is the result type's zero and the operator is
//! not invoked, which matters for operators with side effects such as the
//! division-by-zero diagnostic.
//!
//! Division and modulus are the distinguished case: behavior on a zero
//! divisor is an explicit [`DivPolicy`] threaded into [`div_value`] /
//! [`rem_value`] by the caller, never global state.

use crate::array::Array;
use crate::broadcast::{broadcast_index, broadcast_shape};
use crate::element::Element;
use crate::error::{Error, Result};

/// What a zero divisor does.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum DivPolicy {
    /// Emit a warning and substitute a type-appropriate sentinel: NaN for
    /// 0/0, signed infinity for floating/complex, zero for integers.
    #[default]
    Permissive,
    /// Fail immediately with an arithmetic error.
    Strict,
}

/// `num / den` under the given policy.
pub fn div_value<T>(num: T, den: T, policy: DivPolicy) -> Result<T>
where
    T: Element + std::ops::Div<Output = T>,
{
    if den.is_zero() {
        return match policy {
            DivPolicy::Strict => Err(Error::DivideByZero),
            DivPolicy::Permissive => {
                log::warn!("divide by zero encountered in divide");
                Ok(num.div_zero_sentinel())
            }
        };
    }
    Ok(num / den)
}

/// `num % den` under the given policy.
pub fn rem_value<T>(num: T, den: T, policy: DivPolicy) -> Result<T>
where
    T: Element + std::ops::Rem<Output = T>,
{
    if den.is_zero() {
        return match policy {
            DivPolicy::Strict => Err(Error::DivideByZero),
            DivPolicy::Permissive => {
                log::warn!("divide by zero encountered in remainder");
                Ok(num.div_zero_sentinel())
            }
        };
    }
    Ok(num % den)
}

fn check_mask(mask: Option<&Array<bool>>, result: crate::shape::Shape) -> Result<()> {
    if let Some(m) = mask {
        let combined = broadcast_shape(result, m.shape())?;
        if combined != result {
            return Err(Error::BroadcastTarget { result: combined, target: result });
        }
    }
    Ok(())
}

fn mask_allows(mask: Option<&Array<bool>>, i: usize, j: usize) -> bool {
    match mask {
        None => true,
        Some(m) => m.get_unchecked(
            broadcast_index(i, m.rows()),
            broadcast_index(j, m.cols()),
        ),
    }
}

/// Apply `f` to every element of `arr`, writing into `out` when supplied
/// (its shape must match) or a fresh buffer otherwise.
pub fn unary<T, D, F>(
    arr: &Array<T>,
    out: Option<&Array<D>>,
    mask: Option<&Array<bool>>,
    f: F,
) -> Result<Array<D>>
where
    T: Element,
    D: Element,
    F: Fn(T) -> Result<D>,
{
    let shape = arr.shape();
    if let Some(o) = out {
        if o.shape() != shape {
            return Err(Error::OutShape { out: o.shape(), result: shape });
        }
    }
    check_mask(mask, shape)?;

    match out {
        Some(o) => {
            for i in 0..shape.rows {
                for j in 0..shape.cols {
                    let v = if mask_allows(mask, i, j) {
                        f(arr.get_unchecked(i, j))?
                    } else {
                        <D as Element>::zero()
                    };
                    o.set_unchecked(i, j, v);
                }
            }
            Ok(o.clone())
        }
        None => {
            let mut data = Vec::with_capacity(shape.size());
            for i in 0..shape.rows {
                for j in 0..shape.cols {
                    let v = if mask_allows(mask, i, j) {
                        f(arr.get_unchecked(i, j))?
                    } else {
                        <D as Element>::zero()
                    };
                    data.push(v);
                }
            }
            Array::from_shape_vec(shape, data)
        }
    }
}

/// Apply `f` across the broadcast of two operands.
pub fn binary<L, R, D, F>(
    lhs: &Array<L>,
    rhs: &Array<R>,
    out: Option<&Array<D>>,
    mask: Option<&Array<bool>>,
    f: F,
) -> Result<Array<D>>
where
    L: Element,
    R: Element,
    D: Element,
    F: Fn(L, R) -> Result<D>,
{
    let shape = broadcast_shape(lhs.shape(), rhs.shape())?;
    if let Some(o) = out {
        if o.shape() != shape {
            return Err(Error::OutShape { out: o.shape(), result: shape });
        }
    }
    check_mask(mask, shape)?;

    let at = |i: usize, j: usize| -> Result<D> {
        if !mask_allows(mask, i, j) {
            return Ok(<D as Element>::zero());
        }
        let l = lhs.get_unchecked(
            broadcast_index(i, lhs.rows()),
            broadcast_index(j, lhs.cols()),
        );
        let r = rhs.get_unchecked(
            broadcast_index(i, rhs.rows()),
            broadcast_index(j, rhs.cols()),
        );
        f(l, r)
    };

    match out {
        Some(o) => {
            for i in 0..shape.rows {
                for j in 0..shape.cols {
                    let v = at(i, j)?;
                    o.set_unchecked(i, j, v);
                }
            }
            Ok(o.clone())
        }
        None => {
            let mut data = Vec::with_capacity(shape.size());
            for i in 0..shape.rows {
                for j in 0..shape.cols {
                    data.push(at(i, j)?);
                }
            }
            Array::from_shape_vec(shape, data)
        }
    }
}

/// Apply `f` across the broadcast of two operands, writing the result back
/// through the left operand's buffer and layout.
///
/// The broadcast result shape must equal the left operand's shape exactly.
/// If `f` itself fails mid-loop the left operand is left partially
/// written.
pub fn binary_in_place<L, R, F>(lhs: &Array<L>, rhs: &Array<R>, f: F) -> Result<()>
where
    L: Element,
    R: Element,
    F: Fn(L, R) -> Result<L>,
{
    let shape = broadcast_shape(lhs.shape(), rhs.shape())?;
    if shape != lhs.shape() {
        return Err(Error::BroadcastTarget { result: shape, target: lhs.shape() });
    }
    for i in 0..shape.rows {
        for j in 0..shape.cols {
            let l = lhs.get_unchecked(i, j);
            let r = rhs.get_unchecked(
                broadcast_index(i, rhs.rows()),
                broadcast_index(j, rhs.cols()),
            );
            lhs.set_unchecked(i, j, f(l, r)?);
        }
    }
    Ok(())
}

/// [`binary`] with the result element type forced to boolean (the
/// comparison operation mode).
pub fn comparison<L, R, F>(lhs: &Array<L>, rhs: &Array<R>, f: F) -> Result<Array<bool>>
where
    L: Element,
    R: Element,
    F: Fn(L, R) -> bool,
{
    binary(lhs, rhs, None, None, |l, r| Ok(f(l, r)))
}
