//! Operator overloads and comparison methods for [`Array`].
//!
//! Array-array arithmetic is defined for every pair of element types; the
//! result element type comes from the [`Promote`] table, so `i32 + u32`
//! yields an `i64` array and `i16 + c64` a `c128` array. Division and
//! modulus route through the permissive policy by default; the `_checked`
//! methods take an explicit [`DivPolicy`]. Compound assignment (`+=` and
//! friends) computes in the promoted type and narrows back into the left
//! operand.
//!
//! Operators panic on shape errors (like any fixed-signature `std::ops`
//! surface); the fallible paths are the engine entry points in
//! [`crate::ufunc`] and the `_checked` methods here.

use std::ops::{
    Add, AddAssign, BitAnd, BitOr, BitXor, Div, DivAssign, Mul, MulAssign, Neg, Not, Rem,
    RemAssign, Sub, SubAssign,
};

use num_traits::NumOps;

use crate::array::Array;
use crate::element::{Cast, Element, Prom, Promote};
use crate::error::Result;
use crate::ufunc::{self, DivPolicy};

// === Array ⊕ array arithmetic ===

macro_rules! arith_impls {
    ($($trait:ident, $method:ident, $apply:expr;)*) => {$(
        impl<'a, 'b, L, R> $trait<&'b Array<R>> for &'a Array<L>
        where
            L: Element + Promote<R> + Cast<Prom<L, R>>,
            R: Element + Cast<Prom<L, R>>,
            Prom<L, R>: Element + NumOps,
        {
            type Output = Array<Prom<L, R>>;

            fn $method(self, rhs: &'b Array<R>) -> Self::Output {
                let apply: fn(Prom<L, R>, Prom<L, R>) -> crate::error::Result<Prom<L, R>> =
                    $apply;
                ufunc::binary(self, rhs, None, None, |l, r| {
                    let l: Prom<L, R> = l.cast();
                    let r: Prom<L, R> = r.cast();
                    apply(l, r)
                })
                .expect("shapes are not broadcast compatible")
            }
        }

        impl<'a, L, R> $trait<Array<R>> for &'a Array<L>
        where
            L: Element + Promote<R> + Cast<Prom<L, R>>,
            R: Element + Cast<Prom<L, R>>,
            Prom<L, R>: Element + NumOps,
        {
            type Output = Array<Prom<L, R>>;

            fn $method(self, rhs: Array<R>) -> Self::Output {
                self.$method(&rhs)
            }
        }

        impl<'b, L, R> $trait<&'b Array<R>> for Array<L>
        where
            L: Element + Promote<R> + Cast<Prom<L, R>>,
            R: Element + Cast<Prom<L, R>>,
            Prom<L, R>: Element + NumOps,
        {
            type Output = Array<Prom<L, R>>;

            fn $method(self, rhs: &'b Array<R>) -> Self::Output {
                (&self).$method(rhs)
            }
        }

        impl<L, R> $trait<Array<R>> for Array<L>
        where
            L: Element + Promote<R> + Cast<Prom<L, R>>,
            R: Element + Cast<Prom<L, R>>,
            Prom<L, R>: Element + NumOps,
        {
            type Output = Array<Prom<L, R>>;

            fn $method(self, rhs: Array<R>) -> Self::Output {
                (&self).$method(&rhs)
            }
        }
    )*};
}

arith_impls! {
    Add, add, |l, r| Ok(l + r);
    Sub, sub, |l, r| Ok(l - r);
    Mul, mul, |l, r| Ok(l * r);
    Div, div, |l, r| ufunc::div_value(l, r, DivPolicy::Permissive);
    Rem, rem, |l, r| ufunc::rem_value(l, r, DivPolicy::Permissive);
}

// === Array ⊕ scalar (same element type; wrap mixed scalars explicitly) ===

macro_rules! scalar_rhs_impls {
    ($($trait:ident, $method:ident;)*) => {$(
        impl<'a, T> $trait<T> for &'a Array<T>
        where
            T: Element + NumOps + Promote<T, Output = T> + Cast<T>,
        {
            type Output = Array<T>;

            fn $method(self, rhs: T) -> Array<T> {
                self.$method(&Array::from(rhs))
            }
        }

        impl<T> $trait<T> for Array<T>
        where
            T: Element + NumOps + Promote<T, Output = T> + Cast<T>,
        {
            type Output = Array<T>;

            fn $method(self, rhs: T) -> Array<T> {
                (&self).$method(&Array::from(rhs))
            }
        }
    )*};
}

scalar_rhs_impls! {
    Add, add;
    Sub, sub;
    Mul, mul;
    Div, div;
    Rem, rem;
}

// === Scalar ⊕ array (concrete left-hand types) ===

macro_rules! scalar_lhs_impls {
    ($($t:ty),*) => {$(
        impl<'a> Add<&'a Array<$t>> for $t {
            type Output = Array<$t>;

            fn add(self, rhs: &'a Array<$t>) -> Array<$t> {
                &Array::from(self) + rhs
            }
        }

        impl Add<Array<$t>> for $t {
            type Output = Array<$t>;

            fn add(self, rhs: Array<$t>) -> Array<$t> {
                &Array::from(self) + &rhs
            }
        }

        impl<'a> Sub<&'a Array<$t>> for $t {
            type Output = Array<$t>;

            fn sub(self, rhs: &'a Array<$t>) -> Array<$t> {
                &Array::from(self) - rhs
            }
        }

        impl Sub<Array<$t>> for $t {
            type Output = Array<$t>;

            fn sub(self, rhs: Array<$t>) -> Array<$t> {
                &Array::from(self) - &rhs
            }
        }

        impl<'a> Mul<&'a Array<$t>> for $t {
            type Output = Array<$t>;

            fn mul(self, rhs: &'a Array<$t>) -> Array<$t> {
                &Array::from(self) * rhs
            }
        }

        impl Mul<Array<$t>> for $t {
            type Output = Array<$t>;

            fn mul(self, rhs: Array<$t>) -> Array<$t> {
                &Array::from(self) * &rhs
            }
        }

        impl<'a> Div<&'a Array<$t>> for $t {
            type Output = Array<$t>;

            fn div(self, rhs: &'a Array<$t>) -> Array<$t> {
                &Array::from(self) / rhs
            }
        }

        impl Div<Array<$t>> for $t {
            type Output = Array<$t>;

            fn div(self, rhs: Array<$t>) -> Array<$t> {
                &Array::from(self) / &rhs
            }
        }
    )*};
}

scalar_lhs_impls!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

// === Compound assignment (in-place mode: narrows to the left type) ===

macro_rules! assign_impls {
    ($($trait:ident, $method:ident, $apply:expr;)*) => {$(
        impl<L, R> $trait<&Array<R>> for Array<L>
        where
            L: Element + Promote<R> + Cast<Prom<L, R>>,
            R: Element + Cast<Prom<L, R>>,
            Prom<L, R>: Element + NumOps + Cast<L>,
        {
            fn $method(&mut self, rhs: &Array<R>) {
                let apply: fn(Prom<L, R>, Prom<L, R>) -> crate::error::Result<Prom<L, R>> =
                    $apply;
                ufunc::binary_in_place(self, rhs, |l, r| {
                    let lp: Prom<L, R> = l.cast();
                    let rp: Prom<L, R> = r.cast();
                    Ok(apply(lp, rp)?.cast())
                })
                .expect("in-place result shape must equal the left operand's shape")
            }
        }

        impl<L, R> $trait<Array<R>> for Array<L>
        where
            L: Element + Promote<R> + Cast<Prom<L, R>>,
            R: Element + Cast<Prom<L, R>>,
            Prom<L, R>: Element + NumOps + Cast<L>,
        {
            fn $method(&mut self, rhs: Array<R>) {
                self.$method(&rhs)
            }
        }
    )*};
}

assign_impls! {
    AddAssign, add_assign, |l, r| Ok(l + r);
    SubAssign, sub_assign, |l, r| Ok(l - r);
    MulAssign, mul_assign, |l, r| Ok(l * r);
    DivAssign, div_assign, |l, r| ufunc::div_value(l, r, DivPolicy::Permissive);
    RemAssign, rem_assign, |l, r| ufunc::rem_value(l, r, DivPolicy::Permissive);
}

// === Unary operators ===

impl<'a, T> Neg for &'a Array<T>
where
    T: Element + Neg<Output = T>,
{
    type Output = Array<T>;

    fn neg(self) -> Array<T> {
        ufunc::unary(self, None, None, |v| Ok(-v))
            .expect("unary apply cannot fail without out/mask")
    }
}

impl<T> Neg for Array<T>
where
    T: Element + Neg<Output = T>,
{
    type Output = Array<T>;

    fn neg(self) -> Array<T> {
        -&self
    }
}

impl<'a, T> Not for &'a Array<T>
where
    T: Element + Not<Output = T>,
{
    type Output = Array<T>;

    fn not(self) -> Array<T> {
        ufunc::unary(self, None, None, |v| Ok(!v))
            .expect("unary apply cannot fail without out/mask")
    }
}

impl<T> Not for Array<T>
where
    T: Element + Not<Output = T>,
{
    type Output = Array<T>;

    fn not(self) -> Array<T> {
        !&self
    }
}

// === Bitwise (boolean and integer arrays, same element type) ===

macro_rules! bit_impls {
    ($($trait:ident, $method:ident, $op:tt;)*) => {$(
        impl<'a, 'b, T> $trait<&'b Array<T>> for &'a Array<T>
        where
            T: Element + $trait<Output = T>,
        {
            type Output = Array<T>;

            fn $method(self, rhs: &'b Array<T>) -> Array<T> {
                ufunc::binary(self, rhs, None, None, |l, r| Ok(l $op r))
                    .expect("shapes are not broadcast compatible")
            }
        }

        impl<T> $trait<Array<T>> for Array<T>
        where
            T: Element + $trait<Output = T>,
        {
            type Output = Array<T>;

            fn $method(self, rhs: Array<T>) -> Array<T> {
                (&self).$method(&rhs)
            }
        }
    )*};
}

bit_impls! {
    BitAnd, bitand, &;
    BitOr, bitor, |;
    BitXor, bitxor, ^;
}

// === Comparison methods (comparison mode: boolean results) ===

impl<L: Element> Array<L> {
    /// Elementwise `==` across the broadcast of the two operands.
    pub fn eq<R>(&self, rhs: &Array<R>) -> Result<Array<bool>>
    where
        L: Promote<R> + Cast<Prom<L, R>>,
        R: Element + Cast<Prom<L, R>>,
        Prom<L, R>: Element,
    {
        ufunc::comparison(self, rhs, |l, r| {
            let l: Prom<L, R> = l.cast();
            let r: Prom<L, R> = r.cast();
            l == r
        })
    }

    /// Elementwise `!=`.
    pub fn ne<R>(&self, rhs: &Array<R>) -> Result<Array<bool>>
    where
        L: Promote<R> + Cast<Prom<L, R>>,
        R: Element + Cast<Prom<L, R>>,
        Prom<L, R>: Element,
    {
        ufunc::comparison(self, rhs, |l, r| {
            let l: Prom<L, R> = l.cast();
            let r: Prom<L, R> = r.cast();
            l != r
        })
    }

    /// Elementwise `<`.
    pub fn lt<R>(&self, rhs: &Array<R>) -> Result<Array<bool>>
    where
        L: Promote<R> + Cast<Prom<L, R>>,
        R: Element + Cast<Prom<L, R>>,
        Prom<L, R>: Element + PartialOrd,
    {
        ufunc::comparison(self, rhs, |l, r| {
            let l: Prom<L, R> = l.cast();
            let r: Prom<L, R> = r.cast();
            l < r
        })
    }

    /// Elementwise `<=`.
    pub fn le<R>(&self, rhs: &Array<R>) -> Result<Array<bool>>
    where
        L: Promote<R> + Cast<Prom<L, R>>,
        R: Element + Cast<Prom<L, R>>,
        Prom<L, R>: Element + PartialOrd,
    {
        ufunc::comparison(self, rhs, |l, r| {
            let l: Prom<L, R> = l.cast();
            let r: Prom<L, R> = r.cast();
            l <= r
        })
    }

    /// Elementwise `>`.
    pub fn gt<R>(&self, rhs: &Array<R>) -> Result<Array<bool>>
    where
        L: Promote<R> + Cast<Prom<L, R>>,
        R: Element + Cast<Prom<L, R>>,
        Prom<L, R>: Element + PartialOrd,
    {
        ufunc::comparison(self, rhs, |l, r| {
            let l: Prom<L, R> = l.cast();
            let r: Prom<L, R> = r.cast();
            l > r
        })
    }

    /// Elementwise `>=`.
    pub fn ge<R>(&self, rhs: &Array<R>) -> Result<Array<bool>>
    where
        L: Promote<R> + Cast<Prom<L, R>>,
        R: Element + Cast<Prom<L, R>>,
        Prom<L, R>: Element + PartialOrd,
    {
        ufunc::comparison(self, rhs, |l, r| {
            let l: Prom<L, R> = l.cast();
            let r: Prom<L, R> = r.cast();
            l >= r
        })
    }

    /// Division with an explicit zero-divisor policy.
    pub fn div_checked<R>(&self, rhs: &Array<R>, policy: DivPolicy) -> Result<Array<Prom<L, R>>>
    where
        L: Promote<R> + Cast<Prom<L, R>>,
        R: Element + Cast<Prom<L, R>>,
        Prom<L, R>: Element + NumOps,
    {
        ufunc::binary(self, rhs, None, None, |l, r| {
            let l: Prom<L, R> = l.cast();
            let r: Prom<L, R> = r.cast();
            ufunc::div_value(l, r, policy)
        })
    }

    /// Modulus with an explicit zero-divisor policy.
    pub fn rem_checked<R>(&self, rhs: &Array<R>, policy: DivPolicy) -> Result<Array<Prom<L, R>>>
    where
        L: Promote<R> + Cast<Prom<L, R>>,
        R: Element + Cast<Prom<L, R>>,
        Prom<L, R>: Element + NumOps,
    {
        ufunc::binary(self, rhs, None, None, |l, r| {
            let l: Prom<L, R> = l.cast();
            let r: Prom<L, R> = r.cast();
            ufunc::rem_value(l, r, policy)
        })
    }
}
