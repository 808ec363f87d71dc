//! Unary math functions, as thin wrappers over the elementwise engine.

use num_traits::Float;

use crate::array::Array;
use crate::element::Element;
use crate::error::Result;
use crate::ufunc;

impl<T: Element + Float> Array<T> {
    fn apply(&self, f: impl Fn(T) -> T) -> Array<T> {
        ufunc::unary(self, None, None, |v| Ok(f(v)))
            .expect("unary apply cannot fail without out/mask")
    }

    /// Apply `f` where `mask` is true, writing zero elsewhere.
    pub fn apply_where(&self, mask: &Array<bool>, f: impl Fn(T) -> T) -> Result<Array<T>> {
        ufunc::unary(self, None, Some(mask), |v| Ok(f(v)))
    }

    /// Absolute value: |self|
    pub fn abs(&self) -> Array<T> {
        self.apply(|v| v.abs())
    }

    /// Largest integer <= self.
    pub fn floor(&self) -> Array<T> {
        self.apply(|v| v.floor())
    }

    /// Exponential: e^self
    pub fn exp(&self) -> Array<T> {
        self.apply(|v| v.exp())
    }

    /// Natural log: ln(self)
    pub fn ln(&self) -> Array<T> {
        self.apply(|v| v.ln())
    }

    /// Square root: sqrt(self)
    pub fn sqrt(&self) -> Array<T> {
        self.apply(|v| v.sqrt())
    }

    /// Sine: sin(self)
    pub fn sin(&self) -> Array<T> {
        self.apply(|v| v.sin())
    }

    /// Cosine: cos(self)
    pub fn cos(&self) -> Array<T> {
        self.apply(|v| v.cos())
    }
}
