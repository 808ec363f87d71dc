//! # na_core - 2-D Numeric Array Engine
//!
//! This crate provides a NumPy-like 2-dimensional array engine: typed
//! arrays over shared, reference-counted storage, stride-based views,
//! broadcasting, mixed-type arithmetic with type promotion, scalar/slice/
//! fancy indexing, and a packed boolean (mask) representation.
//!
//! ## Overview
//!
//! The core abstractions are:
//! - [`Shape`], [`Layout`], and [`Slice`] - logical geometry and its
//!   mapping onto flat storage
//! - [`Buffer`] - reference-counted element storage shared by every view
//! - [`Array`] - the public facade combining the two
//! - [`DType`] and [`promote`] - the runtime type-promotion table, with
//!   [`Promote`] as its compile-time mirror
//! - [`ufunc`] - the elementwise operation engine (unary, binary
//!   broadcast, in-place, comparison), with [`DivPolicy`] for
//!   division-by-zero behavior
//! - [`BitArray`] - bit-packed booleans with a [`BitRef`] proxy
//!
//! ## Example
//!
//! ```
//! use na_core::prelude::*;
//!
//! let a = Array::from_nested(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
//!
//! // Slice views share storage with the source.
//! let tail = a.select((.., 1..)).unwrap();
//! assert_eq!(tail.shape(), Shape::new(2, 2));
//! assert_eq!(tail.to_vec(), vec![2.0, 3.0, 5.0, 6.0]);
//!
//! // Arithmetic broadcasts a 1x3 row across a 2x3 matrix.
//! let row = Array::from_vec(vec![10.0, 20.0, 30.0]);
//! let sum = &a + &row;
//! assert_eq!(sum.to_vec(), vec![11.0, 22.0, 33.0, 14.0, 25.0, 36.0]);
//! ```

pub mod array;
pub mod bits;
pub mod broadcast;
pub mod buffer;
pub mod dtype;
pub mod element;
pub mod error;
pub mod fmt;
pub mod index;
pub mod shape;
pub mod ufunc;

mod math;
mod ops;

pub use array::{Array, Axis, ComponentViewMut, ViewMut};
pub use bits::{BitArray, BitRef};
pub use broadcast::{broadcast_index, broadcast_shape};
pub use buffer::Buffer;
pub use dtype::{promote, promote_for, Category, DType, OpKind};
pub use element::{Cast, ComplexElement, Element, Prom, Promote, C128, C64};
pub use error::{Error, Result};
pub use fmt::{format_element, PrintOptions};
pub use index::{Index2, Ix};
pub use shape::{Layout, ResolvedSlice, Shape, Slice};
pub use ufunc::DivPolicy;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::array::{Array, Axis, ViewMut};
    pub use crate::bits::{BitArray, BitRef};
    pub use crate::dtype::{promote, DType};
    pub use crate::element::{Element, C128, C64};
    pub use crate::error::{Error, Result};
    pub use crate::index::{Index2, Ix};
    pub use crate::shape::{Shape, Slice};
    pub use crate::ufunc::DivPolicy;
}
