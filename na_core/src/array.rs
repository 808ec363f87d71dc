//! The array facade: shared storage, shape, and layout, with indexing,
//! views, and lifecycle operations built on top.
//!
//! An [`Array`] is a `Buffer` plus a `Shape` and a `Layout`. Indexing with
//! scalars and slices produces new arrays sharing the same buffer with an
//! adjusted offset and strides; indexing with integer arrays ("fancy"
//! indexing) always materializes a copy, since the selected elements are
//! not expressible as a single stride. Write access to views goes through
//! [`ViewMut`], so whether a result can be assigned through is a fact of
//! its type rather than a runtime flag.

use crate::broadcast::{broadcast_index, broadcast_shape};
use crate::buffer::Buffer;
use crate::element::{ComplexElement, Element};
use crate::error::{Error, Result};
use crate::index::{Index2, Ix};
use crate::shape::{Layout, Shape};

/// Reduction axis: collapse rows (per-column results) or columns (per-row
/// results).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Axis {
    Rows,
    Cols,
}

/// A 2-D array over a shared, reference-counted buffer.
#[derive(Clone, Debug)]
pub struct Array<T: Element> {
    buf: Buffer<T>,
    shape: Shape,
    layout: Layout,
    is_view: bool,
    is_scalar: bool,
}

/// Normalize a possibly-negative index against a dimension.
fn normalize(i: i64, size: usize, axis: usize) -> Result<usize> {
    let n = if i < 0 { i + size as i64 } else { i };
    if n < 0 || n >= size as i64 {
        return Err(Error::IndexOutOfBounds { index: i, axis, size });
    }
    Ok(n as usize)
}

impl<T: Element> Array<T> {
    // === Constructors ===

    /// A 1×n row vector owning its data.
    pub fn from_vec(data: Vec<T>) -> Self {
        let shape = Shape::vector(data.len());
        Array {
            buf: Buffer::from_vec(data),
            layout: Layout::row_major(shape),
            shape,
            is_view: false,
            is_scalar: false,
        }
    }

    /// A fresh array from flat row-major data and a shape.
    pub fn from_shape_vec(shape: impl Into<Shape>, data: Vec<T>) -> Result<Self> {
        let shape = shape.into();
        if data.len() != shape.size() {
            return Err(Error::SizeMismatch { len: data.len(), shape });
        }
        Ok(Array {
            buf: Buffer::from_vec(data),
            layout: Layout::row_major(shape),
            shape,
            is_view: false,
            is_scalar: false,
        })
    }

    /// A fresh array from nested rows. Ragged input is a shape error.
    pub fn from_nested(rows: Vec<Vec<T>>) -> Result<Self> {
        let r = rows.len();
        let c = rows.first().map_or(0, |row| row.len());
        for (i, row) in rows.iter().enumerate() {
            if row.len() != c {
                return Err(Error::Ragged { row: i, len: row.len(), expected: c });
            }
        }
        let data: Vec<T> = rows.into_iter().flatten().collect();
        Self::from_shape_vec(Shape::new(r, c), data)
    }

    /// An array over an existing buffer: `copy == true` duplicates the
    /// elements into private storage, `copy == false` shares the buffer.
    pub fn from_buffer(buf: &Buffer<T>, shape: impl Into<Shape>, copy: bool) -> Result<Self> {
        let shape = shape.into();
        if buf.len() != shape.size() {
            return Err(Error::SizeMismatch { len: buf.len(), shape });
        }
        let buf = if copy {
            Buffer::from_vec((0..buf.len()).map(|i| buf.get(i)).collect())
        } else {
            buf.clone()
        };
        Ok(Array {
            buf,
            layout: Layout::row_major(shape),
            shape,
            is_view: false,
            is_scalar: false,
        })
    }

    /// An array over raw memory.
    ///
    /// With `copy == true` the elements are duplicated and the array owns
    /// its storage. With `copy == false` the memory is aliased without
    /// ownership.
    ///
    /// # Safety
    ///
    /// `ptr` must point to `shape.size()` initialized elements; for
    /// `copy == false` they must additionally stay valid and unmoved for
    /// the lifetime of the array and every view derived from it.
    pub unsafe fn from_raw_parts(ptr: *mut T, shape: impl Into<Shape>, copy: bool) -> Self {
        let shape = shape.into();
        let buf = if copy {
            Buffer::from_slice(std::slice::from_raw_parts(ptr, shape.size()))
        } else {
            Buffer::borrowed(ptr, shape.size())
        };
        Array {
            buf,
            layout: Layout::row_major(shape),
            shape,
            is_view: false,
            is_scalar: false,
        }
    }

    /// All elements zero.
    pub fn zeros(shape: impl Into<Shape>) -> Self {
        let shape = shape.into();
        Array {
            buf: Buffer::filled(shape.size(), T::zero()),
            layout: Layout::row_major(shape),
            shape,
            is_view: false,
            is_scalar: false,
        }
    }

    /// All elements one.
    pub fn ones(shape: impl Into<Shape>) -> Self {
        Self::full(shape, T::one())
    }

    /// Freshly allocated storage for the given shape (zero-initialized;
    /// Rust has no uninitialized reads to hand out).
    pub fn empty(shape: impl Into<Shape>) -> Self {
        Self::zeros(shape)
    }

    /// All elements `value`.
    pub fn full(shape: impl Into<Shape>, value: T) -> Self {
        let shape = shape.into();
        Array {
            buf: Buffer::filled(shape.size(), value),
            layout: Layout::row_major(shape),
            shape,
            is_view: false,
            is_scalar: false,
        }
    }

    // === Introspection ===

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn rows(&self) -> usize {
        self.shape.rows
    }

    pub fn cols(&self) -> usize {
        self.shape.cols
    }

    pub fn size(&self) -> usize {
        self.shape.size()
    }

    /// 1 for vectors, 2 for matrices.
    pub fn ndim(&self) -> usize {
        if self.shape.is_matrix() {
            2
        } else {
            1
        }
    }

    pub fn is_matrix(&self) -> bool {
        self.shape.is_matrix()
    }

    pub fn is_vector(&self) -> bool {
        self.shape.is_vector()
    }

    /// Whether this array was derived from another (diagnostic only; the
    /// buffer's reference count carries the lifetime).
    pub fn is_view(&self) -> bool {
        self.is_view
    }

    /// Whether this is a 1×1 view produced by scalar indexing (or scalar
    /// construction), convertible to a bare element.
    pub fn is_scalar(&self) -> bool {
        self.is_scalar
    }

    pub fn is_contiguous(&self) -> bool {
        self.layout.is_contiguous(self.shape)
    }

    /// Whether two arrays share the same backing buffer.
    pub fn shares_buffer(&self, other: &Array<T>) -> bool {
        self.buf.ptr_eq(&other.buf)
    }

    /// Live handles to the backing buffer.
    pub fn buffer_refs(&self) -> usize {
        self.buf.ref_count()
    }

    // === Element access ===

    pub(crate) fn get_unchecked(&self, i: usize, j: usize) -> T {
        self.buf.get(self.layout.flat(i, j))
    }

    pub(crate) fn set_unchecked(&self, i: usize, j: usize, value: T) {
        self.buf.set(self.layout.flat(i, j), value)
    }

    /// Read element (i, j); negative indices count from the end.
    pub fn at(&self, i: i64, j: i64) -> Result<T> {
        let i = normalize(i, self.shape.rows, 0)?;
        let j = normalize(j, self.shape.cols, 1)?;
        Ok(self.get_unchecked(i, j))
    }

    /// Write element (i, j); negative indices count from the end.
    pub fn set(&mut self, i: i64, j: i64, value: T) -> Result<()> {
        let i = normalize(i, self.shape.rows, 0)?;
        let j = normalize(j, self.shape.cols, 1)?;
        self.set_unchecked(i, j, value);
        Ok(())
    }

    /// Elements in row-major logical order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        let (rows, cols) = (self.shape.rows, self.shape.cols);
        (0..rows).flat_map(move |i| (0..cols).map(move |j| self.get_unchecked(i, j)))
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// Convert a size-1 array to its element. Anything larger is a type
    /// error.
    pub fn item(&self) -> Result<T> {
        if self.size() != 1 {
            return Err(Error::ScalarConversion { size: self.size() });
        }
        Ok(self.get_unchecked(0, 0))
    }

    // === Views ===

    fn view(&self, shape: Shape, layout: Layout, is_scalar: bool) -> Array<T> {
        Array {
            buf: self.buf.clone(),
            shape,
            layout,
            is_view: true,
            is_scalar,
        }
    }

    fn view_offset(&self, i: i64, j: i64) -> usize {
        (self.layout.offset as isize
            + i as isize * self.layout.row_stride
            + j as isize * self.layout.col_stride)
            .max(0) as usize
    }

    fn element_view(&self, i: i64, j: i64) -> Result<Array<T>> {
        let i = normalize(i, self.shape.rows, 0)?;
        let j = normalize(j, self.shape.cols, 1)?;
        let layout = Layout {
            offset: self.layout.flat(i, j),
            row_stride: self.layout.row_stride,
            col_stride: self.layout.col_stride,
        };
        Ok(self.view(Shape::new(1, 1), layout, true))
    }

    /// Row `i` as a 1×cols view.
    pub fn row(&self, i: i64) -> Result<Array<T>> {
        let i = normalize(i, self.shape.rows, 0)?;
        let layout = Layout {
            offset: self.view_offset(i as i64, 0),
            row_stride: self.layout.row_stride,
            col_stride: self.layout.col_stride,
        };
        Ok(self.view(Shape::new(1, self.shape.cols), layout, false))
    }

    /// Column `j` as a rows×1 view.
    pub fn col(&self, j: i64) -> Result<Array<T>> {
        let j = normalize(j, self.shape.cols, 1)?;
        let layout = Layout {
            offset: self.view_offset(0, j as i64),
            row_stride: self.layout.row_stride,
            col_stride: self.layout.col_stride,
        };
        Ok(self.view(Shape::new(self.shape.rows, 1), layout, false))
    }

    /// Writable form of [`row`](Self::row).
    pub fn row_mut(&mut self, i: i64) -> Result<ViewMut<T>> {
        Ok(ViewMut { target: self.row(i)? })
    }

    /// Writable form of [`col`](Self::col).
    pub fn col_mut(&mut self, j: i64) -> Result<ViewMut<T>> {
        Ok(ViewMut { target: self.col(j)? })
    }

    // === Indexing ===

    /// Resolve an index expression into a view (scalar/slice parts only)
    /// or a materialized copy (any integer-array part).
    pub fn select(&self, idx: impl Into<Index2>) -> Result<Array<T>> {
        let Index2 { row, col } = idx.into();
        match (row, col) {
            (Ix::At(i), Ix::At(j)) => self.element_view(i, j),

            (Ix::At(i), Ix::Span(s)) => {
                // Vector rule: a bare integer on a vector selects the i-th
                // logical element, not a row.
                if s.is_full() && !self.shape.is_matrix() {
                    let (vi, vj) = if self.shape.rows == 1 { (0, i) } else { (i, 0) };
                    return self.element_view(vi, vj);
                }
                let i = normalize(i, self.shape.rows, 0)?;
                let rs = s.resolve(self.shape.cols);
                let layout = Layout {
                    offset: self.view_offset(i as i64, rs.start),
                    row_stride: self.layout.row_stride,
                    col_stride: self.layout.col_stride * rs.step as isize,
                };
                Ok(self.view(Shape::new(1, rs.len()), layout, false))
            }

            (Ix::Span(s), Ix::At(j)) => {
                let j = normalize(j, self.shape.cols, 1)?;
                let rs = s.resolve(self.shape.rows);
                let layout = Layout {
                    offset: self.view_offset(rs.start, j as i64),
                    row_stride: self.layout.row_stride * rs.step as isize,
                    col_stride: self.layout.col_stride,
                };
                Ok(self.view(Shape::new(rs.len(), 1), layout, false))
            }

            (Ix::Span(r), Ix::Span(c)) => {
                let rs = r.resolve(self.shape.rows);
                let cs = c.resolve(self.shape.cols);
                let layout = Layout {
                    offset: self.view_offset(rs.start, cs.start),
                    row_stride: self.layout.row_stride * rs.step as isize,
                    col_stride: self.layout.col_stride * cs.step as isize,
                };
                Ok(self.view(Shape::new(rs.len(), cs.len()), layout, false))
            }

            (Ix::At(i), Ix::Take(cols)) => {
                let mut data = Vec::with_capacity(cols.size());
                for j in cols.iter() {
                    data.push(self.at(i, j)?);
                }
                Self::from_shape_vec(cols.shape(), data)
            }

            (Ix::Take(rows), Ix::At(j)) => {
                let mut data = Vec::with_capacity(rows.size());
                for i in rows.iter() {
                    data.push(self.at(i, j)?);
                }
                Self::from_shape_vec(rows.shape(), data)
            }

            (Ix::Span(s), Ix::Take(cols)) => {
                if cols.shape().is_matrix() {
                    return Err(Error::IndexRank { shape: cols.shape() });
                }
                let rs = s.resolve(self.shape.rows);
                let mut data = Vec::with_capacity(rs.len() * cols.size());
                for i in rs.iter() {
                    for j in cols.iter() {
                        data.push(self.at(i as i64, j)?);
                    }
                }
                Self::from_shape_vec(Shape::new(rs.len(), cols.size()), data)
            }

            (Ix::Take(rows), Ix::Span(s)) => {
                if rows.shape().is_matrix() {
                    return Err(Error::IndexRank { shape: rows.shape() });
                }
                let cs = s.resolve(self.shape.cols);
                let mut data = Vec::with_capacity(rows.size() * cs.len());
                for i in rows.iter() {
                    for j in cs.iter() {
                        data.push(self.at(i, j as i64)?);
                    }
                }
                Self::from_shape_vec(Shape::new(rows.size(), cs.len()), data)
            }

            (Ix::Take(rows), Ix::Take(cols)) => {
                // The two index arrays broadcast against each other, so
                // outer-product selection works when shapes differ by a
                // size-1 axis.
                let rshape = broadcast_shape(rows.shape(), cols.shape())?;
                let mut data = Vec::with_capacity(rshape.size());
                for i in 0..rshape.rows {
                    for j in 0..rshape.cols {
                        let ri = rows.get_unchecked(
                            broadcast_index(i, rows.rows()),
                            broadcast_index(j, rows.cols()),
                        );
                        let ci = cols.get_unchecked(
                            broadcast_index(i, cols.rows()),
                            broadcast_index(j, cols.cols()),
                        );
                        data.push(self.at(ri, ci)?);
                    }
                }
                Self::from_shape_vec(rshape, data)
            }
        }
    }

    /// Writable form of [`select`](Self::select). Only view-producing
    /// expressions qualify; fancy-indexed results are copies, so asking to
    /// write through one is a type error.
    pub fn select_mut(&mut self, idx: impl Into<Index2>) -> Result<ViewMut<T>> {
        let idx = idx.into();
        if idx.has_take() {
            return Err(Error::NotAssignable);
        }
        Ok(ViewMut { target: self.select(idx)? })
    }

    // === View/copy operations ===

    /// Reinterpret a contiguous array under a new shape of the same size,
    /// without copying. Strided and transposed views must be `copy()`d
    /// first.
    pub fn reshape(&self, shape: impl Into<Shape>) -> Result<Array<T>> {
        let shape = shape.into();
        if shape.size() != self.size() {
            return Err(Error::ReshapeSize { from: self.shape, to: shape });
        }
        if !self.is_contiguous() {
            return Err(Error::NonContiguous);
        }
        let layout = Layout {
            offset: self.layout.offset,
            row_stride: shape.cols as isize,
            col_stride: 1,
        };
        Ok(self.view(shape, layout, false))
    }

    /// Deep copy into a private contiguous buffer with default flags.
    pub fn copy(&self) -> Array<T> {
        Array {
            buf: Buffer::from_vec(self.to_vec()),
            layout: Layout::row_major(self.shape),
            shape: self.shape,
            is_view: false,
            is_scalar: false,
        }
    }

    /// Transposed view: rows and columns (and their strides) swapped.
    pub fn transpose(&self) -> Array<T> {
        let shape = Shape::new(self.shape.cols, self.shape.rows);
        let layout = Layout {
            offset: self.layout.offset,
            row_stride: self.layout.col_stride,
            col_stride: self.layout.row_stride,
        };
        self.view(shape, layout, false)
    }

    /// Fresh array with each element mapped through `f`.
    pub(crate) fn map<U: Element>(&self, f: impl Fn(T) -> U) -> Array<U> {
        Array {
            buf: Buffer::from_vec(self.iter().map(f).collect()),
            layout: Layout::row_major(self.shape),
            shape: self.shape,
            is_view: false,
            is_scalar: false,
        }
    }

    // === Reductions ===

    fn lane_reduce(&self, init: Option<T>, f: &impl Fn(T, T) -> T, lane: impl Iterator<Item = T>) -> Option<T> {
        let mut acc = init;
        for v in lane {
            acc = Some(match acc {
                None => v,
                Some(a) => f(a, v),
            });
        }
        acc
    }

    fn reduce_with(
        &self,
        axis: Option<Axis>,
        keepdims: bool,
        init: Option<T>,
        f: impl Fn(T, T) -> T,
    ) -> Result<Array<T>> {
        let fail = || Error::SizeMismatch { len: 0, shape: self.shape };
        match axis {
            None => {
                let v = self.lane_reduce(init, &f, self.iter()).ok_or_else(fail)?;
                Ok(Array::full(Shape::new(1, 1), v))
            }
            Some(Axis::Rows) => {
                let mut data = Vec::with_capacity(self.cols());
                for j in 0..self.cols() {
                    let lane = (0..self.rows()).map(|i| self.get_unchecked(i, j));
                    data.push(self.lane_reduce(init, &f, lane).ok_or_else(fail)?);
                }
                Array::from_shape_vec(Shape::new(1, self.cols()), data)
            }
            Some(Axis::Cols) => {
                let mut data = Vec::with_capacity(self.rows());
                for i in 0..self.rows() {
                    let lane = (0..self.cols()).map(|j| self.get_unchecked(i, j));
                    data.push(self.lane_reduce(init, &f, lane).ok_or_else(fail)?);
                }
                let shape = if keepdims {
                    Shape::new(self.rows(), 1)
                } else {
                    Shape::new(1, self.rows())
                };
                Array::from_shape_vec(shape, data)
            }
        }
    }

    /// Sum over an axis (or everything). The result keeps the element type.
    pub fn sum(&self, axis: Option<Axis>, keepdims: bool) -> Array<T>
    where
        T: std::ops::Add<Output = T>,
    {
        self.reduce_with(axis, keepdims, Some(T::zero()), |a, b| a + b)
            .expect("sum reduction cannot fail with an init value")
    }

    /// Minimum over an axis. Empty lanes are an error.
    pub fn min(&self, axis: Option<Axis>, keepdims: bool) -> Result<Array<T>>
    where
        T: PartialOrd,
    {
        self.reduce_with(axis, keepdims, None, |a, b| if b < a { b } else { a })
    }

    /// Maximum over an axis. Empty lanes are an error.
    pub fn max(&self, axis: Option<Axis>, keepdims: bool) -> Result<Array<T>>
    where
        T: PartialOrd,
    {
        self.reduce_with(axis, keepdims, None, |a, b| if b > a { b } else { a })
    }
}

impl<T: Element> Array<T> {
    /// Evenly spaced values in `[start, stop)` with the given step.
    pub fn arange(start: T, stop: T, step: T) -> Result<Array<T>>
    where
        T: std::ops::Add<Output = T> + PartialOrd,
    {
        if step == T::zero() {
            return Err(Error::ZeroStep);
        }
        let ascending = step > T::zero();
        let mut data = Vec::new();
        let mut v = start;
        while (ascending && v < stop) || (!ascending && v > stop) {
            data.push(v);
            v = v + step;
        }
        Ok(Array::from_vec(data))
    }
}

impl Array<bool> {
    /// True iff every element is true (empty lanes are true).
    pub fn all(&self, axis: Option<Axis>, keepdims: bool) -> Array<bool> {
        self.reduce_with(axis, keepdims, Some(true), |a, b| a && b)
            .expect("all reduction cannot fail with an init value")
    }

    /// True iff any element is true (empty lanes are false).
    pub fn any(&self, axis: Option<Axis>, keepdims: bool) -> Array<bool> {
        self.reduce_with(axis, keepdims, Some(false), |a, b| a || b)
            .expect("any reduction cannot fail with an init value")
    }
}

impl<T: ComplexElement> Array<T> {
    /// Real parts, as a fresh array of the component type.
    pub fn real(&self) -> Array<T::Real> {
        self.map(|z| z.re())
    }

    /// Imaginary parts, as a fresh array of the component type.
    pub fn imag(&self) -> Array<T::Real> {
        self.map(|z| z.im())
    }

    /// Write-through access to the real components.
    pub fn real_mut(&mut self) -> ComponentViewMut<T> {
        ComponentViewMut { target: self.clone(), component: Component::Re }
    }

    /// Write-through access to the imaginary components.
    pub fn imag_mut(&mut self) -> ComponentViewMut<T> {
        ComponentViewMut { target: self.clone(), component: Component::Im }
    }
}

impl<T: Element> From<T> for Array<T> {
    /// A 1×1 scalar array.
    fn from(value: T) -> Self {
        let mut a = Array::full(Shape::new(1, 1), value);
        a.is_scalar = true;
        a
    }
}

/// A view armed for writing.
///
/// Produced by the `_mut` accessors for view-producing index expressions.
/// Both operations consume the view, so each armed view writes at most
/// once.
#[derive(Debug)]
pub struct ViewMut<T: Element> {
    target: Array<T>,
}

impl<T: Element> ViewMut<T> {
    pub fn shape(&self) -> Shape {
        self.target.shape()
    }

    /// Broadcast-write `src` into the viewed region. The broadcast result
    /// shape must equal the view's shape exactly.
    pub fn assign(self, src: &Array<T>) -> Result<()> {
        let result = broadcast_shape(self.target.shape(), src.shape())?;
        if result != self.target.shape() {
            return Err(Error::BroadcastTarget { result, target: self.target.shape() });
        }
        for i in 0..self.target.rows() {
            for j in 0..self.target.cols() {
                let v = src.get_unchecked(
                    broadcast_index(i, src.rows()),
                    broadcast_index(j, src.cols()),
                );
                self.target.set_unchecked(i, j, v);
            }
        }
        Ok(())
    }

    /// Write `value` into every element of the viewed region.
    pub fn fill(self, value: T) {
        for i in 0..self.target.rows() {
            for j in 0..self.target.cols() {
                self.target.set_unchecked(i, j, value);
            }
        }
    }
}

/// Which complex component a [`ComponentViewMut`] writes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Component {
    Re,
    Im,
}

/// Write-through access to one component of a complex array.
#[derive(Debug)]
pub struct ComponentViewMut<T: ComplexElement> {
    target: Array<T>,
    component: Component,
}

impl<T: ComplexElement> ComponentViewMut<T> {
    fn write(&self, i: usize, j: usize, v: T::Real) {
        let z = self.target.get_unchecked(i, j);
        let z = match self.component {
            Component::Re => T::from_parts(v, z.im()),
            Component::Im => T::from_parts(z.re(), v),
        };
        self.target.set_unchecked(i, j, z);
    }

    /// Broadcast-write real values into the component, leaving the other
    /// component untouched.
    pub fn assign(self, src: &Array<T::Real>) -> Result<()> {
        let result = broadcast_shape(self.target.shape(), src.shape())?;
        if result != self.target.shape() {
            return Err(Error::BroadcastTarget { result, target: self.target.shape() });
        }
        for i in 0..self.target.rows() {
            for j in 0..self.target.cols() {
                let v = src.get_unchecked(
                    broadcast_index(i, src.rows()),
                    broadcast_index(j, src.cols()),
                );
                self.write(i, j, v);
            }
        }
        Ok(())
    }

    /// Set the component to `value` everywhere.
    pub fn fill(self, value: T::Real) {
        for i in 0..self.target.rows() {
            for j in 0..self.target.cols() {
                self.write(i, j, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::C64;
    use crate::shape::Slice;
    use num_complex::Complex;

    fn sample() -> Array<i32> {
        Array::from_nested(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap()
    }

    #[test]
    fn test_constructors() {
        let a = sample();
        assert_eq!(a.shape(), Shape::new(2, 3));
        assert_eq!(a.ndim(), 2);
        assert!(!a.is_view());
        assert!(a.is_contiguous());

        let v = Array::from_vec(vec![1.0f64, 2.0, 3.0]);
        assert_eq!(v.shape(), Shape::new(1, 3));
        assert_eq!(v.ndim(), 1);

        assert!(Array::from_shape_vec((2, 2), vec![1, 2, 3]).is_err());
        assert!(Array::from_nested(vec![vec![1, 2], vec![3]]).is_err());
    }

    #[test]
    fn test_factories() {
        let z = Array::<f64>::zeros((2, 2));
        assert_eq!(z.to_vec(), vec![0.0; 4]);
        let o = Array::<i32>::ones((1, 3));
        assert_eq!(o.to_vec(), vec![1, 1, 1]);
        let f = Array::full((2, 1), 7u8);
        assert_eq!(f.to_vec(), vec![7, 7]);
    }

    #[test]
    fn test_arange() {
        let a = Array::arange(0i32, 5, 1).unwrap();
        assert_eq!(a.to_vec(), vec![0, 1, 2, 3, 4]);
        let b = Array::arange(0.0f64, 1.0, 0.25).unwrap();
        assert_eq!(b.size(), 4);
        let c = Array::arange(5i32, 0, -2).unwrap();
        assert_eq!(c.to_vec(), vec![5, 3, 1]);
        assert!(Array::arange(0i32, 5, 0).is_err());
    }

    #[test]
    fn test_at_and_negative_indices() {
        let a = sample();
        assert_eq!(a.at(0, 0).unwrap(), 1);
        assert_eq!(a.at(1, 2).unwrap(), 6);
        assert_eq!(a.at(-1, -1).unwrap(), 6);
        assert_eq!(a.at(-2, -3).unwrap(), 1);
        assert!(matches!(
            a.at(2, 0),
            Err(Error::IndexOutOfBounds { index: 2, axis: 0, size: 2 })
        ));
        assert!(a.at(0, -4).is_err());
    }

    #[test]
    fn test_slice_views_alias() {
        let mut a = sample();
        let v = a.select((0, ..)).unwrap();
        assert_eq!(v.shape(), Shape::new(1, 3));
        assert!(v.is_view());
        assert!(v.shares_buffer(&a));

        a.set(0, 1, 99).unwrap();
        assert_eq!(v.at(0, 1).unwrap(), 99);
    }

    #[test]
    fn test_select_scalar_scalar() {
        let a = sample();
        let s = a.select((1, 2)).unwrap();
        assert!(s.is_scalar());
        assert_eq!(s.item().unwrap(), 6);
        assert!(s.shares_buffer(&a));
    }

    #[test]
    fn test_select_slices() {
        let a = sample();
        // A[:, 1:] -> [[2, 3], [5, 6]]
        let v = a.select((.., 1..)).unwrap();
        assert_eq!(v.shape(), Shape::new(2, 2));
        assert_eq!(v.to_vec(), vec![2, 3, 5, 6]);

        // Column 0 as 2x1.
        let c = a.select((.., 0)).unwrap();
        assert_eq!(c.shape(), Shape::new(2, 1));
        assert_eq!(c.to_vec(), vec![1, 4]);

        // Stepped and reversed slices.
        let b = Array::from_vec(vec![0, 1, 2, 3, 4, 5]);
        let e = b.select((0, Slice::new(None, None, 2).unwrap())).unwrap();
        assert_eq!(e.to_vec(), vec![0, 2, 4]);
        let r = b.select((0, Slice::new(None, None, -1).unwrap())).unwrap();
        assert_eq!(r.to_vec(), vec![5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_vector_rule() {
        let v = Array::from_vec(vec![10, 20, 30]);
        let e = v.select(1).unwrap();
        assert!(e.is_scalar());
        assert_eq!(e.item().unwrap(), 20);
        let e = v.select(-1).unwrap();
        assert_eq!(e.item().unwrap(), 30);

        // Column vectors index the same way.
        let c = Array::from_shape_vec((3, 1), vec![10, 20, 30]).unwrap();
        assert_eq!(c.select(2).unwrap().item().unwrap(), 30);

        // Matrices are unaffected: a bare integer selects a row view.
        let a = sample();
        let r = a.select(1).unwrap();
        assert_eq!(r.shape(), Shape::new(1, 3));
        assert_eq!(r.to_vec(), vec![4, 5, 6]);
    }

    #[test]
    fn test_fancy_indexing_copies() {
        let mut a = sample();
        let g = a.select((0, vec![0i64, 2])).unwrap();
        assert_eq!(g.to_vec(), vec![1, 3]);
        assert!(!g.shares_buffer(&a));

        // Mutating the source does not affect the gathered copy.
        a.set(0, 0, 50).unwrap();
        assert_eq!(g.to_vec(), vec![1, 3]);
    }

    #[test]
    fn test_fancy_row_and_slice_combinations() {
        let a = Array::from_nested(vec![
            vec![1, 2, 3],
            vec![4, 5, 6],
            vec![7, 8, 9],
        ])
        .unwrap();

        let g = a.select((vec![2i64, 0], 1)).unwrap();
        assert_eq!(g.to_vec(), vec![8, 2]);

        let g = a.select((vec![0i64, 2], 1..)).unwrap();
        assert_eq!(g.shape(), Shape::new(2, 2));
        assert_eq!(g.to_vec(), vec![2, 3, 8, 9]);

        let g = a.select((0..2, vec![2i64, 0])).unwrap();
        assert_eq!(g.shape(), Shape::new(2, 2));
        assert_eq!(g.to_vec(), vec![3, 1, 6, 4]);

        // Rank-2 index arrays are rejected when paired with a slice.
        let m = Array::from_nested(vec![vec![0i64, 1], vec![1, 0]]).unwrap();
        assert!(matches!(
            a.select((m, 1..)),
            Err(Error::IndexRank { .. })
        ));
    }

    #[test]
    fn test_fancy_array_array_broadcast() {
        let a = Array::from_nested(vec![
            vec![1, 2, 3],
            vec![4, 5, 6],
            vec![7, 8, 9],
        ])
        .unwrap();

        // Paired selection.
        let g = a
            .select((vec![0i64, 1, 2], vec![0i64, 1, 2]))
            .unwrap();
        assert_eq!(g.to_vec(), vec![1, 5, 9]);

        // Outer-product selection: column of rows against a row of cols.
        let rows = Array::from_shape_vec((2, 1), vec![0i64, 2]).unwrap();
        let cols = Array::from_vec(vec![0i64, 2]);
        let g = a.select((rows, cols)).unwrap();
        assert_eq!(g.shape(), Shape::new(2, 2));
        assert_eq!(g.to_vec(), vec![1, 3, 7, 9]);

        // Negative positions gather from the end.
        let g = a.select((vec![-1i64], vec![-1i64])).unwrap();
        assert_eq!(g.to_vec(), vec![9]);
    }

    #[test]
    fn test_select_mut_assign_broadcasts() {
        let mut a = sample();
        a.select_mut(0).unwrap().assign(&Array::from(99)).unwrap();
        assert_eq!(a.to_vec(), vec![99, 99, 99, 4, 5, 6]);

        a.row_mut(1).unwrap().fill(0);
        assert_eq!(a.to_vec(), vec![99, 99, 99, 0, 0, 0]);

        // Assigning a row into a column view must fail: (2,1) vs (1,3)
        // broadcasts to (2,3) != (2,1).
        let mut b = sample();
        let src = Array::from_vec(vec![1, 2, 3]);
        assert!(matches!(
            b.col_mut(0).unwrap().assign(&src),
            Err(Error::BroadcastTarget { .. })
        ));
    }

    #[test]
    fn test_select_mut_rejects_fancy() {
        let mut a = sample();
        assert!(matches!(
            a.select_mut((0, vec![0i64, 1])),
            Err(Error::NotAssignable)
        ));
    }

    #[test]
    fn test_reshape_roundtrip() {
        let a = sample();
        let r = a.reshape((3, 2)).unwrap();
        assert_eq!(r.shape(), Shape::new(3, 2));
        assert_eq!(r.to_vec(), a.to_vec());
        assert!(r.shares_buffer(&a));

        let back = r.reshape((2, 3)).unwrap();
        assert_eq!(back.to_vec(), a.to_vec());
        assert_eq!(back.shape(), a.shape());

        assert!(matches!(
            a.reshape((4, 2)),
            Err(Error::ReshapeSize { .. })
        ));
    }

    #[test]
    fn test_reshape_noncontiguous_fails() {
        let a = sample();
        let v = a.select((.., 1..)).unwrap();
        assert!(!v.is_contiguous());
        assert!(matches!(v.reshape((1, 4)), Err(Error::NonContiguous)));

        let t = a.transpose();
        assert!(matches!(t.reshape((2, 3)), Err(Error::NonContiguous)));
        // Copying first makes the data contiguous again.
        assert!(t.copy().reshape((2, 3)).is_ok());
    }

    #[test]
    fn test_transpose() {
        let a = sample();
        let t = a.transpose();
        assert_eq!(t.shape(), Shape::new(3, 2));
        assert_eq!(t.to_vec(), vec![1, 4, 2, 5, 3, 6]);
        assert!(t.shares_buffer(&a));
    }

    #[test]
    fn test_copy_is_private() {
        let a = sample();
        let mut c = a.copy();
        assert!(!c.shares_buffer(&a));
        c.set(0, 0, 42).unwrap();
        assert_eq!(a.at(0, 0).unwrap(), 1);
    }

    #[test]
    fn test_item() {
        let s = Array::from(5i64);
        assert!(s.is_scalar());
        assert_eq!(s.item().unwrap(), 5);
        assert!(matches!(
            sample().item(),
            Err(Error::ScalarConversion { size: 6 })
        ));
    }

    #[test]
    fn test_buffer_refs() {
        let a = sample();
        assert_eq!(a.buffer_refs(), 1);
        let v = a.select((0, ..)).unwrap();
        assert_eq!(a.buffer_refs(), 2);
        drop(v);
        assert_eq!(a.buffer_refs(), 1);
    }

    #[test]
    fn test_reductions() {
        let a = sample();
        assert_eq!(a.sum(None, false).item().unwrap(), 21);

        let s0 = a.sum(Some(Axis::Rows), false);
        assert_eq!(s0.shape(), Shape::new(1, 3));
        assert_eq!(s0.to_vec(), vec![5, 7, 9]);

        let s1 = a.sum(Some(Axis::Cols), false);
        assert_eq!(s1.shape(), Shape::new(1, 2));
        assert_eq!(s1.to_vec(), vec![6, 15]);

        let s1k = a.sum(Some(Axis::Cols), true);
        assert_eq!(s1k.shape(), Shape::new(2, 1));
        assert_eq!(s1k.to_vec(), vec![6, 15]);

        assert_eq!(a.min(None, false).unwrap().item().unwrap(), 1);
        assert_eq!(a.max(Some(Axis::Rows), false).unwrap().to_vec(), vec![4, 5, 6]);
    }

    #[test]
    fn test_bool_reductions() {
        let a = Array::from_nested(vec![vec![true, false], vec![true, true]]).unwrap();
        assert!(!a.all(None, false).item().unwrap());
        assert!(a.any(None, false).item().unwrap());
        assert_eq!(a.all(Some(Axis::Rows), false).to_vec(), vec![true, false]);
        assert_eq!(a.any(Some(Axis::Cols), false).to_vec(), vec![true, true]);
    }

    #[test]
    fn test_real_imag() {
        let mut z = Array::from_vec(vec![
            Complex::new(1.0f32, -1.0),
            Complex::new(2.0, 3.0),
        ]);
        assert_eq!(z.real().to_vec(), vec![1.0, 2.0]);
        assert_eq!(z.imag().to_vec(), vec![-1.0, 3.0]);

        // Writing the real component leaves the imaginary parts untouched.
        z.real_mut().fill(0.0);
        assert_eq!(
            z.to_vec(),
            vec![Complex::new(0.0, -1.0), Complex::new(0.0, 3.0)]
        );

        let src = Array::from_vec(vec![5.0f32, 6.0]);
        z.imag_mut().assign(&src).unwrap();
        assert_eq!(
            z.to_vec(),
            vec![Complex::new(0.0, 5.0), Complex::new(0.0, 6.0)]
        );
        let _: Array<C64> = z;
    }

    #[test]
    fn test_from_raw_parts() {
        let mut data = vec![1.0f64, 2.0, 3.0, 4.0];
        let a = unsafe { Array::from_raw_parts(data.as_mut_ptr(), (2, 2), false) };
        data[3] = 9.0;
        assert_eq!(a.at(1, 1).unwrap(), 9.0);

        let b = unsafe { Array::from_raw_parts(data.as_mut_ptr(), (2, 2), true) };
        data[0] = 7.0;
        assert_eq!(b.at(0, 0).unwrap(), 1.0);
    }
}
