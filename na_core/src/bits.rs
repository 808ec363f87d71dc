//! Bit-packed boolean arrays.
//!
//! A [`BitArray`] stores 8 logical booleans per byte: logical element `i`
//! (row-major order) lives in byte `i / 8` at bit `i % 8`. Element access
//! goes through a [`BitRef`] proxy that reads and writes a single bit
//! without disturbing its siblings. Whole-array AND/OR/XOR/NOT run
//! byte-wise when the shapes match exactly; mismatched shapes fall back to
//! per-bit broadcast evaluation through the generic elementwise engine.
//!
//! Invariant: bits past the logical size of the final byte are always
//! zero, so byte-wise operations stay equivalent to bit-wise ones.

use crate::array::Array;
use crate::buffer::Buffer;
use crate::error::{Error, Result};
use crate::shape::Shape;
use crate::ufunc;

fn byte_len(bits: usize) -> usize {
    (bits + 7) / 8
}

/// A 2-D boolean array packing 8 elements per storage byte.
#[derive(Clone, Debug)]
pub struct BitArray {
    buf: Buffer<u8>,
    shape: Shape,
}

impl BitArray {
    /// Pack a flat list of booleans into a 1×n bit array.
    pub fn from_bools(bits: &[bool]) -> Self {
        Self::from_shape_bools(Shape::vector(bits.len()), bits)
            .expect("vector shape always matches its data")
    }

    /// Pack row-major booleans under an explicit shape.
    pub fn from_shape_bools(shape: impl Into<Shape>, bits: &[bool]) -> Result<Self> {
        let shape = shape.into();
        if bits.len() != shape.size() {
            return Err(Error::SizeMismatch { len: bits.len(), shape });
        }
        let mut bytes = vec![0u8; byte_len(bits.len())];
        for (i, &b) in bits.iter().enumerate() {
            if b {
                bytes[i / 8] |= 1 << (i % 8);
            }
        }
        Ok(BitArray { buf: Buffer::from_vec(bytes), shape })
    }

    /// Pack nested rows. Ragged input is a shape error.
    pub fn from_nested(rows: Vec<Vec<bool>>) -> Result<Self> {
        let r = rows.len();
        let c = rows.first().map_or(0, |row| row.len());
        for (i, row) in rows.iter().enumerate() {
            if row.len() != c {
                return Err(Error::Ragged { row: i, len: row.len(), expected: c });
            }
        }
        let flat: Vec<bool> = rows.into_iter().flatten().collect();
        Self::from_shape_bools(Shape::new(r, c), &flat)
    }

    /// All-false bit array.
    pub fn zeros(shape: impl Into<Shape>) -> Self {
        let shape = shape.into();
        BitArray {
            buf: Buffer::filled(byte_len(shape.size()), 0),
            shape,
        }
    }

    /// Pack an unpacked boolean array.
    pub fn from_array(a: &Array<bool>) -> Self {
        let flat: Vec<bool> = a.iter().collect();
        Self::from_shape_bools(a.shape(), &flat)
            .expect("array shape always matches its element count")
    }

    /// Unpack into a plain boolean array (the promotion-lattice form).
    pub fn to_array(&self) -> Array<bool> {
        let data: Vec<bool> = (0..self.size()).map(|i| self.get_flat(i)).collect();
        Array::from_shape_vec(self.shape, data)
            .expect("bit array shape always matches its element count")
    }

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

    /// The packed bytes, in order.
    pub fn bytes(&self) -> Vec<u8> {
        (0..self.buf.len()).map(|k| self.buf.get(k)).collect()
    }

    fn get_flat(&self, i: usize) -> bool {
        (self.buf.get(i / 8) >> (i % 8)) & 1 == 1
    }

    fn flat_index(&self, i: i64, j: i64) -> Result<usize> {
        let norm = |v: i64, size: usize, axis: usize| -> Result<usize> {
            let n = if v < 0 { v + size as i64 } else { v };
            if n < 0 || n >= size as i64 {
                return Err(Error::IndexOutOfBounds { index: v, axis, size });
            }
            Ok(n as usize)
        };
        let i = norm(i, self.shape.rows, 0)?;
        let j = norm(j, self.shape.cols, 1)?;
        Ok(i * self.shape.cols + j)
    }

    /// Read element (i, j); negative indices count from the end.
    pub fn get(&self, i: i64, j: i64) -> Result<bool> {
        Ok(self.get_flat(self.flat_index(i, j)?))
    }

    /// A read-write proxy for the single bit at (i, j).
    pub fn bit(&self, i: i64, j: i64) -> Result<BitRef> {
        let flat = self.flat_index(i, j)?;
        Ok(BitRef {
            buf: self.buf.clone(),
            byte: flat / 8,
            bit: (flat % 8) as u8,
        })
    }

    /// Zero any bits past the logical size in the final byte.
    fn mask_tail(bytes: &mut [u8], size: usize) {
        let tail = size % 8;
        if tail != 0 {
            if let Some(last) = bytes.last_mut() {
                *last &= (1u8 << tail) - 1;
            }
        }
    }

    fn byte_wise(&self, other: &BitArray, f: impl Fn(u8, u8) -> u8) -> BitArray {
        debug_assert_eq!(self.shape, other.shape);
        let bytes: Vec<u8> = (0..self.buf.len())
            .map(|k| f(self.buf.get(k), other.buf.get(k)))
            .collect();
        BitArray { buf: Buffer::from_vec(bytes), shape: self.shape }
    }

    /// Per-bit broadcast fallback through the generic engine.
    fn bit_wise(&self, other: &BitArray, f: impl Fn(bool, bool) -> bool) -> Result<BitArray> {
        let res = ufunc::binary(&self.to_array(), &other.to_array(), None, None, |l, r| {
            Ok(f(l, r))
        })?;
        Ok(Self::from_array(&res))
    }

    /// Elementwise AND, byte-wise when shapes match.
    pub fn and(&self, other: &BitArray) -> Result<BitArray> {
        if self.shape == other.shape {
            Ok(self.byte_wise(other, |a, b| a & b))
        } else {
            self.bit_wise(other, |a, b| a & b)
        }
    }

    /// Elementwise OR, byte-wise when shapes match.
    pub fn or(&self, other: &BitArray) -> Result<BitArray> {
        if self.shape == other.shape {
            Ok(self.byte_wise(other, |a, b| a | b))
        } else {
            self.bit_wise(other, |a, b| a | b)
        }
    }

    /// Elementwise XOR, byte-wise when shapes match.
    pub fn xor(&self, other: &BitArray) -> Result<BitArray> {
        if self.shape == other.shape {
            Ok(self.byte_wise(other, |a, b| a ^ b))
        } else {
            self.bit_wise(other, |a, b| a ^ b)
        }
    }

    /// Elementwise NOT (byte-wise, with the tail re-zeroed).
    pub fn not(&self) -> BitArray {
        let mut bytes: Vec<u8> = (0..self.buf.len()).map(|k| !self.buf.get(k)).collect();
        Self::mask_tail(&mut bytes, self.size());
        BitArray { buf: Buffer::from_vec(bytes), shape: self.shape }
    }
}

/// A value standing in for one bit of a packed boolean byte.
///
/// Reading evaluates `(byte >> bit) & 1`; writing sets or clears exactly
/// that bit via OR / AND-NOT, leaving sibling bits untouched. The proxy
/// holds a handle to the shared byte buffer, so writes are visible through
/// the originating array.
#[derive(Clone, Debug)]
pub struct BitRef {
    buf: Buffer<u8>,
    byte: usize,
    bit: u8,
}

impl BitRef {
    pub fn get(&self) -> bool {
        (self.buf.get(self.byte) >> self.bit) & 1 == 1
    }

    pub fn set(&self, value: bool) {
        let b = self.buf.get(self.byte);
        let b = if value {
            b | (1 << self.bit)
        } else {
            b & !(1 << self.bit)
        };
        self.buf.set(self.byte, b);
    }
}
