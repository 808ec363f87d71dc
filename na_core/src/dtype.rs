//! Element type descriptors and the runtime promotion table.
//!
//! Every element type belongs to exactly one [`Category`]; [`promote`]
//! decides the result type of a binary operation between two element types
//! so that no operand loses range or precision silently. The rules live in
//! explicit match tables keyed on (category, width) pairs; the compile-time
//! [`Promote`](crate::element::Promote) trait mirrors this table exactly and
//! the element tests enumerate every pair to keep the two in sync.

use std::fmt;

/// Type category, in precedence order (lowest first).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Category {
    Boolean,
    SignedInt,
    UnsignedInt,
    Floating,
    Complex,
}

/// Runtime descriptor of a supported element type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum DType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Complex64,
    Complex128,
}

impl DType {
    pub const ALL: [DType; 13] = [
        DType::Bool,
        DType::Int8,
        DType::Int16,
        DType::Int32,
        DType::Int64,
        DType::UInt8,
        DType::UInt16,
        DType::UInt32,
        DType::UInt64,
        DType::Float32,
        DType::Float64,
        DType::Complex64,
        DType::Complex128,
    ];

    pub fn category(self) -> Category {
        match self {
            DType::Bool => Category::Boolean,
            DType::Int8 | DType::Int16 | DType::Int32 | DType::Int64 => Category::SignedInt,
            DType::UInt8 | DType::UInt16 | DType::UInt32 | DType::UInt64 => Category::UnsignedInt,
            DType::Float32 | DType::Float64 => Category::Floating,
            DType::Complex64 | DType::Complex128 => Category::Complex,
        }
    }

    /// Storage width in bits.
    pub fn bits(self) -> u32 {
        match self {
            DType::Bool | DType::Int8 | DType::UInt8 => 8,
            DType::Int16 | DType::UInt16 => 16,
            DType::Int32 | DType::UInt32 | DType::Float32 => 32,
            DType::Int64 | DType::UInt64 | DType::Float64 | DType::Complex64 => 64,
            DType::Complex128 => 128,
        }
    }

    /// Narrowest signed integer of at least `bits`, or `None` past 64.
    fn signed_with_bits(bits: u32) -> Option<DType> {
        match bits {
            0..=8 => Some(DType::Int8),
            9..=16 => Some(DType::Int16),
            17..=32 => Some(DType::Int32),
            33..=64 => Some(DType::Int64),
            _ => None,
        }
    }

    /// Narrowest float of at least `bits` (saturates at f64).
    fn float_with_bits(bits: u32) -> DType {
        if bits <= 32 {
            DType::Float32
        } else {
            DType::Float64
        }
    }

    /// Complex type with the given component width (saturates at f64).
    fn complex_with_component(bits: u32) -> DType {
        if bits <= 32 {
            DType::Complex64
        } else {
            DType::Complex128
        }
    }

    /// Component width of a complex type.
    fn component_bits(self) -> u32 {
        debug_assert_eq!(self.category(), Category::Complex);
        self.bits() / 2
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::Bool => "bool",
            DType::Int8 => "int8",
            DType::Int16 => "int16",
            DType::Int32 => "int32",
            DType::Int64 => "int64",
            DType::UInt8 => "uint8",
            DType::UInt16 => "uint16",
            DType::UInt32 => "uint32",
            DType::UInt64 => "uint64",
            DType::Float32 => "float32",
            DType::Float64 => "float64",
            DType::Complex64 => "complex64",
            DType::Complex128 => "complex128",
        };
        write!(f, "{}", name)
    }
}

/// Result type of a binary operation between elements of types `l` and `r`.
///
/// Rules, applied in priority order:
/// 1. both boolean → bool;
/// 2. same category → the wider of the two widths;
/// 3. one boolean → the other type;
/// 4. signed + unsigned → a signed integer wide enough for both ranges
///    (doubling the width when equal); past 64 bits the result is f64;
/// 5. integer + floating → float of width `max(int_bits, 2*float_bits)`;
/// 6. integer/floating + complex → complex with a component wide enough for
///    the real operand (rule 5 against the component for integers).
pub fn promote(l: DType, r: DType) -> DType {
    use Category::*;

    let (cl, cr) = (l.category(), r.category());
    if cl == cr {
        return if l.bits() >= r.bits() { l } else { r };
    }
    if cl == Boolean {
        return r;
    }
    if cr == Boolean {
        return l;
    }
    match (cl, cr) {
        (SignedInt, UnsignedInt) => signed_unsigned(l.bits(), r.bits()),
        (UnsignedInt, SignedInt) => signed_unsigned(r.bits(), l.bits()),
        (SignedInt | UnsignedInt, Floating) => int_floating(l.bits(), r.bits()),
        (Floating, SignedInt | UnsignedInt) => int_floating(r.bits(), l.bits()),
        (SignedInt | UnsignedInt, Complex) => int_complex(l.bits(), r.component_bits()),
        (Complex, SignedInt | UnsignedInt) => int_complex(r.bits(), l.component_bits()),
        (Floating, Complex) => floating_complex(l.bits(), r.component_bits()),
        (Complex, Floating) => floating_complex(r.bits(), l.component_bits()),
        _ => unreachable!("boolean cases handled above"),
    }
}

fn signed_unsigned(signed_bits: u32, unsigned_bits: u32) -> DType {
    if signed_bits > unsigned_bits {
        // The signed type already covers the unsigned range.
        DType::signed_with_bits(signed_bits).unwrap()
    } else {
        // No 128-bit integers in the supported universe: overflowing pairs
        // resolve to f64.
        DType::signed_with_bits(unsigned_bits * 2).unwrap_or(DType::Float64)
    }
}

fn int_floating(int_bits: u32, float_bits: u32) -> DType {
    DType::float_with_bits(int_bits.max(2 * float_bits))
}

fn int_complex(int_bits: u32, component_bits: u32) -> DType {
    DType::complex_with_component(int_bits.max(2 * component_bits))
}

fn floating_complex(float_bits: u32, component_bits: u32) -> DType {
    DType::complex_with_component(float_bits.max(component_bits))
}

/// Operation modifiers layered on top of the promotion lattice.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OpKind {
    /// Ordinary arithmetic: result type from [`promote`].
    Standard,
    /// Comparison: result type is always boolean.
    Comparison,
    /// In-place: result type equals the left operand's type, narrowing on
    /// write.
    InPlace,
}

/// [`promote`] with an operation modifier applied.
pub fn promote_for(l: DType, r: DType, kind: OpKind) -> DType {
    match kind {
        OpKind::Standard => promote(l, r),
        OpKind::Comparison => DType::Bool,
        OpKind::InPlace => l,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promote_same_category() {
        assert_eq!(promote(DType::Bool, DType::Bool), DType::Bool);
        assert_eq!(promote(DType::Int16, DType::Int64), DType::Int64);
        assert_eq!(promote(DType::UInt8, DType::UInt32), DType::UInt32);
        assert_eq!(promote(DType::Float32, DType::Float64), DType::Float64);
        assert_eq!(promote(DType::Complex64, DType::Complex128), DType::Complex128);
    }

    #[test]
    fn test_promote_boolean_yields_other() {
        assert_eq!(promote(DType::Bool, DType::Float32), DType::Float32);
        assert_eq!(promote(DType::UInt16, DType::Bool), DType::UInt16);
        assert_eq!(promote(DType::Bool, DType::Complex64), DType::Complex64);
    }

    #[test]
    fn test_promote_signed_unsigned() {
        assert_eq!(promote(DType::Int32, DType::UInt32), DType::Int64);
        assert_eq!(promote(DType::UInt8, DType::Int16), DType::Int16);
        assert_eq!(promote(DType::Int8, DType::UInt32), DType::Int64);
        // Nothing holds both i64 and u64: falls out of the integer lattice.
        assert_eq!(promote(DType::Int64, DType::UInt64), DType::Float64);
    }

    #[test]
    fn test_promote_int_float() {
        assert_eq!(promote(DType::Int32, DType::Float32), DType::Float64);
        assert_eq!(promote(DType::Int8, DType::Float64), DType::Float64);
        assert_eq!(promote(DType::UInt64, DType::Float32), DType::Float64);
    }

    #[test]
    fn test_promote_complex() {
        assert_eq!(promote(DType::Int16, DType::Complex64), DType::Complex128);
        assert_eq!(promote(DType::Float32, DType::Complex64), DType::Complex64);
        assert_eq!(promote(DType::Float64, DType::Complex64), DType::Complex128);
        assert_eq!(promote(DType::Complex128, DType::Float32), DType::Complex128);
    }

    #[test]
    fn test_promote_commutative_and_idempotent() {
        for &l in &DType::ALL {
            assert_eq!(promote(l, l), l, "promote({}, {})", l, l);
            for &r in &DType::ALL {
                assert_eq!(promote(l, r), promote(r, l), "promote({}, {})", l, r);
            }
        }
    }

    #[test]
    fn test_promote_never_narrows() {
        // The result must be at least as wide as each real operand's own
        // category representation requires.
        for &l in &DType::ALL {
            for &r in &DType::ALL {
                let out = promote(l, r);
                assert!(
                    out.category() >= l.category().min(r.category()),
                    "promote({}, {}) = {}",
                    l,
                    r,
                    out
                );
            }
        }
    }

    #[test]
    fn test_operation_modifiers() {
        assert_eq!(
            promote_for(DType::Float64, DType::Int32, OpKind::Comparison),
            DType::Bool
        );
        assert_eq!(
            promote_for(DType::Int16, DType::Float64, OpKind::InPlace),
            DType::Int16
        );
        assert_eq!(
            promote_for(DType::Int32, DType::UInt32, OpKind::Standard),
            DType::Int64
        );
    }
}
