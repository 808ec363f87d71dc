//! Textual rendering for arrays.
//!
//! A deliberately small consumer of the core contract: vectors print on a
//! single line, matrices one row per line. [`PrintOptions`] carries the
//! rendering knobs; the `Display` impls honor any precision given in the
//! format string (`{:.3}`).

use std::fmt;

use crate::array::Array;
use crate::bits::BitArray;
use crate::element::Element;

/// Rendering options for [`format_element`].
#[derive(Clone, Debug)]
pub struct PrintOptions {
    /// Digits after the decimal point, when set.
    pub precision: Option<usize>,
    /// Separator between elements of a row.
    pub separator: String,
    /// Replacement text for NaN elements.
    pub nan_str: String,
    /// Replacement text for infinite elements (sign-prefixed).
    pub inf_str: String,
}

impl Default for PrintOptions {
    fn default() -> Self {
        PrintOptions {
            precision: None,
            separator: " ".to_string(),
            nan_str: "nan".to_string(),
            inf_str: "inf".to_string(),
        }
    }
}

/// Format one element under the given options.
pub fn format_element<T: fmt::Display>(value: &T, opts: &PrintOptions) -> String {
    let raw = match opts.precision {
        Some(p) => format!("{:.*}", p, value),
        None => format!("{}", value),
    };
    // Float Display spells these "NaN" / "inf" / "-inf".
    match raw.as_str() {
        "NaN" => opts.nan_str.clone(),
        "inf" => opts.inf_str.clone(),
        "-inf" => format!("-{}", opts.inf_str),
        _ => raw,
    }
}

fn write_row<T: Element + fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    arr: &Array<T>,
    i: usize,
    opts: &PrintOptions,
) -> fmt::Result {
    write!(f, "[")?;
    for j in 0..arr.cols() {
        if j > 0 {
            write!(f, "{}", opts.separator)?;
        }
        let v = arr.at(i as i64, j as i64).expect("row index in range");
        write!(f, "{}", format_element(&v, opts))?;
    }
    write!(f, "]")
}

impl<T: Element + fmt::Display> fmt::Display for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opts = PrintOptions { precision: f.precision(), ..PrintOptions::default() };
        if self.rows() == 1 {
            return write_row(f, self, 0, &opts);
        }
        write!(f, "[")?;
        for i in 0..self.rows() {
            if i > 0 {
                write!(f, "\n ")?;
            }
            write_row(f, self, i, &opts)?;
        }
        write!(f, "]")
    }
}

impl fmt::Display for BitArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_array(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_display() {
        let a = Array::from_vec(vec![1, 2, 3]);
        assert_eq!(a.to_string(), "[1 2 3]");
    }

    #[test]
    fn test_matrix_display() {
        let a = Array::from_nested(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(a.to_string(), "[[1 2]\n [3 4]]");
    }

    #[test]
    fn test_precision() {
        let a = Array::from_vec(vec![1.0f64, 2.5]);
        assert_eq!(format!("{:.2}", a), "[1.00 2.50]");
        assert_eq!(
            format_element(&1.23456, &PrintOptions { precision: Some(3), ..Default::default() }),
            "1.235"
        );
    }

    #[test]
    fn test_non_finite_strings() {
        let opts = PrintOptions::default();
        assert_eq!(format_element(&f64::NAN, &opts), "nan");
        assert_eq!(format_element(&f64::INFINITY, &opts), "inf");
        assert_eq!(format_element(&f64::NEG_INFINITY, &opts), "-inf");

        let a = Array::from_vec(vec![1.0f64, f64::INFINITY]);
        assert_eq!(a.to_string(), "[1 inf]");
    }

    #[test]
    fn test_bit_array_display() {
        let m = BitArray::from_bools(&[true, false]);
        assert_eq!(m.to_string(), "[true false]");
    }
}
