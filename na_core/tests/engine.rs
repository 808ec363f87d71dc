//! End-to-end tests for the view/indexing/broadcasting/promotion engine.

use na_core::prelude::*;
use na_core::{broadcast_shape, promote_for, OpKind};

#[test]
fn test_slice_view_and_broadcast_arithmetic() {
    // A = [[1,2,3],[4,5,6]]
    let a = Array::from_nested(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();

    // A[:, 1:] has shape (2,2) and equals [[2,3],[5,6]].
    let tail = a.select((.., 1..)).unwrap();
    assert_eq!(tail.shape(), Shape::new(2, 2));
    assert_eq!(tail.to_vec(), vec![2.0, 3.0, 5.0, 6.0]);

    // A + [10,20,30] broadcasts the 1x3 row over both rows.
    let row = Array::from_vec(vec![10.0, 20.0, 30.0]);
    let sum = &a + &row;
    assert_eq!(sum.to_vec(), vec![11.0, 22.0, 33.0, 14.0, 25.0, 36.0]);

    // A[0] = 99 broadcast-writes the whole first row in place.
    let mut a = a;
    a.select_mut(0).unwrap().assign(&Array::from(99.0)).unwrap();
    assert_eq!(a.to_vec(), vec![99.0, 99.0, 99.0, 4.0, 5.0, 6.0]);
}

#[test]
fn test_view_aliasing_invariant() {
    // Mutating an element through a view mutates the same element read
    // through the original array.
    let a = Array::from_nested(vec![vec![1, 2], vec![3, 4]]).unwrap();
    let mut v = a.select(0).unwrap();
    v.set(0, 0, 9).unwrap();
    assert_eq!(a.at(0, 0).unwrap(), 9);

    // The same holds through nested views.
    let inner = v.select((0, 1..)).unwrap();
    let mut inner = inner;
    inner.set(0, 0, 7).unwrap();
    assert_eq!(a.at(0, 1).unwrap(), 7);
    assert!(inner.shares_buffer(&a));
}

#[test]
fn test_fancy_indexing_shares_no_storage() {
    let mut a = Array::from_nested(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
    let g = a.select((vec![1i64, 0], vec![2i64, 0])).unwrap();
    assert_eq!(g.to_vec(), vec![6, 1]);
    assert!(!g.shares_buffer(&a));

    let mut g = g;
    g.set(0, 0, 0).unwrap();
    assert_eq!(a.at(1, 2).unwrap(), 6);
    a.set(0, 0, 100).unwrap();
    assert_eq!(g.at(0, 1).unwrap(), 1);
}

#[test]
fn test_outer_product_fancy_selection() {
    let a = Array::from_nested(vec![
        vec![0, 1, 2, 3],
        vec![10, 11, 12, 13],
        vec![20, 21, 22, 23],
    ])
    .unwrap();
    let rows = Array::from_shape_vec((3, 1), vec![0i64, 1, 2]).unwrap();
    let cols = Array::from_vec(vec![0i64, 3]);
    let g = a.select((rows, cols)).unwrap();
    assert_eq!(g.shape(), Shape::new(3, 2));
    assert_eq!(g.to_vec(), vec![0, 3, 10, 13, 20, 23]);
}

#[test]
fn test_reshape_round_trip_and_strided_failure() {
    let x = Array::from_nested(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
    let r = x.reshape((3, 2)).unwrap().reshape((2, 3)).unwrap();
    assert_eq!(r.shape(), x.shape());
    assert_eq!(r.to_vec(), x.to_vec());

    // Any strided or transposed view refuses to reshape.
    let strided = x.select((.., 1..)).unwrap();
    assert!(strided.reshape((2, 2)).is_err());
    assert!(x.transpose().reshape((2, 3)).is_err());
}

#[test]
fn test_slice_resolution_properties() {
    assert_eq!(Slice::full().resolve(5).len(), 5);

    let s = Slice::new(Some(-2), None, 1).unwrap().resolve(5);
    assert_eq!((s.start, s.stop, s.step), (3, 5, 1));

    let s = Slice::new(Some(5), Some(0), -1).unwrap().resolve(5);
    assert_eq!(s.len(), 4);
    assert_eq!(s.iter().collect::<Vec<_>>(), vec![4, 3, 2, 1]);
}

#[test]
fn test_promotion_properties() {
    assert_eq!(promote(DType::Int32, DType::UInt32), DType::Int64);
    assert_eq!(promote(DType::Bool, DType::Float32), DType::Float32);
    assert_eq!(promote(DType::Int16, DType::Complex64), DType::Complex128);

    // Comparison mode is boolean regardless of operand types.
    for &l in &DType::ALL {
        for &r in &DType::ALL {
            assert_eq!(promote_for(l, r, OpKind::Comparison), DType::Bool);
        }
    }

    // And the typed operators agree with the runtime table.
    let i = Array::from_vec(vec![1i32]);
    let u = Array::from_vec(vec![1u32]);
    let out = &i + &u;
    assert_eq!(out.to_vec(), vec![2i64]);
}

#[test]
fn test_division_by_zero_permissive() {
    let one = Array::from_vec(vec![1.0f64]);
    let neg = Array::from_vec(vec![-1.0f64]);
    let zero = Array::from_vec(vec![0.0f64]);

    assert_eq!((&one / &zero).item().unwrap(), f64::INFINITY);
    assert_eq!((&neg / &zero).item().unwrap(), f64::NEG_INFINITY);
    assert!((&zero / &zero).item().unwrap().is_nan());

    // The strict policy raises instead.
    assert!(one.div_checked(&zero, DivPolicy::Strict).is_err());
}

#[test]
fn test_bit_packed_layout_and_flip() {
    let bits: Vec<bool> = (0..10).map(|i| i % 3 == 0).collect();
    let m = BitArray::from_bools(&bits);
    assert_eq!(m.bytes().len(), 2);

    m.bit(0, 3).unwrap().set(true);
    for i in 0..10 {
        let expected = i == 3 || bits[i as usize];
        assert_eq!(m.get(0, i).unwrap(), expected, "bit {}", i);
    }
}

#[test]
fn test_in_place_broadcast() {
    let mut a = Array::from_nested(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    a += &Array::from_vec(vec![10.0, 20.0]);
    assert_eq!(a.to_vec(), vec![11.0, 22.0, 13.0, 24.0]);

    // The reverse orientation cannot fit the result in the left operand.
    let mut row = Array::from_vec(vec![1.0, 2.0]);
    let m = Array::from_nested(vec![vec![1.0, 1.0], vec![2.0, 2.0]]).unwrap();
    let r = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        row += &m;
    }));
    assert!(r.is_err());
}

#[test]
fn test_scalar_conversion() {
    let s = Array::from_nested(vec![vec![1, 2], vec![3, 4]]).unwrap();
    let one = s.select((1, 1)).unwrap();
    assert!(one.is_scalar());
    assert_eq!(one.item().unwrap(), 4);
    assert!(s.item().is_err());
}

#[test]
fn test_masked_comparison_pipeline() {
    // Comparisons yield boolean arrays that gate elementwise application.
    let a = Array::from_vec(vec![1.0f64, -2.0, 3.0, -4.0]);
    let positive = a.gt(&Array::from(0.0)).unwrap();
    assert_eq!(positive.to_vec(), vec![true, false, true, false]);

    let doubled = a.apply_where(&positive, |v| v * 2.0).unwrap();
    assert_eq!(doubled.to_vec(), vec![2.0, 0.0, 6.0, 0.0]);

    // Boolean arrays pack losslessly.
    let packed = BitArray::from_array(&positive);
    assert_eq!(packed.to_array().to_vec(), positive.to_vec());
}

#[test]
fn test_foreign_memory_view() {
    let mut data = vec![1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
    let a = unsafe { Array::from_raw_parts(data.as_mut_ptr(), (2, 3), false) };

    // External mutation is observed through the no-copy array.
    data[4] = 50.0;
    assert_eq!(a.at(1, 1).unwrap(), 50.0);

    // Writes through a derived view land in the foreign allocation.
    let mut col = a.select((.., 2)).unwrap();
    col.set(0, 0, -3.0).unwrap();
    assert_eq!(data[2], -3.0);
}

#[test]
fn test_broadcast_shape_contract() {
    let ok = broadcast_shape(Shape::new(2, 1), Shape::new(1, 5)).unwrap();
    assert_eq!(ok, Shape::new(2, 5));
    assert!(broadcast_shape(Shape::new(2, 3), Shape::new(4, 3)).is_err());
}
