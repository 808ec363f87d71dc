//! CLI demo for the na_core array engine.
//!
//! Walks the public API: construction, views and slicing, broadcasting
//! arithmetic, type promotion, division policies, and packed boolean
//! masks. Run with `RUST_LOG=warn` to see the permissive division
//! diagnostics.

use na_core::prelude::*;

fn main() {
    env_logger::init();

    println!("=== na_core Array Engine Demo ===\n");

    // Construction and introspection.
    let a = Array::from_nested(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])
        .expect("rectangular input");
    println!("A ({} / ndim {}):\n{}\n", a.shape(), a.ndim(), a);

    // Slice views share the buffer with the source.
    let tail = a.select((.., 1..)).expect("in-range slice");
    println!("A[:, 1:] (view, shares buffer: {}):\n{}\n", tail.shares_buffer(&a), tail);

    // Broadcasting arithmetic.
    let row = Array::from_vec(vec![10.0, 20.0, 30.0]);
    let sum = &a + &row;
    println!("A + [10 20 30]:\n{}\n", sum);

    // Type promotion: i32 + u32 -> i64.
    let i = Array::from_vec(vec![1i32, 2, 3]);
    let u = Array::from_vec(vec![10u32, 20, 30]);
    let promoted = &i + &u;
    println!(
        "int32 + uint32 -> {} : {}",
        promote(DType::Int32, DType::UInt32),
        promoted
    );

    // Broadcast assignment through a writable view.
    let mut b = a.copy();
    b.select_mut(0)
        .expect("row 0 is a view")
        .assign(&Array::from(99.0))
        .expect("scalar broadcasts into a row");
    println!("\nB after B[0] = 99:\n{}\n", b);

    // Division policies.
    let num = Array::from_vec(vec![1.0, -1.0, 0.0]);
    let den = Array::from_vec(vec![0.0, 0.0, 0.0]);
    println!("permissive 1/0, -1/0, 0/0: {}", &num / &den);
    match num.div_checked(&den, DivPolicy::Strict) {
        Err(e) => println!("strict policy: {}", e),
        Ok(_) => unreachable!("strict division by zero must fail"),
    }

    // Packed boolean masks.
    let mask = BitArray::from_bools(&[true, false, true, false, true, false, true, false, true, false]);
    println!("\nmask ({} logical bits in {} bytes): {}", mask.size(), mask.bytes().len(), mask);
    mask.bit(0, 3).expect("in range").set(true);
    println!("after setting bit 3:  {}", mask);
    println!("negated:              {}", mask.not());

    // Fancy indexing copies.
    let gathered = a
        .select((vec![1i64, 0], vec![0i64, 2]))
        .expect("index arrays in range");
    println!("\nA[[1,0], [0,2]] (copy): {}", gathered);
}
