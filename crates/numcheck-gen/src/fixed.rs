//! Corpora and strategies for fixed-width words.

use crate::int::arb_int_in;
use num_bigint::BigInt;
use num_traits::{One, Signed};
use numcheck_model::{rc_bound, FixedWidth};
use proptest::prelude::*;

/// Boundary values for `width`: small numbers, values around the width in
/// bits, the extremes, and the midpoints `SHIFT / 2` and `2^(W / 2)`.
///
/// Only values inside the word's range are kept; duplicates are removed.
pub fn some_num(width: &FixedWidth) -> Vec<BigInt> {
    let w = BigInt::from(width.bits());
    let half_shift: BigInt = width.shift() / 2;
    let sqrt_word = BigInt::one() << (width.bits() / 2);
    let mut candidates: Vec<BigInt> = (-3..=3).map(BigInt::from).collect();
    candidates.extend([&w - 2, &w - 1, w.clone(), &w + 1]);
    candidates.extend([width.max() - 2, width.max() - 1, width.max().clone()]);
    candidates.extend([width.min().clone(), width.min() + 1, width.min() + 2]);
    candidates.extend([&half_shift - 1, half_shift.clone(), &half_shift + 1]);
    candidates.extend([-&half_shift - 1, -&half_shift, -&half_shift + 1]);
    candidates.extend([&sqrt_word - 1, sqrt_word]);

    let mut out: Vec<BigInt> = Vec::new();
    for n in candidates {
        if width.num_check(&n) && !out.contains(&n) {
            out.push(n);
        }
    }
    out
}

/// [`some_num`] plus the two values just outside the range.
pub fn some_num_out_of_bounds(width: &FixedWidth) -> Vec<BigInt> {
    let mut out = some_num(width);
    out.push(width.max() + 1);
    out.push(width.min() - 1);
    out
}

/// Shift amounts around the effective width, plus invalid ones.
pub fn some_shift(width: &FixedWidth) -> Vec<BigInt> {
    let eff = BigInt::from(width.effective_bits());
    let mut out: Vec<BigInt> = (0..=3).map(BigInt::from).collect();
    out.extend([&eff - 1, eff.clone(), &eff + 1, &eff * 2]);
    out.extend([BigInt::from(-1), rc_bound_int() - 1, rc_bound_int()]);
    out.dedup();
    out
}

fn rc_bound_int() -> BigInt {
    BigInt::from(rc_bound().clone())
}

/// In-range values, a quarter of them drawn from [`some_num`].
pub fn arb_num(width: &FixedWidth) -> BoxedStrategy<BigInt> {
    let corpus = some_num(width);
    prop_oneof![
        1 => prop::sample::select(corpus),
        3 => arb_int_in(width.min().clone(), width.max().clone()),
    ]
    .boxed()
}

/// Possibly out-of-range values: `(-RC_BOUND, RC_BOUND)` for signed words,
/// `(-2^70, 2^70)` for unsigned ones.
pub fn arb_num_out_of_bounds(width: &FixedWidth) -> BoxedStrategy<BigInt> {
    let bound = if width.is_signed() {
        rc_bound_int()
    } else {
        BigInt::one() << 70u32
    };
    let bound = if bound.abs() < width.word_size() * 2 {
        width.word_size() * 2
    } else {
        bound
    };
    prop_oneof![
        1 => prop::sample::select(some_num_out_of_bounds(width)),
        1 => arb_num(width),
        2 => arb_int_in(-&bound + 1, bound - 1),
    ]
    .boxed()
}

/// A pair of in-range values.
pub fn arb_num_pair(width: &FixedWidth) -> BoxedStrategy<(BigInt, BigInt)> {
    (arb_num(width), arb_num(width)).boxed()
}

/// Shift amounts, mostly valid, with negatives and huge values mixed in.
pub fn arb_shift(width: &FixedWidth) -> BoxedStrategy<BigInt> {
    let eff = i64::from(width.effective_bits());
    let rc = rc_bound_int();
    prop_oneof![
        2 => prop::sample::select(some_shift(width)),
        4 => (0..=eff + 2).prop_map(BigInt::from),
        1 => (-eff..0).prop_map(BigInt::from),
        1 => arb_int_in(BigInt::from(eff), rc * 2),
    ]
    .boxed()
}

/// Condition flags: mostly 0 or 1, sometimes invalid.
pub fn arb_cond() -> BoxedStrategy<BigInt> {
    prop_oneof![
        4 => (0i64..=1).prop_map(BigInt::from),
        1 => (-4i64..8).prop_map(BigInt::from),
    ]
    .boxed()
}
