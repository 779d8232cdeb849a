//! Unbounded-integer and felt strategies.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use numcheck_model::{prime, Felt};
use proptest::prelude::*;

/// Uniform-ish integers in `[lo, hi]`.
///
/// Draws enough random 32-bit limbs to cover the span and reduces modulo the
/// span, so the bias is at most one part in 2^32. An empty range yields `lo`.
pub fn arb_int_in(lo: BigInt, hi: BigInt) -> BoxedStrategy<BigInt> {
    if hi <= lo {
        return Just(lo).boxed();
    }
    let span: BigUint = (&hi - &lo + 1u32).magnitude().clone();
    let limbs = (span.bits() as usize).div_ceil(32) + 1;
    prop::collection::vec(any::<u32>(), limbs)
        .prop_map(move |raw| &lo + BigInt::from(BigUint::new(raw).mod_floor(&span)))
        .boxed()
}

/// Any field element, with the small and near-`P` ends over-represented.
pub fn arb_felt() -> BoxedStrategy<Felt> {
    let p = BigInt::from(prime().clone());
    prop_oneof![
        1 => (-16i64..16).prop_map(Felt::from),
        1 => (any::<i64>()).prop_map(Felt::from),
        2 => arb_int_in(BigInt::from(0), p - 1u32).prop_map(|n| Felt::from_int(&n)),
    ]
    .boxed()
}

/// Encode every integer as a felt.
pub fn to_felts<'a, I>(values: I) -> Vec<Felt>
where
    I: IntoIterator<Item = &'a BigInt>,
{
    values.into_iter().map(Felt::from_int).collect()
}
