//! Corpora and strategies for multi-limb magnitudes and signed bignums.

use num_bigint::BigInt;
use numcheck_model::{BigNum, Radix, Sign, SignedNum};
use proptest::prelude::*;

/// Digit lists covering carries, borrows and the half-radix split.
pub fn some_digits(radix: Radix) -> Vec<Vec<u128>> {
    let top = radix.max_digit();
    let half = radix.base() / 2;
    vec![
        vec![],
        vec![1],
        vec![2],
        vec![3],
        vec![u128::from(radix.bits())],
        vec![top],
        vec![half],
        vec![half - 1],
        vec![half + 1],
        vec![0, 1],
        vec![1, 1],
        vec![top, top],
        vec![top, 0, 1],
        vec![top, 1, 1],
    ]
}

/// [`some_digits`] as canonical magnitudes.
pub fn some_num(radix: Radix) -> Vec<BigNum> {
    some_digits(radix)
        .into_iter()
        .map(BigNum::from_digits_unchecked)
        .collect()
}

/// Every corpus magnitude with both signs, including `(-1, [])`.
pub fn some_signed(radix: Radix) -> Vec<SignedNum> {
    some_num(radix)
        .into_iter()
        .flat_map(|n| {
            [
                SignedNum::new(Sign::Pos, n.clone()),
                SignedNum::new(Sign::Neg, n),
            ]
        })
        .collect()
}

/// A digit, biased toward 0, 1, `R / 2` and `R - 1`.
fn arb_digit(radix: Radix) -> BoxedStrategy<u128> {
    let top = radix.max_digit();
    prop_oneof![
        1 => Just(0u128),
        1 => Just(1u128),
        1 => Just(radix.base() / 2),
        2 => Just(top),
        5 => 0..=top,
    ]
    .boxed()
}

fn trim(mut digits: Vec<u128>) -> BigNum {
    while digits.last() == Some(&0) {
        digits.pop();
    }
    BigNum::from_digits_unchecked(digits)
}

/// Canonical magnitudes with at most `max_len` digits.
pub fn arb_num_of_len_at_most(radix: Radix, max_len: usize) -> BoxedStrategy<BigNum> {
    prop::collection::vec(arb_digit(radix), 0..=max_len)
        .prop_map(trim)
        .boxed()
}

/// Canonical magnitudes: corpus values or up to six random digits.
pub fn arb_num(radix: Radix) -> BoxedStrategy<BigNum> {
    prop_oneof![
        1 => prop::sample::select(some_num(radix)),
        3 => arb_num_of_len_at_most(radix, 6),
    ]
    .boxed()
}

/// Pairs drawn from `strategy`, equal to each other a third of the time.
pub fn arb_pair<T>(strategy: BoxedStrategy<T>) -> BoxedStrategy<(T, T)>
where
    T: Clone + std::fmt::Debug + 'static,
{
    prop_oneof![
        1 => strategy.clone().prop_map(|a| (a.clone(), a)),
        2 => (strategy.clone(), strategy),
    ]
    .boxed()
}

pub fn arb_num_pair(radix: Radix) -> BoxedStrategy<(BigNum, BigNum)> {
    arb_pair(arb_num(radix))
}

/// Pairs of magnitudes of at most `max_len` digits, for quadratic operations.
pub fn arb_num_pair_of_len_at_most(radix: Radix, max_len: usize) -> BoxedStrategy<(BigNum, BigNum)> {
    arb_pair(arb_num_of_len_at_most(radix, max_len))
}

/// Digit sequences that need not be canonical: digits up to `2R` and a
/// possibly zero top digit.
pub fn arb_raw_num(radix: Radix) -> BoxedStrategy<BigNum> {
    let limit = radix.base() * 2;
    prop_oneof![
        3 => arb_num(radix),
        1 => prop::collection::vec(0..=limit, 0..=4).prop_map(BigNum::from_digits_unchecked),
        1 => arb_num_of_len_at_most(radix, 3).prop_map(|n| {
            let mut digits = n.digits().to_vec();
            digits.push(0);
            BigNum::from_digits_unchecked(digits)
        }),
    ]
    .boxed()
}

fn arb_sign() -> impl Strategy<Value = Sign> {
    prop_oneof![Just(Sign::Pos), Just(Sign::Neg)]
}

pub fn arb_signed_of_len_at_most(radix: Radix, max_len: usize) -> BoxedStrategy<SignedNum> {
    (arb_sign(), arb_num_of_len_at_most(radix, max_len))
        .prop_map(|(sign, n)| SignedNum::new(sign, n))
        .boxed()
}

pub fn arb_signed(radix: Radix) -> BoxedStrategy<SignedNum> {
    prop_oneof![
        1 => prop::sample::select(some_signed(radix)),
        3 => arb_signed_of_len_at_most(radix, 6),
    ]
    .boxed()
}

pub fn arb_signed_pair(radix: Radix) -> BoxedStrategy<(SignedNum, SignedNum)> {
    arb_pair(arb_signed(radix))
}

pub fn arb_signed_pair_of_len_at_most(
    radix: Radix,
    max_len: usize,
) -> BoxedStrategy<(SignedNum, SignedNum)> {
    arb_pair(arb_signed_of_len_at_most(radix, max_len))
}

/// A boundary sign value in `-2..=2` paired with a possibly malformed
/// magnitude.
pub fn arb_raw_signed(radix: Radix) -> BoxedStrategy<(BigInt, BigNum)> {
    ((-2i64..=2).prop_map(BigInt::from), arb_raw_num(radix)).boxed()
}
