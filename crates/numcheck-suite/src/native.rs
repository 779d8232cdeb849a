//! Fixed-width operations on native Rust integers.
//!
//! Each [`Word`] implementation leans on the primitive's own wrapping and
//! overflowing arithmetic; the only width-specific code is the widening used
//! for the high limb of a product. [`Int6`] has no primitive, so it stores an
//! `i8` and sign-extends from bit 5 after every operation.

use num_bigint::{BigInt, BigUint};
use numcheck_harness::{Call, Capability, RuntimeFailure, Target};
use numcheck_model::{prime, rc_bound, Felt};
use std::fmt;
use std::marker::PhantomData;
use tracing::debug;

/// A machine word the native target can compute with.
pub trait Word: Copy + Eq + Ord + fmt::Debug {
    const BITS: u32;
    const SIGNED: bool;
    /// Name used as the function prefix, e.g. `Int16`.
    const NAME: &'static str;

    fn zero() -> Self;
    fn one() -> Self;
    fn from_int(n: &BigInt) -> Option<Self>;
    fn to_int(self) -> BigInt;
    fn is_negative(self) -> bool;

    /// Wrapped sum with the signed overflow flag or the unsigned carry.
    fn add_flag(self, rhs: Self) -> (Self, i8);
    /// Wrapped difference with the signed overflow flag or the unsigned borrow.
    fn sub_flag(self, rhs: Self) -> (Self, i8);
    /// Low and high limbs of the full product.
    fn mul_wide(self, rhs: Self) -> (Self, Self);
    /// Truncating division; `rhs` must be non-zero.
    fn div_rem(self, rhs: Self) -> (Self, Self);
    /// `n` is below the effective width.
    fn shl(self, n: u32) -> Self;
    fn shr(self, n: u32) -> Self;
    fn and(self, rhs: Self) -> Self;
    fn or(self, rhs: Self) -> Self;
    fn xor(self, rhs: Self) -> Self;
    fn not(self) -> Self;
    fn neg(self) -> Self;
    fn abs(self) -> BigInt;

    fn effective_bits() -> u32 {
        if Self::SIGNED {
            Self::BITS - 1
        } else {
            Self::BITS
        }
    }
}

macro_rules! signed_flag {
    ($overflowed:expr, $positive_rhs:expr) => {
        match ($overflowed, $positive_rhs) {
            (false, _) => 0,
            (true, true) => 1,
            (true, false) => -1,
        }
    };
}

macro_rules! impl_signed_word {
    ($t:ty, $wide:ty, $name:literal) => {
        impl Word for $t {
            const BITS: u32 = <$t>::BITS;
            const SIGNED: bool = true;
            const NAME: &'static str = $name;

            fn zero() -> Self {
                0
            }
            fn one() -> Self {
                1
            }
            fn from_int(n: &BigInt) -> Option<Self> {
                <$t>::try_from(n).ok()
            }
            fn to_int(self) -> BigInt {
                BigInt::from(self)
            }
            fn is_negative(self) -> bool {
                self < 0
            }
            fn add_flag(self, rhs: Self) -> (Self, i8) {
                let (value, overflowed) = self.overflowing_add(rhs);
                (value, signed_flag!(overflowed, rhs > 0))
            }
            fn sub_flag(self, rhs: Self) -> (Self, i8) {
                let (value, overflowed) = self.overflowing_sub(rhs);
                (value, signed_flag!(overflowed, rhs < 0))
            }
            fn mul_wide(self, rhs: Self) -> (Self, Self) {
                let product = <$wide>::from(self) * <$wide>::from(rhs);
                let low = product as $t;
                let high = ((product - <$wide>::from(low)) >> <$t>::BITS) as $t;
                (low, high)
            }
            fn div_rem(self, rhs: Self) -> (Self, Self) {
                (self.wrapping_div(rhs), self.wrapping_rem(rhs))
            }
            fn shl(self, n: u32) -> Self {
                self.wrapping_shl(n)
            }
            fn shr(self, n: u32) -> Self {
                self >> n
            }
            fn and(self, rhs: Self) -> Self {
                self & rhs
            }
            fn or(self, rhs: Self) -> Self {
                self | rhs
            }
            fn xor(self, rhs: Self) -> Self {
                self ^ rhs
            }
            fn not(self) -> Self {
                !self
            }
            fn neg(self) -> Self {
                self.wrapping_neg()
            }
            fn abs(self) -> BigInt {
                BigInt::from(self.unsigned_abs())
            }
        }
    };
}

macro_rules! impl_unsigned_word {
    ($t:ty, $wide:ty, $name:literal) => {
        impl Word for $t {
            const BITS: u32 = <$t>::BITS;
            const SIGNED: bool = false;
            const NAME: &'static str = $name;

            fn zero() -> Self {
                0
            }
            fn one() -> Self {
                1
            }
            fn from_int(n: &BigInt) -> Option<Self> {
                <$t>::try_from(n).ok()
            }
            fn to_int(self) -> BigInt {
                BigInt::from(self)
            }
            fn is_negative(self) -> bool {
                false
            }
            fn add_flag(self, rhs: Self) -> (Self, i8) {
                let (value, carry) = self.overflowing_add(rhs);
                (value, i8::from(carry))
            }
            fn sub_flag(self, rhs: Self) -> (Self, i8) {
                let (value, borrow) = self.overflowing_sub(rhs);
                (value, i8::from(borrow))
            }
            fn mul_wide(self, rhs: Self) -> (Self, Self) {
                let product = <$wide>::from(self) * <$wide>::from(rhs);
                (product as $t, (product >> <$t>::BITS) as $t)
            }
            fn div_rem(self, rhs: Self) -> (Self, Self) {
                (self / rhs, self % rhs)
            }
            fn shl(self, n: u32) -> Self {
                self.wrapping_shl(n)
            }
            fn shr(self, n: u32) -> Self {
                self >> n
            }
            fn and(self, rhs: Self) -> Self {
                self & rhs
            }
            fn or(self, rhs: Self) -> Self {
                self | rhs
            }
            fn xor(self, rhs: Self) -> Self {
                self ^ rhs
            }
            fn not(self) -> Self {
                !self
            }
            fn neg(self) -> Self {
                self.wrapping_neg()
            }
            fn abs(self) -> BigInt {
                BigInt::from(self)
            }
        }
    };
}

impl_signed_word!(i16, i32, "Int16");
impl_signed_word!(i64, i128, "Int64");
impl_unsigned_word!(u32, u64, "Uint32");
impl_unsigned_word!(u64, u128, "Uint64");

/// A six-bit signed word in `[-32, 31]`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Int6(i8);

impl Int6 {
    pub const MIN: Int6 = Int6(-32);
    pub const MAX: Int6 = Int6(31);

    /// Keep the low six bits of `x` and sign-extend bit 5.
    fn wrap(x: i32) -> Self {
        Int6(((x << 26) >> 26) as i8)
    }

    fn wide(self) -> i32 {
        i32::from(self.0)
    }
}

impl fmt::Debug for Int6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Int6({})", self.0)
    }
}

impl Word for Int6 {
    const BITS: u32 = 6;
    const SIGNED: bool = true;
    const NAME: &'static str = "Int6";

    fn zero() -> Self {
        Int6(0)
    }
    fn one() -> Self {
        Int6(1)
    }
    fn from_int(n: &BigInt) -> Option<Self> {
        let x = i8::try_from(n).ok()?;
        (Self::MIN.0..=Self::MAX.0).contains(&x).then_some(Int6(x))
    }
    fn to_int(self) -> BigInt {
        BigInt::from(self.0)
    }
    fn is_negative(self) -> bool {
        self.0 < 0
    }
    fn add_flag(self, rhs: Self) -> (Self, i8) {
        let value = Self::wrap(self.wide() + rhs.wide());
        let overflowed = value.wide() != self.wide() + rhs.wide();
        (value, signed_flag!(overflowed, rhs.0 > 0))
    }
    fn sub_flag(self, rhs: Self) -> (Self, i8) {
        let value = Self::wrap(self.wide() - rhs.wide());
        let overflowed = value.wide() != self.wide() - rhs.wide();
        (value, signed_flag!(overflowed, rhs.0 < 0))
    }
    fn mul_wide(self, rhs: Self) -> (Self, Self) {
        let product = self.wide() * rhs.wide();
        let low = Self::wrap(product);
        (low, Self::wrap((product - low.wide()) >> 6))
    }
    fn div_rem(self, rhs: Self) -> (Self, Self) {
        (
            Self::wrap(self.wide() / rhs.wide()),
            Self::wrap(self.wide() % rhs.wide()),
        )
    }
    fn shl(self, n: u32) -> Self {
        Self::wrap(self.wide() << n)
    }
    fn shr(self, n: u32) -> Self {
        Int6(self.0 >> n)
    }
    fn and(self, rhs: Self) -> Self {
        Int6(self.0 & rhs.0)
    }
    fn or(self, rhs: Self) -> Self {
        Int6(self.0 | rhs.0)
    }
    fn xor(self, rhs: Self) -> Self {
        Int6(self.0 ^ rhs.0)
    }
    fn not(self) -> Self {
        Int6(!self.0)
    }
    fn neg(self) -> Self {
        Self::wrap(-self.wide())
    }
    fn abs(self) -> BigInt {
        BigInt::from(self.0.unsigned_abs())
    }
}

/// Runs `<Word::NAME>.<op>` functions on native words.
///
/// Every argument is range-checked on the way in, so an out-of-range
/// argument fails the call, as does a shift amount outside `[0, 2^128)` or a
/// condition flag outside `{0, 1}`. Unprefixed names are the felt-level
/// helpers `bitwise_and`, `bitwise_xor` and `is_le`.
pub struct NativeTarget<W> {
    calls: usize,
    _word: PhantomData<W>,
}

impl<W: Word> Default for NativeTarget<W> {
    fn default() -> Self {
        Self {
            calls: 0,
            _word: PhantomData,
        }
    }
}

impl<W: Word> NativeTarget<W> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of invocations so far.
    pub fn calls(&self) -> usize {
        self.calls
    }

    fn word(call: &Call<'_, Felt>, slot: &str) -> Result<W, RuntimeFailure> {
        let felt = call
            .arg(slot)
            .ok_or_else(|| RuntimeFailure::new(format!("missing argument {slot}")))?;
        let n = felt.to_range_checked();
        W::from_int(&n).ok_or_else(|| {
            RuntimeFailure::new(format!("{slot} = {n} is out of range for {}", W::NAME))
        })
    }

    /// `None` when the shift reaches the effective width.
    fn amount(call: &Call<'_, Felt>, slot: &str) -> Result<Option<u32>, RuntimeFailure> {
        let felt = call
            .arg(slot)
            .ok_or_else(|| RuntimeFailure::new(format!("missing argument {slot}")))?;
        let n = felt.to_range_checked();
        if n < BigInt::from(0) {
            return Err(RuntimeFailure::new(format!(
                "shift amount {slot} is outside [0, 2^128)"
            )));
        }
        Ok(u32::try_from(&n).ok().filter(|&k| k < W::effective_bits()))
    }

    fn flag(call: &Call<'_, Felt>, slot: &str) -> Result<bool, RuntimeFailure> {
        call.arg(slot)
            .and_then(Felt::as_bool)
            .ok_or_else(|| RuntimeFailure::new(format!("{slot} is not a boolean")))
    }

    fn dispatch(&self, op: &str, call: &Call<'_, Felt>) -> Result<Vec<Felt>, RuntimeFailure> {
        let felt = |w: W| Felt::from_int(&w.to_int());
        let int = |n: i8| Felt::from(i64::from(n));
        let bit = |w: W, rhs: W, f: fn(W, W) -> W| -> Result<Vec<Felt>, RuntimeFailure> {
            if !call.has_capability(&Capability::Bitwise) {
                return Err(RuntimeFailure::new("bitwise capability not granted"));
            }
            Ok(vec![felt(f(w, rhs))])
        };
        let results = match op {
            "add" | "sub" => {
                let (a, b) = (Self::word(call, "a")?, Self::word(call, "b")?);
                let (value, flag) = if op == "add" {
                    a.add_flag(b)
                } else {
                    a.sub_flag(b)
                };
                vec![felt(value), int(flag)]
            }
            "mul" => {
                let (low, high) = Self::word(call, "a")?.mul_wide(Self::word(call, "b")?);
                vec![felt(low), felt(high)]
            }
            "div_rem" => {
                let (a, b) = (Self::word(call, "a")?, Self::word(call, "b")?);
                if a == W::zero() || b == W::zero() {
                    vec![Felt::zero(), Felt::zero()]
                } else {
                    let (q, r) = a.div_rem(b);
                    vec![felt(q), felt(r)]
                }
            }
            "shl" => {
                let a = Self::word(call, "a")?;
                match Self::amount(call, "b")? {
                    Some(n) => vec![felt(a.shl(n))],
                    None => vec![Felt::zero()],
                }
            }
            "shr" => {
                let a = Self::word(call, "a")?;
                match Self::amount(call, "b")? {
                    Some(n) => vec![felt(a.shr(n))],
                    None if a.is_negative() => vec![Felt::minus_one()],
                    None => vec![Felt::zero()],
                }
            }
            "and" => bit(Self::word(call, "a")?, Self::word(call, "b")?, W::and)?,
            "or" => bit(Self::word(call, "a")?, Self::word(call, "b")?, W::or)?,
            "xor" => bit(Self::word(call, "a")?, Self::word(call, "b")?, W::xor)?,
            "not" => vec![felt(Self::word(call, "a")?.not())],
            "neg" => vec![felt(Self::word(call, "a")?.neg())],
            "cond_neg" => {
                let a = Self::word(call, "a")?;
                if Self::flag(call, "b")? {
                    vec![felt(a.neg())]
                } else {
                    vec![felt(a)]
                }
            }
            "eq" | "lt" | "le" => {
                let (a, b) = (Self::word(call, "a")?, Self::word(call, "b")?);
                let holds = match op {
                    "eq" => a == b,
                    "lt" => a < b,
                    _ => a <= b,
                };
                vec![Felt::from_bool(holds)]
            }
            "pow2" => {
                let a = Self::word(call, "a")?;
                let shifted = u32::try_from(&a.to_int())
                    .ok()
                    .filter(|&k| k < W::effective_bits())
                    .map(|k| W::one().shl(k));
                vec![felt(shifted.unwrap_or_else(W::zero))]
            }
            "abs_sign" => {
                let a = Self::word(call, "a")?;
                let sign = if a.is_negative() { -1 } else { 1 };
                vec![Felt::from_int(&a.abs()), int(sign)]
            }
            "id" => vec![felt(Self::word(call, "a")?)],
            "num_check" => {
                Self::word(call, "a")?;
                vec![]
            }
            other => {
                return Err(RuntimeFailure::new(format!("unknown function {other}")));
            }
        };
        Ok(results)
    }
}

impl<W: Word> Target<Felt, Felt> for NativeTarget<W> {
    fn invoke(&mut self, call: &Call<'_, Felt>) -> Result<Vec<Felt>, RuntimeFailure> {
        self.calls += 1;
        let result = match call.function.split_once('.') {
            Some((prefix, op)) if prefix == W::NAME => {
                if !call.has_capability(&Capability::RangeCheck) {
                    return Err(RuntimeFailure::new("range_check capability not granted"));
                }
                self.dispatch(op, call)
            }
            None => felt_helper(call.function, call),
            Some(_) => {
                return Err(RuntimeFailure::new(format!(
                    "{} does not implement {}",
                    W::NAME,
                    call.function
                )))
            }
        };
        if let Err(failure) = &result {
            debug!(function = call.function, %failure, "native call failed");
        }
        result
    }
}

fn felt_arg<'c>(call: &'c Call<'_, Felt>, slot: &str) -> Result<&'c BigUint, RuntimeFailure> {
    call.arg(slot)
        .map(Felt::value)
        .ok_or_else(|| RuntimeFailure::new(format!("missing argument {slot}")))
}

/// `bitwise_and`, `bitwise_xor` and `is_le` on raw felt representatives.
/// Results are reduced modulo P.
fn felt_helper(op: &str, call: &Call<'_, Felt>) -> Result<Vec<Felt>, RuntimeFailure> {
    let (needs, granted) = match op {
        "bitwise_and" | "bitwise_xor" => ("bitwise", call.has_capability(&Capability::Bitwise)),
        "is_le" => ("range_check", call.has_capability(&Capability::RangeCheck)),
        other => return Err(RuntimeFailure::new(format!("unknown function {other}"))),
    };
    if !granted {
        return Err(RuntimeFailure::new(format!("{needs} capability not granted")));
    }
    let (x, y) = (felt_arg(call, "x")?, felt_arg(call, "y")?);
    let value = match op {
        "bitwise_and" => x & y,
        "bitwise_xor" => (x ^ y) % prime(),
        _ => {
            let diff = (y + prime() - x) % prime();
            BigUint::from(u8::from(&diff < rc_bound()))
        }
    };
    Ok(vec![Felt::from_int(&BigInt::from(value))])
}
