//! Unbounded magnitudes as little-endian digit sequences in radix `2^D`.
//!
//! A `BigNum` is canonical when every digit is below the radix and the most
//! significant stored digit is non-zero; zero is the empty sequence. The
//! end-of-number sentinel used by the external memory layout only appears in
//! [`BigNum::to_felts`] and [`Radix::read_num`].
//!
//! Digits are `u128`, so products of two digits (up to 250 bits) are formed
//! in a two-word accumulator.

use crate::error::{ModelError, ModelResult};
use crate::felt::Felt;
use crate::signed::Sign;
use num_bigint::{BigInt, BigUint};
use num_traits::{ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;

/// End-of-number marker in the boundary layout.
pub const EON: i64 = -1;

/// An unsigned magnitude. Digits are least significant first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BigNum {
    digits: Vec<u128>,
}

impl BigNum {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Wrap raw digits without validating them against a radix.
    ///
    /// Used to build deliberately malformed inputs; arithmetic expects
    /// values that passed [`Radix::is_num`].
    pub fn from_digits_unchecked(digits: Vec<u128>) -> Self {
        Self { digits }
    }

    pub fn digits(&self) -> &[u128] {
        &self.digits
    }

    /// Number of stored digits.
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Numeric zero test; also true for non-canonical all-zero sequences.
    pub fn is_zero(&self) -> bool {
        self.digits.iter().all(|&d| d == 0)
    }

    /// Boundary layout: the digits followed by the sentinel `P - 1`.
    pub fn to_felts(&self) -> Vec<Felt> {
        self.digits
            .iter()
            .map(|&d| Felt::from_int(&d.into()))
            .chain(std::iter::once(Felt::minus_one()))
            .collect()
    }

    fn trimmed(mut digits: Vec<u128>) -> Self {
        while digits.last() == Some(&0) {
            digits.pop();
        }
        Self { digits }
    }

    fn significant_len(&self) -> usize {
        self.digits
            .iter()
            .rposition(|&d| d != 0)
            .map_or(0, |i| i + 1)
    }

    fn digit(&self, index: usize) -> u128 {
        self.digits.get(index).copied().unwrap_or(0)
    }
}

impl fmt::Display for BigNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.digits.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "]")
    }
}

/// Digit width `D`; every magnitude operation is relative to a radix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Radix {
    bits: u32,
}

impl Radix {
    pub const MIN_BITS: u32 = 4;
    pub const MAX_BITS: u32 = 125;

    pub fn new(bits: u32) -> ModelResult<Self> {
        if !(Self::MIN_BITS..=Self::MAX_BITS).contains(&bits) {
            return Err(ModelError::UnsupportedDigitWidth { bits });
        }
        Ok(Self { bits })
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// `R = 2^D`.
    pub fn base(&self) -> u128 {
        1u128 << self.bits
    }

    /// `R - 1`, the largest digit.
    pub fn max_digit(&self) -> u128 {
        self.base() - 1
    }

    pub fn is_num(&self, a: &BigNum) -> bool {
        a.digits.last() != Some(&0) && a.digits.iter().all(|&d| d < self.base())
    }

    /// Validate raw digits into a canonical `BigNum`.
    pub fn checked(&self, digits: Vec<u128>) -> ModelResult<BigNum> {
        if let Some(index) = digits.iter().position(|&d| d >= self.base()) {
            return Err(ModelError::DigitOutOfRange {
                index,
                digit: digits[index].to_string(),
            });
        }
        if digits.last() == Some(&0) {
            return Err(ModelError::TrailingZeroDigit { len: digits.len() });
        }
        Ok(BigNum { digits })
    }

    /// Canonical digits of `n`, least significant first.
    pub fn int_to_num(&self, n: &BigUint) -> BigNum {
        let mask = BigUint::from(self.max_digit());
        let mut rest = n.clone();
        let mut digits = Vec::new();
        while !rest.is_zero() {
            let digit = (&rest & &mask).to_u128().unwrap_or_default();
            digits.push(digit);
            rest >>= self.bits;
        }
        BigNum { digits }
    }

    /// [`Radix::int_to_num`] for a signed input, rejecting negatives.
    pub fn try_int_to_num(&self, n: &BigInt) -> ModelResult<BigNum> {
        match n.to_biguint() {
            Some(abs) => Ok(self.int_to_num(&abs)),
            None => Err(ModelError::NegativeMagnitude {
                value: n.to_string(),
            }),
        }
    }

    pub fn num_to_int(&self, a: &BigNum) -> BigUint {
        a.digits
            .iter()
            .rev()
            .fold(BigUint::zero(), |acc, &d| (acc << self.bits) + d)
    }

    /// Read a magnitude from the boundary layout. The sentinel must be the
    /// last cell.
    pub fn read_num<'a, I>(&self, felts: I) -> ModelResult<BigNum>
    where
        I: IntoIterator<Item = &'a Felt>,
    {
        let sentinel = Felt::minus_one();
        let mut digits = Vec::new();
        let mut iter = felts.into_iter();
        while let Some(felt) = iter.next() {
            if *felt == sentinel {
                let count = iter.count();
                if count > 0 {
                    return Err(ModelError::TrailingCells { count });
                }
                return self.checked(digits);
            }
            match felt.value().to_u128() {
                Some(d) if d < self.base() => digits.push(d),
                _ => {
                    return Err(ModelError::DigitOutOfRange {
                        index: digits.len(),
                        digit: felt.to_string(),
                    })
                }
            }
        }
        Err(ModelError::MissingSentinel)
    }

    /// Schoolbook addition with carry propagation.
    pub fn add(&self, a: &BigNum, b: &BigNum) -> BigNum {
        let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
        let mut digits = Vec::with_capacity(long.len() + 1);
        let mut carry = 0u128;
        for (i, &x) in long.digits.iter().enumerate() {
            let t = x + short.digit(i) + carry;
            digits.push(t & self.max_digit());
            carry = t >> self.bits;
        }
        if carry != 0 {
            digits.push(carry);
        }
        BigNum::trimmed(digits)
    }

    /// `|a - b|` together with the sign of `a - b` (`Pos` when `a >= b`).
    pub fn sub(&self, a: &BigNum, b: &BigNum) -> (Sign, BigNum) {
        match cmp_digits(a, b) {
            Ordering::Less => (Sign::Neg, self.sub_ordered(b, a)),
            _ => (Sign::Pos, self.sub_ordered(a, b)),
        }
    }

    /// Multiply by a single digit `d < R`.
    pub fn mul_by_digit(&self, a: &BigNum, d: u128) -> BigNum {
        if d == 0 || a.is_zero() {
            return BigNum::zero();
        }
        let mut digits = Vec::with_capacity(a.len() + 1);
        let mut carry = 0u128;
        for &x in &a.digits {
            let acc = Wide::mul(x, d).add(carry);
            digits.push(acc.low_bits(self.bits));
            carry = acc.shr(self.bits);
        }
        if carry != 0 {
            digits.push(carry);
        }
        BigNum::trimmed(digits)
    }

    /// Grade-school multiplication, `O(len(a) * len(b))` digit products.
    pub fn mul(&self, a: &BigNum, b: &BigNum) -> BigNum {
        if a.is_zero() || b.is_zero() {
            return BigNum::zero();
        }
        let mut digits = vec![0u128; a.len() + b.len()];
        for (i, &x) in a.digits.iter().enumerate() {
            let mut carry = 0u128;
            for (j, &y) in b.digits.iter().enumerate() {
                // x*y + digits[i+j] + carry <= R^2 - 1, so the new carry stays below R
                let acc = Wide::mul(x, y).add(digits[i + j]).add(carry);
                digits[i + j] = acc.low_bits(self.bits);
                carry = acc.shr(self.bits);
            }
            digits[i + b.len()] = carry;
        }
        BigNum::trimmed(digits)
    }

    /// Long division: `a == b * quotient + remainder` with `remainder < b`.
    ///
    /// Dividing by zero or dividing zero yields `(0, 0)`.
    pub fn div(&self, a: &BigNum, b: &BigNum) -> (BigNum, BigNum) {
        if a.is_zero() || b.is_zero() {
            return (BigNum::zero(), BigNum::zero());
        }
        if cmp_digits(a, b) == Ordering::Less {
            return (BigNum::zero(), BigNum::trimmed(a.digits.clone()));
        }
        let bits = self.bits as usize;
        let mut quotient = vec![0u128; a.len()];
        let mut remainder = BigNum::zero();
        for pos in (0..a.len() * bits).rev() {
            let bit = (a.digits[pos / bits] >> (pos % bits)) & 1;
            self.shift_in_bit(&mut remainder, bit);
            if cmp_digits(&remainder, b) != Ordering::Less {
                remainder = self.sub_ordered(&remainder, b);
                quotient[pos / bits] |= 1u128 << (pos % bits);
            }
        }
        (BigNum::trimmed(quotient), remainder)
    }

    /// -1, 0 or 1 as `a` is less than, equal to or greater than `b`.
    pub fn compare(&self, a: &BigNum, b: &BigNum) -> i8 {
        match self.num_to_int(a).cmp(&self.num_to_int(b)) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    pub fn is_lt(&self, a: &BigNum, b: &BigNum) -> bool {
        self.num_to_int(a) < self.num_to_int(b)
    }

    pub fn is_le(&self, a: &BigNum, b: &BigNum) -> bool {
        self.num_to_int(a) <= self.num_to_int(b)
    }

    pub fn is_eq(&self, a: &BigNum, b: &BigNum) -> bool {
        self.num_to_int(a) == self.num_to_int(b)
    }

    /// Borrow-propagating `a - b`; requires `a >= b`.
    fn sub_ordered(&self, a: &BigNum, b: &BigNum) -> BigNum {
        let mut digits = Vec::with_capacity(a.len());
        let mut borrow = 0u128;
        for (i, &x) in a.digits.iter().enumerate() {
            let y = b.digit(i) + borrow;
            if x >= y {
                digits.push(x - y);
                borrow = 0;
            } else {
                digits.push(x + self.base() - y);
                borrow = 1;
            }
        }
        debug_assert_eq!(borrow, 0, "sub_ordered called with a < b");
        BigNum::trimmed(digits)
    }

    /// `r = 2 * r + bit`.
    fn shift_in_bit(&self, r: &mut BigNum, bit: u128) {
        let mut carry = bit;
        for d in r.digits.iter_mut() {
            let t = (*d << 1) | carry;
            *d = t & self.max_digit();
            carry = t >> self.bits;
        }
        if carry != 0 {
            r.digits.push(carry);
        }
    }
}

/// Compare two magnitudes digit-wise, ignoring non-significant zeros.
fn cmp_digits(a: &BigNum, b: &BigNum) -> Ordering {
    let (la, lb) = (a.significant_len(), b.significant_len());
    if la != lb {
        return la.cmp(&lb);
    }
    for i in (0..la).rev() {
        match a.digits[i].cmp(&b.digits[i]) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// 256-bit accumulator for one digit-product step.
#[derive(Debug, Clone, Copy)]
struct Wide {
    lo: u128,
    hi: u128,
}

impl Wide {
    fn mul(a: u128, b: u128) -> Self {
        const HALF: u128 = u64::MAX as u128;
        let (a0, a1) = (a & HALF, a >> 64);
        let (b0, b1) = (b & HALF, b >> 64);
        let p00 = a0 * b0;
        let p01 = a0 * b1;
        let p10 = a1 * b0;
        let p11 = a1 * b1;
        let mid = (p00 >> 64) + (p01 & HALF) + (p10 & HALF);
        Self {
            lo: (p00 & HALF) | (mid << 64),
            hi: p11 + (p01 >> 64) + (p10 >> 64) + (mid >> 64),
        }
    }

    fn add(self, x: u128) -> Self {
        let (lo, overflowed) = self.lo.overflowing_add(x);
        Self {
            lo,
            hi: self.hi + u128::from(overflowed),
        }
    }

    fn low_bits(self, bits: u32) -> u128 {
        self.lo & ((1u128 << bits) - 1)
    }

    /// `self >> bits`, truncated to 128 bits.
    fn shr(self, bits: u32) -> u128 {
        (self.lo >> bits) | (self.hi << (128 - bits))
    }
}
