//! Sign-magnitude unbounded integers built on [`BigNum`].
//!
//! Zero has two representations, `(Pos, [])` and `(Neg, [])`. Both are valid
//! and compare equal; [`SignedNum::same_repr`] tells them apart. Every
//! operation here produces `(Pos, [])` for a zero result.

use crate::bignum::{BigNum, Radix};
use crate::error::{ModelError, ModelResult};
use crate::felt::Felt;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use std::fmt;
use std::ops::Mul;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Pos,
    Neg,
}

impl Sign {
    /// Accepts only the encodings `1` and `-1`.
    pub fn from_int(value: &BigInt) -> ModelResult<Self> {
        if value.is_one() {
            Ok(Sign::Pos)
        } else if *value == -BigInt::one() {
            Ok(Sign::Neg)
        } else {
            Err(ModelError::InvalidSign {
                sign: value.to_string(),
            })
        }
    }

    pub fn as_i8(self) -> i8 {
        match self {
            Sign::Pos => 1,
            Sign::Neg => -1,
        }
    }

    pub fn to_int(self) -> BigInt {
        BigInt::from(self.as_i8())
    }

    pub fn to_felt(self) -> Felt {
        Felt::from(i64::from(self.as_i8()))
    }

    pub fn flip(self) -> Self {
        match self {
            Sign::Pos => Sign::Neg,
            Sign::Neg => Sign::Pos,
        }
    }
}

impl Mul for Sign {
    type Output = Sign;

    fn mul(self, rhs: Sign) -> Sign {
        if self == rhs {
            Sign::Pos
        } else {
            Sign::Neg
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i8())
    }
}

/// A sign paired with a magnitude.
#[derive(Debug, Clone)]
pub struct SignedNum {
    pub sign: Sign,
    pub magnitude: BigNum,
}

impl SignedNum {
    pub fn new(sign: Sign, magnitude: BigNum) -> Self {
        Self { sign, magnitude }
    }

    pub fn zero() -> Self {
        Self::new(Sign::Pos, BigNum::zero())
    }

    /// Build from a boundary sign value, rejecting anything but `1` and `-1`.
    pub fn from_boundary(sign: &BigInt, magnitude: BigNum) -> ModelResult<Self> {
        Ok(Self::new(Sign::from_int(sign)?, magnitude))
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude.is_zero()
    }

    /// Structural identity, distinguishing `(Neg, [])` from `(Pos, [])`.
    pub fn same_repr(&self, other: &SignedNum) -> bool {
        self.sign == other.sign && self.magnitude == other.magnitude
    }

    /// Boundary layout: the sign felt followed by the magnitude's felts.
    pub fn to_felts(&self) -> Vec<Felt> {
        let mut felts = vec![self.sign.to_felt()];
        felts.extend(self.magnitude.to_felts());
        felts
    }

    fn normalized(sign: Sign, magnitude: BigNum) -> Self {
        if magnitude.is_zero() {
            Self::new(Sign::Pos, magnitude)
        } else {
            Self::new(sign, magnitude)
        }
    }
}

impl PartialEq for SignedNum {
    fn eq(&self, other: &Self) -> bool {
        if self.is_zero() && other.is_zero() {
            return true;
        }
        self.same_repr(other)
    }
}

impl Eq for SignedNum {}

impl fmt::Display for SignedNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.sign, self.magnitude)
    }
}

impl Radix {
    pub fn is_signed_num(&self, a: &SignedNum) -> bool {
        self.is_num(&a.magnitude)
    }

    /// Zero maps to `(Pos, [])`.
    pub fn int_to_signed(&self, n: &BigInt) -> SignedNum {
        let (sign, abs) = sign_and_abs(n);
        SignedNum::new(sign, self.int_to_num(&abs))
    }

    pub fn signed_to_int(&self, a: &SignedNum) -> BigInt {
        a.sign.to_int() * BigInt::from(self.num_to_int(&a.magnitude))
    }

    /// Read a signed value from the boundary layout: a sign felt, then digits
    /// up to the sentinel.
    pub fn read_signed<'a, I>(&self, felts: I) -> ModelResult<SignedNum>
    where
        I: IntoIterator<Item = &'a Felt>,
    {
        let mut iter = felts.into_iter();
        let sign = iter.next().ok_or(ModelError::MissingSentinel)?;
        let magnitude = self.read_num(iter)?;
        SignedNum::from_boundary(&sign.to_signed(), magnitude)
    }

    pub fn signed_neg(&self, a: &SignedNum) -> SignedNum {
        SignedNum::normalized(a.sign.flip(), a.magnitude.clone())
    }

    pub fn signed_add(&self, a: &SignedNum, b: &SignedNum) -> SignedNum {
        if a.sign == b.sign {
            return SignedNum::normalized(a.sign, self.add(&a.magnitude, &b.magnitude));
        }
        let (order, magnitude) = self.sub(&a.magnitude, &b.magnitude);
        let sign = match order {
            Sign::Pos => a.sign,
            Sign::Neg => b.sign,
        };
        SignedNum::normalized(sign, magnitude)
    }

    pub fn signed_sub(&self, a: &SignedNum, b: &SignedNum) -> SignedNum {
        self.signed_add(a, &self.signed_neg(b))
    }

    pub fn signed_mul(&self, a: &SignedNum, b: &SignedNum) -> SignedNum {
        SignedNum::normalized(a.sign * b.sign, self.mul(&a.magnitude, &b.magnitude))
    }

    /// Truncating division. The quotient's sign is the product of the
    /// operand signs and the remainder takes the dividend's sign.
    pub fn signed_div(&self, a: &SignedNum, b: &SignedNum) -> (SignedNum, SignedNum) {
        if a.is_zero() || b.is_zero() {
            return (SignedNum::zero(), SignedNum::zero());
        }
        let (q, r) = self.div(&a.magnitude, &b.magnitude);
        (
            SignedNum::normalized(a.sign * b.sign, q),
            SignedNum::normalized(a.sign, r),
        )
    }

    pub fn signed_compare(&self, a: &SignedNum, b: &SignedNum) -> i8 {
        match self.signed_to_int(a).cmp(&self.signed_to_int(b)) {
            std::cmp::Ordering::Less => -1,
            std::cmp::Ordering::Equal => 0,
            std::cmp::Ordering::Greater => 1,
        }
    }

    pub fn signed_is_lt(&self, a: &SignedNum, b: &SignedNum) -> bool {
        self.signed_compare(a, b) < 0
    }

    pub fn signed_is_le(&self, a: &SignedNum, b: &SignedNum) -> bool {
        self.signed_compare(a, b) <= 0
    }

    pub fn signed_is_eq(&self, a: &SignedNum, b: &SignedNum) -> bool {
        self.signed_compare(a, b) == 0
    }

    /// False for both representations of zero.
    pub fn signed_is_not_zero(&self, a: &SignedNum) -> bool {
        !a.is_zero()
    }
}

/// Split an integer into its sign (`Pos` for zero) and absolute value.
pub fn sign_and_abs(n: &BigInt) -> (Sign, BigUint) {
    let sign = if n.is_negative() { Sign::Neg } else { Sign::Pos };
    (sign, n.magnitude().clone())
}

/// Truncating division with the `(0, 0)` convention for a zero operand.
pub fn trunc_div_rem(a: &BigInt, b: &BigInt) -> (BigInt, BigInt) {
    if a.is_zero() || b.is_zero() {
        return (BigInt::zero(), BigInt::zero());
    }
    a.div_rem(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn radix() -> Radix {
        Radix::new(8).unwrap()
    }

    fn signed(n: i64) -> SignedNum {
        radix().int_to_signed(&BigInt::from(n))
    }

    #[test]
    fn test_zero_representations_are_equal() {
        let neg_zero = SignedNum::new(Sign::Neg, BigNum::zero());
        assert_eq!(neg_zero, SignedNum::zero());
        assert!(!neg_zero.same_repr(&SignedNum::zero()));
        assert!(radix().is_signed_num(&neg_zero));
        assert!(!radix().signed_is_not_zero(&neg_zero));
    }

    #[test]
    fn test_negative_zero_round_trip_normalizes() {
        let r = radix();
        let neg_zero = SignedNum::new(Sign::Neg, BigNum::zero());
        let back = r.int_to_signed(&r.signed_to_int(&neg_zero));
        assert!(back.same_repr(&SignedNum::zero()));
    }

    #[test]
    fn test_from_boundary_rejects_bad_sign() {
        assert!(SignedNum::from_boundary(&BigInt::from(0), BigNum::zero()).is_err());
        assert!(SignedNum::from_boundary(&BigInt::from(2), BigNum::zero()).is_err());
        let ok = SignedNum::from_boundary(&BigInt::from(-1), BigNum::zero()).unwrap();
        assert_eq!(ok.sign, Sign::Neg);
    }

    #[test]
    fn test_signed_add_mixed_signs() {
        let r = radix();
        assert_eq!(r.signed_add(&signed(300), &signed(-500)), signed(-200));
        assert_eq!(r.signed_add(&signed(-300), &signed(500)), signed(200));
        let zero = r.signed_add(&signed(-300), &signed(300));
        assert!(zero.same_repr(&SignedNum::zero()));
        assert_eq!(r.signed_sub(&signed(-300), &signed(-1000)), signed(700));
    }

    #[test]
    fn test_signed_div_sign_conventions() {
        let r = radix();
        for (a, b, q, rem) in [
            (7, 2, 3, 1),
            (7, -2, -3, 1),
            (-7, 2, -3, -1),
            (-7, -2, 3, -1),
            (0, 5, 0, 0),
            (5, 0, 0, 0),
            (1000, 3000, 0, 1000),
        ] {
            assert_eq!(
                r.signed_div(&signed(a), &signed(b)),
                (signed(q), signed(rem)),
                "{a} / {b}"
            );
            let (tq, tr) = trunc_div_rem(&BigInt::from(a), &BigInt::from(b));
            assert_eq!((tq, tr), (BigInt::from(q), BigInt::from(rem)));
        }
    }

    #[test]
    fn test_signed_compare() {
        let r = radix();
        assert_eq!(r.signed_compare(&signed(-1000), &signed(3)), -1);
        assert_eq!(r.signed_compare(&signed(3), &signed(3)), 0);
        assert!(r.signed_is_le(&signed(-3), &signed(-3)));
        assert!(r.signed_is_lt(&signed(-4), &signed(-3)));
        assert!(r.signed_is_eq(&SignedNum::new(Sign::Neg, BigNum::zero()), &signed(0)));
    }

    #[test]
    fn test_read_signed() {
        let r = radix();
        let x = signed(-70_000);
        assert_eq!(r.read_signed(&x.to_felts()).unwrap(), x);
        let bad = [Felt::from(2), Felt::minus_one()];
        assert!(matches!(
            r.read_signed(&bad),
            Err(ModelError::InvalidSign { .. })
        ));
    }
}
