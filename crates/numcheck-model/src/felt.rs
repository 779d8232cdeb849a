//! Field elements: the value type crossing the boundary of the function under test.
//!
//! Every argument and result is a non-negative integer below the prime
//! `P = 2^251 + 17 * 2^192 + 1`. Negative quantities travel as `P + value`.

use crate::error::{ModelError, ModelResult};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};
use std::fmt;
use std::sync::OnceLock;

/// The field prime `2^251 + 17 * 2^192 + 1`.
pub fn prime() -> &'static BigUint {
    static PRIME: OnceLock<BigUint> = OnceLock::new();
    PRIME.get_or_init(|| {
        (BigUint::one() << 251u32) + (BigUint::from(17u32) << 192u32) + BigUint::one()
    })
}

fn prime_int() -> &'static BigInt {
    static PRIME_INT: OnceLock<BigInt> = OnceLock::new();
    PRIME_INT.get_or_init(|| BigInt::from(prime().clone()))
}

/// Upper bound of the range-check capability, `2^128`.
pub fn rc_bound() -> &'static BigUint {
    static RC_BOUND: OnceLock<BigUint> = OnceLock::new();
    RC_BOUND.get_or_init(|| BigUint::one() << 128u32)
}

/// An integer in `[0, P)`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Felt(BigUint);

impl Felt {
    pub fn zero() -> Self {
        Felt(BigUint::zero())
    }

    pub fn one() -> Self {
        Felt(BigUint::one())
    }

    /// Wrap a value that is already reduced, rejecting anything `>= P`.
    pub fn new(value: BigUint) -> ModelResult<Self> {
        if &value >= prime() {
            return Err(ModelError::NotAFelt {
                value: value.to_string(),
            });
        }
        Ok(Felt(value))
    }

    /// Encode an arbitrary integer by reducing it modulo P.
    pub fn from_int(value: &BigInt) -> Self {
        Felt(value.mod_floor(prime_int()).magnitude().clone())
    }

    pub fn from_bool(b: bool) -> Self {
        if b {
            Self::one()
        } else {
            Self::zero()
        }
    }

    /// `P - 1`, the encoding of -1.
    pub fn minus_one() -> Self {
        Felt(prime() - BigUint::one())
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }

    pub fn into_inner(self) -> BigUint {
        self.0
    }

    /// The raw value as a non-negative integer.
    pub fn to_int(&self) -> BigInt {
        BigInt::from(self.0.clone())
    }

    /// Diagnostic heuristic: values at or above `P / 2` are read as `e - P`.
    ///
    /// Exact only for integers whose magnitude is well below the field size.
    pub fn to_signed(&self) -> BigInt {
        if self.0 >= prime() / 2u32 {
            self.to_int() - prime_int()
        } else {
            self.to_int()
        }
    }

    /// Reads values at or above `RC_BOUND` as negative.
    ///
    /// Exact for integers in `(-RC_BOUND, RC_BOUND)`, which covers every
    /// range-checked output.
    pub fn to_range_checked(&self) -> BigInt {
        if &self.0 >= rc_bound() {
            self.to_int() - prime_int()
        } else {
            self.to_int()
        }
    }

    /// True when `self` and `n` are congruent modulo P.
    pub fn eq_int(&self, n: &BigInt) -> bool {
        (self.to_int() - n).mod_floor(prime_int()).is_zero()
    }

    /// `Some` only for the boolean encodings 0 and 1.
    pub fn as_bool(&self) -> Option<bool> {
        if self.0.is_zero() {
            Some(false)
        } else if self.0.is_one() {
            Some(true)
        } else {
            None
        }
    }

    /// Felt-level `a <= b` as decided by a range-checked comparison:
    /// `(b - a) mod P < RC_BOUND`.
    pub fn is_le(a: &Felt, b: &Felt) -> bool {
        let diff = Felt::from_int(&(b.to_int() - a.to_int()));
        &diff.0 < rc_bound()
    }

    pub fn bitand(&self, other: &Felt) -> Felt {
        Felt(&self.0 & &other.0)
    }

    /// Bitwise xor of the representatives, reduced modulo P.
    pub fn bitxor(&self, other: &Felt) -> Felt {
        Felt::from_int(&BigInt::from(&self.0 ^ &other.0))
    }
}

impl From<i64> for Felt {
    fn from(value: i64) -> Self {
        Felt::from_int(&BigInt::from(value))
    }
}

impl From<&BigInt> for Felt {
    fn from(value: &BigInt) -> Self {
        Felt::from_int(value)
    }
}

impl fmt::Debug for Felt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Felt({})", self.0)
    }
}

impl fmt::Display for Felt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
