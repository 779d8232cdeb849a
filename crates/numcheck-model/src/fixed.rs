//! Fixed-width integer model.
//!
//! For a word width W the model computes what a W-bit signed or unsigned
//! implementation must return, including wraparound and the explicit
//! carry, borrow and overflow limbs. Values are unbounded integers so the
//! same code covers every width up to 128 bits.

use crate::error::{ModelError, ModelResult};
use crate::felt::rc_bound;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use tracing::debug;

/// Interpretation of a machine word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signedness {
    Signed,
    Unsigned,
}

/// A wrapped result together with its correction limb.
///
/// For `add`/`sub` on signed words `overflow` is the +1/0/-1 flag; for
/// unsigned words it is the carry (add), the borrow (sub), or the high
/// limb of the product (mul).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overflowing {
    pub value: BigInt,
    pub overflow: BigInt,
}

impl Overflowing {
    fn new(value: BigInt, overflow: impl Into<BigInt>) -> Self {
        Self {
            value,
            overflow: overflow.into(),
        }
    }
}

/// A word width together with its signedness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedWidth {
    bits: u32,
    signedness: Signedness,
    word_size: BigInt,
    shift: BigInt,
    min: BigInt,
    max: BigInt,
}

impl FixedWidth {
    pub fn new(bits: u32, signedness: Signedness) -> ModelResult<Self> {
        if bits == 0 || bits > 128 {
            return Err(ModelError::UnsupportedWidth { bits });
        }
        let word_size = BigInt::one() << bits;
        let (shift, min, max) = match signedness {
            Signedness::Signed => {
                let shift = BigInt::one() << (bits - 1);
                let min = -shift.clone();
                let max = &shift - 1;
                (shift, min, max)
            }
            Signedness::Unsigned => (word_size.clone(), BigInt::zero(), &word_size - 1),
        };
        Ok(Self {
            bits,
            signedness,
            word_size,
            shift,
            min,
            max,
        })
    }

    pub fn signed(bits: u32) -> ModelResult<Self> {
        Self::new(bits, Signedness::Signed)
    }

    pub fn unsigned(bits: u32) -> ModelResult<Self> {
        Self::new(bits, Signedness::Unsigned)
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn signedness(&self) -> Signedness {
        self.signedness
    }

    pub fn is_signed(&self) -> bool {
        self.signedness == Signedness::Signed
    }

    /// `2^W`.
    pub fn word_size(&self) -> &BigInt {
        &self.word_size
    }

    /// `2^(W-1)` for signed words, `2^W` for unsigned ones.
    pub fn shift(&self) -> &BigInt {
        &self.shift
    }

    pub fn min(&self) -> &BigInt {
        &self.min
    }

    pub fn max(&self) -> &BigInt {
        &self.max
    }

    pub fn all_ones(&self) -> BigInt {
        &self.word_size - 1
    }

    /// Number of value bits a shift can move through before the result
    /// saturates: W-1 for signed words (the sign bit is excluded), W otherwise.
    pub fn effective_bits(&self) -> u32 {
        match self.signedness {
            Signedness::Signed => self.bits - 1,
            Signedness::Unsigned => self.bits,
        }
    }

    /// Short type name, e.g. `Int16` or `Uint64`.
    pub fn type_name(&self) -> String {
        match self.signedness {
            Signedness::Signed => format!("Int{}", self.bits),
            Signedness::Unsigned => format!("Uint{}", self.bits),
        }
    }

    pub fn num_check(&self, a: &BigInt) -> bool {
        &self.min <= a && a <= &self.max
    }

    /// Reinterpret the low W bits of `a` as a value of this word type.
    pub fn wrap(&self, a: &BigInt) -> BigInt {
        let low = a.mod_floor(&self.word_size);
        if low > self.max {
            low - &self.word_size
        } else {
            low
        }
    }

    pub fn add(&self, a: &BigInt, b: &BigInt) -> Overflowing {
        self.with_flag(a + b)
    }

    pub fn sub(&self, a: &BigInt, b: &BigInt) -> Overflowing {
        match self.signedness {
            Signedness::Signed => self.with_flag(a - b),
            Signedness::Unsigned => {
                let (borrow, value) = (a - b).div_mod_floor(&self.word_size);
                Overflowing::new(value, -borrow)
            }
        }
    }

    pub fn mul(&self, a: &BigInt, b: &BigInt) -> Overflowing {
        let product = a * b;
        match self.signedness {
            Signedness::Signed => {
                let value = (&product + &self.shift).mod_floor(&self.word_size) - &self.shift;
                let overflow = (&product - &value) / &self.word_size;
                Overflowing::new(value, overflow)
            }
            Signedness::Unsigned => {
                let (overflow, value) = product.div_mod_floor(&self.word_size);
                Overflowing::new(value, overflow)
            }
        }
    }

    /// Checks a claimed `(result, overflow)` pair for `a * b`.
    ///
    /// Signed words require `result + overflow * 2^W == a * b` with both limbs
    /// in `[-SHIFT, SHIFT)`; unsigned words require the floor split.
    pub fn mul_relation_holds(
        &self,
        a: &BigInt,
        b: &BigInt,
        result: &BigInt,
        overflow: &BigInt,
    ) -> bool {
        let recombined = result + overflow * &self.word_size;
        if recombined != a * b {
            return false;
        }
        match self.signedness {
            Signedness::Signed => {
                let in_limb = |x: &BigInt| -&self.shift <= *x && x < &self.shift;
                in_limb(result) && in_limb(overflow)
            }
            Signedness::Unsigned => !result.is_negative() && result < &self.word_size,
        }
    }

    /// Division with a remainder whose sign follows the dividend.
    pub fn div_rem(&self, a: &BigInt, b: &BigInt) -> (BigInt, BigInt) {
        if a.is_zero() || b.is_zero() {
            return (BigInt::zero(), BigInt::zero());
        }
        match self.signedness {
            Signedness::Signed => {
                if *b == BigInt::from(-1) {
                    if *a == self.min {
                        return (a.clone(), BigInt::zero());
                    }
                    return (-a, BigInt::zero());
                }
                a.div_rem(b)
            }
            Signedness::Unsigned => a.div_mod_floor(b),
        }
    }

    pub fn shl(&self, a: &BigInt, b: &BigInt) -> ModelResult<BigInt> {
        let amount = self.shift_amount(b)?;
        match amount {
            Some(n) => Ok(self.wrap(&(a << n))),
            None => Ok(BigInt::zero()),
        }
    }

    pub fn shr(&self, a: &BigInt, b: &BigInt) -> ModelResult<BigInt> {
        let amount = self.shift_amount(b)?;
        match (amount, self.signedness) {
            (Some(n), Signedness::Signed) => Ok(a >> n),
            (Some(n), Signedness::Unsigned) => Ok((a >> n).mod_floor(&self.word_size)),
            (None, Signedness::Signed) if a.is_negative() => Ok(BigInt::from(-1)),
            (None, _) => Ok(BigInt::zero()),
        }
    }

    /// Whether a shift by `b` is expected to be refused by a range-checked
    /// implementation.
    pub fn shift_out_of_range(&self, b: &BigInt) -> bool {
        b.is_negative() || *b >= BigInt::from(rc_bound().clone())
    }

    /// `Some(n)` when shifting by `b` keeps some bits, `None` when the shift
    /// reaches the effective width.
    fn shift_amount(&self, b: &BigInt) -> ModelResult<Option<usize>> {
        if b.is_negative() {
            debug!(amount = %b, "negative shift amount");
            return Err(ModelError::NegativeShift {
                amount: b.to_string(),
            });
        }
        if *b >= BigInt::from(self.effective_bits()) {
            return Ok(None);
        }
        Ok(b.to_usize())
    }

    pub fn and(&self, a: &BigInt, b: &BigInt) -> BigInt {
        self.wrap(&(a & b))
    }

    pub fn or(&self, a: &BigInt, b: &BigInt) -> BigInt {
        self.wrap(&(a | b))
    }

    pub fn xor(&self, a: &BigInt, b: &BigInt) -> BigInt {
        self.wrap(&(a ^ b))
    }

    pub fn not(&self, a: &BigInt) -> BigInt {
        match self.signedness {
            Signedness::Signed => -(a + 1i32),
            Signedness::Unsigned => a ^ self.all_ones(),
        }
    }

    pub fn neg(&self, a: &BigInt) -> BigInt {
        match self.signedness {
            Signedness::Signed if *a == self.min => a.clone(),
            Signedness::Signed => -a,
            Signedness::Unsigned => (-a).mod_floor(&self.word_size),
        }
    }

    /// Negate `a` when `b == 1`, return it unchanged when `b == 0`.
    pub fn cond_neg(&self, a: &BigInt, b: &BigInt) -> ModelResult<BigInt> {
        if b.is_one() {
            Ok(self.neg(a))
        } else if b.is_zero() {
            Ok(a.clone())
        } else {
            debug!(flag = %b, "cond_neg flag outside {{0, 1}}");
            Err(ModelError::InvalidCondition {
                flag: b.to_string(),
            })
        }
    }

    /// `2^a` when it fits below the sign bit (signed) or the word (unsigned), else 0.
    pub fn pow2(&self, a: &BigInt) -> BigInt {
        match a.to_usize() {
            Some(exponent) if exponent < self.effective_bits() as usize => BigInt::one() << exponent,
            _ => BigInt::zero(),
        }
    }

    /// `(|a|, sign)` with `abs * sign == a`; zero is reported with sign +1.
    pub fn abs_sign(&self, a: &BigInt) -> (BigInt, BigInt) {
        if a.is_negative() {
            (-a, BigInt::from(-1))
        } else {
            (a.clone(), BigInt::one())
        }
    }

    pub fn id(&self, a: &BigInt) -> BigInt {
        a.clone()
    }

    pub fn eq(&self, a: &BigInt, b: &BigInt) -> bool {
        a == b
    }

    pub fn lt(&self, a: &BigInt, b: &BigInt) -> bool {
        a < b
    }

    pub fn le(&self, a: &BigInt, b: &BigInt) -> bool {
        a <= b
    }

    fn with_flag(&self, exact: BigInt) -> Overflowing {
        match self.signedness {
            Signedness::Signed => {
                if exact > self.max {
                    Overflowing::new(exact - &self.word_size, 1)
                } else if exact < self.min {
                    Overflowing::new(exact + &self.word_size, -1)
                } else {
                    Overflowing::new(exact, 0)
                }
            }
            Signedness::Unsigned => {
                let (carry, value) = exact.div_mod_floor(&self.word_size);
                Overflowing::new(value, carry)
            }
        }
    }
}
