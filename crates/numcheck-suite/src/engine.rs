//! A bignum library implemented on `num-bigint`, exposed as a [`Target`].
//!
//! Operands and results are sentinel-terminated felt sequences: magnitudes
//! are `d0, d1, .., P - 1` and signed values carry a leading `1` or `-1`.
//! Functions are named `biguint.<op>` and `bigint.<op>`. Malformed operands
//! fail the call, except for `is_num`, which reports them. The assertions
//! return no results and fail when what they assert is false.

use num_bigint::{BigInt, BigUint, Sign as BigSign};
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use numcheck_harness::{Call, RuntimeFailure, Target};
use numcheck_model::Felt;
use std::cmp::Ordering;
use tracing::debug;

type Cells = Vec<Felt>;

#[derive(Debug, Clone)]
pub struct BigNumEngine {
    bits: u32,
    base: BigUint,
}

impl BigNumEngine {
    pub fn new(bits: u32) -> Self {
        Self {
            bits,
            base: BigUint::one() << bits,
        }
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    fn decode_num(&self, felts: &[Felt]) -> Result<BigUint, RuntimeFailure> {
        let (last, digits) = felts
            .split_last()
            .ok_or_else(|| RuntimeFailure::new("empty operand"))?;
        if *last != Felt::minus_one() {
            return Err(RuntimeFailure::new("operand is not terminated"));
        }
        if digits.last().is_some_and(|d| *d == Felt::zero()) {
            return Err(RuntimeFailure::new("operand has a zero top digit"));
        }
        let mut n = BigUint::zero();
        for (i, d) in digits.iter().enumerate() {
            if d.value() >= &self.base {
                return Err(RuntimeFailure::new(format!("digit {i} is not below 2^{}", self.bits)));
            }
            n += d.value() << (self.bits as usize * i);
        }
        Ok(n)
    }

    fn decode_signed(&self, felts: &[Felt]) -> Result<BigInt, RuntimeFailure> {
        let (sign, rest) = felts
            .split_first()
            .ok_or_else(|| RuntimeFailure::new("empty operand"))?;
        let magnitude = self.decode_num(rest)?;
        if *sign == Felt::one() {
            Ok(BigInt::from_biguint(BigSign::Plus, magnitude))
        } else if *sign == Felt::minus_one() {
            Ok(BigInt::from_biguint(BigSign::Minus, magnitude))
        } else {
            Err(RuntimeFailure::new(format!("invalid sign {}", sign.to_signed())))
        }
    }

    fn encode_num(&self, n: &BigUint) -> Cells {
        let count = (n.bits() as usize).div_ceil(self.bits as usize);
        let mask = &self.base - 1u32;
        let mut cells: Cells = (0..count)
            .map(|i| Felt::from_int(&BigInt::from((n >> (self.bits as usize * i)) & &mask)))
            .collect();
        cells.push(Felt::minus_one());
        cells
    }

    fn encode_signed(&self, n: &BigInt) -> Cells {
        let sign = if n.is_negative() { -1 } else { 1 };
        let mut cells = vec![Felt::from(sign)];
        cells.extend(self.encode_num(n.magnitude()));
        cells
    }

    fn scalar(n: impl Into<BigInt>) -> Cells {
        vec![Felt::from_int(&n.into())]
    }

    fn flag(b: bool) -> Cells {
        vec![Felt::from_bool(b)]
    }

    fn ordering(o: Ordering) -> Cells {
        Self::scalar(o as i8)
    }

    fn arg<'c>(call: &'c Call<'_, Cells>, slot: &str) -> Result<&'c [Felt], RuntimeFailure> {
        call.arg(slot)
            .map(Vec::as_slice)
            .ok_or_else(|| RuntimeFailure::new(format!("missing argument {slot}")))
    }

    fn nums(&self, call: &Call<'_, Cells>) -> Result<(BigUint, BigUint), RuntimeFailure> {
        Ok((
            self.decode_num(Self::arg(call, "a")?)?,
            self.decode_num(Self::arg(call, "b")?)?,
        ))
    }

    fn signeds(&self, call: &Call<'_, Cells>) -> Result<(BigInt, BigInt), RuntimeFailure> {
        Ok((
            self.decode_signed(Self::arg(call, "a")?)?,
            self.decode_signed(Self::arg(call, "b")?)?,
        ))
    }

    fn biguint(&self, op: &str, call: &Call<'_, Cells>) -> Result<Vec<Cells>, RuntimeFailure> {
        let results = match op {
            "num_check" => {
                self.decode_num(Self::arg(call, "a")?)?;
                vec![]
            }
            "id" => {
                let a = Self::arg(call, "a")?;
                self.decode_num(a)?;
                vec![a.to_vec()]
            }
            "len" => {
                let a = Self::arg(call, "a")?;
                self.decode_num(a)?;
                vec![Self::scalar(a.len() - 1)]
            }
            "is_not_zero" => {
                let a = self.decode_num(Self::arg(call, "a")?)?;
                vec![Self::flag(!a.is_zero())]
            }
            "assert_eq" => {
                let (a, b) = self.nums(call)?;
                if a != b {
                    return Err(RuntimeFailure::new(format!("assert_eq: {a} != {b}")));
                }
                vec![]
            }
            "assert_sum_eq_with_carry" => {
                let (a, b) = self.nums(call)?;
                let res = self.decode_num(Self::arg(call, "res")?)?;
                let carry = match Self::arg(call, "carry")? {
                    [c] if *c == Felt::zero() => 0u32,
                    [c] if *c == Felt::one() => 1,
                    _ => return Err(RuntimeFailure::new("carry is not 0 or 1")),
                };
                if a + b + carry != res {
                    return Err(RuntimeFailure::new("assert_sum_eq_with_carry: sum mismatch"));
                }
                vec![]
            }
            "add" => {
                let (a, b) = self.nums(call)?;
                vec![self.encode_num(&(a + b))]
            }
            "sub" => {
                let (a, b) = self.nums(call)?;
                if a >= b {
                    vec![Self::scalar(1), self.encode_num(&(a - b))]
                } else {
                    vec![Self::scalar(-1), self.encode_num(&(b - a))]
                }
            }
            "mul" => {
                let (a, b) = self.nums(call)?;
                vec![self.encode_num(&(a * b))]
            }
            "mul_by_digit" => {
                let a = self.decode_num(Self::arg(call, "a")?)?;
                let d = match Self::arg(call, "d")? {
                    [d] if d.value() < &self.base => d.value().clone(),
                    _ => return Err(RuntimeFailure::new("d is not a single digit")),
                };
                vec![self.encode_num(&(a * d))]
            }
            "div" => {
                let (a, b) = self.nums(call)?;
                let (q, r) = if a.is_zero() || b.is_zero() {
                    (BigUint::zero(), BigUint::zero())
                } else {
                    a.div_rem(&b)
                };
                vec![self.encode_num(&q), self.encode_num(&r)]
            }
            "compare" => {
                let (a, b) = self.nums(call)?;
                vec![Self::ordering(a.cmp(&b))]
            }
            "is_lt" => {
                let (a, b) = self.nums(call)?;
                vec![Self::flag(a < b)]
            }
            "is_le" => {
                let (a, b) = self.nums(call)?;
                vec![Self::flag(a <= b)]
            }
            "is_eq" => {
                let (a, b) = self.nums(call)?;
                vec![Self::flag(a == b)]
            }
            "is_num" => vec![Self::flag(self.decode_num(Self::arg(call, "a")?).is_ok())],
            other => return Err(RuntimeFailure::new(format!("unknown function biguint.{other}"))),
        };
        Ok(results)
    }

    fn bigint(&self, op: &str, call: &Call<'_, Cells>) -> Result<Vec<Cells>, RuntimeFailure> {
        let results = match op {
            "num_check" => {
                self.decode_signed(Self::arg(call, "a")?)?;
                vec![]
            }
            // passes negative zero through untouched
            "id" => {
                let a = Self::arg(call, "a")?;
                self.decode_signed(a)?;
                vec![a.to_vec()]
            }
            "len" => {
                let a = Self::arg(call, "a")?;
                self.decode_signed(a)?;
                vec![Self::scalar(a.len() - 2)]
            }
            "assert_eq" => {
                let (a, b) = self.signeds(call)?;
                if a != b {
                    return Err(RuntimeFailure::new(format!("assert_eq: {a} != {b}")));
                }
                vec![]
            }
            "neg" => vec![self.encode_signed(&-self.decode_signed(Self::arg(call, "a")?)?)],
            "add" => {
                let (a, b) = self.signeds(call)?;
                vec![self.encode_signed(&(a + b))]
            }
            "sub" => {
                let (a, b) = self.signeds(call)?;
                vec![self.encode_signed(&(a - b))]
            }
            "mul" => {
                let (a, b) = self.signeds(call)?;
                vec![self.encode_signed(&(a * b))]
            }
            "div" => {
                let (a, b) = self.signeds(call)?;
                let (q, r) = if a.is_zero() || b.is_zero() {
                    (BigInt::zero(), BigInt::zero())
                } else {
                    a.div_rem(&b)
                };
                vec![self.encode_signed(&q), self.encode_signed(&r)]
            }
            "compare" => {
                let (a, b) = self.signeds(call)?;
                vec![Self::ordering(a.cmp(&b))]
            }
            "is_lt" => {
                let (a, b) = self.signeds(call)?;
                vec![Self::flag(a < b)]
            }
            "is_le" => {
                let (a, b) = self.signeds(call)?;
                vec![Self::flag(a <= b)]
            }
            "is_eq" => {
                let (a, b) = self.signeds(call)?;
                vec![Self::flag(a == b)]
            }
            "is_not_zero" => {
                let a = self.decode_signed(Self::arg(call, "a")?)?;
                vec![Self::flag(!a.is_zero())]
            }
            "is_num" => vec![Self::flag(self.decode_signed(Self::arg(call, "a")?).is_ok())],
            other => return Err(RuntimeFailure::new(format!("unknown function bigint.{other}"))),
        };
        Ok(results)
    }
}

impl Target<Cells, Cells> for BigNumEngine {
    fn invoke(&mut self, call: &Call<'_, Cells>) -> Result<Vec<Cells>, RuntimeFailure> {
        let result = match call.function.split_once('.') {
            Some(("biguint", op)) => self.biguint(op, call),
            Some(("bigint", op)) => self.bigint(op, call),
            _ => Err(RuntimeFailure::new(format!("unknown function {}", call.function))),
        };
        if let Err(failure) = &result {
            debug!(function = call.function, %failure, "engine call failed");
        }
        result
    }
}

/// The digits of a sentinel-terminated operand, as plain integers.
pub fn digits_of(cells: &[Felt]) -> Vec<u128> {
    cells
        .iter()
        .take_while(|c| **c != Felt::minus_one())
        .filter_map(|c| c.value().to_u128())
        .collect()
}
