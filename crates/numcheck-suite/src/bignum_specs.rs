//! Test specs for the bignum library, judged by the limb-level model.
//!
//! Arguments and results are sentinel-terminated felt sequences (see
//! [`crate::engine`]). A call on a malformed operand is an expected failure
//! for every function except `is_num`, which must answer instead. The
//! assertions (`num_check`, `assert_eq`, `assert_sum_eq_with_carry`) return
//! nothing and are expected to fail exactly when what they assert is false.

use num_bigint::{BigInt, BigUint};
use numcheck_harness::predicate::{expect_bool, expect_failure_when, expect_int, expect_num, expect_signed};
use numcheck_harness::render::render_results;
use numcheck_harness::{check, Capability, PredicateError, TestSpec};
use numcheck_model::{Felt, Radix, SignedNum};

type Cells = Vec<Felt>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BigUintOp {
    NumCheck,
    IsNum,
    Id,
    Len,
    IsNotZero,
    Add,
    Sub,
    Mul,
    MulByDigit,
    Div,
    Compare,
    IsLt,
    IsLe,
    IsEq,
    AssertEq,
    AssertSumEqWithCarry,
}

impl BigUintOp {
    pub const ALL: [BigUintOp; 16] = [
        BigUintOp::NumCheck,
        BigUintOp::IsNum,
        BigUintOp::Id,
        BigUintOp::Len,
        BigUintOp::IsNotZero,
        BigUintOp::Add,
        BigUintOp::Sub,
        BigUintOp::Mul,
        BigUintOp::MulByDigit,
        BigUintOp::Div,
        BigUintOp::Compare,
        BigUintOp::IsLt,
        BigUintOp::IsLe,
        BigUintOp::IsEq,
        BigUintOp::AssertEq,
        BigUintOp::AssertSumEqWithCarry,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BigUintOp::NumCheck => "num_check",
            BigUintOp::IsNum => "is_num",
            BigUintOp::Id => "id",
            BigUintOp::Len => "len",
            BigUintOp::IsNotZero => "is_not_zero",
            BigUintOp::Add => "add",
            BigUintOp::Sub => "sub",
            BigUintOp::Mul => "mul",
            BigUintOp::MulByDigit => "mul_by_digit",
            BigUintOp::Div => "div",
            BigUintOp::Compare => "compare",
            BigUintOp::IsLt => "is_lt",
            BigUintOp::IsLe => "is_le",
            BigUintOp::IsEq => "is_eq",
            BigUintOp::AssertEq => "assert_eq",
            BigUintOp::AssertSumEqWithCarry => "assert_sum_eq_with_carry",
        }
    }

    pub fn slots(self) -> &'static [&'static str] {
        match self {
            BigUintOp::NumCheck
            | BigUintOp::IsNum
            | BigUintOp::Id
            | BigUintOp::Len
            | BigUintOp::IsNotZero => &["a"],
            BigUintOp::MulByDigit => &["a", "d"],
            BigUintOp::AssertSumEqWithCarry => &["a", "b", "res", "carry"],
            _ => &["a", "b"],
        }
    }

    pub fn outputs(self) -> usize {
        match self {
            BigUintOp::NumCheck | BigUintOp::AssertEq | BigUintOp::AssertSumEqWithCarry => 0,
            BigUintOp::Sub | BigUintOp::Div => 2,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BigIntOp {
    NumCheck,
    IsNum,
    Id,
    Len,
    Neg,
    Add,
    Sub,
    Mul,
    Div,
    Compare,
    IsLt,
    IsLe,
    IsEq,
    IsNotZero,
    AssertEq,
}

impl BigIntOp {
    pub const ALL: [BigIntOp; 15] = [
        BigIntOp::NumCheck,
        BigIntOp::IsNum,
        BigIntOp::Id,
        BigIntOp::Len,
        BigIntOp::Neg,
        BigIntOp::Add,
        BigIntOp::Sub,
        BigIntOp::Mul,
        BigIntOp::Div,
        BigIntOp::Compare,
        BigIntOp::IsLt,
        BigIntOp::IsLe,
        BigIntOp::IsEq,
        BigIntOp::IsNotZero,
        BigIntOp::AssertEq,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BigIntOp::NumCheck => "num_check",
            BigIntOp::IsNum => "is_num",
            BigIntOp::Id => "id",
            BigIntOp::Len => "len",
            BigIntOp::Neg => "neg",
            BigIntOp::Add => "add",
            BigIntOp::Sub => "sub",
            BigIntOp::Mul => "mul",
            BigIntOp::Div => "div",
            BigIntOp::Compare => "compare",
            BigIntOp::IsLt => "is_lt",
            BigIntOp::IsLe => "is_le",
            BigIntOp::IsEq => "is_eq",
            BigIntOp::IsNotZero => "is_not_zero",
            BigIntOp::AssertEq => "assert_eq",
        }
    }

    pub fn slots(self) -> &'static [&'static str] {
        match self {
            BigIntOp::NumCheck
            | BigIntOp::IsNum
            | BigIntOp::Id
            | BigIntOp::Len
            | BigIntOp::Neg
            | BigIntOp::IsNotZero => &["a"],
            _ => &["a", "b"],
        }
    }

    pub fn outputs(self) -> usize {
        match self {
            BigIntOp::NumCheck | BigIntOp::AssertEq => 0,
            BigIntOp::Div => 2,
            _ => 1,
        }
    }
}

/// The single felt of a scalar result.
fn scalar<'r>(what: &str, cells: &'r [Felt]) -> Result<&'r Felt, PredicateError> {
    match cells {
        [felt] => Ok(felt),
        _ => Err(PredicateError::rejected(format!(
            "{what}: expected one felt, got {}",
            cells.len()
        ))),
    }
}

fn expect_shape(
    name: &str,
    slots: usize,
    outputs: usize,
    args: &[Cells],
    results: &[Cells],
) -> Result<(), PredicateError> {
    check!(
        args.len() == slots && results.len() == outputs,
        "{name}: expected {slots} argument(s) and {outputs} result(s), got {} and {}",
        args.len(),
        results.len()
    );
    Ok(())
}

/// `got` must be the very cells that went in.
fn expect_same_cells(what: &str, got: &[Felt], want: &[Felt]) -> Result<(), PredicateError> {
    check!(
        got == want,
        "{what}: got {}, expected {}",
        render_results(got),
        render_results(want)
    );
    Ok(())
}

fn is_digit(radix: Radix, cells: &[Felt]) -> bool {
    match cells {
        [d] => u128::try_from(d.value()).is_ok_and(|d| d < radix.base()),
        _ => false,
    }
}

fn carry(cells: &[Felt]) -> Option<u8> {
    match cells {
        [c] => c.as_bool().map(u8::from),
        _ => None,
    }
}

fn expect_biguint(
    radix: Radix,
    op: BigUintOp,
    args: &[Cells],
    results: &[Cells],
) -> Result<(), PredicateError> {
    let name = op.name();
    expect_shape(name, op.slots().len(), op.outputs(), args, results)?;
    let num = |i: usize| radix.read_num(&args[i]);
    match op {
        BigUintOp::NumCheck => num(0).map(drop).map_err(PredicateError::from),
        BigUintOp::IsNum => expect_bool(name, scalar(name, &results[0])?, num(0).is_ok()),
        BigUintOp::Id => {
            num(0)?;
            expect_same_cells(name, &results[0], &args[0])
        }
        BigUintOp::Len => expect_int(name, scalar(name, &results[0])?, &BigInt::from(num(0)?.len())),
        BigUintOp::IsNotZero => expect_bool(name, scalar(name, &results[0])?, !num(0)?.is_zero()),
        BigUintOp::Add => expect_num(name, &results[0], &radix.add(&num(0)?, &num(1)?)),
        BigUintOp::Sub => {
            let (sign, diff) = radix.sub(&num(0)?, &num(1)?);
            expect_int("sign", scalar("sign", &results[0])?, &sign.to_int())?;
            expect_num(name, &results[1], &diff)
        }
        BigUintOp::Mul => expect_num(name, &results[0], &radix.mul(&num(0)?, &num(1)?)),
        BigUintOp::MulByDigit => {
            let d = scalar("d", &args[1])?;
            let digit = u128::try_from(d.value()).map_err(|_| PredicateError::rejected("d is not a digit"))?;
            check!(digit < radix.base(), "d = {d} is not below the radix");
            expect_num(name, &results[0], &radix.mul_by_digit(&num(0)?, digit))
        }
        BigUintOp::Div => {
            let (q, r) = radix.div(&num(0)?, &num(1)?);
            expect_num("quotient", &results[0], &q)?;
            expect_num("remainder", &results[1], &r)
        }
        BigUintOp::Compare => {
            let want = BigInt::from(radix.compare(&num(0)?, &num(1)?));
            expect_int(name, scalar(name, &results[0])?, &want)
        }
        BigUintOp::IsLt => expect_bool(name, scalar(name, &results[0])?, radix.is_lt(&num(0)?, &num(1)?)),
        BigUintOp::IsLe => expect_bool(name, scalar(name, &results[0])?, radix.is_le(&num(0)?, &num(1)?)),
        BigUintOp::IsEq => expect_bool(name, scalar(name, &results[0])?, radix.is_eq(&num(0)?, &num(1)?)),
        BigUintOp::AssertEq => {
            let (a, b) = (num(0)?, num(1)?);
            check!(radix.is_eq(&a, &b), "assert_eq passed on {a} and {b}");
            Ok(())
        }
        BigUintOp::AssertSumEqWithCarry => {
            let (a, b, res) = (num(0)?, num(1)?, num(2)?);
            let c = carry(&args[3]).ok_or_else(|| PredicateError::rejected("carry is not 0 or 1"))?;
            let sum = radix.num_to_int(&a) + radix.num_to_int(&b) + BigUint::from(c);
            check!(
                sum == radix.num_to_int(&res),
                "assert_sum_eq_with_carry passed on {a} + {b} + {c} != {res}"
            );
            Ok(())
        }
    }
}

/// Why a `biguint.<op>` call on `args` should fail, if it should.
fn biguint_failure_reason(radix: Radix, op: BigUintOp, args: &[Cells]) -> Option<String> {
    let slots = op.slots();
    if args.len() != slots.len() {
        return Some(format!("expected {} argument(s), got {}", slots.len(), args.len()));
    }
    if op == BigUintOp::IsNum {
        return None;
    }
    let mut operands = Vec::with_capacity(args.len());
    for (slot, cells) in slots.iter().zip(args) {
        match *slot {
            "d" if !is_digit(radix, cells) => return Some("d is not a single digit".to_string()),
            "carry" if carry(cells).is_none() => return Some("carry is not 0 or 1".to_string()),
            "d" | "carry" => {}
            _ => match radix.read_num(cells) {
                Ok(n) => operands.push(radix.num_to_int(&n)),
                Err(e) => return Some(format!("{slot} is malformed: {e}")),
            },
        }
    }
    match (op, operands.as_slice()) {
        (BigUintOp::AssertEq, [a, b]) if a != b => Some(format!("{a} != {b}")),
        (BigUintOp::AssertSumEqWithCarry, [a, b, res]) => {
            let c = carry(&args[3]).map(BigUint::from).unwrap_or_default();
            (a + b + &c != *res).then(|| format!("{a} + {b} + {c} != {res}"))
        }
        _ => None,
    }
}

fn expect_bigint(
    radix: Radix,
    op: BigIntOp,
    args: &[Cells],
    results: &[Cells],
) -> Result<(), PredicateError> {
    let name = op.name();
    expect_shape(name, op.slots().len(), op.outputs(), args, results)?;
    let signed = |i: usize| radix.read_signed(&args[i]);
    match op {
        BigIntOp::NumCheck => signed(0).map(drop).map_err(PredicateError::from),
        BigIntOp::IsNum => expect_bool(name, scalar(name, &results[0])?, signed(0).is_ok()),
        BigIntOp::Id => {
            signed(0)?;
            expect_same_cells(name, &results[0], &args[0])
        }
        BigIntOp::Len => {
            let len = signed(0)?.magnitude.len();
            expect_int(name, scalar(name, &results[0])?, &BigInt::from(len))
        }
        BigIntOp::Neg => expect_signed(name, radix, &results[0], &radix.signed_neg(&signed(0)?)),
        BigIntOp::IsNotZero => {
            expect_bool(name, scalar(name, &results[0])?, radix.signed_is_not_zero(&signed(0)?))
        }
        BigIntOp::Add => {
            let want = radix.signed_add(&signed(0)?, &signed(1)?);
            expect_signed(name, radix, &results[0], &want)
        }
        BigIntOp::Sub => {
            let want = radix.signed_sub(&signed(0)?, &signed(1)?);
            expect_signed(name, radix, &results[0], &want)
        }
        BigIntOp::Mul => {
            let want = radix.signed_mul(&signed(0)?, &signed(1)?);
            expect_signed(name, radix, &results[0], &want)
        }
        BigIntOp::Div => {
            let (q, r) = radix.signed_div(&signed(0)?, &signed(1)?);
            expect_signed("quotient", radix, &results[0], &q)?;
            expect_signed("remainder", radix, &results[1], &r)
        }
        BigIntOp::Compare => {
            let want = BigInt::from(radix.signed_compare(&signed(0)?, &signed(1)?));
            expect_int(name, scalar(name, &results[0])?, &want)
        }
        BigIntOp::IsLt => {
            let want = radix.signed_is_lt(&signed(0)?, &signed(1)?);
            expect_bool(name, scalar(name, &results[0])?, want)
        }
        BigIntOp::IsLe => {
            let want = radix.signed_is_le(&signed(0)?, &signed(1)?);
            expect_bool(name, scalar(name, &results[0])?, want)
        }
        BigIntOp::IsEq => {
            let want = radix.signed_is_eq(&signed(0)?, &signed(1)?);
            expect_bool(name, scalar(name, &results[0])?, want)
        }
        BigIntOp::AssertEq => {
            let (a, b) = (signed(0)?, signed(1)?);
            check!(radix.signed_is_eq(&a, &b), "assert_eq passed on {a} and {b}");
            Ok(())
        }
    }
}

/// Why a `bigint.<op>` call on `args` should fail, if it should.
fn bigint_failure_reason(radix: Radix, op: BigIntOp, args: &[Cells]) -> Option<String> {
    let slots = op.slots();
    if args.len() != slots.len() {
        return Some(format!("expected {} argument(s), got {}", slots.len(), args.len()));
    }
    if op == BigIntOp::IsNum {
        return None;
    }
    let mut operands = Vec::with_capacity(args.len());
    for (slot, cells) in slots.iter().zip(args) {
        match radix.read_signed(cells) {
            Ok(n) => operands.push(n),
            Err(e) => return Some(format!("{slot} is malformed: {e}")),
        }
    }
    match (op, operands.as_slice()) {
        (BigIntOp::AssertEq, [a, b]) if a != b => Some(format!("{a} != {b}")),
        _ => None,
    }
}

/// `biguint.<op>` over magnitudes in `radix`.
pub fn biguint_spec(radix: Radix, op: BigUintOp) -> TestSpec<Cells, Cells> {
    TestSpec::builder(format!("biguint.{}", op.name()), move |args: &[Cells], results: &[Cells]| {
        expect_biguint(radix, op, args, results)
    })
    .args(op.slots().iter().copied())
    .capability(Capability::RangeCheck)
    .outputs(op.outputs())
    .failure(move |args: &[Cells]| {
        let reason = biguint_failure_reason(radix, op, args);
        expect_failure_when(reason.is_some(), "operands are well formed")
    })
    .build()
}

/// `bigint.<op>` over signed values in `radix`.
pub fn bigint_spec(radix: Radix, op: BigIntOp) -> TestSpec<Cells, Cells> {
    TestSpec::builder(format!("bigint.{}", op.name()), move |args: &[Cells], results: &[Cells]| {
        expect_bigint(radix, op, args, results)
    })
    .args(op.slots().iter().copied())
    .capability(Capability::RangeCheck)
    .outputs(op.outputs())
    .failure(move |args: &[Cells]| {
        let reason = bigint_failure_reason(radix, op, args);
        expect_failure_when(reason.is_some(), "operands are well formed")
    })
    .build()
}
