//! Test specs for the fixed-width library, judged by [`FixedWidth`].
//!
//! Every function range-checks its inputs, so an argument outside the word's
//! range is an expected failure. Shifts additionally fail on amounts outside
//! `[0, 2^128)` and `cond_neg` on flags outside `{0, 1}`.
//!
//! The felt-level helpers the library is built on (`bitwise_and`,
//! `bitwise_xor`, `is_le`) have their own [`FeltOp`] specs; they take any
//! pair of felts and never fail.

use num_bigint::BigInt;
use numcheck_harness::predicate::{expect_bool, expect_failure_when, expect_int};
use numcheck_harness::{check, Capability, PredicateError, TestSpec};
use numcheck_model::{Felt, FixedWidth};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixedOp {
    Add,
    Sub,
    Mul,
    DivRem,
    Shl,
    Shr,
    And,
    Or,
    Xor,
    Not,
    Neg,
    CondNeg,
    Eq,
    Lt,
    Le,
    Pow2,
    AbsSign,
    Id,
    NumCheck,
}

impl FixedOp {
    pub const ALL: [FixedOp; 19] = [
        FixedOp::Add,
        FixedOp::Sub,
        FixedOp::Mul,
        FixedOp::DivRem,
        FixedOp::Shl,
        FixedOp::Shr,
        FixedOp::And,
        FixedOp::Or,
        FixedOp::Xor,
        FixedOp::Not,
        FixedOp::Neg,
        FixedOp::CondNeg,
        FixedOp::Eq,
        FixedOp::Lt,
        FixedOp::Le,
        FixedOp::Pow2,
        FixedOp::AbsSign,
        FixedOp::Id,
        FixedOp::NumCheck,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FixedOp::Add => "add",
            FixedOp::Sub => "sub",
            FixedOp::Mul => "mul",
            FixedOp::DivRem => "div_rem",
            FixedOp::Shl => "shl",
            FixedOp::Shr => "shr",
            FixedOp::And => "and",
            FixedOp::Or => "or",
            FixedOp::Xor => "xor",
            FixedOp::Not => "not",
            FixedOp::Neg => "neg",
            FixedOp::CondNeg => "cond_neg",
            FixedOp::Eq => "eq",
            FixedOp::Lt => "lt",
            FixedOp::Le => "le",
            FixedOp::Pow2 => "pow2",
            FixedOp::AbsSign => "abs_sign",
            FixedOp::Id => "id",
            FixedOp::NumCheck => "num_check",
        }
    }

    /// Number of arguments.
    pub fn arity(self) -> usize {
        match self {
            FixedOp::Not
            | FixedOp::Neg
            | FixedOp::Pow2
            | FixedOp::AbsSign
            | FixedOp::Id
            | FixedOp::NumCheck => 1,
            _ => 2,
        }
    }

    /// Number of results.
    pub fn outputs(self) -> usize {
        match self {
            FixedOp::Add | FixedOp::Sub | FixedOp::Mul | FixedOp::DivRem | FixedOp::AbsSign => 2,
            FixedOp::NumCheck => 0,
            _ => 1,
        }
    }

    pub fn is_bitwise(self) -> bool {
        matches!(self, FixedOp::And | FixedOp::Or | FixedOp::Xor)
    }

    pub fn is_shift(self) -> bool {
        matches!(self, FixedOp::Shl | FixedOp::Shr)
    }
}

fn ints(felts: &[Felt]) -> Vec<BigInt> {
    felts.iter().map(Felt::to_range_checked).collect()
}

/// Why a call on `args` should fail, if it should.
fn failure_reason(width: &FixedWidth, op: FixedOp, args: &[BigInt]) -> Option<String> {
    if args.len() != op.arity() {
        return Some(format!("expected {} argument(s), got {}", op.arity(), args.len()));
    }
    let a = args.first()?;
    if !width.num_check(a) {
        return Some(format!("a = {a} is out of range"));
    }
    let b = args.get(1)?;
    match op {
        FixedOp::Shl | FixedOp::Shr if width.shift_out_of_range(b) => {
            Some(format!("shift amount {b} is out of range"))
        }
        FixedOp::Shl | FixedOp::Shr => None,
        FixedOp::CondNeg if width.cond_neg(a, b).is_err() => {
            Some(format!("condition flag {b} is not 0 or 1"))
        }
        FixedOp::CondNeg => None,
        _ if !width.num_check(b) => Some(format!("b = {b} is out of range")),
        _ => None,
    }
}

fn expect_results(
    op: FixedOp,
    width: &FixedWidth,
    args: &[BigInt],
    results: &[Felt],
) -> Result<(), PredicateError> {
    let name = op.name();
    check!(
        args.len() == op.arity() && results.len() == op.outputs(),
        "{name}: expected {} argument(s) and {} result(s), got {} and {}",
        op.arity(),
        op.outputs(),
        args.len(),
        results.len()
    );
    let a = &args[0];
    match op {
        FixedOp::Add | FixedOp::Sub => {
            let b = &args[1];
            let want = if op == FixedOp::Add {
                width.add(a, b)
            } else {
                width.sub(a, b)
            };
            expect_int(name, &results[0], &want.value)?;
            expect_int("overflow", &results[1], &want.overflow)
        }
        FixedOp::Mul => {
            let (result, overflow) = (results[0].to_range_checked(), results[1].to_range_checked());
            check!(
                width.mul_relation_holds(a, &args[1], &result, &overflow),
                "mul({a}, {}) returned ({result}, {overflow})",
                args[1]
            );
            Ok(())
        }
        FixedOp::DivRem => {
            let (q, r) = width.div_rem(a, &args[1]);
            expect_int("quotient", &results[0], &q)?;
            expect_int("remainder", &results[1], &r)
        }
        FixedOp::Shl => expect_int(name, &results[0], &width.shl(a, &args[1])?),
        FixedOp::Shr => expect_int(name, &results[0], &width.shr(a, &args[1])?),
        FixedOp::And => expect_int(name, &results[0], &width.and(a, &args[1])),
        FixedOp::Or => expect_int(name, &results[0], &width.or(a, &args[1])),
        FixedOp::Xor => expect_int(name, &results[0], &width.xor(a, &args[1])),
        FixedOp::Not => expect_int(name, &results[0], &width.not(a)),
        FixedOp::Neg => expect_int(name, &results[0], &width.neg(a)),
        FixedOp::CondNeg => expect_int(name, &results[0], &width.cond_neg(a, &args[1])?),
        FixedOp::Eq => expect_bool(name, &results[0], width.eq(a, &args[1])),
        FixedOp::Lt => expect_bool(name, &results[0], width.lt(a, &args[1])),
        FixedOp::Le => expect_bool(name, &results[0], width.le(a, &args[1])),
        FixedOp::Pow2 => expect_int(name, &results[0], &width.pow2(a)),
        FixedOp::AbsSign => {
            let (abs, sign) = width.abs_sign(a);
            // |MIN| does not fit the signed range, so compare raw values
            check!(
                results[0].value() == Felt::from_int(&abs).value(),
                "abs: got {}, expected {abs}",
                results[0]
            );
            expect_int("sign", &results[1], &sign)
        }
        FixedOp::Id => expect_int(name, &results[0], &width.id(a)),
        // the range check itself is the whole contract
        FixedOp::NumCheck => Ok(()),
    }
}

/// The [`TestSpec`] for `op` on `width`, named `<TypeName>.<op>`.
pub fn fixed_spec(width: &FixedWidth, op: FixedOp) -> TestSpec {
    let slots: &[&str] = if op.arity() == 1 { &["a"] } else { &["a", "b"] };
    let on_success = width.clone();
    let on_failure = width.clone();
    let mut builder = TestSpec::builder(
        format!("{}.{}", width.type_name(), op.name()),
        move |args: &[Felt], results: &[Felt]| {
            expect_results(op, &on_success, &ints(args), results)
        },
    )
    .args(slots.iter().copied())
    .capability(Capability::RangeCheck)
    .outputs(op.outputs())
    .failure(move |args: &[Felt]| {
        let reason = failure_reason(&on_failure, op, &ints(args));
        expect_failure_when(reason.is_some(), "all arguments are in range")
    });
    if op.is_bitwise() {
        builder = builder.capability(Capability::Bitwise);
    }
    builder.build()
}

/// Felt-level helpers, named without a type prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeltOp {
    BitwiseAnd,
    BitwiseXor,
    IsLe,
}

impl FeltOp {
    pub const ALL: [FeltOp; 3] = [FeltOp::BitwiseAnd, FeltOp::BitwiseXor, FeltOp::IsLe];

    pub fn name(self) -> &'static str {
        match self {
            FeltOp::BitwiseAnd => "bitwise_and",
            FeltOp::BitwiseXor => "bitwise_xor",
            FeltOp::IsLe => "is_le",
        }
    }

    fn capability(self) -> Capability {
        match self {
            FeltOp::BitwiseAnd | FeltOp::BitwiseXor => Capability::Bitwise,
            FeltOp::IsLe => Capability::RangeCheck,
        }
    }
}

/// The [`TestSpec`] for a felt-level helper. There is no failure predicate:
/// every pair of felts is a valid input.
pub fn felt_spec(op: FeltOp) -> TestSpec {
    TestSpec::builder(op.name(), move |args: &[Felt], results: &[Felt]| {
        let name = op.name();
        let ([x, y], [res]) = (args, results) else {
            return Err(PredicateError::rejected(format!(
                "{name}: expected 2 arguments and 1 result, got {} and {}",
                args.len(),
                results.len()
            )));
        };
        match op {
            FeltOp::BitwiseAnd => {
                let want = x.bitand(y);
                check!(*res == want, "{name}: got {res}, expected {want}");
                Ok(())
            }
            FeltOp::BitwiseXor => {
                let want = x.bitxor(y);
                check!(*res == want, "{name}: got {res}, expected {want}");
                Ok(())
            }
            FeltOp::IsLe => expect_bool(name, res, Felt::is_le(x, y)),
        }
    })
    .args(["x", "y"])
    .capability(op.capability())
    .outputs(1)
    .build()
}
