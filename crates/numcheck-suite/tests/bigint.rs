mod common;

use num_bigint::BigInt;
use numcheck_gen::bignum::{
    arb_raw_signed, arb_signed, arb_signed_pair, arb_signed_pair_of_len_at_most, some_signed,
};
use numcheck_harness::{examples, run, ClassifyError, OutcomeKind, RuntimeFailure};
use numcheck_model::{BigNum, Felt, Radix, Sign, SignedNum};
use numcheck_suite::{bigint_spec, BigIntOp, BigNumEngine};
use proptest::prelude::*;

fn radix(bits: u32) -> Radix {
    Radix::new(bits).unwrap()
}

fn run_op(bits: u32, op: BigIntOp, args: &[Vec<Felt>]) -> Result<OutcomeKind, TestCaseError> {
    let mut engine = BigNumEngine::new(bits);
    common::run_engine(&mut engine, &bigint_spec(radix(bits), op), args)
}

fn unary_ops() -> impl Iterator<Item = BigIntOp> {
    BigIntOp::ALL.into_iter().filter(|op| op.slots().len() == 1)
}

/// Two-operand functions that answer on every well-formed pair.
fn binary_ops() -> impl Iterator<Item = BigIntOp> {
    BigIntOp::ALL
        .into_iter()
        .filter(|op| op.slots().len() == 2 && *op != BigIntOp::AssertEq)
}

/// A signed value whose sign felt is any of `-2..=2`.
fn raw_signed_felts(sign: &BigInt, magnitude: &BigNum) -> Vec<Felt> {
    let mut cells = vec![Felt::from_int(sign)];
    cells.extend(magnitude.to_felts());
    cells
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: common::cases(128),
        .. ProptestConfig::default()
    })]

    #[test]
    fn linear_ops((a, b) in arb_signed_pair(radix(64))) {
        common::init_tracing();
        for op in binary_ops().filter(|op| !matches!(op, BigIntOp::Mul | BigIntOp::Div)) {
            let kind = run_op(64, op, &[a.to_felts(), b.to_felts()])?;
            prop_assert_eq!(kind, OutcomeKind::ExpectedSuccess, "{}", op.name());
        }
    }

    #[test]
    fn quadratic_ops((a, b) in arb_signed_pair_of_len_at_most(radix(125), 3)) {
        for op in [BigIntOp::Mul, BigIntOp::Div] {
            let kind = run_op(125, op, &[a.to_felts(), b.to_felts()])?;
            prop_assert_eq!(kind, OutcomeKind::ExpectedSuccess, "{}", op.name());
        }
    }

    #[test]
    fn small_radix_ops((a, b) in arb_signed_pair(radix(4))) {
        for op in binary_ops() {
            let kind = run_op(4, op, &[a.to_felts(), b.to_felts()])?;
            prop_assert_eq!(kind, OutcomeKind::ExpectedSuccess, "{}", op.name());
        }
    }

    #[test]
    fn unary(a in arb_signed(radix(16))) {
        for op in unary_ops() {
            let kind = run_op(16, op, &[a.to_felts()])?;
            prop_assert_eq!(kind, OutcomeKind::ExpectedSuccess, "{}", op.name());
        }
    }

    #[test]
    fn assert_eq_is_numeric((a, b) in arb_signed_pair(radix(8))) {
        let kind = run_op(8, BigIntOp::AssertEq, &[a.to_felts(), b.to_felts()])?;
        let want = if a == b {
            OutcomeKind::ExpectedSuccess
        } else {
            OutcomeKind::ExpectedFailure
        };
        prop_assert_eq!(kind, want);
    }

    #[test]
    fn raw_operands((sign, magnitude) in arb_raw_signed(radix(8))) {
        let cells = raw_signed_felts(&sign, &magnitude);
        let well_formed = radix(8).read_signed(&cells).is_ok();
        let kind = run_op(8, BigIntOp::IsNum, &[cells.clone()])?;
        prop_assert_eq!(kind, OutcomeKind::ExpectedSuccess);
        let kind = run_op(8, BigIntOp::Neg, &[cells])?;
        prop_assert_eq!(kind == OutcomeKind::ExpectedSuccess, well_formed);
    }
}

#[test]
fn unit_examples() {
    common::init_tracing();
    for bits in [4, 125] {
        let corpus = some_signed(radix(bits));
        let pairs: Vec<(SignedNum, SignedNum)> = corpus
            .iter()
            .flat_map(|a| corpus.iter().map(move |b| (a.clone(), b.clone())))
            .collect();
        let mut engine = BigNumEngine::new(bits);
        for op in binary_ops().chain([BigIntOp::AssertEq]) {
            let spec = bigint_spec(radix(bits), op);
            examples(&pairs, |(a, b)| run(&mut engine, &spec, &[a.to_felts(), b.to_felts()], None))
                .unwrap();
        }
        for op in unary_ops() {
            let spec = bigint_spec(radix(bits), op);
            examples(&corpus, |a| run(&mut engine, &spec, &[a.to_felts()], None)).unwrap();
        }
    }
}

#[test]
fn test_negative_zero_operands() {
    let r = radix(8);
    let neg_zero = SignedNum::new(Sign::Neg, BigNum::zero());
    let seven = r.int_to_signed(&BigInt::from(7));
    for op in binary_ops() {
        let kind = run_op(8, op, &[neg_zero.to_felts(), seven.to_felts()]).unwrap();
        assert_eq!(kind, OutcomeKind::ExpectedSuccess, "{}", op.name());
    }
    for op in unary_ops() {
        let kind = run_op(8, op, &[neg_zero.to_felts()]).unwrap();
        assert_eq!(kind, OutcomeKind::ExpectedSuccess, "{}", op.name());
    }
    let zero = SignedNum::zero();
    let kind = run_op(8, BigIntOp::AssertEq, &[neg_zero.to_felts(), zero.to_felts()]).unwrap();
    assert_eq!(kind, OutcomeKind::ExpectedSuccess);
}

#[test]
fn test_wrong_targets_are_caught() {
    common::init_tracing();
    let r = radix(8);
    let a = r.int_to_signed(&BigInt::from(-0x1234));
    let b = r.int_to_signed(&BigInt::from(0x56));
    for op in BigIntOp::ALL {
        let args: Vec<Vec<Felt>> = match op.slots().len() {
            1 => vec![a.to_felts()],
            _ if op == BigIntOp::AssertEq => vec![a.to_felts(), a.to_felts()],
            _ => vec![a.to_felts(), b.to_felts()],
        };
        let spec = bigint_spec(r, op);
        let kind = run(&mut BigNumEngine::new(8), &spec, &args, None).unwrap();
        assert_eq!(kind, OutcomeKind::ExpectedSuccess, "{}", op.name());

        let err = run(&mut common::always_fails::<Vec<Felt>, Vec<Felt>>, &spec, &args, None).unwrap_err();
        assert!(matches!(err, ClassifyError::UnexpectedFailure { .. }), "{}", op.name());

        if op.outputs() > 0 {
            let mut wrong = common::off_by_one(BigNumEngine::new(8), common::bump_cells);
            let err = run(&mut wrong, &spec, &args, None).unwrap_err();
            assert!(matches!(err, ClassifyError::UnexpectedSuccess { .. }), "{}", op.name());
        }
    }
}

#[test]
fn test_wrong_argument_count_is_an_unexpected_failure() {
    for op in BigIntOp::ALL {
        let err = run(&mut BigNumEngine::new(8), &bigint_spec(radix(8), op), &[], None).unwrap_err();
        assert!(
            matches!(
                err,
                ClassifyError::UnexpectedFailure {
                    failure: RuntimeFailure::InputArity { actual: 0, .. },
                    ..
                }
            ),
            "{}",
            op.name()
        );
    }
}

#[test]
fn test_truncating_division_signs() {
    let r = radix(8);
    let cases = [(7, 2, 3, 1), (7, -2, -3, 1), (-7, 2, -3, -1), (-7, -2, 3, -1)];
    for (a, b, q, rem) in cases {
        let (got_q, got_r) = r.signed_div(
            &r.int_to_signed(&BigInt::from(a)),
            &r.int_to_signed(&BigInt::from(b)),
        );
        assert_eq!(r.signed_to_int(&got_q), BigInt::from(q), "{a} / {b}");
        assert_eq!(r.signed_to_int(&got_r), BigInt::from(rem), "{a} % {b}");
    }
}
