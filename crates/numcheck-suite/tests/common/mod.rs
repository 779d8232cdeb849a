#![allow(dead_code, unused_macros)]

use num_bigint::BigInt;
use numcheck_gen::to_felts;
use numcheck_harness::{run, Call, ClassifyError, OutcomeKind, RuntimeFailure, Target, TestSpec};
use numcheck_model::{Felt, FixedWidth};
use numcheck_suite::{fixed_spec, BigNumEngine, FixedOp, NativeTarget, Word};
use proptest::test_runner::TestCaseError;
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .with_target(false)
        .without_time()
        .try_init();
}

/// Case count for `proptest!` blocks, overridable with `PROPTEST_CASES`.
pub fn cases(default: u32) -> u32 {
    std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

pub fn run_fixed<W: Word>(
    width: &FixedWidth,
    op: FixedOp,
    args: &[BigInt],
) -> Result<OutcomeKind, ClassifyError> {
    let mut target = NativeTarget::<W>::new();
    run(&mut target, &fixed_spec(width, op), &to_felts(args), None)
}

/// [`run_fixed`] for use inside `proptest!` bodies.
pub fn prop_fixed<W: Word>(
    width: &FixedWidth,
    op: FixedOp,
    args: &[BigInt],
) -> Result<OutcomeKind, TestCaseError> {
    run_fixed::<W>(width, op, args).map_err(|e| TestCaseError::fail(e.to_string()))
}

pub fn run_engine(
    engine: &mut BigNumEngine,
    spec: &TestSpec<Vec<Felt>, Vec<Felt>>,
    args: &[Vec<Felt>],
) -> Result<OutcomeKind, TestCaseError> {
    run(engine, spec, args, None).map_err(|e| TestCaseError::fail(e.to_string()))
}

/// Wraps `target` so that the first result of every successful call goes
/// through `bump`.
pub fn off_by_one<A, R, T>(
    mut target: T,
    bump: fn(&mut R),
) -> impl FnMut(&Call<'_, A>) -> Result<Vec<R>, RuntimeFailure>
where
    T: Target<A, R>,
{
    move |call| {
        let mut results = target.invoke(call)?;
        if let Some(first) = results.first_mut() {
            bump(first);
        }
        Ok(results)
    }
}

pub fn bump_felt(felt: &mut Felt) {
    *felt = Felt::from_int(&(felt.to_int() + 1));
}

/// Bumps the leading cell: the sign of a signed value, the lowest digit of a
/// magnitude, or the sentinel of zero.
pub fn bump_cells(cells: &mut Vec<Felt>) {
    if let Some(first) = cells.first_mut() {
        bump_felt(first);
    }
}

/// A target that fails every call.
pub fn always_fails<A, R>(_: &Call<'_, A>) -> Result<Vec<R>, RuntimeFailure> {
    Err(RuntimeFailure::new("spurious failure"))
}

/// Two-argument operations other than shifts and `cond_neg`.
pub fn binary_ops() -> impl Iterator<Item = FixedOp> {
    FixedOp::ALL
        .into_iter()
        .filter(|op| op.arity() == 2 && !op.is_shift() && *op != FixedOp::CondNeg)
}

pub fn unary_ops() -> impl Iterator<Item = FixedOp> {
    FixedOp::ALL.into_iter().filter(|op| op.arity() == 1)
}

/// Randomized and unit-example coverage of every fixed-width operation for
/// one native word type.
macro_rules! fixed_width_suite {
    ($word:ty, $width:expr) => {
        use ::num_bigint::BigInt;
        use ::numcheck_gen::fixed::{
            arb_cond, arb_num, arb_num_out_of_bounds, arb_num_pair, arb_shift, some_num,
            some_num_out_of_bounds, some_shift,
        };
        use ::numcheck_harness::{examples, OutcomeKind};
        use ::numcheck_model::FixedWidth;
        use ::numcheck_suite::FixedOp;
        use ::proptest::prelude::*;

        fn width() -> FixedWidth {
            $width
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: common::cases(256),
                .. ProptestConfig::default()
            })]

            #[test]
            fn binary_ops_in_range((a, b) in arb_num_pair(&width())) {
                common::init_tracing();
                for op in common::binary_ops() {
                    let kind = common::prop_fixed::<$word>(&width(), op, &[a.clone(), b.clone()])?;
                    prop_assert_eq!(kind, OutcomeKind::ExpectedSuccess, "{}", op.name());
                }
            }

            #[test]
            fn binary_ops_out_of_range(
                a in arb_num_out_of_bounds(&width()),
                b in arb_num_out_of_bounds(&width()),
            ) {
                let w = width();
                let in_range = w.num_check(&a) && w.num_check(&b);
                for op in common::binary_ops() {
                    let kind = common::prop_fixed::<$word>(&w, op, &[a.clone(), b.clone()])?;
                    prop_assert_eq!(kind == OutcomeKind::ExpectedSuccess, in_range);
                }
            }

            #[test]
            fn unary_ops(a in arb_num_out_of_bounds(&width())) {
                for op in common::unary_ops() {
                    common::prop_fixed::<$word>(&width(), op, &[a.clone()])?;
                }
            }

            #[test]
            fn shifts(a in arb_num(&width()), b in arb_shift(&width())) {
                let w = width();
                for op in [FixedOp::Shl, FixedOp::Shr] {
                    let kind = common::prop_fixed::<$word>(&w, op, &[a.clone(), b.clone()])?;
                    let want = if w.shift_out_of_range(&b) {
                        OutcomeKind::ExpectedFailure
                    } else {
                        OutcomeKind::ExpectedSuccess
                    };
                    prop_assert_eq!(kind, want);
                }
            }

            #[test]
            fn cond_neg(a in arb_num(&width()), b in arb_cond()) {
                common::prop_fixed::<$word>(&width(), FixedOp::CondNeg, &[a, b])?;
            }

            #[test]
            fn num_check(a in arb_num_out_of_bounds(&width())) {
                let w = width();
                let kind = common::prop_fixed::<$word>(&w, FixedOp::NumCheck, &[a.clone()])?;
                let want = if w.num_check(&a) {
                    OutcomeKind::ExpectedSuccess
                } else {
                    OutcomeKind::ExpectedFailure
                };
                prop_assert_eq!(kind, want);
            }
        }

        #[test]
        fn wrong_targets_are_caught() {
            use ::numcheck_harness::{run, ClassifyError};
            use ::numcheck_model::Felt;
            use ::numcheck_suite::{fixed_spec, NativeTarget};

            common::init_tracing();
            let w = width();
            for op in FixedOp::ALL {
                let b = if op == FixedOp::CondNeg { 1 } else { 5 };
                let args: Vec<Felt> = [3i64, b][..op.arity()].iter().map(|&n| Felt::from(n)).collect();
                let spec = fixed_spec(&w, op);

                let kind = run(&mut NativeTarget::<$word>::new(), &spec, &args, None).unwrap();
                assert_eq!(kind, OutcomeKind::ExpectedSuccess, "{}", op.name());

                let err = run(&mut common::always_fails::<Felt, Felt>, &spec, &args, None).unwrap_err();
                assert!(matches!(err, ClassifyError::UnexpectedFailure { .. }), "{}", op.name());

                if op.outputs() > 0 {
                    let mut wrong = common::off_by_one(NativeTarget::<$word>::new(), common::bump_felt);
                    let err = run(&mut wrong, &spec, &args, None).unwrap_err();
                    assert!(matches!(err, ClassifyError::UnexpectedSuccess { .. }), "{}", op.name());
                }
            }
        }

        #[test]
        fn wrong_argument_count_is_an_unexpected_failure() {
            use ::numcheck_harness::{run, ClassifyError, RuntimeFailure};
            use ::numcheck_suite::{fixed_spec, NativeTarget};

            let w = width();
            for op in FixedOp::ALL {
                let err = run(&mut NativeTarget::<$word>::new(), &fixed_spec(&w, op), &[], None)
                    .unwrap_err();
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
        fn unit_examples() {
            common::init_tracing();
            let w = width();
            let corpus = some_num_out_of_bounds(&w);
            let pairs: Vec<(BigInt, BigInt)> = corpus
                .iter()
                .flat_map(|a| corpus.iter().map(move |b| (a.clone(), b.clone())))
                .collect();
            for op in common::binary_ops() {
                examples(&pairs, |(a, b)| {
                    common::run_fixed::<$word>(&w, op, &[a.clone(), b.clone()])
                })
                .unwrap();
            }
            for op in common::unary_ops() {
                examples(&corpus, |a| common::run_fixed::<$word>(&w, op, &[(*a).clone()])).unwrap();
            }
            for a in some_num(&w) {
                for op in [FixedOp::Shl, FixedOp::Shr] {
                    examples(some_shift(&w), |b| {
                        common::run_fixed::<$word>(&w, op, &[a.clone(), b.clone()])
                    })
                    .unwrap();
                }
                examples((-1..=2).map(BigInt::from), |b| {
                    common::run_fixed::<$word>(&w, FixedOp::CondNeg, &[a.clone(), b.clone()])
                })
                .unwrap();
            }
        }
    };
}
