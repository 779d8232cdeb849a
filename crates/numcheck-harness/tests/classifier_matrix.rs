use numcheck_harness::{
    run, Accumulator, Call, ClassifyError, OutcomeKind, PredicateError, RuntimeFailure, TestSpec,
};
use numcheck_model::Felt;
use proptest::prelude::*;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .with_target(false)
        .without_time()
        .try_init();
}

fn verdict(ok: bool, message: &'static str) -> Result<(), PredicateError> {
    if ok {
        Ok(())
    } else {
        Err(PredicateError::rejected(message))
    }
}

fn spec(success_ok: bool, failure_ok: Option<bool>) -> TestSpec {
    let builder = TestSpec::builder("double", move |_: &[Felt], _: &[Felt]| {
        verdict(success_ok, "wrong result")
    })
    .args(["a"])
    .outputs(1);
    let builder = match failure_ok {
        Some(ok) => builder.failure(move |_: &[Felt]| verdict(ok, "should not fail")),
        None => builder,
    };
    builder.build()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    #[test]
    fn every_cell_is_classified_once(
        fails in any::<bool>(),
        success_ok in any::<bool>(),
        failure_ok in proptest::option::of(any::<bool>()),
        a in any::<i64>(),
    ) {
        init_tracing();
        let mut target = |call: &Call<'_, Felt>| -> Result<Vec<Felt>, RuntimeFailure> {
            if fails {
                Err(RuntimeFailure::new("refused"))
            } else {
                Ok(vec![Felt::from_int(&(call.args[0].to_signed() * 2))])
            }
        };
        let mut acc = Accumulator::new();
        let result = run(&mut target, &spec(success_ok, failure_ok), &[Felt::from(a)], Some(&mut acc));

        let want = match (fails, success_ok, failure_ok) {
            (false, true, _) => OutcomeKind::ExpectedSuccess,
            (false, false, _) => OutcomeKind::UnexpectedSuccess,
            (true, _, Some(true)) => OutcomeKind::ExpectedFailure,
            (true, _, _) => OutcomeKind::UnexpectedFailure,
        };
        prop_assert_eq!(acc.len(), 1);
        prop_assert_eq!(acc.outcomes()[0].kind(), want);
        match result {
            Ok(kind) => {
                prop_assert!(want.is_expected());
                prop_assert_eq!(kind, want);
            }
            Err(ClassifyError::UnexpectedSuccess { .. }) => {
                prop_assert_eq!(want, OutcomeKind::UnexpectedSuccess);
            }
            Err(ClassifyError::UnexpectedFailure { failure, .. }) => {
                prop_assert_eq!(want, OutcomeKind::UnexpectedFailure);
                prop_assert_eq!(failure, RuntimeFailure::new("refused"));
            }
            Err(other) => prop_assert!(false, "unexpected error {}", other),
        }
    }
}

#[test]
fn test_accumulated_report_renders_negative_felts() {
    init_tracing();
    let mut target = |call: &Call<'_, Felt>| -> Result<Vec<Felt>, RuntimeFailure> {
        Ok(vec![Felt::from_int(&(call.args[0].to_signed() * 2))])
    };
    let mut acc = Accumulator::new();
    run(&mut target, &spec(true, None), &[Felt::from(-3)], Some(&mut acc)).unwrap();
    let report = acc.report();
    assert!(report.starts_with("double(-3) -> [-6]  Success (as expected)"), "{report}");
}
