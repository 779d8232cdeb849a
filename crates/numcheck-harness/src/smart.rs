//! A stateful harness for interactive diagnosis.
//!
//! [`SmartHarness`] remembers the last spec and arguments it was given, so a
//! failing case can be re-run or invoked raw without rebuilding it, and can
//! optionally accumulate every outcome for a later report.

use crate::classifier::{invoke, run};
use crate::error::{ClassifyError, ClassifyResult, RuntimeFailure};
use crate::outcome::{Accumulator, Outcome, OutcomeKind};
use crate::render::Render;
use crate::spec::TestSpec;
use crate::target::Target;
use numcheck_model::Felt;
use std::sync::Arc;
use tracing::debug;

/// Harness behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Classify on `run`. When false, `run` only remembers the spec.
    pub run_tests: bool,
    /// Start with an accumulator installed.
    pub accumulate: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            run_tests: true,
            accumulate: false,
        }
    }
}

struct LastTest<A, R> {
    spec: Arc<TestSpec<A, R>>,
    args: Vec<A>,
}

/// Owns one target, an optional accumulator and the last test run.
pub struct SmartHarness<T, A = Felt, R = Felt> {
    target: T,
    config: HarnessConfig,
    accumulator: Option<Accumulator<A, R>>,
    last: Option<LastTest<A, R>>,
}

impl<T, A, R> SmartHarness<T, A, R>
where
    T: Target<A, R>,
    A: Clone + Render,
    R: Render,
{
    pub fn new(target: T) -> Self {
        Self::with_config(target, HarnessConfig::default())
    }

    pub fn with_config(target: T, config: HarnessConfig) -> Self {
        Self {
            target,
            config,
            accumulator: config.accumulate.then(Accumulator::new),
            last: None,
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn set_run_tests(&mut self, run_tests: bool) {
        self.config.run_tests = run_tests;
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Remember `spec` and `args` as the last test and, unless tests are
    /// switched off, classify them. `Ok(None)` means nothing was run.
    pub fn run(
        &mut self,
        spec: Arc<TestSpec<A, R>>,
        args: Vec<A>,
    ) -> ClassifyResult<Option<OutcomeKind>> {
        self.last = Some(LastTest { spec, args });
        if !self.config.run_tests {
            debug!("tests disabled; recorded last test only");
            return Ok(None);
        }
        self.run_last().map(Some)
    }

    /// Classify the last test again.
    pub fn run_last(&mut self) -> ClassifyResult<OutcomeKind> {
        let last = self.last.as_ref().ok_or(ClassifyError::NoLastTest)?;
        run(
            &mut self.target,
            &last.spec,
            &last.args,
            self.accumulator.as_mut(),
        )
    }

    /// Classify the last test again on different arguments. The retained
    /// arguments are left as they were.
    pub fn run_last_on(&mut self, args: &[A]) -> ClassifyResult<OutcomeKind> {
        let last = self.last.as_ref().ok_or(ClassifyError::NoLastTest)?;
        run(&mut self.target, &last.spec, args, self.accumulator.as_mut())
    }

    /// Invoke the last test's function on its arguments, with no predicate
    /// and no accumulation.
    pub fn invoke_last(&mut self) -> ClassifyResult<Result<Vec<R>, RuntimeFailure>> {
        let last = self.last.as_ref().ok_or(ClassifyError::NoLastTest)?;
        Ok(invoke(&mut self.target, &last.spec, &last.args))
    }

    /// Invoke the last test's function on different arguments.
    pub fn invoke_last_on(&mut self, args: &[A]) -> ClassifyResult<Result<Vec<R>, RuntimeFailure>> {
        let last = self.last.as_ref().ok_or(ClassifyError::NoLastTest)?;
        Ok(invoke(&mut self.target, &last.spec, args))
    }

    pub fn last_spec(&self) -> Option<&Arc<TestSpec<A, R>>> {
        self.last.as_ref().map(|last| &last.spec)
    }

    pub fn last_args(&self) -> Option<&[A]> {
        self.last.as_ref().map(|last| last.args.as_slice())
    }

    /// Install a fresh accumulator, discarding any previous one.
    pub fn start_accumulating(&mut self) {
        self.accumulator = Some(Accumulator::new());
    }

    /// Remove the accumulator and hand it back.
    pub fn stop_accumulating(&mut self) -> Option<Accumulator<A, R>> {
        self.accumulator.take()
    }

    pub fn is_accumulating(&self) -> bool {
        self.accumulator.is_some()
    }

    /// Drain the accumulated outcomes, leaving accumulation on.
    pub fn take_outcomes(&mut self) -> Vec<Outcome<A, R>> {
        self.accumulator
            .as_mut()
            .map(Accumulator::take)
            .unwrap_or_default()
    }

    /// Pretty-printed accumulated outcomes; `None` when not accumulating.
    pub fn report(&self) -> Option<String> {
        self.accumulator.as_ref().map(Accumulator::report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PredicateError;
    use crate::target::Call;
    use num_bigint::BigInt;

    /// Negates its argument, failing on zero.
    fn negate(call: &Call<'_, Felt>) -> Result<Vec<Felt>, RuntimeFailure> {
        let a = call.arg("a").ok_or_else(|| RuntimeFailure::new("missing a"))?;
        if a == &Felt::zero() {
            return Err(RuntimeFailure::new("zero"));
        }
        Ok(vec![Felt::from_int(&-a.to_signed())])
    }

    fn negate_spec() -> Arc<TestSpec> {
        let spec = TestSpec::builder("negate", |args: &[Felt], results: &[Felt]| {
            let want: BigInt = -args[0].to_signed();
            if results[0].eq_int(&want) {
                Ok(())
            } else {
                Err(PredicateError::rejected("wrong sign"))
            }
        })
        .args(["a"])
        .outputs(1)
        .failure(|args| {
            if args[0] == Felt::zero() {
                Ok(())
            } else {
                Err(PredicateError::rejected("non-zero"))
            }
        })
        .build();
        Arc::new(spec)
    }

    type NegateFn = fn(&Call<'_, Felt>) -> Result<Vec<Felt>, RuntimeFailure>;

    fn harness(config: HarnessConfig) -> SmartHarness<NegateFn> {
        SmartHarness::with_config(negate as NegateFn, config)
    }

    #[test]
    fn test_run_last_requires_a_test() {
        let mut h = harness(HarnessConfig::default());
        assert!(matches!(h.run_last(), Err(ClassifyError::NoLastTest)));
        assert!(matches!(h.invoke_last(), Err(ClassifyError::NoLastTest)));
    }

    #[test]
    fn test_disabled_run_only_records() {
        let mut h = harness(HarnessConfig {
            run_tests: false,
            accumulate: true,
        });
        let kind = h.run(negate_spec(), vec![Felt::from(4)]).unwrap();
        assert_eq!(kind, None);
        assert_eq!(h.take_outcomes().len(), 0);
        assert_eq!(h.run_last().unwrap(), OutcomeKind::ExpectedSuccess);
        assert_eq!(h.take_outcomes().len(), 1);
    }

    #[test]
    fn test_invoke_last_bypasses_predicates() {
        let mut h = harness(HarnessConfig::default());
        h.start_accumulating();
        h.run(negate_spec(), vec![Felt::zero()]).unwrap();
        let raw = h.invoke_last().unwrap();
        assert_eq!(raw, Err(RuntimeFailure::new("zero")));
        let raw = h.invoke_last_on(&[Felt::from(-9)]).unwrap();
        assert_eq!(raw, Ok(vec![Felt::from(9)]));
        assert_eq!(h.stop_accumulating().map(|acc| acc.len()), Some(1));
    }

    #[test]
    fn test_run_last_on_classifies_new_arguments() {
        let mut h = harness(HarnessConfig {
            run_tests: true,
            accumulate: true,
        });
        assert!(matches!(h.run_last_on(&[Felt::one()]), Err(ClassifyError::NoLastTest)));
        h.run(negate_spec(), vec![Felt::from(4)]).unwrap();
        assert_eq!(h.run_last_on(&[Felt::zero()]).unwrap(), OutcomeKind::ExpectedFailure);
        assert_eq!(h.run_last_on(&[Felt::from(-7)]).unwrap(), OutcomeKind::ExpectedSuccess);
        assert_eq!(h.last_args(), Some(&[Felt::from(4)][..]));
        let kinds: Vec<_> = h.take_outcomes().iter().map(Outcome::kind).collect();
        assert_eq!(
            kinds,
            [
                OutcomeKind::ExpectedSuccess,
                OutcomeKind::ExpectedFailure,
                OutcomeKind::ExpectedSuccess,
            ]
        );
    }

    #[test]
    fn test_report_lists_outcomes() {
        let mut h = harness(HarnessConfig {
            run_tests: true,
            accumulate: true,
        });
        h.run(negate_spec(), vec![Felt::from(-3)]).unwrap();
        h.run(negate_spec(), vec![Felt::zero()]).unwrap();
        let report = h.report().unwrap();
        assert!(report.contains("negate(-3) -> [3]  Success (as expected)"));
        assert!(report.contains("negate(0)  Failure (as expected)"));
    }
}
