//! The outcome classifier.
//!
//! | invocation | predicate | outcome            | returned                 |
//! |------------|-----------|--------------------|--------------------------|
//! | failed     | accepts   | `ExpectedFailure`  | `Ok`                     |
//! | failed     | rejects   | `UnexpectedFailure`| `Err(UnexpectedFailure)` |
//! | succeeded  | accepts   | `ExpectedSuccess`  | `Ok`                     |
//! | succeeded  | rejects   | `UnexpectedSuccess`| `Err(UnexpectedSuccess)` |
//!
//! A missing failure predicate counts as rejecting. So does a call whose
//! arguments do not match the declared slots: predicates are never shown
//! such argument lists. Every outcome is recorded in the accumulator when
//! one is given.

use crate::error::{ClassifyError, ClassifyResult, RuntimeFailure};
use crate::outcome::{Accumulator, Outcome, OutcomeKind};
use crate::render::{render_args, Render};
use crate::spec::TestSpec;
use crate::target::{Call, Target};
use tracing::{debug, warn};

/// Bind `args` to the spec's slots, invoke, and check the declared arity.
pub(crate) fn invoke<T, A, R>(
    target: &mut T,
    spec: &TestSpec<A, R>,
    args: &[A],
) -> Result<Vec<R>, RuntimeFailure>
where
    T: Target<A, R> + ?Sized,
{
    if args.len() != spec.slots().len() {
        return Err(RuntimeFailure::InputArity {
            expected: spec.slots().len(),
            actual: args.len(),
        });
    }
    let call = Call {
        function: spec.name(),
        slots: spec.slots(),
        args,
        capabilities: spec.capabilities(),
    };
    let results = target.invoke(&call)?;
    if results.len() != spec.outputs() {
        return Err(RuntimeFailure::OutputArity {
            expected: spec.outputs(),
            actual: results.len(),
        });
    }
    Ok(results)
}

/// Invoke `target` on `args` and classify the result against `spec`.
pub fn run<T, A, R>(
    target: &mut T,
    spec: &TestSpec<A, R>,
    args: &[A],
    accumulator: Option<&mut Accumulator<A, R>>,
) -> ClassifyResult<OutcomeKind>
where
    T: Target<A, R> + ?Sized,
    A: Clone + Render,
    R: Render,
{
    let function = spec.name();
    match invoke(target, spec, args) {
        Err(failure) => {
            let verdict = match failure {
                RuntimeFailure::InputArity { .. } => None,
                _ => spec.check_failure(args),
            };
            let rejection = match verdict {
                Some(Ok(())) => {
                    debug!(function = %function, args = %render_args(args), %failure, "failure (as expected)");
                    record(
                        accumulator,
                        Outcome::ExpectedFailure {
                            function: function.to_string(),
                            args: args.to_vec(),
                        },
                    );
                    return Ok(OutcomeKind::ExpectedFailure);
                }
                Some(Err(rejection)) => Some(rejection),
                None => None,
            };
            warn!(function = %function, args = %render_args(args), %failure, "failure (NOT expected)");
            record(
                accumulator,
                Outcome::UnexpectedFailure {
                    function: function.to_string(),
                    args: args.to_vec(),
                },
            );
            Err(ClassifyError::UnexpectedFailure {
                function: function.to_string(),
                args: render_args(args),
                failure,
                rejection,
            })
        }
        Ok(results) => match spec.check_success(args, &results) {
            Ok(()) => {
                debug!(function = %function, args = %render_args(args), "success (as expected)");
                record(
                    accumulator,
                    Outcome::ExpectedSuccess {
                        function: function.to_string(),
                        args: args.to_vec(),
                        results,
                    },
                );
                Ok(OutcomeKind::ExpectedSuccess)
            }
            Err(rejection) => {
                warn!(function = %function, args = %render_args(args), %rejection, "success (NOT expected)");
                record(
                    accumulator,
                    Outcome::UnexpectedSuccess {
                        function: function.to_string(),
                        args: args.to_vec(),
                        results,
                    },
                );
                Err(ClassifyError::UnexpectedSuccess {
                    function: function.to_string(),
                    args: render_args(args),
                    rejection,
                })
            }
        },
    }
}

/// Run each spec over the same arguments, stopping at the first error.
pub fn run_all<T, A, R>(
    target: &mut T,
    specs: &[TestSpec<A, R>],
    args: &[A],
    mut accumulator: Option<&mut Accumulator<A, R>>,
) -> ClassifyResult<Vec<OutcomeKind>>
where
    T: Target<A, R> + ?Sized,
    A: Clone + Render,
    R: Render,
{
    specs
        .iter()
        .map(|spec| run(&mut *target, spec, args, accumulator.as_deref_mut()))
        .collect()
}

fn record<A, R>(accumulator: Option<&mut Accumulator<A, R>>, outcome: Outcome<A, R>) {
    if let Some(acc) = accumulator {
        acc.push(outcome);
    }
}
