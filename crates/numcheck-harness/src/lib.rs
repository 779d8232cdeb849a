//! Differential-testing harness for black-box numeric functions.
//!
//! A [`TestSpec`] names a function, its argument slots, its declared output
//! arity and the predicates that judge it. [`run`] invokes a [`Target`] and
//! classifies what happened into one of four [`Outcome`]s; the two that
//! disagree with the predicates are propagated as [`ClassifyError`]s.

pub mod classifier;
pub mod error;
pub mod examples;
pub mod outcome;
pub mod predicate;
pub mod render;
pub mod smart;
pub mod spec;
pub mod target;

pub use classifier::{run, run_all};
pub use error::{ClassifyError, ClassifyResult, ExampleFailure, PredicateError, RuntimeFailure};
pub use examples::examples;
pub use outcome::{Accumulator, Outcome, OutcomeKind};
pub use render::Render;
pub use smart::{HarnessConfig, SmartHarness};
pub use spec::{Capability, FailurePredicate, SuccessPredicate, TestSpec, TestSpecBuilder};
pub use target::{Call, Target};
