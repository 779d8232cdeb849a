//! Test specifications: what is called and how its behaviour is judged.

use crate::error::PredicateError;
use numcheck_model::Felt;
use std::fmt;

/// Judges a successful invocation from its arguments and results.
pub type SuccessPredicate<A, R> =
    Box<dyn Fn(&[A], &[R]) -> Result<(), PredicateError> + Send + Sync>;

/// Decides whether a failed invocation was expected for these arguments.
pub type FailurePredicate<A> = Box<dyn Fn(&[A]) -> Result<(), PredicateError> + Send + Sync>;

/// A runtime capability the function under test needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Capability {
    RangeCheck,
    Bitwise,
    Other(String),
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::RangeCheck => write!(f, "range_check"),
            Capability::Bitwise => write!(f, "bitwise"),
            Capability::Other(name) => write!(f, "{name}"),
        }
    }
}

/// One function under test together with its oracle.
pub struct TestSpec<A = Felt, R = Felt> {
    name: String,
    slots: Vec<String>,
    capabilities: Vec<Capability>,
    outputs: usize,
    success: SuccessPredicate<A, R>,
    failure: Option<FailurePredicate<A>>,
}

impl<A, R> TestSpec<A, R> {
    /// Start a spec for `name`; a success predicate is always required.
    pub fn builder<F>(name: impl Into<String>, success: F) -> TestSpecBuilder<A, R>
    where
        F: Fn(&[A], &[R]) -> Result<(), PredicateError> + Send + Sync + 'static,
    {
        TestSpecBuilder {
            spec: TestSpec {
                name: name.into(),
                slots: Vec::new(),
                capabilities: Vec::new(),
                outputs: 0,
                success: Box::new(success),
                failure: None,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    /// Declared number of results.
    pub fn outputs(&self) -> usize {
        self.outputs
    }

    pub fn check_success(&self, args: &[A], results: &[R]) -> Result<(), PredicateError> {
        (self.success)(args, results)
    }

    /// `None` when no failure predicate was given, meaning no failure is
    /// ever expected.
    pub fn check_failure(&self, args: &[A]) -> Option<Result<(), PredicateError>> {
        self.failure.as_ref().map(|f| f(args))
    }

    pub fn expects_failures(&self) -> bool {
        self.failure.is_some()
    }
}

impl<A, R> fmt::Debug for TestSpec<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestSpec")
            .field("name", &self.name)
            .field("slots", &self.slots)
            .field("capabilities", &self.capabilities)
            .field("outputs", &self.outputs)
            .field("expects_failures", &self.failure.is_some())
            .finish()
    }
}

/// Builder for [`TestSpec`].
pub struct TestSpecBuilder<A = Felt, R = Felt> {
    spec: TestSpec<A, R>,
}

impl<A, R> TestSpecBuilder<A, R> {
    pub fn args<I, S>(mut self, slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec.slots = slots.into_iter().map(Into::into).collect();
        self
    }

    pub fn capability(mut self, capability: Capability) -> Self {
        self.spec.capabilities.push(capability);
        self
    }

    pub fn outputs(mut self, outputs: usize) -> Self {
        self.spec.outputs = outputs;
        self
    }

    pub fn failure<F>(mut self, failure: F) -> Self
    where
        F: Fn(&[A]) -> Result<(), PredicateError> + Send + Sync + 'static,
    {
        self.spec.failure = Some(Box::new(failure));
        self
    }

    pub fn build(self) -> TestSpec<A, R> {
        self.spec
    }
}
