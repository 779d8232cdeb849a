//! Harness error types.

use numcheck_model::ModelError;
use thiserror::Error;

/// The function under test signalled failure, or its inputs/outputs could
/// not be bound to the declared slots.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeFailure {
    #[error("execution failed: {0}")]
    Failed(String),

    #[error("expected {expected} arguments, got {actual}")]
    InputArity { expected: usize, actual: usize },

    #[error("expected {expected} outputs, got {actual}")]
    OutputArity { expected: usize, actual: usize },
}

impl RuntimeFailure {
    pub fn new(message: impl Into<String>) -> Self {
        RuntimeFailure::Failed(message.into())
    }
}

/// A predicate rejected the observed behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredicateError {
    #[error("{0}")]
    Rejected(String),

    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

impl PredicateError {
    pub fn rejected(message: impl Into<String>) -> Self {
        PredicateError::Rejected(message.into())
    }
}

/// A classification that disagrees with the test's predicates.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("{function}{args}: unexpected success: {rejection}")]
    UnexpectedSuccess {
        function: String,
        args: String,
        #[source]
        rejection: PredicateError,
    },

    #[error("{function}{args}: unexpected failure: {failure}")]
    UnexpectedFailure {
        function: String,
        args: String,
        #[source]
        failure: RuntimeFailure,
        /// Why the failure predicate rejected; `None` when there was none.
        rejection: Option<PredicateError>,
    },

    #[error("no test has been run yet")]
    NoLastTest,
}

impl ClassifyError {
    pub fn function(&self) -> Option<&str> {
        match self {
            ClassifyError::UnexpectedSuccess { function, .. }
            | ClassifyError::UnexpectedFailure { function, .. } => Some(function),
            ClassifyError::NoLastTest => None,
        }
    }
}

pub type ClassifyResult<T> = Result<T, ClassifyError>;

/// An example from a unit corpus that did not classify cleanly.
#[derive(Debug, Error)]
#[error("example #{index} {example}: {source}")]
pub struct ExampleFailure {
    pub index: usize,
    pub example: String,
    #[source]
    pub source: ClassifyError,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_classify_error_sources() {
        let err = ClassifyError::UnexpectedSuccess {
            function: "Int16.add".to_string(),
            args: "(1, 2)".to_string(),
            rejection: PredicateError::rejected("add: got 4, expected 3"),
        };
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("add: got 4, expected 3"));

        let err = ClassifyError::UnexpectedFailure {
            function: "Int16.add".to_string(),
            args: "(1, 2)".to_string(),
            failure: RuntimeFailure::new("overflow"),
            rejection: None,
        };
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("execution failed: overflow"));
        assert!(ClassifyError::NoLastTest.source().is_none());
    }
}
