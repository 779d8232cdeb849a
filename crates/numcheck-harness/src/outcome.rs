//! Classification outcomes and the accumulator that collects them.

use crate::render::{render_args, render_results, Render};
use numcheck_model::Felt;
use std::fmt;

/// Payload-free outcome tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    ExpectedSuccess,
    UnexpectedSuccess,
    ExpectedFailure,
    UnexpectedFailure,
}

impl OutcomeKind {
    /// True for the two outcomes that agree with the predicates.
    pub fn is_expected(self) -> bool {
        matches!(
            self,
            OutcomeKind::ExpectedSuccess | OutcomeKind::ExpectedFailure
        )
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OutcomeKind::ExpectedSuccess => "Success (as expected)",
            OutcomeKind::UnexpectedSuccess => "Success (NOT expected)",
            OutcomeKind::ExpectedFailure => "Failure (as expected)",
            OutcomeKind::UnexpectedFailure => "Failure (NOT expected)",
        };
        f.write_str(label)
    }
}

/// What one invocation did, relative to its predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<A = Felt, R = Felt> {
    ExpectedSuccess {
        function: String,
        args: Vec<A>,
        results: Vec<R>,
    },
    UnexpectedSuccess {
        function: String,
        args: Vec<A>,
        results: Vec<R>,
    },
    ExpectedFailure {
        function: String,
        args: Vec<A>,
    },
    UnexpectedFailure {
        function: String,
        args: Vec<A>,
    },
}

impl<A, R> Outcome<A, R> {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::ExpectedSuccess { .. } => OutcomeKind::ExpectedSuccess,
            Outcome::UnexpectedSuccess { .. } => OutcomeKind::UnexpectedSuccess,
            Outcome::ExpectedFailure { .. } => OutcomeKind::ExpectedFailure,
            Outcome::UnexpectedFailure { .. } => OutcomeKind::UnexpectedFailure,
        }
    }

    pub fn function(&self) -> &str {
        match self {
            Outcome::ExpectedSuccess { function, .. }
            | Outcome::UnexpectedSuccess { function, .. }
            | Outcome::ExpectedFailure { function, .. }
            | Outcome::UnexpectedFailure { function, .. } => function,
        }
    }

    pub fn args(&self) -> &[A] {
        match self {
            Outcome::ExpectedSuccess { args, .. }
            | Outcome::UnexpectedSuccess { args, .. }
            | Outcome::ExpectedFailure { args, .. }
            | Outcome::UnexpectedFailure { args, .. } => args,
        }
    }

    /// Results of a successful invocation.
    pub fn results(&self) -> Option<&[R]> {
        match self {
            Outcome::ExpectedSuccess { results, .. }
            | Outcome::UnexpectedSuccess { results, .. } => Some(results),
            _ => None,
        }
    }
}

impl<A: Render, R: Render> Outcome<A, R> {
    /// One report line, e.g. `add(1, -2) -> [-1, 0]  Success (as expected)`.
    pub fn render(&self) -> String {
        let call = format!("{}{}", self.function(), render_args(self.args()));
        match self.results() {
            Some(results) => format!("{call} -> {}  {}", render_results(results), self.kind()),
            None => format!("{call}  {}", self.kind()),
        }
    }
}

/// Append-only record of outcomes, owned by a single writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accumulator<A = Felt, R = Felt> {
    outcomes: Vec<Outcome<A, R>>,
}

impl<A, R> Default for Accumulator<A, R> {
    fn default() -> Self {
        Self {
            outcomes: Vec::new(),
        }
    }
}

impl<A, R> Accumulator<A, R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: Outcome<A, R>) {
        self.outcomes.push(outcome);
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn outcomes(&self) -> &[Outcome<A, R>] {
        &self.outcomes
    }

    pub fn count(&self, kind: OutcomeKind) -> usize {
        self.outcomes.iter().filter(|o| o.kind() == kind).count()
    }

    /// Drain everything recorded so far.
    pub fn take(&mut self) -> Vec<Outcome<A, R>> {
        std::mem::take(&mut self.outcomes)
    }

    pub fn into_outcomes(self) -> Vec<Outcome<A, R>> {
        self.outcomes
    }
}

impl<A: Render, R: Render> Accumulator<A, R> {
    /// Multi-line report, one outcome per line, followed by a tally.
    pub fn report(&self) -> String {
        let mut lines: Vec<String> = self.outcomes.iter().map(Outcome::render).collect();
        lines.push(format!(
            "{} outcomes: {} expected success, {} expected failure, {} unexpected success, {} unexpected failure",
            self.len(),
            self.count(OutcomeKind::ExpectedSuccess),
            self.count(OutcomeKind::ExpectedFailure),
            self.count(OutcomeKind::UnexpectedSuccess),
            self.count(OutcomeKind::UnexpectedFailure),
        ));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_uses_felt_heuristic() {
        let outcome: Outcome = Outcome::ExpectedSuccess {
            function: "add".into(),
            args: vec![Felt::from(1), Felt::from(-2)],
            results: vec![Felt::from(-1), Felt::zero()],
        };
        assert_eq!(outcome.render(), "add(1, -2) -> [-1, 0]  Success (as expected)");
        let failed: Outcome = Outcome::UnexpectedFailure {
            function: "div".into(),
            args: vec![Felt::from(1), Felt::zero()],
        };
        assert_eq!(failed.render(), "div(1, 0)  Failure (NOT expected)");
    }

    #[test]
    fn test_accumulator_tally() {
        let mut acc: Accumulator = Accumulator::new();
        acc.push(Outcome::ExpectedFailure {
            function: "shl".into(),
            args: vec![Felt::from(-1)],
        });
        acc.push(Outcome::ExpectedSuccess {
            function: "shl".into(),
            args: vec![Felt::from(1)],
            results: vec![Felt::from(2)],
        });
        assert_eq!(acc.count(OutcomeKind::ExpectedFailure), 1);
        assert!(acc.report().ends_with("2 outcomes: 1 expected success, 1 expected failure, 0 unexpected success, 0 unexpected failure"));
        assert_eq!(acc.take().len(), 2);
        assert!(acc.is_empty());
    }
}
