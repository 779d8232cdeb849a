//! Running a hand-picked corpus of unit examples.

use crate::error::{ClassifyResult, ExampleFailure};
use crate::outcome::OutcomeKind;
use std::fmt::Debug;
use tracing::debug;

/// Run `check` on every example in order, stopping at the first error.
///
/// Returns how many examples ran. The failure names the offending example's
/// index and value.
pub fn examples<E, I, F>(corpus: I, mut check: F) -> Result<usize, ExampleFailure>
where
    I: IntoIterator<Item = E>,
    E: Debug,
    F: FnMut(&E) -> ClassifyResult<OutcomeKind>,
{
    let mut count = 0;
    for (index, example) in corpus.into_iter().enumerate() {
        if let Err(source) = check(&example) {
            return Err(ExampleFailure {
                index,
                example: format!("{example:?}"),
                source,
            });
        }
        count += 1;
    }
    debug!(count, "examples passed");
    Ok(count)
}
