//! The seam to the function under test.

use crate::error::RuntimeFailure;
use crate::spec::Capability;

/// One invocation request: the function, its bound arguments and the
/// capabilities it was granted.
#[derive(Debug)]
pub struct Call<'a, A> {
    pub function: &'a str,
    pub slots: &'a [String],
    pub args: &'a [A],
    pub capabilities: &'a [Capability],
}

impl<'a, A> Call<'a, A> {
    /// The argument bound to `slot`.
    pub fn arg(&self, slot: &str) -> Option<&'a A> {
        self.slots
            .iter()
            .position(|s| s == slot)
            .and_then(|i| self.args.get(i))
    }

    /// `(slot, value)` pairs in declaration order.
    pub fn bindings(&self) -> impl Iterator<Item = (&'a str, &'a A)> + 'a {
        self.slots.iter().map(String::as_str).zip(self.args.iter())
    }

    pub fn has_capability(&self, capability: &Capability) -> bool {
        self.capabilities.contains(capability)
    }
}

/// Executes a function under test. How it runs is opaque to the classifier,
/// which only inspects whether the call failed.
pub trait Target<A, R> {
    fn invoke(&mut self, call: &Call<'_, A>) -> Result<Vec<R>, RuntimeFailure>;
}

impl<A, R, F> Target<A, R> for F
where
    F: FnMut(&Call<'_, A>) -> Result<Vec<R>, RuntimeFailure>,
{
    fn invoke(&mut self, call: &Call<'_, A>) -> Result<Vec<R>, RuntimeFailure> {
        self(call)
    }
}
