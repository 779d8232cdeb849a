//! Reference targets and the specs that judge them.
//!
//! [`NativeTarget`] runs fixed-width operations on Rust machine integers and
//! [`BigNumEngine`] runs the bignum library on `num-bigint`. Both are checked
//! through the classifier against the limb-level models in `numcheck-model`,
//! so the two sides share no arithmetic code.

pub mod bignum_specs;
pub mod engine;
pub mod fixed_specs;
pub mod native;

pub use bignum_specs::{bigint_spec, biguint_spec, BigIntOp, BigUintOp};
pub use engine::{digits_of, BigNumEngine};
pub use fixed_specs::{felt_spec, fixed_spec, FeltOp, FixedOp};
pub use native::{Int6, NativeTarget, Word};
