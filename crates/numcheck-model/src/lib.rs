//! Reference arithmetic models for differential testing.
//!
//! These are pure oracles: fixed-width wraparound integers with explicit
//! carry/overflow flags, the field-element boundary encoding, and an
//! unbounded sign-magnitude bignum with multi-limb arithmetic.

pub mod bignum;
pub mod error;
pub mod felt;
pub mod fixed;
pub mod signed;

pub use bignum::{BigNum, Radix, EON};
pub use error::{ModelError, ModelResult};
pub use felt::{prime, rc_bound, Felt};
pub use fixed::{FixedWidth, Overflowing, Signedness};
pub use signed::{sign_and_abs, trunc_div_rem, Sign, SignedNum};
