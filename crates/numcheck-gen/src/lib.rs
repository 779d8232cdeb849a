//! Input generators for numcheck.
//!
//! Each domain has two kinds of source: a hand-picked `some_*` corpus of
//! boundary values for unit examples, and `arb_*` proptest strategies for
//! randomized inputs. The strategies mix the corpus back in so boundary
//! values stay frequent.

pub mod bignum;
pub mod fixed;
pub mod int;

pub use int::{arb_felt, arb_int_in, to_felts};
