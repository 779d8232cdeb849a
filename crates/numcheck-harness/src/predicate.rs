//! Helpers for writing success and failure predicates over felts.

use crate::error::PredicateError;
use num_bigint::BigInt;
use numcheck_model::{BigNum, Felt, Radix, SignedNum};

/// Return `Err(PredicateError::Rejected(..))` from the enclosing predicate
/// unless the condition holds.
///
/// ```
/// use numcheck_harness::{check, PredicateError};
///
/// fn positive(n: i64) -> Result<(), PredicateError> {
///     check!(n > 0, "{n} is not positive");
///     Ok(())
/// }
/// assert!(positive(1).is_ok());
/// assert!(positive(0).is_err());
/// ```
#[macro_export]
macro_rules! check {
    ($cond:expr $(,)?) => {
        if !$cond {
            return Err($crate::PredicateError::rejected(concat!(
                "check failed: ",
                stringify!($cond)
            )));
        }
    };
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err($crate::PredicateError::rejected(format!($($arg)+)));
        }
    };
}

/// The felt `got` must encode `want`.
pub fn expect_int(what: &str, got: &Felt, want: &BigInt) -> Result<(), PredicateError> {
    check!(
        got.eq_int(want),
        "{what}: got {}, expected {want}",
        got.to_signed()
    );
    Ok(())
}

/// The felt `got` must be the boolean encoding of `want`.
pub fn expect_bool(what: &str, got: &Felt, want: bool) -> Result<(), PredicateError> {
    check!(
        got.as_bool() == Some(want),
        "{what}: got {}, expected {}",
        got.to_signed(),
        u8::from(want)
    );
    Ok(())
}

/// `got` must be exactly the sentinel-terminated layout of `want`.
pub fn expect_num(what: &str, got: &[Felt], want: &BigNum) -> Result<(), PredicateError> {
    let want_felts = want.to_felts();
    check!(got == want_felts.as_slice(), "{what}: got {got:?}, expected {want}");
    Ok(())
}

/// `got` must read back as a signed value equal to `want`.
pub fn expect_signed(
    what: &str,
    radix: Radix,
    got: &[Felt],
    want: &SignedNum,
) -> Result<(), PredicateError> {
    let read = radix.read_signed(got)?;
    check!(read == *want, "{what}: got {read}, expected {want}");
    Ok(())
}

/// Accept only when `cond` holds; used as a failure predicate body.
pub fn expect_failure_when(cond: bool, reason: &str) -> Result<(), PredicateError> {
    check!(cond, "did not expect a failure: {reason}");
    Ok(())
}
