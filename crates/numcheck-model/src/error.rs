//! Model contract violations.

use thiserror::Error;

/// An input outside the contract of a model operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unsupported word width: {bits} bits (expected 1..=128)")]
    UnsupportedWidth { bits: u32 },

    #[error("unsupported digit width: {bits} bits (expected 4..=125)")]
    UnsupportedDigitWidth { bits: u32 },

    #[error("condition flag must be 0 or 1, got {flag}")]
    InvalidCondition { flag: String },

    #[error("shift amount must be non-negative, got {amount}")]
    NegativeShift { amount: String },

    #[error("value {value} is not a field element")]
    NotAFelt { value: String },

    #[error("digit {digit} at position {index} is not below the radix")]
    DigitOutOfRange { index: usize, digit: String },

    #[error("most significant digit is zero (length {len})")]
    TrailingZeroDigit { len: usize },

    #[error("digit sequence has no end-of-number marker")]
    MissingSentinel,

    #[error("{count} cell(s) follow the end-of-number marker")]
    TrailingCells { count: usize },

    #[error("sign must be -1 or 1, got {sign}")]
    InvalidSign { sign: String },

    #[error("magnitude must be non-negative, got {value}")]
    NegativeMagnitude { value: String },
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
