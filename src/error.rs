//! Error types for collection operations.
//!
//! Most of the collection API is infallible by design: construction is
//! total (unrecognized sources degrade to an empty collection), missing
//! keys produce caller-supplied defaults, and out-of-range counts are
//! clamped. The operations that *do* fail are precondition violations
//! surfaced immediately to the caller:
//!
//! - **Boundary violations**: [`Collection::random`] and
//!   [`Collection::random_n`] refuse to sample from an empty collection or
//!   to draw more elements than exist (sampling without replacement cannot
//!   silently under-deliver).
//! - **Length mismatches**: [`Collection::combine`] requires both sides to
//!   have the same element count.
//! - **Serialization**: [`Collection::to_json`] surfaces the underlying
//!   JSON error.
//! - **Decimal arithmetic**: the [`bc`](crate::bc) module reports division
//!   by zero and unparsable decimal literals.
//!
//! [`Collection::random`]: crate::Collection::random
//! [`Collection::random_n`]: crate::Collection::random_n
//! [`Collection::combine`]: crate::Collection::combine
//! [`Collection::to_json`]: crate::Collection::to_json

use thiserror::Error;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// An argument violated an operation's precondition, e.g. sampling
    /// from an empty collection.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// `combine` was called with two sides of differing length.
    #[error("length mismatch: {left} keys cannot be combined with {right} values")]
    LengthMismatch { left: usize, right: usize },

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(String),

    /// Decimal division or modulo by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A string could not be parsed as a decimal number.
    #[error("invalid decimal literal: {0:?}")]
    InvalidDecimal(String),
}

impl Error {
    /// Creates an invalid-argument error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kollect::Error;
    ///
    /// let err = Error::invalid_argument("requested 5 of 3 elements");
    /// assert!(err.to_string().contains("5 of 3"));
    /// ```
    pub fn invalid_argument<T: std::fmt::Display>(msg: T) -> Self {
        Error::InvalidArgument(msg.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
