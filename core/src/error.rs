//! Error type for all fallible [`Value`](crate::Value) operations.
//!
//! Every failing operation returns one of these and leaves its input
//! untouched.

use thiserror::Error;

use crate::kind::Kind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A typed accessor was called while a different kind is active.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Kind, found: Kind },

    /// A type-erased payload does not hold the requested concrete type.
    ///
    /// `found` is `None` when the payload's concrete type is not recorded
    /// (pointer kinds) or the payload is empty.
    #[error("downcast failed: expected {expected}, found {}", .found.unwrap_or("unknown"))]
    DowncastFailed {
        expected: &'static str,
        found: Option<&'static str>,
    },

    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("key not found: {0:?}")]
    KeyNotFound(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A Sequence-only or Mapping-only operation was called on another kind.
    #[error("invalid operation: `{op}` is not supported on {found}")]
    InvalidOperation { op: &'static str, found: Kind },
}

pub type Result<T> = core::result::Result<T, Error>;
