//! Error types shared by the dictionary and transducer layers.

use thiserror::Error;

/// Errors surfaced by dictionary construction and query setup.
///
/// Each variant is fatal to the operation that produced it; callers are
/// the only recovery site. Internal builder invariants are enforced with
/// assertions instead, since their violation signals a programming bug
/// rather than bad input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A byte sequence failed strict UTF-8 validation.
    #[error("invalid UTF-8 in input {context:?}")]
    InvalidUtf8 {
        /// Lossy rendition of the offending input.
        context: String,
    },

    /// The requested edit tolerance cannot be represented.
    ///
    /// Characteristic vectors are 32-bit, which caps the query window at
    /// `2n + 1 <= 31` and therefore the tolerance at 15.
    #[error("tolerance {tolerance} out of range (maximum is 15)")]
    ToleranceOutOfRange {
        /// The rejected tolerance.
        tolerance: usize,
    },
}

impl Error {
    pub(crate) fn invalid_utf8(input: &[u8]) -> Self {
        Error::InvalidUtf8 {
            context: String::from_utf8_lossy(input).into_owned(),
        }
    }
}

/// A specialized `Result` type for this crate's fallible operations.
pub type Result<T> = std::result::Result<T, Error>;
