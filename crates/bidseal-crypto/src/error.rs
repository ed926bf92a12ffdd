//! Error types for container encryption and decryption.
//!
//! Every fallible operation in this crate returns exactly one of these
//! kinds. Callers distinguish them by matching on the variant; none of
//! the messages are meant to be parsed. There is no transient failure
//! mode anywhere in the container: every error indicates a programming
//! error on the caller's side or a corrupt/malicious input.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, CryptoError>;

/// Errors from container encryption, decryption, and encoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Key material was rejected at construction
    #[error("invalid key material: {reason}")]
    InvalidKey {
        /// Which key was rejected and why
        reason: &'static str,
    },

    /// Input too short to hold a package, or empty where forbidden
    #[error("malformed input: {len} bytes, need at least {min}")]
    Malformed {
        /// Actual input length
        len: usize,
        /// Minimum length required
        min: usize,
    },

    /// Fixed-size payload or package has the wrong length
    #[error("invalid size: expected {expected} bytes, got {actual}")]
    InvalidSize {
        /// Required length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// Payload exceeds the keystream section limit
    #[error("payload too large: {size} bytes exceeds maximum {max}")]
    PayloadTooLarge {
        /// Offending payload size
        size: usize,
        /// Maximum payload size
        max: usize,
    },

    /// Integrity tag did not match the recovered plaintext
    #[error("integrity signature mismatch")]
    SignatureMismatch,

    /// Input is not valid URL-safe base64
    #[error("base64 decoding failed: {0}")]
    DecodingError(#[from] base64::DecodeError),
}
