//! URL-safe base64 for packages carried as strings.
//!
//! Prices and IDFAs usually travel inside URLs and macros, so their
//! packages are encoded with the URL-safe alphabet and no padding.
//! Decoding is strict: the empty string and any non-alphabet input are
//! rejected.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

use crate::error::{CryptoError, Result};

/// Encode bytes as unpadded URL-safe base64.
pub fn encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode unpadded URL-safe base64.
///
/// # Errors
///
/// - `Malformed` for the empty string
/// - `DecodingError` for input outside the URL-safe alphabet
pub fn decode(input: &str) -> Result<Vec<u8>> {
    if input.is_empty() {
        return Err(CryptoError::Malformed { len: 0, min: 1 });
    }

    URL_SAFE_NO_PAD.decode(input).map_err(CryptoError::from)
}
