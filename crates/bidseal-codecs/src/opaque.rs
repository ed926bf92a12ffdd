//! Shared framing for the opaque byte-blob codecs.
//!
//! IDFA and hyperlocal payloads are bounded opaque byte strings with
//! identical framing; only their types and documentation differ. The
//! checks and the debug-level failure logging live here once.

use bidseal_crypto::{Container, CryptoError, InitVector, Result};

/// Smallest payload the blob codecs accept.
pub(crate) const MIN_BLOB_SIZE: usize = 1;

/// Largest payload the container can carry.
pub(crate) const MAX_BLOB_SIZE: usize = Container::MAX_PAYLOAD_SIZE;

/// Encrypt a bounded opaque payload.
pub(crate) fn encrypt_blob(
    container: &Container,
    payload: &[u8],
    iv: Option<InitVector>,
    codec: &'static str,
) -> Result<Vec<u8>> {
    if payload.is_empty() {
        return Err(CryptoError::InvalidSize { expected: MIN_BLOB_SIZE, actual: 0 });
    }
    if payload.len() > MAX_BLOB_SIZE {
        return Err(CryptoError::PayloadTooLarge { size: payload.len(), max: MAX_BLOB_SIZE });
    }

    match container.encrypt(payload, iv) {
        Ok(cipher) => Ok(cipher),
        Err(err) => {
            tracing::debug!(codec, payload_len = payload.len(), %err, "encrypt failed");
            Err(err)
        },
    }
}

/// Decrypt a bounded opaque payload, returning the payload bytes.
pub(crate) fn decrypt_blob(
    container: &Container,
    cipher: &[u8],
    codec: &'static str,
) -> Result<Vec<u8>> {
    if cipher.len() < Container::OVERHEAD {
        let err = CryptoError::Malformed { len: cipher.len(), min: Container::OVERHEAD };
        tracing::debug!(codec, cipher_len = cipher.len(), %err, "decrypt failed");
        return Err(err);
    }

    let payload_len = cipher.len() - Container::OVERHEAD;
    if payload_len < MIN_BLOB_SIZE {
        return Err(CryptoError::InvalidSize { expected: MIN_BLOB_SIZE, actual: payload_len });
    }
    if payload_len > MAX_BLOB_SIZE {
        return Err(CryptoError::PayloadTooLarge { size: payload_len, max: MAX_BLOB_SIZE });
    }

    let work = decrypt_package(container, cipher, codec)?;
    Ok(Container::payload_of(&work)?.to_vec())
}

/// Decrypt a package with debug logging on failure.
///
/// Size validation is the caller's job; this only runs the container
/// and reports tag or keystream failures.
pub(crate) fn decrypt_package(
    container: &Container,
    cipher: &[u8],
    codec: &'static str,
) -> Result<Vec<u8>> {
    match container.decrypt(cipher) {
        Ok(work) => Ok(work),
        Err(err) => {
            tracing::debug!(codec, cipher_len = cipher.len(), %err, "decrypt failed");
            Err(err)
        },
    }
}
