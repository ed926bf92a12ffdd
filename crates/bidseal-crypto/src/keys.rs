//! Key material for the container.
//!
//! A buyer account is provisioned with two independent secrets: one keys
//! the keystream HMAC, the other keys the integrity tag HMAC. Both are
//! validated once at construction and held immutable for the process
//! lifetime; everything downstream borrows them.
//!
//! # Security
//!
//! - Key bytes never appear in `Debug` output
//! - Equality is constant-time over both keys
//! - Key bytes are zeroized when the material is dropped

use std::fmt;

use hmac::{Hmac, Mac};
use sha1::Sha1;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::error::{CryptoError, Result};

type HmacSha1 = Hmac<Sha1>;

/// The encryption/integrity key pair for one buyer account.
///
/// Both keys are opaque byte strings used as HMAC-SHA1 keys. The
/// exchange provisions them together; swapping them produces packages
/// that fail integrity verification on the other side.
#[derive(Clone)]
pub struct KeyMaterial {
    encryption_key: Vec<u8>,
    integrity_key: Vec<u8>,
}

impl KeyMaterial {
    /// Create key material from the two provisioned secrets.
    ///
    /// Each key is validated by priming an HMAC-SHA1 instance with it.
    ///
    /// # Errors
    ///
    /// - `InvalidKey` if either key is empty or rejected by the HMAC
    pub fn new(encryption_key: &[u8], integrity_key: &[u8]) -> Result<Self> {
        validate(encryption_key, "encryption key")?;
        validate(integrity_key, "integrity key")?;

        Ok(Self { encryption_key: encryption_key.to_vec(), integrity_key: integrity_key.to_vec() })
    }

    /// Key for the keystream HMAC.
    pub fn encryption_key(&self) -> &[u8] {
        &self.encryption_key
    }

    /// Key for the integrity tag HMAC.
    pub fn integrity_key(&self) -> &[u8] {
        &self.integrity_key
    }
}

fn validate(key: &[u8], which: &'static str) -> Result<()> {
    if key.is_empty() {
        return Err(CryptoError::InvalidKey { reason: which });
    }

    // HMAC-SHA1 accepts any non-empty key; this is the construction-time
    // check the rest of the crate relies on to treat keying as infallible.
    HmacSha1::new_from_slice(key).map_err(|_| CryptoError::InvalidKey { reason: which })?;

    Ok(())
}

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        self.encryption_key.zeroize();
        self.integrity_key.zeroize();
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("algorithm", &"HMAC-SHA1")
            .field("encryption_key", &"[REDACTED]")
            .field("integrity_key", &"[REDACTED]")
            .finish()
    }
}

impl PartialEq for KeyMaterial {
    fn eq(&self, other: &Self) -> bool {
        bool::from(
            self.encryption_key.as_slice().ct_eq(other.encryption_key.as_slice())
                & self.integrity_key.as_slice().ct_eq(other.integrity_key.as_slice()),
        )
    }
}

impl Eq for KeyMaterial {}
