//! Advertising identifier codec.
//!
//! Platform-neutral ad ids are exactly 16 bytes. Callers usually treat
//! them as UUIDs, but the codec carries them as opaque bytes.

use bidseal_crypto::{Container, CryptoError, InitVector, KeyMaterial, Result, encoding};

use crate::opaque;

/// Codec for encrypted 16-byte advertising identifiers.
#[derive(Debug, Clone)]
pub struct AdIdCodec {
    container: Container,
}

impl AdIdCodec {
    /// Ad id payload size.
    pub const PAYLOAD_SIZE: usize = 16;

    /// Total package size for an ad id (36 bytes).
    pub const PACKAGE_SIZE: usize = Self::PAYLOAD_SIZE + Container::OVERHEAD;

    /// Create an ad id codec from key material.
    pub fn new(keys: KeyMaterial) -> Self {
        Self { container: Container::new(keys) }
    }

    /// Create an ad id codec sharing an existing container.
    pub fn from_container(container: Container) -> Self {
        Self { container }
    }

    /// The underlying container.
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Encrypt a 16-byte ad id into a 36-byte package.
    ///
    /// # Errors
    ///
    /// - `InvalidSize` if the input is not exactly 16 bytes
    pub fn encrypt(&self, ad_id: &[u8], iv: Option<InitVector>) -> Result<Vec<u8>> {
        if ad_id.len() != Self::PAYLOAD_SIZE {
            return Err(CryptoError::InvalidSize {
                expected: Self::PAYLOAD_SIZE,
                actual: ad_id.len(),
            });
        }

        self.container.encrypt(ad_id, iv)
    }

    /// Decrypt a 36-byte package back to the 16-byte ad id.
    ///
    /// # Errors
    ///
    /// - `InvalidSize` if the package is not exactly 36 bytes
    /// - `SignatureMismatch` if the tag check fails
    pub fn decrypt(&self, cipher: &[u8]) -> Result<Vec<u8>> {
        if cipher.len() != Self::PACKAGE_SIZE {
            return Err(CryptoError::InvalidSize {
                expected: Self::PACKAGE_SIZE,
                actual: cipher.len(),
            });
        }

        let work = opaque::decrypt_package(&self.container, cipher, "ad_id")?;
        Ok(Container::payload_of(&work)?.to_vec())
    }

    /// Encrypt and encode an ad id as URL-safe base64.
    pub fn encode(&self, ad_id: &[u8], iv: Option<InitVector>) -> Result<String> {
        Ok(encoding::encode(&self.encrypt(ad_id, iv)?))
    }

    /// Decode and decrypt an ad id string.
    pub fn decode(&self, encoded: &str) -> Result<Vec<u8>> {
        self.decrypt(&encoding::decode(encoded)?)
    }
}
