//! IDFA codec.
//!
//! iOS identifiers-for-advertisers arrive in several representations
//! (raw bytes, UTF-8 UUID text), so the payload is variable-length.
//! Like prices, IDFAs are usually carried as URL-safe base64 strings.

use bidseal_crypto::{Container, InitVector, KeyMaterial, Result, encoding};

use crate::opaque;

/// Codec for encrypted variable-length IDFAs.
#[derive(Debug, Clone)]
pub struct IdfaCodec {
    container: Container,
}

impl IdfaCodec {
    /// Largest IDFA payload the container can carry.
    pub const MAX_PAYLOAD_SIZE: usize = opaque::MAX_BLOB_SIZE;

    /// Create an IDFA codec from key material.
    pub fn new(keys: KeyMaterial) -> Self {
        Self { container: Container::new(keys) }
    }

    /// Create an IDFA codec sharing an existing container.
    pub fn from_container(container: Container) -> Self {
        Self { container }
    }

    /// The underlying container.
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Encrypt an IDFA payload.
    ///
    /// # Errors
    ///
    /// - `InvalidSize` for an empty payload
    /// - `PayloadTooLarge` above [`IdfaCodec::MAX_PAYLOAD_SIZE`]
    pub fn encrypt(&self, idfa: &[u8], iv: Option<InitVector>) -> Result<Vec<u8>> {
        opaque::encrypt_blob(&self.container, idfa, iv, "idfa")
    }

    /// Decrypt a package back to the IDFA payload.
    pub fn decrypt(&self, cipher: &[u8]) -> Result<Vec<u8>> {
        opaque::decrypt_blob(&self.container, cipher, "idfa")
    }

    /// Encrypt and encode an IDFA as URL-safe base64.
    pub fn encode(&self, idfa: &[u8], iv: Option<InitVector>) -> Result<String> {
        Ok(encoding::encode(&self.encrypt(idfa, iv)?))
    }

    /// Decode and decrypt an IDFA string.
    pub fn decode(&self, encoded: &str) -> Result<Vec<u8>> {
        self.decrypt(&encoding::decode(encoded)?)
    }
}
