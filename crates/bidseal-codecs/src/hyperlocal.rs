//! Hyperlocal geofence codec.
//!
//! The exchange attaches a geofence signal to some bid requests: a
//! serialized message describing a polygon or center point near the
//! user. The codec treats it as an opaque byte blob; deserialization
//! belongs to the protocol layer that owns the message schema.

use bidseal_crypto::{Container, InitVector, KeyMaterial, Result, encoding};

use crate::opaque;

/// Codec for encrypted hyperlocal geofence blobs.
#[derive(Debug, Clone)]
pub struct HyperlocalCodec {
    container: Container,
}

impl HyperlocalCodec {
    /// Largest blob the container can carry.
    pub const MAX_PAYLOAD_SIZE: usize = opaque::MAX_BLOB_SIZE;

    /// Create a hyperlocal codec from key material.
    pub fn new(keys: KeyMaterial) -> Self {
        Self { container: Container::new(keys) }
    }

    /// Create a hyperlocal codec sharing an existing container.
    pub fn from_container(container: Container) -> Self {
        Self { container }
    }

    /// The underlying container.
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Encrypt a geofence blob.
    ///
    /// # Errors
    ///
    /// - `InvalidSize` for an empty blob
    /// - `PayloadTooLarge` above [`HyperlocalCodec::MAX_PAYLOAD_SIZE`]
    pub fn encrypt(&self, blob: &[u8], iv: Option<InitVector>) -> Result<Vec<u8>> {
        opaque::encrypt_blob(&self.container, blob, iv, "hyperlocal")
    }

    /// Decrypt a package back to the geofence blob.
    pub fn decrypt(&self, cipher: &[u8]) -> Result<Vec<u8>> {
        opaque::decrypt_blob(&self.container, cipher, "hyperlocal")
    }

    /// Encrypt and encode a blob as URL-safe base64.
    pub fn encode(&self, blob: &[u8], iv: Option<InitVector>) -> Result<String> {
        Ok(encoding::encode(&self.encrypt(blob, iv)?))
    }

    /// Decode and decrypt a blob string.
    pub fn decode(&self, encoded: &str) -> Result<Vec<u8>> {
        self.decrypt(&encoding::decode(encoded)?)
    }
}
