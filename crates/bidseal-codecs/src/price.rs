//! Winning price codec.
//!
//! The exchange substitutes the encrypted winning price into the ad
//! snippet's price macro, so prices almost always travel as URL-safe
//! base64 strings. The payload is a big-endian unsigned 64-bit integer
//! in micros: one millionth of the bid currency unit, the settlement
//! resolution of the auction.

use bidseal_crypto::{Container, CryptoError, InitVector, KeyMaterial, Result, encoding};

use crate::opaque;

/// Micros per currency unit (10⁶).
const MICROS_PER_UNIT: f64 = 1_000_000.0;

/// Codec for encrypted winning prices.
#[derive(Debug, Clone)]
pub struct PriceCodec {
    container: Container,
}

impl PriceCodec {
    /// Price payload size: one big-endian u64.
    pub const PAYLOAD_SIZE: usize = 8;

    /// Total package size for a price (28 bytes).
    pub const PACKAGE_SIZE: usize = Self::PAYLOAD_SIZE + Container::OVERHEAD;

    /// Create a price codec from key material.
    pub fn new(keys: KeyMaterial) -> Self {
        Self { container: Container::new(keys) }
    }

    /// Create a price codec sharing an existing container.
    pub fn from_container(container: Container) -> Self {
        Self { container }
    }

    /// The underlying container.
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Convert a currency-unit price to micros, rounding to nearest.
    ///
    /// Negative inputs clamp to zero; prices are unsigned on the wire.
    pub fn micros_from_value(value: f64) -> u64 {
        (value * MICROS_PER_UNIT).round() as u64
    }

    /// Convert micros back to a currency-unit price.
    pub fn value_from_micros(micros: u64) -> f64 {
        micros as f64 / MICROS_PER_UNIT
    }

    /// Encrypt a price in micros into a 28-byte package.
    pub fn encrypt_micros(&self, micros: u64, iv: Option<InitVector>) -> Result<Vec<u8>> {
        self.container.encrypt(&micros.to_be_bytes(), iv)
    }

    /// Decrypt a 28-byte package back to micros.
    ///
    /// # Errors
    ///
    /// - `InvalidSize` if the package is not exactly 28 bytes
    /// - `SignatureMismatch` if the tag check fails
    pub fn decrypt_micros(&self, cipher: &[u8]) -> Result<u64> {
        if cipher.len() != Self::PACKAGE_SIZE {
            return Err(CryptoError::InvalidSize {
                expected: Self::PACKAGE_SIZE,
                actual: cipher.len(),
            });
        }

        let work = opaque::decrypt_package(&self.container, cipher, "price")?;

        let mut payload = [0u8; Self::PAYLOAD_SIZE];
        payload.copy_from_slice(&work[Container::IV_SIZE..Container::IV_SIZE + Self::PAYLOAD_SIZE]);
        Ok(u64::from_be_bytes(payload))
    }

    /// Encrypt a currency-unit price into a 28-byte package.
    pub fn encrypt_value(&self, value: f64, iv: Option<InitVector>) -> Result<Vec<u8>> {
        self.encrypt_micros(Self::micros_from_value(value), iv)
    }

    /// Decrypt a 28-byte package back to a currency-unit price.
    pub fn decrypt_value(&self, cipher: &[u8]) -> Result<f64> {
        Ok(Self::value_from_micros(self.decrypt_micros(cipher)?))
    }

    /// Encrypt a price in micros and encode it for macro substitution.
    pub fn encode_micros(&self, micros: u64, iv: Option<InitVector>) -> Result<String> {
        Ok(encoding::encode(&self.encrypt_micros(micros, iv)?))
    }

    /// Decode and decrypt a price string back to micros.
    pub fn decode_micros(&self, encoded: &str) -> Result<u64> {
        self.decrypt_micros(&encoding::decode(encoded)?)
    }

    /// Encrypt a currency-unit price and encode it.
    pub fn encode_value(&self, value: f64, iv: Option<InitVector>) -> Result<String> {
        self.encode_micros(Self::micros_from_value(value), iv)
    }

    /// Decode and decrypt a price string back to a currency-unit price.
    pub fn decode_value(&self, encoded: &str) -> Result<f64> {
        Ok(Self::value_from_micros(self.decode_micros(encoded)?))
    }
}
