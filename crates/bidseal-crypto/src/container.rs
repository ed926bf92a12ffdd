//! The crypto package container.
//!
//! Wire layout, shared by every payload type:
//!
//! ```text
//! iv(16) || ciphertext(n) || tag(4)
//! ```
//!
//! The payload length is not encoded; readers infer `n` from the total
//! length minus the 20-byte overhead. Encryption XORs the payload
//! against the counter-mode HMAC-SHA1 keystream; the 4-byte tag is the
//! truncated `HMAC-SHA1(integrity_key, payload || iv)` computed over the
//! plaintext. The tag region itself is never XOR'd.
//!
//! # Security
//!
//! - The tag is verified in constant time after decryption
//! - Both the keystream and the tag depend on the IV, so any bit flip
//!   anywhere in a package is caught as a signature mismatch
//! - Operations are pure functions of `(keys, iv, payload)`; the
//!   container is freely shareable across threads

use hmac::{Hmac, Mac};
use sha1::Sha1;
use subtle::ConstantTimeEq;

use crate::{
    error::{CryptoError, Result},
    init_vector::InitVector,
    keys::KeyMaterial,
    keystream,
};

type HmacSha1 = Hmac<Sha1>;

/// Container encryption over the `iv || ciphertext || tag` package.
///
/// Holds the buyer's [`KeyMaterial`]; one container serves every payload
/// codec for that account. All methods are `&self` and thread-safe.
#[derive(Debug, Clone)]
pub struct Container {
    keys: KeyMaterial,
}

impl Container {
    /// Size of the public init vector prefix.
    pub const IV_SIZE: usize = 16;

    /// Size of the truncated integrity tag suffix.
    pub const TAG_SIZE: usize = 4;

    /// Fixed package overhead: IV plus tag.
    pub const OVERHEAD: usize = Self::IV_SIZE + Self::TAG_SIZE;

    /// Largest payload the keystream can cover (769 sections of 20 bytes).
    pub const MAX_PAYLOAD_SIZE: usize = keystream::SECTION_SIZE * keystream::MAX_SECTIONS;

    /// Create a container over validated key material.
    pub fn new(keys: KeyMaterial) -> Self {
        Self { keys }
    }

    /// The key material this container encrypts with.
    pub fn keys(&self) -> &KeyMaterial {
        &self.keys
    }

    /// Encrypt a payload into a wire package.
    ///
    /// With `iv: None` a fresh default IV (current wall clock, random
    /// server id) is generated. The output is
    /// `iv || ciphertext(payload.len()) || tag`.
    ///
    /// # Errors
    ///
    /// - `PayloadTooLarge` if the payload exceeds
    ///   [`Container::MAX_PAYLOAD_SIZE`]
    pub fn encrypt(&self, payload: &[u8], iv: Option<InitVector>) -> Result<Vec<u8>> {
        if payload.len() > Self::MAX_PAYLOAD_SIZE {
            return Err(CryptoError::PayloadTooLarge {
                size: payload.len(),
                max: Self::MAX_PAYLOAD_SIZE,
            });
        }

        let iv = iv.unwrap_or_else(InitVector::fresh);

        // Tag over the plaintext, before the keystream touches it.
        let tag = self.integrity_tag(payload, iv.as_bytes());

        let mut work = Vec::with_capacity(payload.len() + Self::OVERHEAD);
        work.extend_from_slice(iv.as_bytes());
        work.extend_from_slice(payload);
        work.extend_from_slice(&tag);

        keystream::xor_sections(&mut work, self.keys.encryption_key())?;

        Ok(work)
    }

    /// Decrypt a wire package back into a work buffer.
    ///
    /// The returned buffer has the package shape with the plaintext in
    /// the payload region: `iv || payload || tag'`. Use
    /// [`Container::payload_of`] to slice the payload out.
    ///
    /// # Errors
    ///
    /// - `Malformed` if the package is shorter than the 20-byte overhead
    /// - `PayloadTooLarge` if the body exceeds the keystream limit
    /// - `SignatureMismatch` if the recovered plaintext fails the tag
    ///   check
    pub fn decrypt(&self, cipher: &[u8]) -> Result<Vec<u8>> {
        if cipher.len() < Self::OVERHEAD {
            return Err(CryptoError::Malformed { len: cipher.len(), min: Self::OVERHEAD });
        }

        let mut work = cipher.to_vec();
        keystream::xor_sections(&mut work, self.keys.encryption_key())?;

        let tag_base = work.len() - Self::TAG_SIZE;
        let expected = self.integrity_tag(&work[Self::IV_SIZE..tag_base], &work[..Self::IV_SIZE]);

        if !bool::from(expected.as_slice().ct_eq(&work[tag_base..])) {
            return Err(CryptoError::SignatureMismatch);
        }

        // The trailing bytes carry the recomputed tag, which legacy
        // consumers read back out of the buffer.
        work[tag_base..].copy_from_slice(&expected);

        Ok(work)
    }

    /// The payload window of a package or decrypted work buffer.
    ///
    /// # Errors
    ///
    /// - `Malformed` if the buffer is shorter than the 20-byte overhead
    pub fn payload_of(package: &[u8]) -> Result<&[u8]> {
        if package.len() < Self::OVERHEAD {
            return Err(CryptoError::Malformed { len: package.len(), min: Self::OVERHEAD });
        }

        Ok(&package[Self::IV_SIZE..package.len() - Self::TAG_SIZE])
    }

    /// Truncated `HMAC-SHA1(integrity_key, payload || iv)`.
    ///
    /// Payload first, IV second: the tag input reverses the wire order.
    fn integrity_tag(&self, payload: &[u8], iv: &[u8]) -> [u8; Self::TAG_SIZE] {
        let Ok(mut mac) = HmacSha1::new_from_slice(self.keys.integrity_key()) else {
            unreachable!("HMAC-SHA1 accepts any key size");
        };
        mac.update(payload);
        mac.update(iv);
        let digest = mac.finalize().into_bytes();

        let mut tag = [0u8; Self::TAG_SIZE];
        tag.copy_from_slice(&digest[..Self::TAG_SIZE]);
        tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_container() -> Container {
        Container::new(KeyMaterial::new(&[0x11; 32], &[0x22; 32]).unwrap())
    }

    fn test_iv() -> InitVector {
        InitVector::new(0x1234_5678_0001_E240, 0xAABB_CCDD_EEFF_0011)
    }

    #[test]
    fn round_trip_recovers_payload_and_iv() {
        let container = test_container();
        let payload = b"winning price payload";

        let cipher = container.encrypt(payload, Some(test_iv())).unwrap();
        let work = container.decrypt(&cipher).unwrap();

        assert_eq!(Container::payload_of(&work).unwrap(), payload);
        assert_eq!(&work[..Container::IV_SIZE], test_iv().as_bytes());
    }

    #[test]
    fn encrypt_is_deterministic_for_a_fixed_iv() {
        let container = test_container();
        let payload = [0x42; 40];

        let a = container.encrypt(&payload, Some(test_iv())).unwrap();
        let b = container.encrypt(&payload, Some(test_iv())).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn iv_is_transparent_in_the_ciphertext() {
        let container = test_container();
        let cipher = container.encrypt(&[7; 10], Some(test_iv())).unwrap();

        assert_eq!(&cipher[..Container::IV_SIZE], test_iv().as_bytes());
    }

    #[test]
    fn package_length_is_payload_plus_overhead() {
        let container = test_container();

        for len in [0usize, 1, 8, 19, 20, 21, 100] {
            let cipher = container.encrypt(&vec![0xA5; len], Some(test_iv())).unwrap();
            assert_eq!(cipher.len(), len + Container::OVERHEAD);
        }
    }

    #[test]
    fn empty_payload_round_trips() {
        let container = test_container();

        let cipher = container.encrypt(&[], Some(test_iv())).unwrap();
        assert_eq!(cipher.len(), Container::OVERHEAD);

        let work = container.decrypt(&cipher).unwrap();
        assert!(Container::payload_of(&work).unwrap().is_empty());
    }

    #[test]
    fn default_iv_is_used_when_none_is_given() {
        let container = test_container();
        let cipher = container.encrypt(b"payload", None).unwrap();

        // The decrypt side must accept whatever IV was generated.
        let work = container.decrypt(&cipher).unwrap();
        assert_eq!(Container::payload_of(&work).unwrap(), b"payload");
    }

    #[test]
    fn bit_flips_anywhere_are_rejected() {
        let container = test_container();
        let cipher = container.encrypt(b"auction payload", Some(test_iv())).unwrap();

        // One position inside each region: IV, body, tag.
        for position in [0, 3, 15, 16, 20, cipher.len() - 4, cipher.len() - 1] {
            let mut tampered = cipher.clone();
            tampered[position] ^= 0x01;

            let result = container.decrypt(&tampered);
            assert!(
                matches!(result, Err(CryptoError::SignatureMismatch)),
                "flip at byte {position} must fail the tag check"
            );
        }
    }

    #[test]
    fn swapped_keys_fail_the_tag_check() {
        let encrypting = test_container();
        let swapped = Container::new(KeyMaterial::new(&[0x22; 32], &[0x11; 32]).unwrap());

        let cipher = encrypting.encrypt(b"payload", Some(test_iv())).unwrap();
        let result = swapped.decrypt(&cipher);

        assert!(matches!(result, Err(CryptoError::SignatureMismatch)));
    }

    #[test]
    fn short_package_is_malformed() {
        let container = test_container();

        for len in [0usize, 1, 19] {
            let result = container.decrypt(&vec![0u8; len]);
            assert!(matches!(result, Err(CryptoError::Malformed { min: 20, .. })));
        }
    }

    #[test]
    fn max_payload_encrypts_and_one_more_byte_does_not() {
        let container = test_container();

        let at_limit = vec![0u8; Container::MAX_PAYLOAD_SIZE];
        let cipher = container.encrypt(&at_limit, Some(test_iv())).unwrap();
        let work = container.decrypt(&cipher).unwrap();
        assert_eq!(Container::payload_of(&work).unwrap(), at_limit.as_slice());

        let over_limit = vec![0u8; Container::MAX_PAYLOAD_SIZE + 1];
        let result = container.encrypt(&over_limit, Some(test_iv()));
        assert!(matches!(result, Err(CryptoError::PayloadTooLarge { size: 15_381, max: 15_380 })));
    }

    #[test]
    fn oversized_package_is_rejected_on_decrypt() {
        let container = test_container();
        let bogus = vec![0u8; Container::MAX_PAYLOAD_SIZE + 1 + Container::OVERHEAD];

        let result = container.decrypt(&bogus);
        assert!(matches!(result, Err(CryptoError::PayloadTooLarge { .. })));
    }

    #[test]
    fn decrypted_buffer_carries_a_self_consistent_tag() {
        // The trailing 4 bytes of the decrypt output are the recomputed
        // tag, which equals the stored tag of an untampered package
        // (the tag region is never XOR'd on the wire).
        let container = test_container();
        let cipher = container.encrypt(b"some payload", Some(test_iv())).unwrap();
        let work = container.decrypt(&cipher).unwrap();

        let tag_base = cipher.len() - Container::TAG_SIZE;
        assert_eq!(&work[tag_base..], &cipher[tag_base..]);
    }

    #[test]
    fn different_ivs_produce_different_ciphertexts() {
        let container = test_container();
        let payload = [0u8; 24];

        let a = container.encrypt(&payload, Some(InitVector::new(1, 1))).unwrap();
        let b = container.encrypt(&payload, Some(InitVector::new(2, 1))).unwrap();

        assert_ne!(&a[Container::IV_SIZE..], &b[Container::IV_SIZE..]);
    }
}
