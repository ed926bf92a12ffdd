//! Counter-mode HMAC-SHA1 keystream.
//!
//! The payload region of a work buffer is XOR'd in place against a pad
//! stream. The payload is walked in 20-byte sections (one HMAC-SHA1
//! output each); the pad for section `i` is
//!
//! ```text
//! pad_i = HMAC-SHA1(encryption_key, iv || counter_i)[..section_len_i]
//! ```
//!
//! where the counter is a variable-length big-endian byte string: empty
//! for the first section, one byte (0..=255) for the next 256, then two
//! and three bytes. The counter widens by appending a byte each time the
//! last byte wraps, which caps the stream at 769 distinct sections and
//! the payload at 15 380 bytes.

use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::{
    container::Container,
    error::{CryptoError, Result},
};

type HmacSha1 = Hmac<Sha1>;

/// Section length: one HMAC-SHA1 output (20 bytes).
pub(crate) const SECTION_SIZE: usize = 20;

/// Maximum number of keystream sections (3 * 256 + 1).
pub(crate) const MAX_SECTIONS: usize = 3 * 256 + 1;

/// The per-section counter suffix appended to the HMAC input.
///
/// Starts empty, then counts 0..=255 in one byte, wraps into two bytes,
/// then three. Incrementing always touches the last byte only; earlier
/// bytes stay zero. This is the wire-exact encoding, not a general
/// big-endian integer.
#[derive(Debug)]
pub(crate) struct SectionCounter {
    bytes: [u8; 3],
    len: usize,
}

impl SectionCounter {
    /// Counter for section 0: contributes no bytes.
    pub(crate) fn new() -> Self {
        Self { bytes: [0; 3], len: 0 }
    }

    /// Bytes appended to the HMAC input after the IV.
    pub(crate) fn as_slice(&self) -> &[u8] {
        debug_assert!(self.len <= self.bytes.len(), "counter advanced past section limit");
        &self.bytes[..self.len]
    }

    /// Step to the next section's counter value.
    pub(crate) fn advance(&mut self) {
        if self.len == 0 {
            self.len = 1;
            return;
        }

        self.bytes[self.len - 1] = self.bytes[self.len - 1].wrapping_add(1);
        if self.bytes[self.len - 1] == 0 {
            // Wrapped: widen by one byte. The wrapped byte and all earlier
            // bytes are zero, so no refill is needed.
            self.len += 1;
        }
    }
}

/// XOR the payload region of `work` against the keystream, in place.
///
/// `work` is a full package buffer: `iv(16) || payload(n) || tag(4)`.
/// The IV and tag regions are left untouched. Applying this twice with
/// the same key and IV is the identity, which is how decryption works.
///
/// # Errors
///
/// - `PayloadTooLarge` if the payload spans more than 769 sections
pub(crate) fn xor_sections(work: &mut [u8], encryption_key: &[u8]) -> Result<()> {
    debug_assert!(work.len() >= Container::OVERHEAD, "caller validates the package length");

    let payload_len = work.len() - Container::OVERHEAD;
    let sections = payload_len.div_ceil(SECTION_SIZE);
    if sections > MAX_SECTIONS {
        return Err(CryptoError::PayloadTooLarge {
            size: payload_len,
            max: SECTION_SIZE * MAX_SECTIONS,
        });
    }

    let (iv, rest) = work.split_at_mut(Container::IV_SIZE);
    let payload = &mut rest[..payload_len];

    let mut counter = SectionCounter::new();
    for (index, section) in payload.chunks_mut(SECTION_SIZE).enumerate() {
        if index > 0 {
            counter.advance();
        }

        let Ok(mut mac) = HmacSha1::new_from_slice(encryption_key) else {
            unreachable!("HMAC-SHA1 accepts any key size");
        };
        mac.update(iv);
        mac.update(counter.as_slice());
        let pad = mac.finalize().into_bytes();

        for (byte, pad_byte) in section.iter_mut().zip(pad.iter()) {
            *byte ^= pad_byte;
        }
    }

    Ok(())
}
