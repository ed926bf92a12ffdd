//! The 16-byte public initialization vector.
//!
//! Every package opens with a public IV carrying a wall-clock timestamp
//! and a server identifier. The exchange places no constraints on its
//! contents (all-zero IVs are legal and useful for deterministic tests),
//! but the keystream and the integrity tag both depend on it, so two
//! packages with the same IV and payload are byte-identical.
//!
//! Structure (all fields big-endian):
//! - bytes 0-3: seconds since epoch
//! - bytes 4-7: microseconds (0..=999 999)
//! - bytes 8-15: server identifier

use std::time::{SystemTime, UNIX_EPOCH};

use rand::RngCore;

use crate::error::{CryptoError, Result};

/// Public nonce prefixing every crypto package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitVector([u8; 16]);

impl InitVector {
    /// Size of the serialized init vector (16 bytes).
    pub const SIZE: usize = 16;

    /// Build from a pre-packed timestamp field and a server id.
    ///
    /// `timestamp_field` carries seconds in its high 32 bits and
    /// microseconds in its low 32 bits.
    pub fn new(timestamp_field: u64, server_id: u64) -> Self {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..8].copy_from_slice(&timestamp_field.to_be_bytes());
        bytes[8..16].copy_from_slice(&server_id.to_be_bytes());
        Self(bytes)
    }

    /// Build from a millisecond wall-clock reading.
    ///
    /// Retained for callers holding millisecond-precision timestamps;
    /// the millisecond remainder is scaled to microseconds.
    pub fn from_wall_clock(now_millis: i64, server_id: u64) -> Self {
        let secs = (now_millis / 1000) as u64;
        let micros = ((now_millis % 1000) * 1000) as u64;
        Self::new((secs << 32) | micros, server_id)
    }

    /// Build from a [`SystemTime`], keeping full microsecond precision.
    ///
    /// Clocks before the epoch read as time zero.
    pub fn from_system_time(now: SystemTime, server_id: u64) -> Self {
        let since_epoch = now.duration_since(UNIX_EPOCH).unwrap_or_default();
        let timestamp = (since_epoch.as_secs() << 32) | u64::from(since_epoch.subsec_micros());
        Self::new(timestamp, server_id)
    }

    /// Build from the caller's clock and random stream.
    ///
    /// Tests inject a fixed time and a deterministic RNG; production
    /// code uses [`InitVector::fresh`].
    pub fn generate<R: RngCore + ?Sized>(now: SystemTime, rng: &mut R) -> Self {
        Self::from_system_time(now, rng.next_u64())
    }

    /// Default IV for a new package: current wall clock, random server id.
    ///
    /// Draws from the per-thread PRNG, so concurrent threads never hand
    /// out the same value. The randomness is not required to be
    /// cryptographically strong; the exchange tolerates arbitrary IVs.
    pub fn fresh() -> Self {
        Self::generate(SystemTime::now(), &mut rand::thread_rng())
    }

    /// Read the IV prefix off a serialized package.
    ///
    /// # Errors
    ///
    /// - `Malformed` if fewer than 16 bytes are available
    pub fn from_prefix(package: &[u8]) -> Result<Self> {
        if package.len() < Self::SIZE {
            return Err(CryptoError::Malformed { len: package.len(), min: Self::SIZE });
        }

        let mut bytes = [0u8; Self::SIZE];
        bytes.copy_from_slice(&package[..Self::SIZE]);
        Ok(Self(bytes))
    }

    /// Serialized form.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Packed timestamp field: seconds in the high half, micros low.
    pub fn timestamp_field(&self) -> u64 {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&self.0[0..8]);
        u64::from_be_bytes(buf)
    }

    /// Seconds since epoch.
    pub fn seconds(&self) -> u32 {
        (self.timestamp_field() >> 32) as u32
    }

    /// Microsecond part of the timestamp.
    pub fn micros(&self) -> u32 {
        self.timestamp_field() as u32
    }

    /// Server identifier.
    pub fn server_id(&self) -> u64 {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&self.0[8..16]);
        u64::from_be_bytes(buf)
    }
}

impl From<[u8; 16]> for InitVector {
    fn from(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl From<InitVector> for [u8; 16] {
    fn from(iv: InitVector) -> Self {
        iv.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_layout() {
        let iv = InitVector::new(0x0102_0304_0506_0708, 0x090A_0B0C_0D0E_0F10);

        // Timestamp field (bytes 0-7)
        assert_eq!(&iv.as_bytes()[0..8], &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]);

        // Server id (bytes 8-15)
        assert_eq!(&iv.as_bytes()[8..16], &[0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F, 0x10]);
    }

    #[test]
    fn accessors_split_the_timestamp_field() {
        let iv = InitVector::new((1_234_567_890 << 32) | 654_321, 42);

        assert_eq!(iv.seconds(), 1_234_567_890);
        assert_eq!(iv.micros(), 654_321);
        assert_eq!(iv.server_id(), 42);
    }

    #[test]
    fn wall_clock_scales_millis_to_micros() {
        let iv = InitVector::from_wall_clock(1_234_567_890_123, 7);

        assert_eq!(iv.seconds(), 1_234_567_890);
        assert_eq!(iv.micros(), 123_000);
        assert_eq!(iv.server_id(), 7);
    }

    #[test]
    fn system_time_keeps_microsecond_precision() {
        let now = UNIX_EPOCH + std::time::Duration::new(1_700_000_000, 456_789_000);
        let iv = InitVector::from_system_time(now, 9);

        assert_eq!(iv.seconds(), 1_700_000_000);
        assert_eq!(iv.micros(), 456_789);
    }

    #[test]
    fn all_zero_iv_is_legal_and_reproducible() {
        let a = InitVector::from([0u8; 16]);
        let b = InitVector::new(0, 0);

        assert_eq!(a, b);
        assert_eq!(a.as_bytes(), &[0u8; 16]);
    }

    #[test]
    fn prefix_round_trip() {
        let iv = InitVector::new(0xDEAD_BEEF_0000_0001, 0xCAFE);
        let mut package = iv.as_bytes().to_vec();
        package.extend_from_slice(&[0u8; 12]); // body + tag of some package

        assert_eq!(InitVector::from_prefix(&package).unwrap(), iv);
    }

    #[test]
    fn prefix_rejects_short_input() {
        let result = InitVector::from_prefix(&[0u8; 15]);
        assert!(matches!(result, Err(CryptoError::Malformed { len: 15, min: 16 })));
    }

    #[test]
    fn generate_uses_injected_clock_and_rng() {
        struct FixedRng(u64);
        impl RngCore for FixedRng {
            fn next_u32(&mut self) -> u32 {
                self.0 as u32
            }
            fn next_u64(&mut self) -> u64 {
                self.0
            }
            fn fill_bytes(&mut self, dest: &mut [u8]) {
                dest.fill(0);
            }
            fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
                dest.fill(0);
                Ok(())
            }
        }

        let now = UNIX_EPOCH + std::time::Duration::from_secs(1_600_000_000);
        let iv = InitVector::generate(now, &mut FixedRng(0x1122_3344_5566_7788));

        assert_eq!(iv.seconds(), 1_600_000_000);
        assert_eq!(iv.server_id(), 0x1122_3344_5566_7788);
    }

    #[test]
    fn fresh_ivs_are_distinct_across_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| (0..32).map(|_| InitVector::fresh()).collect::<Vec<_>>()))
            .collect();

        let mut server_ids = std::collections::HashSet::new();
        for handle in handles {
            for iv in handle.join().unwrap() {
                assert!(server_ids.insert(iv.server_id()), "thread-local RNGs must not collide");
            }
        }
    }
}
