//! Bidseal Container Cryptography
//!
//! The authenticated encryption container used on the bid path of an ad
//! exchange. Small payloads (winning prices, advertising identifiers,
//! hyperlocal geofence blobs) travel in self-describing crypto packages
//! that an external counterparty produces and consumes, so the format
//! here is bit-exact and non-negotiable.
//!
//! # Package anatomy
//!
//! ```text
//! payload bytes
//!        │
//!        ▼
//! iv(16) || payload(n) || tag(4)     work buffer
//!        │
//!        ▼
//! HMAC-SHA1(integrity_key, payload || iv)[..4] → tag
//!        │
//!        ▼
//! payload XOR counter-mode HMAC-SHA1(encryption_key, iv || counter)
//!        │
//!        ▼
//! iv(16) || ciphertext(n) || tag(4)  wire package
//! ```
//!
//! Decryption runs the same keystream (XOR is its own inverse),
//! recomputes the tag over the recovered plaintext, and compares in
//! constant time.
//!
//! # Security
//!
//! - Integrity: any single bit flip anywhere in a package (IV,
//!   ciphertext, or tag) fails the tag check
//! - Key separation: the keystream and the tag use independent keys;
//!   swapping them is detected as a signature mismatch
//! - Side channels: the tag comparison is constant-time; the keystream
//!   XOR is data-oblivious by construction
//! - The IV is public. Confidentiality rests entirely on the secrecy of
//!   the encryption key
//!
//! All operations are pure functions of `(keys, iv, payload)`: no
//! global state, nothing blocks, and every type is safe to share across
//! threads.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod container;
pub mod encoding;
pub mod error;
pub mod init_vector;
pub mod keys;
mod keystream;

pub use container::Container;
pub use error::{CryptoError, Result};
pub use init_vector::InitVector;
pub use keys::KeyMaterial;
