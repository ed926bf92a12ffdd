//! Fuzz target for Container::decrypt
//!
//! Feeds arbitrary byte sequences to the container decrypt path to find:
//! - Panics in the keystream section walk or counter widening
//! - Integer overflows in length/section arithmetic
//! - Slice out-of-bounds on truncated or oversized packages
//!
//! The fuzzer should NEVER panic. All invalid inputs should return an
//! error (Malformed, PayloadTooLarge, or SignatureMismatch).

#![no_main]

use bidseal_crypto::{Container, KeyMaterial};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let keys = match KeyMaterial::new(&[0x11; 32], &[0x22; 32]) {
        Ok(keys) => keys,
        Err(_) => return,
    };

    // Arbitrary bytes must decrypt cleanly or error, never panic.
    let _ = Container::new(keys).decrypt(data);
});
