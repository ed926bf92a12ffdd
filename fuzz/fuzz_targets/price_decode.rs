//! Fuzz target for PriceCodec::decode_micros
//!
//! Exercises the full string path: base64 decode, package size check,
//! keystream, and tag verification, with arbitrary (possibly invalid
//! UTF-8) input.

#![no_main]

use bidseal_codecs::PriceCodec;
use bidseal_crypto::KeyMaterial;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let keys = match KeyMaterial::new(&[0x11; 32], &[0x22; 32]) {
        Ok(keys) => keys,
        Err(_) => return,
    };

    let _ = PriceCodec::new(keys).decode_micros(input);
});
