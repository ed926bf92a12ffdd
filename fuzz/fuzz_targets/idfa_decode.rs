//! Fuzz target for IdfaCodec::decode
//!
//! The IDFA path accepts variable-length packages, so this covers the
//! section-count bounds the fixed-size codecs never reach.

#![no_main]

use bidseal_codecs::IdfaCodec;
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

    let _ = IdfaCodec::new(keys).decode(input);
});
