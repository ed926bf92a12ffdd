//! Bid-Path Payload Codecs
//!
//! Four thin codecs over the [`bidseal_crypto`] container, one per
//! payload category the exchange protects on the bid path:
//!
//! - [`PriceCodec`] — winning prices, 8-byte big-endian micros
//! - [`AdIdCodec`] — platform-neutral advertising ids, exactly 16 bytes
//! - [`IdfaCodec`] — iOS IDFAs, variable length
//! - [`HyperlocalCodec`] — geofence blobs, opaque serialized messages
//!
//! Every codec owns a [`Container`] and differs only in payload size
//! constraints and scalar framing. Each offers binary
//! (`encrypt`/`decrypt`) and string (`encode`/`decode`) forms; the
//! string forms sandwich unpadded URL-safe base64 around the package,
//! which is how prices and IDFAs are carried inside URLs and macros.
//!
//! Failed operations emit `tracing` events at debug level carrying
//! lengths and error kinds only; key bytes and payload contents never
//! reach the log stream.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod ad_id;
pub mod hyperlocal;
pub mod idfa;
mod opaque;
pub mod price;

pub use ad_id::AdIdCodec;
pub use bidseal_crypto::{Container, CryptoError, InitVector, KeyMaterial, Result};
pub use hyperlocal::HyperlocalCodec;
pub use idfa::IdfaCodec;
pub use price::PriceCodec;
