//! Transport of extracted mindmaps between surfaces
//!
//! Payloads travel as a single opaque string: JSON, percent-escaped, then
//! base64-encoded. The encoded form is meant to ride in a URL query parameter,
//! and URLs impose a practical size limit that callers must check themselves
//! (see [`codec::fits_in_url`]).

pub mod codec;
pub mod viewer;

pub use codec::{Alphabet, TransportCodec, URL_PAYLOAD_WARN_LEN, fits_in_url};
pub use viewer::{DATA_PARAM, DEFAULT_VIEWER_URL, payload_from_url, viewer_url};

use crate::error::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Encode a payload with the default codec
pub fn encode<T: Serialize + ?Sized>(payload: &T) -> Result<String> {
    TransportCodec::default().encode(payload)
}

/// Decode a payload with the default codec
pub fn decode<T: DeserializeOwned>(encoded: &str) -> Result<T> {
    TransportCodec::default().decode(encoded)
}
