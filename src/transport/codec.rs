use crate::error::{DecodeStage, MindmapError, Result};
use crate::json;
use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Encoded payloads longer than this are likely to be truncated by browsers or
/// servers once placed in a URL. The codec does not enforce it.
pub const URL_PAYLOAD_WARN_LEN: usize = 8 * 1024;

const STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Base64 alphabet used for the outer transport stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alphabet {
    /// `A-Z a-z 0-9 + /` with padding, readable by a browser's `atob`
    #[default]
    Standard,
    /// `A-Z a-z 0-9 - _` without padding
    UrlSafe,
}

/// Encodes payloads as JSON, percent-escapes the text, then base64-encodes it
///
/// Decoding runs the stages in reverse and fails as a whole if any stage
/// fails; no partially decoded payload is ever returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportCodec {
    alphabet: Alphabet,
}

impl TransportCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: choose the transport alphabet
    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    fn engine(&self) -> &'static GeneralPurpose {
        match self.alphabet {
            Alphabet::Standard => &STANDARD,
            Alphabet::UrlSafe => &URL_SAFE,
        }
    }

    /// Serialize a payload into a transport string
    pub fn encode<T: Serialize + ?Sized>(&self, payload: &T) -> Result<String> {
        let json = json::to_string(payload)?;
        let encoded = self.encode_text(&json);

        log::debug!(
            "Encoded {} bytes of JSON into {} transport bytes",
            json.len(),
            encoded.len()
        );
        if encoded.len() > URL_PAYLOAD_WARN_LEN {
            log::warn!(
                "Transport payload is {} bytes; URLs this long may be truncated",
                encoded.len()
            );
        }

        Ok(encoded)
    }

    /// Parse a transport string back into a payload
    pub fn decode<T: DeserializeOwned>(&self, encoded: &str) -> Result<T> {
        let json = self.decode_text(encoded)?;
        json::from_str(&json).map_err(|e| decode_failed(DecodeStage::Json, e))
    }

    /// Text stage of [`TransportCodec::encode`]: percent-escape, then base64
    pub fn encode_text(&self, text: &str) -> String {
        let escaped = urlencoding::encode(text);
        self.engine().encode(escaped.as_bytes())
    }

    /// Inverse of [`TransportCodec::encode_text`]
    pub fn decode_text(&self, encoded: &str) -> Result<String> {
        let normalized = self.normalize(encoded);

        let bytes = self
            .engine()
            .decode(normalized.as_bytes())
            .map_err(|e| decode_failed(DecodeStage::Base64, e))?;
        let escaped = String::from_utf8(bytes).map_err(|e| decode_failed(DecodeStage::Utf8, e))?;
        let text =
            urlencoding::decode(&escaped).map_err(|e| decode_failed(DecodeStage::Percent, e))?;

        Ok(text.into_owned())
    }

    // Query-string parsing turns `+` into a space; repair before trimming so a
    // trailing `+` is not lost
    fn normalize(&self, encoded: &str) -> String {
        match self.alphabet {
            Alphabet::Standard => encoded.replace(' ', "+").trim().to_string(),
            Alphabet::UrlSafe => encoded.trim().to_string(),
        }
    }
}

/// Whether an encoded payload is short enough to embed in a URL comfortably
pub fn fits_in_url(encoded: &str) -> bool {
    encoded.len() <= URL_PAYLOAD_WARN_LEN
}

fn decode_failed(stage: DecodeStage, err: impl std::fmt::Display) -> MindmapError {
    MindmapError::DecodeFailed {
        stage,
        reason: err.to_string(),
    }
}
