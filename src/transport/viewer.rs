use crate::error::{MindmapError, Result};
use crate::transport::codec::TransportCodec;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

/// Viewer page that renders mindmaps passed in its query string
pub const DEFAULT_VIEWER_URL: &str = "https://nexus-mindmap-extractor.netlify.app";

/// Query parameter carrying the encoded payload
pub const DATA_PARAM: &str = "data";

/// Build a viewer URL with the encoded payload in its `data` parameter
pub fn viewer_url<T: Serialize + ?Sized>(
    base: &str,
    payload: &T,
    codec: &TransportCodec,
) -> Result<Url> {
    let mut url =
        Url::parse(base).map_err(|e| MindmapError::InvalidUrl(format!("{}: {}", base, e)))?;
    let encoded = codec.encode(payload)?;

    url.query_pairs_mut().append_pair(DATA_PARAM, &encoded);
    Ok(url)
}

/// Extract and decode the payload from a viewer URL
pub fn payload_from_url<T: DeserializeOwned>(url: &str, codec: &TransportCodec) -> Result<T> {
    let url = Url::parse(url).map_err(|e| MindmapError::InvalidUrl(format!("{}: {}", url, e)))?;

    let encoded = url
        .query_pairs()
        .find(|(key, _)| key == DATA_PARAM)
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| {
            MindmapError::InvalidUrl(format!("missing '{}' query parameter", DATA_PARAM))
        })?;

    codec.decode(&encoded)
}
