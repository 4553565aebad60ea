use crate::error::Result;
use crate::transport::codec::{Alphabet, TransportCodec, fits_in_url};
use crate::transport::viewer::{DEFAULT_VIEWER_URL, viewer_url};
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn codec_for(url_safe: bool) -> TransportCodec {
    let alphabet = if url_safe { Alphabet::UrlSafe } else { Alphabet::Standard };
    TransportCodec::new().with_alphabet(alphabet)
}

/// Parameters for encoding the mindmap into a transport string
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct EncodePayloadParams {
    /// Use the URL-safe base64 alphabet (default: false)
    #[serde(default)]
    pub url_safe: bool,

    /// Encode only the node tree, dropping extraction metadata (default: false)
    #[serde(default)]
    pub tree_only: bool,
}

/// Tool encoding the current mindmap for cross-surface handoff
#[derive(Default)]
pub struct EncodePayloadTool;

impl Tool for EncodePayloadTool {
    type Params = EncodePayloadParams;

    fn name(&self) -> &str {
        "encode_payload"
    }

    fn execute_typed(
        &self,
        params: EncodePayloadParams,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let codec = codec_for(params.url_safe);
        let encoded = if params.tree_only {
            codec.encode(context.mindmap.root())?
        } else {
            codec.encode(context.mindmap)?
        };

        Ok(ToolResult::success_with(serde_json::json!({
            "length": encoded.len(),
            "fits_in_url": fits_in_url(&encoded),
            "payload": encoded
        })))
    }
}

/// Parameters for decoding a transport string
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DecodePayloadParams {
    /// Encoded transport string
    pub payload: String,

    /// The payload uses the URL-safe base64 alphabet (default: false)
    #[serde(default)]
    pub url_safe: bool,
}

/// Tool decoding a transport string back into JSON
#[derive(Default)]
pub struct DecodePayloadTool;

impl Tool for DecodePayloadTool {
    type Params = DecodePayloadParams;

    fn name(&self) -> &str {
        "decode_payload"
    }

    fn execute_typed(
        &self,
        params: DecodePayloadParams,
        _context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let decoded: Value = codec_for(params.url_safe).decode(&params.payload)?;
        Ok(ToolResult::success_with(decoded))
    }
}

/// Parameters for building a viewer link
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ViewerUrlParams {
    /// Viewer page to open (default: the hosted mindmap viewer)
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Tool building a viewer URL that carries the current mindmap
#[derive(Default)]
pub struct ViewerUrlTool;

impl Tool for ViewerUrlTool {
    type Params = ViewerUrlParams;

    fn name(&self) -> &str {
        "viewer_url"
    }

    fn execute_typed(
        &self,
        params: ViewerUrlParams,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let base = params.base_url.as_deref().unwrap_or(DEFAULT_VIEWER_URL);
        let url = viewer_url(base, context.mindmap, &TransportCodec::default())?;

        Ok(ToolResult::success_with(serde_json::json!({
            "url": url.as_str(),
            "length": url.as_str().len()
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mindmap::{Mindmap, MindmapNode};
    use serde_json::json;

    fn create_test_mindmap() -> Mindmap {
        Mindmap::new(MindmapNode::new("Root").with_children(vec![MindmapNode::new("Child")]))
            .with_metadata("title", "Notebook")
    }

    #[test]
    fn test_encode_then_decode_tools() {
        let mindmap = create_test_mindmap();
        let mut context = ToolContext::new(&mindmap);

        let encoded = EncodePayloadTool.execute(json!({}), &mut context).unwrap();
        let data = encoded.data.unwrap();
        assert_eq!(data["fits_in_url"], true);

        let payload = data["payload"].as_str().unwrap().to_string();
        let decoded = DecodePayloadTool
            .execute(json!({ "payload": payload }), &mut context)
            .unwrap();

        assert_eq!(decoded.data.unwrap(), serde_json::to_value(&mindmap).unwrap());
    }

    #[test]
    fn test_encode_tree_only_url_safe() {
        let mindmap = create_test_mindmap();
        let mut context = ToolContext::new(&mindmap);

        let result = EncodePayloadTool
            .execute_typed(
                EncodePayloadParams {
                    url_safe: true,
                    tree_only: true,
                },
                &mut context,
            )
            .unwrap();
        let payload = result.data.unwrap()["payload"].as_str().unwrap().to_string();

        let node: MindmapNode = codec_for(true).decode(&payload).unwrap();
        assert_eq!(&node, mindmap.root());
    }

    #[test]
    fn test_decode_corrupted_payload() {
        let mindmap = create_test_mindmap();
        let mut context = ToolContext::new(&mindmap);

        let result = DecodePayloadTool.execute(json!({"payload": "%%%"}), &mut context);
        assert!(result.is_err());
    }

    #[test]
    fn test_viewer_url_tool() {
        let mindmap = create_test_mindmap();
        let mut context = ToolContext::new(&mindmap);

        let result = ViewerUrlTool
            .execute(json!({"base_url": "https://viewer.example.com/"}), &mut context)
            .unwrap();
        let data = result.data.unwrap();

        assert!(data["url"].as_str().unwrap().starts_with("https://viewer.example.com/?data="));
    }
}
