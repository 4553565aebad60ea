//! # mindmap-extract
//!
//! A Rust library for turning mindmaps scraped from a web page into portable formats.
//!
//! ## Features
//!
//! - **Tree Model**: Lenient parsing of untrusted `{text, children}` JSON into a typed tree
//! - **Flattening**: Deterministic pre-order records (text, depth, child count)
//! - **CSV Export**: Spreadsheet-ready tables with path and per-depth level columns
//! - **Outline**: Indented bullet outlines for describing a mindmap to a language model
//! - **Transport Codec**: URL-safe encoding for handing a mindmap to a viewer page
//! - **Tool System**: Named operations over JSON, returning `{success, data, error}` envelopes
//!
//! ## Library Usage
//!
//! ### Exporting a Mindmap
//!
//! ```rust
//! use mindmap_extract::Mindmap;
//!
//! # fn main() -> mindmap_extract::Result<()> {
//! let mindmap = Mindmap::from_json(r#"{
//!     "data": {"text": "Root", "children": [{"text": "A"}, {"text": "B"}]},
//!     "title": "My notebook"
//! }"#)?;
//!
//! let csv = mindmap.to_table()?.to_csv();
//! assert!(csv.starts_with("Depth,Path,Has_Children,Children_Count,Level_0,Level_1"));
//!
//! println!("{}", mindmap.outline());
//! # Ok(())
//! # }
//! ```
//!
//! ### Handing a Mindmap to the Viewer
//!
//! ```rust
//! use mindmap_extract::{Mindmap, MindmapNode, TransportCodec};
//! use mindmap_extract::transport::{viewer_url, DEFAULT_VIEWER_URL};
//!
//! # fn main() -> mindmap_extract::Result<()> {
//! let mindmap = Mindmap::new(MindmapNode::new("Root"));
//! let codec = TransportCodec::default();
//!
//! let url = viewer_url(DEFAULT_VIEWER_URL, &mindmap, &codec)?;
//! let encoded = codec.encode(&mindmap)?;
//! let decoded: Mindmap = codec.decode(&encoded)?;
//! assert_eq!(decoded, mindmap);
//! # let _ = url;
//! # Ok(())
//! # }
//! ```
//!
//! ### Using the Tool System
//!
//! ```rust
//! use mindmap_extract::{Mindmap, MindmapNode};
//! use mindmap_extract::tools::{ToolContext, ToolRegistry};
//! use serde_json::json;
//!
//! # fn main() -> mindmap_extract::Result<()> {
//! let mindmap = Mindmap::new(MindmapNode::new("Root"));
//! let registry = ToolRegistry::with_defaults();
//! let mut context = ToolContext::new(&mindmap);
//!
//! let result = registry.execute("build_prompt", json!({"kind": "summary"}), &mut context)?;
//! assert!(result.success);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`mindmap`]: Tree model, extraction envelope and flattening
//! - [`export`]: CSV table and outline rendering
//! - [`transport`]: Transport codec and viewer links
//! - [`analysis`]: Prompt building and chat-completions request/response shapes
//! - [`tools`]: Named operations for driving the crate from JSON
//! - [`error`]: Error types and result aliases

pub mod analysis;
pub mod error;
pub mod export;
mod json;
pub mod mindmap;
pub mod tools;
pub mod transport;

pub use analysis::{AnalysisConfig, AnalysisType, PromptBuilder};
pub use error::{DecodeStage, MindmapError, Result};
pub use export::{OutlineFormatter, Table, TableRow, format_outline, to_table};
pub use mindmap::{FlatRecord, Mindmap, MindmapNode, TreeStats, flatten};
pub use tools::{Tool, ToolContext, ToolRegistry, ToolResult};
pub use transport::{Alphabet, TransportCodec};
