//! Export formats derived from a mindmap tree
//!
//! - `table`: rectangular rows with per-depth level columns, rendered as CSV
//! - `outline`: indented bullet outline used when describing the tree to a model

pub mod outline;
pub mod table;

pub use outline::{OutlineFormatter, format_outline};
pub use table::{FIXED_HEADERS, PATH_SEPARATOR, Table, TableRow, escape_field, to_table};
