//! hf-layout: the equipment layout graph drawn in the editor.
//!
//! Provides:
//! - Layout data structures (nodes placed from the catalog, directed edges)
//! - Mutation helpers matching the editor's operations
//! - A compact index with resolved adjacency for traversal
//! - JSON/YAML persistence with basic shape validation
//!
//! # Example
//!
//! ```
//! use hf_equipment::builtin_catalog;
//! use hf_layout::{Layout, Position, downstream_nodes};
//!
//! let catalog = builtin_catalog();
//! let mut layout = Layout::new("demo");
//! let pump = layout
//!     .add_node(catalog.get("pump-ziegler").unwrap(), Position::default(), 0.0)
//!     .id
//!     .clone();
//! let hose = layout
//!     .add_node(catalog.get("hose-2.5").unwrap(), Position::new(100.0, 0.0), 0.0)
//!     .id
//!     .clone();
//! layout.add_edge(&pump, &hose, None, None).unwrap();
//!
//! assert_eq!(downstream_nodes(&layout, &pump)[0].id, hose);
//! ```

pub mod builder;
pub mod index;
pub mod model;
pub mod query;
pub mod validate;

use std::path::Path;

pub use builder::{NodeUpdate, create_edge, create_empty_layout, create_node, now_millis};
pub use index::LayoutIndex;
pub use model::{Layout, LayoutEdge, LayoutNode, Position};
pub use query::{downstream_nodes, upstream_nodes};
pub use validate::{ValidationError, validate_layout};

pub type LayoutResult<T> = Result<T, LayoutError>;

#[derive(thiserror::Error, Debug)]
pub enum LayoutError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn from_json_str(content: &str) -> LayoutResult<Layout> {
    let layout: Layout = serde_json::from_str(content)?;
    validate_layout(&layout)?;
    Ok(layout)
}

pub fn to_json_string(layout: &Layout) -> LayoutResult<String> {
    Ok(serde_json::to_string_pretty(layout)?)
}

pub fn load_json(path: &Path) -> LayoutResult<Layout> {
    let content = std::fs::read_to_string(path)?;
    let layout = from_json_str(&content)?;
    tracing::debug!(path = %path.display(), nodes = layout.nodes.len(), edges = layout.edges.len(), "loaded layout");
    Ok(layout)
}

pub fn save_json(path: &Path, layout: &Layout) -> LayoutResult<()> {
    validate_layout(layout)?;
    std::fs::write(path, to_json_string(layout)?)?;
    tracing::debug!(path = %path.display(), "saved layout");
    Ok(())
}

pub fn load_yaml(path: &Path) -> LayoutResult<Layout> {
    let content = std::fs::read_to_string(path)?;
    let layout: Layout = serde_yaml::from_str(&content)?;
    validate_layout(&layout)?;
    tracing::debug!(path = %path.display(), nodes = layout.nodes.len(), edges = layout.edges.len(), "loaded layout");
    Ok(layout)
}

pub fn save_yaml(path: &Path, layout: &Layout) -> LayoutResult<()> {
    validate_layout(layout)?;
    std::fs::write(path, serde_yaml::to_string(layout)?)?;
    tracing::debug!(path = %path.display(), "saved layout");
    Ok(())
}

/// Load by extension: `.yaml`/`.yml` as YAML, anything else as JSON.
pub fn load(path: &Path) -> LayoutResult<Layout> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
            load_yaml(path)
        }
        _ => load_json(path),
    }
}
