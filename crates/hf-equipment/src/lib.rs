//! hf-equipment: equipment definitions and the catalog the engine reads.
//!
//! Equipment is a closed set of categories (source, pump, hose, connector,
//! terminal), each carrying only the constants that category needs. The
//! catalog is immutable once built; lookups go through [`EquipmentLookup`]
//! so callers can substitute their own store.

pub mod catalog;
pub mod equipment;

pub use catalog::{Catalog, EquipmentLookup, builtin_catalog};
pub use equipment::{
    ConnectorSpec, Equipment, EquipmentCategory, EquipmentKind, HoseSpec, PumpSpec, TerminalSpec,
};

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("Duplicate equipment id: {id}")]
    DuplicateId { id: String },

    #[error("Empty equipment id")]
    EmptyId,

    #[error("Invalid constant on equipment '{id}': {source}")]
    InvalidConstant {
        id: String,
        source: hf_core::HfError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
