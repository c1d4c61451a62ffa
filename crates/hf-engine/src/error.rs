//! Error types for engine setup.
//!
//! A calculation itself never fails; these cover loading and checking
//! [`EngineConfig`](crate::EngineConfig).

use hf_core::HfError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid configuration: {what}")]
    Config { what: String },

    #[error("Numeric error: {0}")]
    Numeric(#[from] HfError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
