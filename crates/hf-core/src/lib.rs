//! hf-core: shared foundation for hoseflow.
//!
//! Contains:
//! - units (uom constructors for l/min and meters + hydraulic constants)
//! - numeric (Real + tolerances + float helpers)
//! - ids (compact node indices used by traversal)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

pub use error::{HfError, HfResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
