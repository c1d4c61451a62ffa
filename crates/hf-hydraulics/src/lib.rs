//! hf-hydraulics: pressure loss relations for fire hose layouts.
//!
//! Provides:
//! - Elevation gain/loss at 1 bar per 10 m of head
//! - Hazen-Williams friction loss for hose sections
//! - The simplified coefficient-scaled friction loss used by the engine
//!
//! Everything here is a pure, total function of its arguments: degenerate
//! input (no flow, zero diameter) is a zero-loss case, not an error.
//!
//! # Example
//!
//! ```
//! use hf_hydraulics::{elevation_loss, simplified_friction_loss};
//!
//! // 0.5 bar coefficient at twice the reference flow, 30 m uphill
//! let friction = simplified_friction_loss(0.5, 1000.0, 500.0);
//! let elevation = elevation_loss(100.0, 130.0);
//! assert!((friction + elevation - 5.0).abs() < 1e-12);
//! ```

pub mod elevation;
pub mod friction;

pub use elevation::{
    elevation_loss, max_reachable_elevation, pressure_change, required_pressure_for_elevation,
};
pub use friction::{
    DEFAULT_FLOW_LPM, friction_loss, friction_loss_per_section,
    simplified_friction_loss, simplified_friction_loss_at_reference, total_friction_loss,
    typical_flow_rate,
};
