//! Hydrostatic pressure change between two elevations.
//!
//! Sign convention: a positive return from [`pressure_change`] is a gain
//! (moving downhill), a negative one is a loss (moving uphill).

use hf_core::constants::METERS_HEAD_PER_BAR;

/// Pressure change in bar when water moves from `from_elevation` to
/// `to_elevation` (meters above sea level).
pub fn pressure_change(from_elevation: f64, to_elevation: f64) -> f64 {
    -(to_elevation - from_elevation) / METERS_HEAD_PER_BAR
}

/// Loss component only, never negative. A downhill move reports 0.
pub fn elevation_loss(from_elevation: f64, to_elevation: f64) -> f64 {
    (-pressure_change(from_elevation, to_elevation)).max(0.0)
}

/// Highest elevation `available_pressure` bar can lift water to.
pub fn max_reachable_elevation(available_pressure: f64, current_elevation: f64) -> f64 {
    current_elevation + available_pressure * METERS_HEAD_PER_BAR
}

/// Pressure needed to lift water between two elevations (negative downhill).
pub fn required_pressure_for_elevation(from_elevation: f64, to_elevation: f64) -> f64 {
    (to_elevation - from_elevation) / METERS_HEAD_PER_BAR
}
