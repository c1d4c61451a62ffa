//! Friction loss in fire hose.
//!
//! Two relations live here:
//!
//! - [`friction_loss`]: Hazen-Williams from first principles,
//!   ```text
//!   h_f = 10.67 * Q^1.852 * L / (C^1.852 * D^4.87)    [m head]
//!   ```
//!   with Q in m³/s, L and D in m, converted to bar at 10 m per bar.
//! - [`simplified_friction_loss`]: scales a catalog coefficient measured at a
//!   reference flow by `(Q / Q_ref)^2`. This is what the propagation engine
//!   uses; the full formula is kept as a reference for catalog authors.

use hf_core::constants::{
    HAZEN_WILLIAMS_C, HOSE_SECTION_LENGTH_M, METERS_HEAD_PER_BAR, REFERENCE_FLOW_LPM,
};
use hf_core::units::{lpm, m, mm};
use uom::si::length::meter;
use uom::si::volume_rate::cubic_meter_per_second;

/// Flow assumed for terminals without a typical rate, and for networks
/// without terminals (l/min).
pub const DEFAULT_FLOW_LPM: f64 = 500.0;

const HW_FLOW_EXPONENT: f64 = 1.852;
const HW_DIAMETER_EXPONENT: f64 = 4.87;
const HW_CONSTANT: f64 = 10.67;

/// Hazen-Williams friction loss in bar.
///
/// Returns 0 for non-positive flow, diameter or length.
pub fn friction_loss(flow_rate_lpm: f64, diameter_mm: f64, length_m: f64, c: f64) -> f64 {
    if flow_rate_lpm <= 0.0 || diameter_mm <= 0.0 || length_m <= 0.0 {
        return 0.0;
    }

    let q = lpm(flow_rate_lpm).get::<cubic_meter_per_second>();
    let d = mm(diameter_mm).get::<meter>();
    let l = m(length_m).get::<meter>();

    let head_m = (HW_CONSTANT * q.powf(HW_FLOW_EXPONENT) * l)
        / (c.powf(HW_FLOW_EXPONENT) * d.powf(HW_DIAMETER_EXPONENT));

    head_m / METERS_HEAD_PER_BAR
}

/// Loss over one standard 20 m section with the fire hose roughness.
pub fn friction_loss_per_section(flow_rate_lpm: f64, diameter_mm: f64) -> f64 {
    friction_loss(
        flow_rate_lpm,
        diameter_mm,
        HOSE_SECTION_LENGTH_M,
        HAZEN_WILLIAMS_C,
    )
}

/// Loss over `section_count` consecutive 20 m sections.
pub fn total_friction_loss(flow_rate_lpm: f64, diameter_mm: f64, section_count: u32) -> f64 {
    friction_loss(
        flow_rate_lpm,
        diameter_mm,
        HOSE_SECTION_LENGTH_M * f64::from(section_count),
        HAZEN_WILLIAMS_C,
    )
}

/// Catalog coefficient scaled by the square of the flow ratio.
///
/// `friction_coefficient` is the bar loss of one section at
/// `reference_flow_lpm`. Returns 0 for non-positive flow or coefficient.
pub fn simplified_friction_loss(
    friction_coefficient: f64,
    flow_rate_lpm: f64,
    reference_flow_lpm: f64,
) -> f64 {
    if flow_rate_lpm <= 0.0 || friction_coefficient <= 0.0 {
        return 0.0;
    }
    let ratio = flow_rate_lpm / reference_flow_lpm;
    friction_coefficient * ratio.powi(2)
}

/// [`simplified_friction_loss`] at the catalog reference flow.
pub fn simplified_friction_loss_at_reference(friction_coefficient: f64, flow_rate_lpm: f64) -> f64 {
    simplified_friction_loss(friction_coefficient, flow_rate_lpm, REFERENCE_FLOW_LPM)
}

/// Typical operating flow for a terminal equipment id (l/min).
pub fn typical_flow_rate(terminal_equipment_id: &str) -> f64 {
    match terminal_equipment_id {
        // middle of the 500-2000 l/min range
        "terminal-cannon" => 1000.0,
        // middle of the 200-400 l/min range
        "terminal-wall" => 300.0,
        _ => DEFAULT_FLOW_LPM,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn no_flow_no_loss(flow in -5000.0_f64..=0.0, d in 1.0_f64..200.0, l in 1.0_f64..500.0) {
            prop_assert_eq!(friction_loss(flow, d, l, HAZEN_WILLIAMS_C), 0.0);
            prop_assert_eq!(simplified_friction_loss(0.5, flow, REFERENCE_FLOW_LPM), 0.0);
        }

        #[test]
        fn loss_is_non_negative(flow in 0.0_f64..5000.0, d in 1.0_f64..200.0, coeff in 0.0_f64..2.0) {
            prop_assert!(friction_loss(flow, d, HOSE_SECTION_LENGTH_M, HAZEN_WILLIAMS_C) >= 0.0);
            prop_assert!(simplified_friction_loss(coeff, flow, REFERENCE_FLOW_LPM) >= 0.0);
        }
    }
}
