//! Network flow estimation.
//!
//! One flow figure is used for every friction term in a calculation; the
//! split at connectors is not modelled.

use hf_equipment::EquipmentLookup;
use hf_hydraulics::typical_flow_rate;
use hf_layout::LayoutIndex;

/// Sum of typical flows over all terminals, or `default_flow` when the
/// layout has none.
pub fn estimate_flow_rate(
    index: &LayoutIndex<'_>,
    catalog: &dyn EquipmentLookup,
    default_flow: f64,
) -> f64 {
    let mut total = 0.0;
    let mut terminals = 0usize;
    for idx in index.indices() {
        let node = index.node(idx);
        let Some(eq) = catalog.equipment_by_id(&node.equipment_id) else {
            continue;
        };
        if eq.as_terminal().is_some() {
            total += typical_flow_rate(&eq.id);
            terminals += 1;
        }
    }

    if terminals == 0 { default_flow } else { total }
}
