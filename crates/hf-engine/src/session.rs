//! Depth-first pressure propagation.
//!
//! ## Rules applied at each node
//!
//! ```text
//! pump       p = max_pressure                     (relay: incoming pressure discarded)
//! source     p = p_in                             (only seen mid-graph)
//! hose       p = p_in - Δelev - k_f * (Q/Q_ref)^2
//! connector  p = p_in - Δelev - fixed loss
//! terminal   p = p_in - Δelev
//! ```
//!
//! `Δelev` is the signed hydrostatic change from the preceding node, so a
//! downhill run raises pressure. The stored `elevation_loss` only reports
//! the uphill part.
//!
//! ## Visiting order
//!
//! All traversal state lives in one [`TraversalSession`] per call. Its
//! visited set spans every start node, so a node reachable from two starts
//! keeps whatever the first traversal (in layout order) computed. Children
//! are explored in edge-list order off an explicit stack.

use hf_core::NodeIndex;
use hf_equipment::{Equipment, EquipmentKind, EquipmentLookup};
use hf_hydraulics::{elevation_loss, pressure_change, simplified_friction_loss};
use hf_layout::{Layout, LayoutIndex};
use tracing::{debug, info, trace, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::flow::estimate_flow_rate;
use crate::result::{
    CalculationError, CalculationResult, NodeCalculation, PathCalculation, PressureStatus,
};

/// Calculate pressures with the default [`EngineConfig`].
///
/// `flow_rate_lpm` overrides the flow estimated from the terminals.
pub fn calculate(
    layout: &Layout,
    catalog: &dyn EquipmentLookup,
    flow_rate_lpm: Option<f64>,
) -> CalculationResult {
    calculate_with_config(layout, catalog, flow_rate_lpm, &EngineConfig::default())
}

pub fn calculate_with_config(
    layout: &Layout,
    catalog: &dyn EquipmentLookup,
    flow_rate_lpm: Option<f64>,
    config: &EngineConfig,
) -> CalculationResult {
    if layout.nodes.is_empty() {
        return CalculationResult::empty();
    }

    let index = LayoutIndex::from_layout(layout);
    if index.dropped_edges() > 0 {
        debug!(
            layout = %layout.id,
            dropped = index.dropped_edges(),
            "ignoring edges with unresolved endpoints"
        );
    }

    let starts = find_start_nodes(&index, catalog);
    let mut errors = Vec::new();
    if starts.is_empty() && !has_pump(&index, catalog) {
        errors.push(CalculationError::no_pump());
    }

    let flow = match flow_rate_lpm {
        Some(f) if f.is_finite() => f,
        Some(f) => {
            warn!(flow = f, "ignoring non-finite flow rate, estimating from terminals");
            estimate_flow_rate(&index, catalog, config.default_flow_lpm)
        }
        None => estimate_flow_rate(&index, catalog, config.default_flow_lpm),
    };

    let mut session = TraversalSession::new(&index, catalog, config, flow, errors);
    for start in starts {
        session.run_from(start);
    }
    session.mark_unreached();
    if config.check_pump_flow {
        session.check_pump_flow();
    }

    let result = session.finish();
    info!(
        layout = %layout.id,
        nodes = result.nodes.len(),
        paths = result.paths.len(),
        errors = result.errors.len(),
        flow,
        "pressure calculation finished"
    );
    result
}

/// Sources, plus pumps nothing feeds, in layout order.
fn find_start_nodes(index: &LayoutIndex<'_>, catalog: &dyn EquipmentLookup) -> Vec<NodeIndex> {
    index
        .indices()
        .filter(|&idx| {
            match catalog.equipment_by_id(&index.node(idx).equipment_id) {
                Some(eq) => match eq.kind {
                    EquipmentKind::Source => true,
                    EquipmentKind::Pump(_) => !index.has_incoming(idx),
                    _ => false,
                },
                None => false,
            }
        })
        .collect()
}

fn has_pump(index: &LayoutIndex<'_>, catalog: &dyn EquipmentLookup) -> bool {
    index.indices().any(|idx| {
        catalog
            .equipment_by_id(&index.node(idx).equipment_id)
            .is_some_and(|eq| eq.as_pump().is_some())
    })
}

/// Pending visit on the work stack.
struct Frame {
    node: NodeIndex,
    incoming_pressure: f64,
    previous_elevation: f64,
    /// Route from the start node up to, not including, `node`.
    path: Vec<NodeIndex>,
}

/// Losses and resulting pressure at one node.
struct NodeOutcome {
    pressure: f64,
    net_loss: f64,
    elevation_loss: f64,
    friction_loss: f64,
}

/// Mutable state of one calculation.
pub(crate) struct TraversalSession<'a> {
    index: &'a LayoutIndex<'a>,
    catalog: &'a dyn EquipmentLookup,
    config: &'a EngineConfig,
    flow: f64,
    visited: Vec<bool>,
    nodes: Vec<Option<NodeCalculation>>,
    paths: Vec<PathCalculation>,
    errors: Vec<CalculationError>,
}

impl<'a> TraversalSession<'a> {
    pub(crate) fn new(
        index: &'a LayoutIndex<'a>,
        catalog: &'a dyn EquipmentLookup,
        config: &'a EngineConfig,
        flow: f64,
        errors: Vec<CalculationError>,
    ) -> Self {
        let n = index.node_count();
        Self {
            index,
            catalog,
            config,
            flow,
            visited: vec![false; n],
            nodes: vec![None; n],
            paths: Vec::new(),
            errors,
        }
    }

    fn equipment(&self, idx: NodeIndex) -> Option<&'a Equipment> {
        self.catalog
            .equipment_by_id(&self.index.node(idx).equipment_id)
    }

    fn store(&mut self, idx: NodeIndex, calc: NodeCalculation) {
        self.nodes[idx.index()] = Some(calc);
    }

    /// Traverse everything reachable from `start`.
    pub(crate) fn run_from(&mut self, start: NodeIndex) {
        let node = self.index.node(start);
        if self.visited[start.index()] {
            debug!(start = %node.id, "start node already reached by an earlier traversal");
            return;
        }
        self.visited[start.index()] = true;

        let start_pressure = self
            .equipment(start)
            .and_then(Equipment::as_pump)
            .map_or(0.0, |p| p.max_pressure);
        debug!(start = %node.id, pressure = start_pressure, "starting traversal");

        let status = if start_pressure > 0.0 {
            PressureStatus::Good
        } else {
            PressureStatus::Ok
        };
        self.store(
            start,
            NodeCalculation {
                node_id: node.id.clone(),
                pressure: start_pressure,
                flow: self.flow,
                pressure_loss: 0.0,
                elevation_loss: 0.0,
                friction_loss: 0.0,
                status,
            },
        );

        let mut stack: Vec<Frame> = Vec::new();
        self.push_children(&mut stack, start, start_pressure, &[start]);
        while let Some(frame) = stack.pop() {
            self.visit(frame, start_pressure, &mut stack);
        }
    }

    /// Push in reverse so the first edge is popped first.
    fn push_children(
        &self,
        stack: &mut Vec<Frame>,
        parent: NodeIndex,
        pressure: f64,
        path: &[NodeIndex],
    ) {
        let previous_elevation = self.index.node(parent).elevation;
        for &child in self.index.downstream(parent).iter().rev() {
            stack.push(Frame {
                node: child,
                incoming_pressure: pressure,
                previous_elevation,
                path: path.to_vec(),
            });
        }
    }

    fn visit(&mut self, frame: Frame, start_pressure: f64, stack: &mut Vec<Frame>) {
        let idx = frame.node;
        if self.visited[idx.index()] {
            return;
        }
        self.visited[idx.index()] = true;

        let node = self.index.node(idx);
        let Some(equipment) = self.equipment(idx) else {
            warn!(node = %node.id, equipment = %node.equipment_id, "unknown equipment, branch stopped");
            self.errors.push(CalculationError::invalid_connection(
                &node.id,
                &node.equipment_id,
            ));
            return;
        };

        let outcome = self.apply_rules(
            equipment,
            frame.incoming_pressure,
            frame.previous_elevation,
            node.elevation,
        );
        let pressure = outcome.pressure;

        let terminal = equipment.as_terminal();
        let status = match terminal {
            Some(t) => {
                let status =
                    PressureStatus::classify(pressure, t.min_pressure, self.config.status_margin);
                if status == PressureStatus::Low {
                    self.errors.push(CalculationError::pressure_low(
                        &node.id,
                        pressure,
                        t.min_pressure,
                    ));
                }
                status
            }
            None => PressureStatus::classify(
                pressure,
                self.config.branch_min_pressure,
                self.config.status_margin,
            ),
        };
        trace!(node = %node.id, pressure, ?status, "visited");

        self.store(
            idx,
            NodeCalculation {
                node_id: node.id.clone(),
                pressure: pressure.max(0.0),
                flow: self.flow,
                pressure_loss: outcome.net_loss,
                elevation_loss: outcome.elevation_loss,
                friction_loss: outcome.friction_loss,
                status,
            },
        );

        let mut path = frame.path;
        path.push(idx);

        if terminal.is_some() {
            self.record_path(&path, start_pressure, pressure, status);
            return;
        }

        self.push_children(stack, idx, pressure, &path);
    }

    fn apply_rules(
        &self,
        equipment: &Equipment,
        incoming: f64,
        from_elevation: f64,
        to_elevation: f64,
    ) -> NodeOutcome {
        let friction_loss = match &equipment.kind {
            EquipmentKind::Pump(p) => {
                return NodeOutcome {
                    pressure: p.max_pressure,
                    net_loss: 0.0,
                    elevation_loss: 0.0,
                    friction_loss: 0.0,
                };
            }
            EquipmentKind::Source => {
                return NodeOutcome {
                    pressure: incoming,
                    net_loss: 0.0,
                    elevation_loss: 0.0,
                    friction_loss: 0.0,
                };
            }
            EquipmentKind::Hose(h) => simplified_friction_loss(
                h.friction_coefficient,
                self.flow,
                self.config.reference_flow_lpm,
            ),
            EquipmentKind::Connector(c) => c.pressure_loss,
            EquipmentKind::Terminal(_) => 0.0,
        };

        let elevation_drop = -pressure_change(from_elevation, to_elevation);
        let net_loss = elevation_drop + friction_loss;
        NodeOutcome {
            pressure: incoming - net_loss,
            net_loss,
            elevation_loss: elevation_loss(from_elevation, to_elevation),
            friction_loss,
        }
    }

    /// Loss totals are read back from stored per-node entries.
    fn record_path(
        &mut self,
        path: &[NodeIndex],
        start_pressure: f64,
        terminal_pressure: f64,
        terminal_status: PressureStatus,
    ) {
        let mut total_elevation_loss = 0.0;
        let mut total_friction_loss = 0.0;
        for calc in path.iter().filter_map(|i| self.nodes[i.index()].as_ref()) {
            total_elevation_loss += calc.elevation_loss;
            total_friction_loss += calc.friction_loss;
        }

        let calc = PathCalculation {
            path_id: Uuid::new_v4().to_string(),
            node_ids: path
                .iter()
                .map(|&i| self.index.node(i).id.clone())
                .collect(),
            total_pressure_loss: start_pressure - terminal_pressure,
            total_elevation_loss,
            total_friction_loss,
            terminal_pressure,
            terminal_status,
        };
        debug!(terminal = ?calc.node_ids.last(), pressure = terminal_pressure, "path recorded");
        self.paths.push(calc);
    }

    /// Give every node without an entry a zero-pressure `low` entry.
    pub(crate) fn mark_unreached(&mut self) {
        for idx in self.index.indices() {
            if self.nodes[idx.index()].is_some() {
                continue;
            }
            let node = self.index.node(idx);
            self.store(idx, NodeCalculation::unreached(node.id.clone()));
            if self.equipment(idx).and_then(Equipment::as_terminal).is_some() {
                debug!(node = %node.id, "terminal not reached");
                self.errors.push(CalculationError::no_path(&node.id));
            }
        }
    }

    /// Flag reached pumps rated below the network flow.
    pub(crate) fn check_pump_flow(&mut self) {
        for idx in self.index.indices() {
            if !self.visited[idx.index()] {
                continue;
            }
            let Some(pump) = self.equipment(idx).and_then(Equipment::as_pump) else {
                continue;
            };
            if self.flow > pump.max_flow {
                let node = self.index.node(idx);
                self.errors.push(CalculationError::flow_exceeded(
                    &node.id,
                    self.flow,
                    pump.max_flow,
                ));
            }
        }
    }

    pub(crate) fn finish(self) -> CalculationResult {
        let mut nodes = std::collections::BTreeMap::new();
        for calc in self.nodes.into_iter().flatten() {
            nodes.insert(calc.node_id.clone(), calc);
        }
        CalculationResult {
            is_valid: self.errors.is_empty(),
            errors: self.errors,
            nodes,
            paths: self.paths,
            flow: self.flow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hf_equipment::builtin_catalog;
    use hf_layout::{LayoutEdge, LayoutNode, Position};

    fn node(id: &str, equipment: &str, elevation: f64) -> LayoutNode {
        LayoutNode {
            id: id.into(),
            equipment_id: equipment.into(),
            position: Position::default(),
            elevation,
            pressure: None,
            flow: None,
        }
    }

    fn layout(nodes: Vec<LayoutNode>, edges: &[(&str, &str)]) -> Layout {
        Layout {
            id: "t".into(),
            name: None,
            nodes,
            edges: edges
                .iter()
                .enumerate()
                .map(|(i, (s, t))| LayoutEdge {
                    id: format!("e{i}"),
                    source_id: s.to_string(),
                    target_id: t.to_string(),
                    source_handle: None,
                    target_handle: None,
                })
                .collect(),
            created_at: 0,
            updated_at: 0,
        }
    }

    fn ids(index: &LayoutIndex<'_>, v: &[NodeIndex]) -> Vec<String> {
        v.iter().map(|&i| index.node(i).id.clone()).collect()
    }

    #[test]
    fn start_nodes_are_sources_and_unfed_pumps() {
        let l = layout(
            vec![
                node("relay", "pump-otter", 0.0),
                node("src", "source", 0.0),
                node("lone", "pump-ziegler", 0.0),
                node("ghost", "no-such-thing", 0.0),
            ],
            &[("src", "relay")],
        );
        let index = LayoutIndex::from_layout(&l);
        let starts = find_start_nodes(&index, builtin_catalog());
        assert_eq!(ids(&index, &starts), ["src", "lone"]);
    }

    #[test]
    fn downhill_gain_raises_pressure_but_reports_no_loss() {
        let l = layout(
            vec![
                node("p", "pump-ziegler", 30.0),
                node("h", "hose-4", 10.0),
            ],
            &[("p", "h")],
        );
        let result = calculate(&l, builtin_catalog(), Some(500.0));
        let h = result.node("h").unwrap();
        // 2 bar gain, 0.02 bar friction
        assert!((h.pressure - 11.98).abs() < 1e-9);
        assert_eq!(h.elevation_loss, 0.0);
        assert!((h.pressure_loss + 1.98).abs() < 1e-9);
    }

    #[test]
    fn relay_pump_restores_pressure() {
        let l = layout(
            vec![
                node("p1", "pump-ziegler", 0.0),
                node("h1", "hose-1.5", 80.0),
                node("p2", "pump-otter", 80.0),
                node("t", "terminal-wall", 80.0),
            ],
            &[("p1", "h1"), ("h1", "p2"), ("p2", "t")],
        );
        let result = calculate(&l, builtin_catalog(), Some(500.0));
        assert_eq!(result.node("h1").unwrap().status, PressureStatus::Low);
        let relay = result.node("p2").unwrap();
        assert_eq!(relay.pressure, 10.0);
        assert_eq!(relay.elevation_loss, 0.0);
        assert_eq!(result.node("t").unwrap().pressure, 10.0);
    }

    #[test]
    fn negative_pressure_is_clamped_for_display_only() {
        let l = layout(
            vec![
                node("p", "pump-ziegler", 0.0),
                node("h", "hose-4", 150.0),
                node("t", "terminal-wall", 150.0),
            ],
            &[("p", "h"), ("h", "t")],
        );
        let result = calculate(&l, builtin_catalog(), Some(500.0));
        assert_eq!(result.node("h").unwrap().pressure, 0.0);
        assert_eq!(result.node("t").unwrap().pressure, 0.0);
        let path = &result.paths[0];
        assert!((path.terminal_pressure + 5.02).abs() < 1e-9);
        assert!((path.total_pressure_loss - 15.02).abs() < 1e-9);
    }

    #[test]
    fn cycle_terminates() {
        let l = layout(
            vec![
                node("p", "pump-ziegler", 0.0),
                node("a", "hose-2.5", 0.0),
                node("b", "hose-2.5", 0.0),
            ],
            &[("p", "a"), ("a", "b"), ("b", "a")],
        );
        let result = calculate(&l, builtin_catalog(), Some(500.0));
        assert_eq!(result.nodes.len(), 3);
        assert!(result.paths.is_empty());
        assert!(result.is_valid);
    }
}
