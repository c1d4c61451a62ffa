//! Calculation result types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Traffic-light status of a node's pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureStatus {
    Good,
    Ok,
    Low,
}

impl PressureStatus {
    /// `good` at or above `min_required + margin`, `ok` at or above
    /// `min_required`, otherwise `low`.
    pub fn classify(pressure: f64, min_required: f64, margin: f64) -> Self {
        if pressure >= min_required + margin {
            PressureStatus::Good
        } else if pressure >= min_required {
            PressureStatus::Ok
        } else {
            PressureStatus::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PressureStatus::Good => "good",
            PressureStatus::Ok => "ok",
            PressureStatus::Low => "low",
        }
    }
}

impl std::fmt::Display for PressureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Computed state at one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeCalculation {
    pub node_id: String,
    /// Pressure at this node (bar), never negative
    pub pressure: f64,
    /// Network flow through this node (l/min)
    pub flow: f64,
    /// Net pressure drop from the preceding node (bar); negative when a
    /// downhill gain outweighs friction
    pub pressure_loss: f64,
    /// Uphill component of the drop (bar), never negative
    pub elevation_loss: f64,
    /// Hose friction or fitting loss (bar)
    pub friction_loss: f64,
    pub status: PressureStatus,
}

impl NodeCalculation {
    /// Entry for a node no traversal reached.
    pub fn unreached(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            pressure: 0.0,
            flow: 0.0,
            pressure_loss: 0.0,
            elevation_loss: 0.0,
            friction_loss: 0.0,
            status: PressureStatus::Low,
        }
    }
}

/// One start-to-terminal route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathCalculation {
    /// Random per calculation; do not compare across runs.
    pub path_id: String,
    pub node_ids: Vec<String>,
    pub total_pressure_loss: f64,
    pub total_elevation_loss: f64,
    pub total_friction_loss: f64,
    pub terminal_pressure: f64,
    pub terminal_status: PressureStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No pressure source anywhere in the layout
    NoPump,
    /// Terminal unreachable from any start node
    NoPath,
    /// Terminal below its minimum operating pressure
    PressureLow,
    /// Network flow above a pump's rating
    FlowExceeded,
    /// Node references equipment missing from the catalog
    InvalidConnection,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NoPump => "no_pump",
            ErrorKind::NoPath => "no_path",
            ErrorKind::PressureLow => "pressure_low",
            ErrorKind::FlowExceeded => "flow_exceeded",
            ErrorKind::InvalidConnection => "invalid_connection",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A problem found in the layout.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{message}")]
pub struct CalculationError {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub node_ids: Vec<String>,
}

impl CalculationError {
    pub fn no_pump() -> Self {
        Self {
            kind: ErrorKind::NoPump,
            message: "No pump found in the layout".to_string(),
            node_ids: Vec::new(),
        }
    }

    pub fn no_path(node_id: &str) -> Self {
        Self {
            kind: ErrorKind::NoPath,
            message: "Terminal is not connected to a pump".to_string(),
            node_ids: vec![node_id.to_string()],
        }
    }

    pub fn pressure_low(node_id: &str, pressure: f64, min_pressure: f64) -> Self {
        Self {
            kind: ErrorKind::PressureLow,
            message: format!(
                "Insufficient pressure at terminal: {pressure:.1} bar (requires {min_pressure} bar)"
            ),
            node_ids: vec![node_id.to_string()],
        }
    }

    pub fn flow_exceeded(node_id: &str, flow: f64, max_flow: f64) -> Self {
        Self {
            kind: ErrorKind::FlowExceeded,
            message: format!(
                "Network flow {flow:.0} l/min exceeds pump capacity {max_flow:.0} l/min"
            ),
            node_ids: vec![node_id.to_string()],
        }
    }

    pub fn invalid_connection(node_id: &str, equipment_id: &str) -> Self {
        Self {
            kind: ErrorKind::InvalidConnection,
            message: format!("Unknown equipment: {equipment_id}"),
            node_ids: vec![node_id.to_string()],
        }
    }
}

/// Everything one calculation produced.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CalculationResult {
    /// True iff `errors` is empty
    pub is_valid: bool,
    pub errors: Vec<CalculationError>,
    /// Keyed by node id
    pub nodes: BTreeMap<String, NodeCalculation>,
    pub paths: Vec<PathCalculation>,
    /// Network flow used for every friction term (l/min); 0 for an empty layout
    pub flow: f64,
}

impl CalculationResult {
    /// Result for a layout with no nodes.
    pub fn empty() -> Self {
        Self {
            is_valid: true,
            ..Default::default()
        }
    }

    pub fn node(&self, node_id: &str) -> Option<&NodeCalculation> {
        self.nodes.get(node_id)
    }

    pub fn errors_of(&self, kind: ErrorKind) -> impl Iterator<Item = &CalculationError> {
        self.errors.iter().filter(move |e| e.kind == kind)
    }

    pub fn has_error(&self, kind: ErrorKind) -> bool {
        self.errors_of(kind).next().is_some()
    }
}
