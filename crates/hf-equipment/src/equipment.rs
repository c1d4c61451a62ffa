//! Equipment data model.

use hf_core::{HfResult, ensure_non_negative};
use serde::{Deserialize, Serialize};

/// Category tag, used for catalog filtering and display grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentCategory {
    Source,
    Pump,
    Hose,
    Connector,
    Terminal,
}

impl EquipmentCategory {
    pub const ALL: [EquipmentCategory; 5] = [
        EquipmentCategory::Source,
        EquipmentCategory::Pump,
        EquipmentCategory::Hose,
        EquipmentCategory::Connector,
        EquipmentCategory::Terminal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EquipmentCategory::Source => "source",
            EquipmentCategory::Pump => "pump",
            EquipmentCategory::Hose => "hose",
            EquipmentCategory::Connector => "connector",
            EquipmentCategory::Terminal => "terminal",
        }
    }
}

impl std::fmt::Display for EquipmentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EquipmentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EquipmentCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown equipment category '{s}'"))
    }
}

/// A pump delivering up to `max_pressure` bar at up to `max_flow` l/min.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PumpSpec {
    pub max_pressure: f64,
    pub max_flow: f64,
}

/// One hose section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoseSpec {
    /// Internal diameter (mm)
    pub diameter: f64,
    /// Display label, e.g. `2½"`
    pub diameter_label: String,
    /// Section length (m)
    pub length: f64,
    /// Bar lost over one section at the 500 l/min reference flow
    pub friction_coefficient: f64,
}

/// Splitter or other fitting with a fixed pressure loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorSpec {
    pub inputs: u32,
    pub outputs: u32,
    /// Fixed loss across the fitting (bar)
    pub pressure_loss: f64,
}

/// Water cannon, fire wall or other endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalSpec {
    pub min_pressure: f64,
    pub max_pressure: f64,
    pub min_flow: f64,
    pub max_flow: f64,
}

/// Category plus category-specific constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EquipmentKind {
    Source,
    Pump(PumpSpec),
    Hose(HoseSpec),
    Connector(ConnectorSpec),
    Terminal(TerminalSpec),
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: String,
    /// i18n key of the display name
    pub name_key: String,
    /// i18n key of the description
    pub desc_key: String,
    #[serde(flatten)]
    pub kind: EquipmentKind,
}

impl Equipment {
    pub fn category(&self) -> EquipmentCategory {
        match self.kind {
            EquipmentKind::Source => EquipmentCategory::Source,
            EquipmentKind::Pump(_) => EquipmentCategory::Pump,
            EquipmentKind::Hose(_) => EquipmentCategory::Hose,
            EquipmentKind::Connector(_) => EquipmentCategory::Connector,
            EquipmentKind::Terminal(_) => EquipmentCategory::Terminal,
        }
    }

    pub fn is_source(&self) -> bool {
        matches!(self.kind, EquipmentKind::Source)
    }

    pub fn as_pump(&self) -> Option<&PumpSpec> {
        match &self.kind {
            EquipmentKind::Pump(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_terminal(&self) -> Option<&TerminalSpec> {
        match &self.kind {
            EquipmentKind::Terminal(t) => Some(t),
            _ => None,
        }
    }

    /// Check that every physical constant is finite and non-negative.
    pub fn validate_constants(&self) -> HfResult<()> {
        match &self.kind {
            EquipmentKind::Source => {}
            EquipmentKind::Pump(p) => {
                ensure_non_negative(p.max_pressure, "pump max_pressure")?;
                ensure_non_negative(p.max_flow, "pump max_flow")?;
            }
            EquipmentKind::Hose(h) => {
                ensure_non_negative(h.diameter, "hose diameter")?;
                ensure_non_negative(h.length, "hose length")?;
                ensure_non_negative(h.friction_coefficient, "hose friction_coefficient")?;
            }
            EquipmentKind::Connector(c) => {
                ensure_non_negative(c.pressure_loss, "connector pressure_loss")?;
            }
            EquipmentKind::Terminal(t) => {
                ensure_non_negative(t.min_pressure, "terminal min_pressure")?;
                ensure_non_negative(t.max_pressure, "terminal max_pressure")?;
                ensure_non_negative(t.min_flow, "terminal min_flow")?;
                ensure_non_negative(t.max_flow, "terminal max_flow")?;
            }
        }
        Ok(())
    }
}
