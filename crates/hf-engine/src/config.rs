//! Engine tuning knobs.

use std::path::Path;

use hf_core::constants::REFERENCE_FLOW_LPM;
use hf_core::{ensure_finite, ensure_non_negative};
use hf_hydraulics::DEFAULT_FLOW_LPM;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Thresholds and options for one calculation.
///
/// `Default` gives the standard field behaviour; files only need to name
/// the fields they change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Network flow when the layout has no terminals (l/min).
    pub default_flow_lpm: f64,
    /// Flow at which hose friction coefficients apply unscaled (l/min).
    pub reference_flow_lpm: f64,
    /// Minimum pressure for a healthy non-terminal node (bar).
    pub branch_min_pressure: f64,
    /// Headroom above the minimum for a `good` status (bar).
    pub status_margin: f64,
    /// Report `flow_exceeded` for pumps rated below the network flow.
    pub check_pump_flow: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_flow_lpm: DEFAULT_FLOW_LPM,
            reference_flow_lpm: REFERENCE_FLOW_LPM,
            branch_min_pressure: 2.0,
            status_margin: 2.0,
            check_pump_flow: false,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> EngineResult<()> {
        ensure_non_negative(self.default_flow_lpm, "default_flow_lpm")?;
        ensure_non_negative(self.status_margin, "status_margin")?;
        ensure_finite(self.branch_min_pressure, "branch_min_pressure")?;
        let reference = ensure_finite(self.reference_flow_lpm, "reference_flow_lpm")?;
        if reference <= 0.0 {
            return Err(EngineError::Config {
                what: format!("reference_flow_lpm must be positive, got {reference}"),
            });
        }
        Ok(())
    }

    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        let config: EngineConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}
