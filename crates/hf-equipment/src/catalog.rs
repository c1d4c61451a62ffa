//! Equipment catalog and lookup.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::equipment::{
    ConnectorSpec, Equipment, EquipmentCategory, EquipmentKind, HoseSpec, PumpSpec, TerminalSpec,
};
use crate::{CatalogError, CatalogResult};

/// Read access to equipment definitions by id.
pub trait EquipmentLookup {
    fn equipment_by_id(&self, id: &str) -> Option<&Equipment>;
}

/// Immutable set of equipment with unique ids.
///
/// Entries keep their declaration order for listing; lookups go through a
/// hash index built once at construction.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<Equipment>,
    by_id: HashMap<String, usize>,
}

/// On-disk shape of a catalog file.
#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    equipment: Vec<Equipment>,
}

impl Catalog {
    /// Build a catalog, rejecting empty or duplicate ids and bad constants.
    pub fn new(entries: Vec<Equipment>) -> CatalogResult<Self> {
        let mut by_id = HashMap::with_capacity(entries.len());
        for (i, eq) in entries.iter().enumerate() {
            if eq.id.trim().is_empty() {
                return Err(CatalogError::EmptyId);
            }
            eq.validate_constants()
                .map_err(|source| CatalogError::InvalidConstant {
                    id: eq.id.clone(),
                    source,
                })?;
            if by_id.insert(eq.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateId { id: eq.id.clone() });
            }
        }
        Ok(Self { entries, by_id })
    }

    pub fn get(&self, id: &str) -> Option<&Equipment> {
        self.by_id.get(id).map(|&i| &self.entries[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Equipment> {
        self.entries.iter()
    }

    pub fn by_category(&self, category: EquipmentCategory) -> impl Iterator<Item = &Equipment> {
        self.entries.iter().filter(move |e| e.category() == category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn from_yaml_str(content: &str) -> CatalogResult<Self> {
        let file: CatalogFile = serde_yaml::from_str(content)?;
        Self::new(file.equipment)
    }

    pub fn from_json_str(content: &str) -> CatalogResult<Self> {
        let file: CatalogFile = serde_json::from_str(content)?;
        Self::new(file.equipment)
    }

    /// Load a catalog file; `.json` is parsed as JSON, anything else as YAML.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let catalog = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };
        tracing::debug!(path = %path.display(), entries = catalog.len(), "loaded equipment catalog");
        Ok(catalog)
    }

    pub fn to_yaml_string(&self) -> CatalogResult<String> {
        let file = CatalogFile {
            equipment: self.entries.clone(),
        };
        Ok(serde_yaml::to_string(&file)?)
    }
}

impl EquipmentLookup for Catalog {
    fn equipment_by_id(&self, id: &str) -> Option<&Equipment> {
        self.get(id)
    }
}

fn entry(id: &str, name_key: &str, desc_key: &str, kind: EquipmentKind) -> Equipment {
    Equipment {
        id: id.to_string(),
        name_key: name_key.to_string(),
        desc_key: desc_key.to_string(),
        kind,
    }
}

fn hose(id: &str, key: &str, diameter: f64, label: &str, friction_coefficient: f64) -> Equipment {
    entry(
        id,
        &format!("equipment.{key}"),
        &format!("equipment.{key}Desc"),
        EquipmentKind::Hose(HoseSpec {
            diameter,
            diameter_label: label.to_string(),
            length: hf_core::constants::HOSE_SECTION_LENGTH_M,
            friction_coefficient,
        }),
    )
}

fn builtin_entries() -> Vec<Equipment> {
    vec![
        entry(
            "source",
            "equipment.source",
            "equipment.sourceDesc",
            EquipmentKind::Source,
        ),
        entry(
            "pump-ziegler",
            "equipment.ziegler",
            "equipment.zieglerDesc",
            EquipmentKind::Pump(PumpSpec {
                max_pressure: 10.0,
                max_flow: 3000.0,
            }),
        ),
        entry(
            "pump-otter",
            "equipment.otter",
            "equipment.otterDesc",
            EquipmentKind::Pump(PumpSpec {
                max_pressure: 10.0,
                max_flow: 800.0,
            }),
        ),
        hose("hose-1.5", "hose1_5", 38.0, "1½\"", 0.5),
        hose("hose-2.5", "hose2_5", 65.0, "2½\"", 0.15),
        hose("hose-4", "hose4", 102.0, "4\"", 0.02),
        entry(
            "splitter-2",
            "equipment.splitter2",
            "equipment.splitter2Desc",
            EquipmentKind::Connector(ConnectorSpec {
                inputs: 1,
                outputs: 2,
                pressure_loss: 0.2,
            }),
        ),
        entry(
            "splitter-3",
            "equipment.splitter3",
            "equipment.splitter3Desc",
            EquipmentKind::Connector(ConnectorSpec {
                inputs: 1,
                outputs: 3,
                pressure_loss: 0.3,
            }),
        ),
        entry(
            "terminal-cannon",
            "equipment.waterCannon",
            "equipment.waterCannonDesc",
            EquipmentKind::Terminal(TerminalSpec {
                min_pressure: 6.0,
                max_pressure: 8.0,
                min_flow: 500.0,
                max_flow: 2000.0,
            }),
        ),
        entry(
            "terminal-wall",
            "equipment.fireWall",
            "equipment.fireWallDesc",
            EquipmentKind::Terminal(TerminalSpec {
                min_pressure: 4.0,
                max_pressure: 6.0,
                min_flow: 200.0,
                max_flow: 400.0,
            }),
        ),
    ]
}

/// The equipment shipped with the application.
pub fn builtin_catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
        let entries = builtin_entries();
        let by_id = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();
        Catalog { entries, by_id }
    })
}
