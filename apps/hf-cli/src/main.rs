use clap::{Parser, Subcommand};
use hf_engine::{CalculationResult, EngineConfig, EngineError, calculate_with_config};
use hf_equipment::{
    Catalog, CatalogError, Equipment, EquipmentCategory, EquipmentKind, EquipmentLookup,
    builtin_catalog,
};
use hf_layout::{Layout, LayoutError, LayoutIndex, downstream_nodes, upstream_nodes};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hf-cli")]
#[command(about = "HoseFlow CLI - Fire-hose layout pressure calculator", long_about = None)]
struct Cli {
    /// Engine configuration YAML file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate pressures across a layout
    Calc {
        /// Path to the layout JSON or YAML file
        layout_path: PathBuf,
        /// Network flow rate in l/min (estimated from terminals if omitted)
        #[arg(long)]
        flow: Option<f64>,
        /// Equipment catalog file (built-in catalog if omitted)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Report pumps rated below the network flow
        #[arg(long)]
        check_pump_flow: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate layout file syntax and structure
    Validate {
        /// Path to the layout JSON or YAML file
        layout_path: PathBuf,
        /// Equipment catalog file (built-in catalog if omitted)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// List equipment in the catalog
    Catalog {
        /// Only list this category (source, pump, hose, connector, terminal)
        #[arg(long)]
        category: Option<EquipmentCategory>,
        /// Equipment catalog file (built-in catalog if omitted)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// List nodes fed directly by a node
    Downstream {
        layout_path: PathBuf,
        node_id: String,
    },
    /// List nodes feeding directly into a node
    Upstream {
        layout_path: PathBuf,
        node_id: String,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Node not found: {0}")]
    NodeNotFound(String),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Calc {
            layout_path,
            flow,
            catalog,
            check_pump_flow,
            json,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            if check_pump_flow {
                config.check_pump_flow = true;
            }
            cmd_calc(&layout_path, flow, catalog.as_deref(), &config, json)
        }
        Commands::Validate {
            layout_path,
            catalog,
        } => cmd_validate(&layout_path, catalog.as_deref()),
        Commands::Catalog { category, catalog } => cmd_catalog(category, catalog.as_deref()),
        Commands::Downstream {
            layout_path,
            node_id,
        } => cmd_neighbours(&layout_path, &node_id, Direction::Downstream),
        Commands::Upstream {
            layout_path,
            node_id,
        } => cmd_neighbours(&layout_path, &node_id, Direction::Upstream),
    }
}

fn load_config(path: Option<&Path>) -> CliResult<EngineConfig> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading engine config");
            Ok(EngineConfig::load(path)?)
        }
        None => Ok(EngineConfig::default()),
    }
}

enum LoadedCatalog {
    Builtin,
    File(Catalog),
}

impl LoadedCatalog {
    fn load(path: Option<&Path>) -> CliResult<Self> {
        Ok(match path {
            Some(path) => LoadedCatalog::File(Catalog::load(path)?),
            None => LoadedCatalog::Builtin,
        })
    }

    fn get(&self) -> &Catalog {
        match self {
            LoadedCatalog::Builtin => builtin_catalog(),
            LoadedCatalog::File(catalog) => catalog,
        }
    }
}

fn cmd_calc(
    layout_path: &Path,
    flow: Option<f64>,
    catalog_path: Option<&Path>,
    config: &EngineConfig,
    json: bool,
) -> CliResult<()> {
    let layout = hf_layout::load(layout_path)?;
    let catalog = LoadedCatalog::load(catalog_path)?;
    let result = calculate_with_config(&layout, catalog.get(), flow, config);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&layout, catalog.get(), &result);
    }
    Ok(())
}

fn print_result(layout: &Layout, catalog: &Catalog, result: &CalculationResult) {
    let name = layout.name.as_deref().unwrap_or(&layout.id);
    println!("Layout: {name} ({} nodes, {} edges)", layout.nodes.len(), layout.edges.len());
    println!();

    println!(
        "  {:<20} {:<24} {:>8} {:>9} {:>8} {:>8} {:>8}  status",
        "node", "equipment", "elev m", "bar", "loss", "elev", "frict"
    );
    // layout order reads better than id order
    for node in &layout.nodes {
        let Some(calc) = result.node(&node.id) else {
            continue;
        };
        let equipment = match catalog.equipment_by_id(&node.equipment_id) {
            Some(eq) => format!("{} ({})", eq.id, eq.category()),
            None => format!("{} (?)", node.equipment_id),
        };
        println!(
            "  {:<20} {:<24} {:>8.1} {:>9.2} {:>8.2} {:>8.2} {:>8.2}  {}",
            node.id,
            equipment,
            node.elevation,
            calc.pressure,
            calc.pressure_loss,
            calc.elevation_loss,
            calc.friction_loss,
            calc.status
        );
    }

    if let Some(line) = network_flow_line(result) {
        println!();
        println!("{line}");
    }

    if !result.paths.is_empty() {
        println!();
        println!("Paths:");
        for path in &result.paths {
            println!(
                "  {}  ->  {:.2} bar ({}), loss {:.2} (elevation {:.2}, friction {:.2})",
                path.node_ids.join(" > "),
                path.terminal_pressure,
                path.terminal_status,
                path.total_pressure_loss,
                path.total_elevation_loss,
                path.total_friction_loss
            );
        }
    }

    println!();
    if result.is_valid {
        println!("✓ Layout is valid");
    } else {
        println!("✗ {} problem(s):", result.errors.len());
        for error in &result.errors {
            if error.node_ids.is_empty() {
                println!("  [{}] {}", error.kind, error.message);
            } else {
                println!(
                    "  [{}] {} ({})",
                    error.kind,
                    error.message,
                    error.node_ids.join(", ")
                );
            }
        }
    }
}

fn network_flow_line(result: &CalculationResult) -> Option<String> {
    if result.nodes.is_empty() {
        return None;
    }
    Some(format!("Network flow: {:.0} l/min", result.flow))
}

fn cmd_validate(layout_path: &Path, catalog_path: Option<&Path>) -> CliResult<()> {
    println!("Validating layout: {}", layout_path.display());
    let layout = hf_layout::load(layout_path)?;
    let catalog = LoadedCatalog::load(catalog_path)?;

    let index = LayoutIndex::from_layout(&layout);
    if index.dropped_edges() > 0 {
        println!(
            "  warning: {} edge(s) reference missing nodes and will be ignored",
            index.dropped_edges()
        );
    }
    for node in &layout.nodes {
        if catalog.get().equipment_by_id(&node.equipment_id).is_none() {
            println!(
                "  warning: node {} uses unknown equipment {}",
                node.id, node.equipment_id
            );
        }
    }

    println!("✓ Layout is valid");
    Ok(())
}

fn cmd_catalog(category: Option<EquipmentCategory>, catalog_path: Option<&Path>) -> CliResult<()> {
    let catalog = LoadedCatalog::load(catalog_path)?;
    let entries: Vec<&Equipment> = match category {
        Some(category) => catalog.get().by_category(category).collect(),
        None => catalog.get().iter().collect(),
    };

    if entries.is_empty() {
        println!("No equipment found");
        return Ok(());
    }
    for eq in entries {
        println!("  {:<16} {:<10} {}", eq.id, eq.category(), describe(eq));
    }
    Ok(())
}

fn describe(eq: &Equipment) -> String {
    match &eq.kind {
        EquipmentKind::Source => String::new(),
        EquipmentKind::Pump(p) => format!("{} bar, {} l/min", p.max_pressure, p.max_flow),
        EquipmentKind::Hose(h) => format!(
            "{} ({} mm), {} m, {} bar/section",
            h.diameter_label, h.diameter, h.length, h.friction_coefficient
        ),
        EquipmentKind::Connector(c) => format!(
            "{} in, {} out, {} bar",
            c.inputs, c.outputs, c.pressure_loss
        ),
        EquipmentKind::Terminal(t) => format!(
            "{}..{} bar, {}..{} l/min",
            t.min_pressure, t.max_pressure, t.min_flow, t.max_flow
        ),
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Downstream,
    Upstream,
}

fn cmd_neighbours(layout_path: &Path, node_id: &str, direction: Direction) -> CliResult<()> {
    let layout = hf_layout::load(layout_path)?;
    if layout.node(node_id).is_none() {
        return Err(CliError::NodeNotFound(node_id.to_string()));
    }

    let nodes = match direction {
        Direction::Downstream => downstream_nodes(&layout, node_id),
        Direction::Upstream => upstream_nodes(&layout, node_id),
    };
    if nodes.is_empty() {
        println!("No connected nodes");
    }
    for node in nodes {
        println!("  {} ({})", node.id, node.equipment_id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_calc_flags() {
        let cli = Cli::try_parse_from([
            "hf-cli",
            "calc",
            "layout.json",
            "--flow",
            "800",
            "--check-pump-flow",
            "--config",
            "engine.yaml",
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some(Path::new("engine.yaml")));
        match cli.command {
            Commands::Calc {
                flow,
                check_pump_flow,
                json,
                ..
            } => {
                assert_eq!(flow, Some(800.0));
                assert!(check_pump_flow);
                assert!(!json);
            }
            _ => panic!("expected calc"),
        }
    }

    #[test]
    fn category_filter_is_case_insensitive() {
        let cli = Cli::try_parse_from(["hf-cli", "catalog", "--category", "Hose"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Catalog {
                category: Some(EquipmentCategory::Hose),
                ..
            }
        ));
        assert!(Cli::try_parse_from(["hf-cli", "catalog", "--category", "nozzle"]).is_err());
    }

    #[test]
    fn network_flow_ignores_unreached_nodes() {
        // "a-iso" sorts first and is never reached
        let catalog = builtin_catalog();
        let mut layout = Layout::new("flow");
        for (id, equipment) in [("p", "pump-ziegler"), ("h", "hose-2.5"), ("a-iso", "hose-4")] {
            let mut node = hf_layout::create_node(catalog.get(equipment).unwrap(), Default::default(), 0.0);
            node.id = id.to_string();
            layout.nodes.push(node);
        }
        layout.add_edge("p", "h", None, None).unwrap();

        let result = calculate_with_config(&layout, catalog, None, &EngineConfig::default());
        assert_eq!(result.node("a-iso").unwrap().flow, 0.0);
        assert_eq!(
            network_flow_line(&result).as_deref(),
            Some("Network flow: 500 l/min")
        );
        assert_eq!(network_flow_line(&CalculationResult::empty()), None);
    }

    #[test]
    fn describes_builtin_equipment() {
        let catalog = builtin_catalog();
        assert_eq!(describe(catalog.get("pump-otter").unwrap()), "10 bar, 800 l/min");
        assert_eq!(describe(catalog.get("splitter-2").unwrap()), "1 in, 2 out, 0.2 bar");
    }
}
