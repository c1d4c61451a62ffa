//! Pressure propagation over fire hose layouts.
//!
//! Starting from every source and every pump without an inlet, the engine
//! walks downstream depth-first, subtracting elevation and friction losses,
//! restoring full pressure at relay pumps, and classifying each node's
//! pressure. Problems with the network (no pump, unreachable terminals, low
//! terminal pressure, unknown equipment) are reported in the result rather
//! than as `Err`: the engine characterizes a layout, it never rejects one.
//!
//! # Example
//!
//! ```
//! use hf_engine::{PressureStatus, calculate};
//! use hf_equipment::builtin_catalog;
//! use hf_layout::{Layout, Position};
//!
//! let catalog = builtin_catalog();
//! let mut layout = Layout::new("demo");
//! let mut place = |id: &str| {
//!     layout
//!         .add_node(catalog.get(id).unwrap(), Position::default(), 0.0)
//!         .id
//!         .clone()
//! };
//! let (src, pump, hose, cannon) = (
//!     place("source"),
//!     place("pump-ziegler"),
//!     place("hose-1.5"),
//!     place("terminal-cannon"),
//! );
//! layout.add_edge(&src, &pump, None, None);
//! layout.add_edge(&pump, &hose, None, None);
//! layout.add_edge(&hose, &cannon, None, None);
//!
//! let result = calculate(&layout, catalog, None);
//! let at_cannon = result.node(&cannon).unwrap();
//! assert!((at_cannon.pressure - 8.0).abs() < 1e-9);
//! assert_eq!(at_cannon.status, PressureStatus::Good);
//! assert!(result.is_valid);
//! ```

pub mod config;
pub mod error;
pub mod flow;
pub mod result;
pub mod session;

pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use flow::estimate_flow_rate;
pub use result::{
    CalculationError, CalculationResult, ErrorKind, NodeCalculation, PathCalculation,
    PressureStatus,
};
pub use session::{calculate, calculate_with_config};
