//! bflow-core-plus: Validated backup planning atop bflow-core (keeps bflow-core unchanged)
//!
//! Additions:
//! - Boundary validation with typed errors ([`PlanError`])
//! - Reusable [`BackupPlanner`]: base capacity graph built once, fresh flow network per request
//! - Node-splitting capacity model next to the default edge folding
//! - Per-connection and per-target flow reports, `tracing` instrumentation
//! - Optional serde support (feature "serde")

pub mod error;
pub mod validate;
pub mod network;
pub mod model;
pub mod planner;
pub mod report;

// Re-exports
pub use error::{PlanError, PlanResult};
pub use network::{BackupNetwork, BackupRequest};
pub use model::{CapacityModel, ExtendedNetwork};
pub use planner::{BackupPlanner, PreparedFlow};
pub use report::BackupPlan;
