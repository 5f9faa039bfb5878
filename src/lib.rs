//! Deployment status breakdown library
//!
//! Reconstructs an ordered, per-phase progress view of a single deployment
//! from its lifecycle timeline and the runner's overall status. It can be
//! used both as a binary and as a library for testing.

pub mod breakdown;
pub mod cli;
pub mod config;
pub mod models;

// Re-export commonly used types for convenience
pub use breakdown::{DiagnosticsReporter, TracingReporter, build_breakdown, build_breakdown_with};
pub use models::{
    CoarseStatus, DeploymentStatus, DeploymentStatusBreakdown, DeploymentStatusInput, EngineKind,
    Phase, PhaseBreakdownItem, PhaseIcon, ResourceDetail, ResourcePhase, SubStep, TimelineEvent,
    TimelineStatus,
};
