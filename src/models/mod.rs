//! Deployment breakdown model layer
//!
//! Structure:
//! - `coarse_status.rs` - Overall status codes reported by the runner
//! - `deployment_status.rs` - Normalized deployment status domain
//! - `timeline.rs` - Raw timeline events and the input snapshot
//! - `phase.rs` - Phases, phase membership table and canonical orderings
//! - `breakdown.rs` - Breakdown output types

pub mod breakdown;
pub mod coarse_status;
pub mod deployment_status;
pub mod phase;
pub mod timeline;

pub use breakdown::{DeploymentStatusBreakdown, PhaseBreakdownItem, PhaseIcon, SubStep};
pub use coarse_status::CoarseStatus;
pub use deployment_status::DeploymentStatus;
pub use phase::{EngineKind, Phase};
pub use timeline::{
    DeploymentStatusInput, ResourceDetail, ResourcePhase, TimelineEvent, TimelineStatus,
};
