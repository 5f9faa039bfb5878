//! Deployment status breakdown engine
//!
//! Rebuilds an ordered, per-phase progress view of one deployment from its
//! (possibly sparse) timeline and the runner's overall status. Each call is
//! independent and side-effect free apart from diagnostics reporting:
//!
//! 1. normalize the overall status
//! 2. build the waiting skeleton for the active phase ordering
//! 3. forward pass: match timeline events and propagate progress
//! 4. backward pass: enforce that reached phases imply earlier successes
//!
//! When the timeline is empty, step 2 is followed by a shortcut based on the
//! overall status alone and steps 3 and 4 are skipped.

pub mod backward;
pub mod diagnostics;
pub mod forward;
pub mod normalize;
pub mod report;
pub mod skeleton;
pub mod snapshot;
pub mod sub_steps;
pub mod timeout;

pub use backward::backward_pass;
pub use diagnostics::{DiagnosticsReporter, TracingReporter};
pub use forward::forward_pass;
pub use normalize::normalize_status;
pub use report::render_text;
pub use skeleton::{apply_terminal_fast_path, build_skeleton};
pub use snapshot::{SnapshotError, SnapshotFormat, read_snapshot, read_snapshot_from};

use crate::models::{DeploymentStatusBreakdown, DeploymentStatusInput, EngineKind};

/// Compute the breakdown, reporting diagnostics through `tracing`
pub fn build_breakdown(input: &DeploymentStatusInput, kind: EngineKind) -> DeploymentStatusBreakdown {
    build_breakdown_with(input, kind, &TracingReporter)
}

/// Compute the breakdown, reporting diagnostics to `reporter`
pub fn build_breakdown_with(
    input: &DeploymentStatusInput,
    kind: EngineKind,
    reporter: &dyn DiagnosticsReporter,
) -> DeploymentStatusBreakdown {
    let status = normalize_status(input.coarse_status.as_ref(), reporter);
    let skeleton = build_skeleton(input, kind, status);

    if input.events().is_empty() {
        tracing::debug!(status = %status, "No timeline, resolving from overall status");
        return apply_terminal_fast_path(skeleton);
    }

    let mut breakdown = backward_pass(forward_pass(skeleton, input));
    breakdown.refresh_last_failed_phase();
    breakdown
}
