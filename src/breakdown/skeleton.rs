//! Phase skeleton construction
//!
//! Builds the "nothing observed yet" breakdown for the active phase ordering,
//! plus the shortcut used when there is no timeline at all.

use crate::models::breakdown::SUBTEXT_FAILED;
use crate::models::{
    DeploymentStatus, DeploymentStatusBreakdown, DeploymentStatusInput, EngineKind, Phase,
    PhaseBreakdownItem, PhaseIcon,
};

/// Static label shown for a phase
pub fn phase_label(phase: Phase, triggered_by: &str) -> String {
    match phase {
        Phase::DeploymentInitiated if triggered_by.is_empty() => "Deployment initiated".to_string(),
        Phase::DeploymentInitiated => format!("Deployment initiated by {}", triggered_by),
        Phase::GitCommit => "Push manifest to Git".to_string(),
        Phase::SyncEngine => "Synced with sync engine".to_string(),
        Phase::ApplyResources => "Apply manifest to cluster".to_string(),
        Phase::AppHealth => "Propagate manifest to cluster resources".to_string(),
    }
}

/// Default breakdown with every phase of `kind` waiting
pub fn build_skeleton(
    input: &DeploymentStatusInput,
    kind: EngineKind,
    status: DeploymentStatus,
) -> DeploymentStatusBreakdown {
    let phases = kind
        .phase_order()
        .iter()
        .map(|phase| {
            (
                *phase,
                PhaseBreakdownItem::waiting(phase_label(*phase, &input.triggered_by)),
            )
        })
        .collect();

    DeploymentStatusBreakdown {
        overall_status: status,
        overall_status_text: status.display_text().to_string(),
        trigger_time: input.started_at,
        end_time: input.finished_at,
        triggered_by: input.triggered_by.clone(),
        last_failed_phase: None,
        phases,
    }
}

/// Resolve a breakdown from the overall status alone
///
/// Used when the timeline is absent or empty. A succeeded deployment shows
/// every phase as done; a failed one only flags the final phase. Anything
/// else is returned unchanged.
pub fn apply_terminal_fast_path(mut breakdown: DeploymentStatusBreakdown) -> DeploymentStatusBreakdown {
    let status = breakdown.overall_status;

    if status.is_success() {
        for item in breakdown.phases.values_mut() {
            item.set_state(PhaseIcon::Success, "");
        }
    } else if status.is_failed() {
        if let Some(item) = breakdown.phase_mut(Phase::AppHealth) {
            item.display_sub_text = SUBTEXT_FAILED.to_string();
            breakdown.last_failed_phase = Some(Phase::AppHealth);
        }
    }

    breakdown
}
