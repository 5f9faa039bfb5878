//! Timeline matching and forward propagation
//!
//! Walks the active phase ordering once, left to right. Each step takes the
//! breakdown by value and hands back the updated one, so the pass is a fold
//! over the phase ordering with no state outside the value being threaded.
//!
//! For every phase the most recent matching event wins (last in timeline
//! order), which lets a retried step overwrite an earlier failure. A phase
//! that resolves to success optimistically puts the next phase in progress;
//! the next step reads that when deciding between "Waiting" and
//! "In progress".

use super::sub_steps::{active_resources, reconstruct_sub_steps};
use super::timeout::{FetchBookkeeping, format_stalled_phase};
use crate::models::breakdown::{
    SUBTEXT_DEGRADED, SUBTEXT_FAILED, SUBTEXT_IN_PROGRESS, SUBTEXT_WAITING,
};
use crate::models::{
    DeploymentStatus, DeploymentStatusBreakdown, DeploymentStatusInput, Phase, PhaseBreakdownItem,
    PhaseIcon, TimelineEvent, TimelineStatus,
};

/// Read-only inputs shared by every step of the pass
struct ForwardContext<'a> {
    events: &'a [TimelineEvent],
    status: DeploymentStatus,
    bookkeeping: FetchBookkeeping,
}

/// Most recent event satisfying `phase`'s predicate
pub fn find_latest_event(events: &[TimelineEvent], phase: Phase) -> Option<&TimelineEvent> {
    events.iter().rev().find(|event| phase.matches(event.status_code))
}

/// Run the forward pass over every phase present in `breakdown`
pub fn forward_pass(
    breakdown: DeploymentStatusBreakdown,
    input: &DeploymentStatusInput,
) -> DeploymentStatusBreakdown {
    let ctx = ForwardContext {
        events: input.events(),
        status: breakdown.overall_status,
        bookkeeping: FetchBookkeeping {
            last_fetched_at: input.status_last_fetched_at,
            fetch_count: input.status_fetch_count,
        },
    };
    let order: Vec<Phase> = breakdown.phases.keys().copied().collect();

    order
        .iter()
        .enumerate()
        .fold(breakdown, |breakdown, (index, phase)| {
            let resolved = resolve_phase(breakdown, &ctx, *phase);
            propagate(resolved, *phase, order.get(index + 1).copied())
        })
}

fn resolve_phase(
    mut breakdown: DeploymentStatusBreakdown,
    ctx: &ForwardContext<'_>,
    phase: Phase,
) -> DeploymentStatusBreakdown {
    match find_latest_event(ctx.events, phase) {
        None => {
            if let Some(item) = breakdown.phase_mut(phase) {
                resolve_unmatched(item, ctx, phase);
            }
        }
        Some(event) => {
            if phase == Phase::ApplyResources {
                mark_absent_sync_engine(&mut breakdown, ctx, event);
            }
            if let Some(item) = breakdown.phase_mut(phase) {
                item.timestamp = Some(event.timestamp);
                match phase {
                    Phase::DeploymentInitiated => item.set_state(PhaseIcon::Success, ""),
                    Phase::GitCommit | Phase::SyncEngine => resolve_step(item, event),
                    Phase::ApplyResources => resolve_apply(item, ctx, event),
                    Phase::AppHealth => resolve_app_health(item, event),
                }
            }
        }
    }

    if let Some(item) = breakdown.phase(phase) {
        tracing::debug!(
            phase = %phase,
            icon = item.icon.as_str(),
            sub_text = %item.display_sub_text,
            "Resolved phase"
        );
    }
    breakdown
}

/// Nothing in the timeline for this phase: infer from the overall status
fn resolve_unmatched(item: &mut PhaseBreakdownItem, ctx: &ForwardContext<'_>, phase: Phase) {
    if ctx.status.is_progressing() {
        if item.icon != PhaseIcon::InProgress {
            item.display_sub_text = SUBTEXT_WAITING.to_string();
        }
    } else if ctx.status.is_failed() {
        item.set_state(PhaseIcon::Unreachable, "");
    } else if ctx.status.is_stalled() {
        format_stalled_phase(item, phase, ctx.status, &ctx.bookkeeping);
    }
}

/// Git commit and sync engine: either succeeded or failed outright
fn resolve_step(item: &mut PhaseBreakdownItem, event: &TimelineEvent) {
    if event.status_code.is_failure() {
        item.set_state(PhaseIcon::Failed, SUBTEXT_FAILED);
        item.detail_text = event.detail_text.clone().unwrap_or_default();
    } else {
        item.set_state(PhaseIcon::Success, "");
    }
}

fn resolve_app_health(item: &mut PhaseBreakdownItem, event: &TimelineEvent) {
    match event.status_code {
        TimelineStatus::Degraded => item.set_state(PhaseIcon::Degraded, SUBTEXT_DEGRADED),
        TimelineStatus::DeploymentFailed => {
            item.set_state(PhaseIcon::Failed, SUBTEXT_FAILED);
            item.detail_text = event.detail_text.clone().unwrap_or_default();
        }
        _ => item.set_state(PhaseIcon::Success, ""),
    }
}

/// Apply phase, including sub-step reconstruction
fn resolve_apply(item: &mut PhaseBreakdownItem, ctx: &ForwardContext<'_>, event: &TimelineEvent) {
    if event.status_code == TimelineStatus::ApplySynced {
        let resources = latest_apply_resources(ctx.events);
        item.set_state(PhaseIcon::Success, "");
        item.resource_details = None;
        item.sub_steps = Some(reconstruct_sub_steps(resources, PhaseIcon::Success));
        return;
    }

    let resources = event.resource_details.as_deref().unwrap_or_default();
    let status = ctx.status;
    let (icon, sub_text, current_icon) = match status {
        DeploymentStatus::Succeeded => (PhaseIcon::Success, "", PhaseIcon::Success),
        DeploymentStatus::Failed => (PhaseIcon::Failed, SUBTEXT_FAILED, PhaseIcon::Failed),
        DeploymentStatus::TimedOut => {
            (PhaseIcon::InProgress, SUBTEXT_IN_PROGRESS, PhaseIcon::TimedOut)
        }
        DeploymentStatus::UnableToFetch => (
            PhaseIcon::InProgress,
            SUBTEXT_IN_PROGRESS,
            PhaseIcon::Disconnected,
        ),
        DeploymentStatus::InProgress
        | DeploymentStatus::Starting
        | DeploymentStatus::Queued
        | DeploymentStatus::Unknown => {
            (PhaseIcon::InProgress, SUBTEXT_IN_PROGRESS, PhaseIcon::InProgress)
        }
    };

    item.set_state(icon, sub_text);
    item.is_collapsed = false;
    item.resource_details = Some(active_resources(resources));
    item.sub_steps = Some(reconstruct_sub_steps(resources, current_icon));
    if status.is_failed() {
        item.detail_text = event.detail_text.clone().unwrap_or_default();
    }
    if status.is_stalled() {
        format_stalled_phase(item, Phase::ApplyResources, status, &ctx.bookkeeping);
    }
}

/// Resource list of the most recent apply-started event
fn latest_apply_resources(events: &[TimelineEvent]) -> &[crate::models::ResourceDetail] {
    events
        .iter()
        .rev()
        .find(|event| event.status_code == TimelineStatus::ApplyStarted)
        .and_then(|event| event.resource_details.as_deref())
        .unwrap_or_default()
}

/// Environments without a sync engine never log a sync event; once resources
/// are being applied the sync phase is implicitly done.
///
/// An initiated-only sync engine is still present, so it counts as a sync
/// event here even though it resolves no phase.
fn mark_absent_sync_engine(
    breakdown: &mut DeploymentStatusBreakdown,
    ctx: &ForwardContext<'_>,
    apply_event: &TimelineEvent,
) {
    let has_sync_event = ctx.events.iter().any(|event| {
        event.status_code == TimelineStatus::SyncEngineInitiated
            || Phase::SyncEngine.matches(event.status_code)
    });
    if has_sync_event {
        return;
    }

    if let Some(item) = breakdown.phase_mut(Phase::SyncEngine) {
        item.set_state(PhaseIcon::Success, "");
        item.timestamp = Some(apply_event.timestamp);
        item.detail_text.clear();
        item.is_collapsed = true;
    }
}

/// A successful phase means the next one has started
fn propagate(
    mut breakdown: DeploymentStatusBreakdown,
    phase: Phase,
    next: Option<Phase>,
) -> DeploymentStatusBreakdown {
    let succeeded = breakdown
        .phase(phase)
        .is_some_and(|item| item.icon == PhaseIcon::Success);

    let Some(next) = next.filter(|_| succeeded) else {
        return breakdown;
    };
    if let Some(item) = breakdown.phase_mut(next) {
        item.set_state(PhaseIcon::InProgress, SUBTEXT_IN_PROGRESS);
    }
    breakdown
}
