//! Invariant tests over a generated input space
//!
//! Every coarse status is combined with every subset of a set of phase
//! events, in both chronological and reversed order, and each result is
//! checked against the structural laws of the breakdown.

use chrono::{DateTime, Duration, TimeZone, Utc};
use deploy_breakdown::{
    CoarseStatus, DeploymentStatusBreakdown, DeploymentStatusInput, EngineKind, PhaseIcon,
    ResourceDetail, ResourcePhase, TimelineEvent, TimelineStatus, build_breakdown,
};

const EVENT_CODES: [TimelineStatus; 10] = [
    TimelineStatus::DeploymentInitiated,
    TimelineStatus::GitCommit,
    TimelineStatus::GitCommitFailed,
    TimelineStatus::SyncEngineSynced,
    TimelineStatus::SyncEngineFailed,
    TimelineStatus::ApplyStarted,
    TimelineStatus::ApplySynced,
    TimelineStatus::Healthy,
    TimelineStatus::Degraded,
    TimelineStatus::DeploymentFailed,
];

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
}

fn event(code: TimelineStatus, offset: usize) -> TimelineEvent {
    let event = TimelineEvent::new(code, base_time() + Duration::minutes(offset as i64));
    if code == TimelineStatus::ApplyStarted {
        event.with_resources(vec![
            ResourceDetail {
                resource_phase: ResourcePhase::PostSync,
                resource_kind: None,
                resource_name: Some("notify".to_string()),
                resource_status: None,
                status_message: None,
            },
            ResourceDetail {
                resource_phase: ResourcePhase::PreSync,
                resource_kind: None,
                resource_name: Some("migrate".to_string()),
                resource_status: None,
                status_message: None,
            },
        ])
    } else {
        event
    }
}

fn coarse_statuses() -> Vec<Option<CoarseStatus>> {
    let mut statuses: Vec<_> = CoarseStatus::all().iter().cloned().map(Some).collect();
    statuses.push(Some(CoarseStatus::Other("Hibernating".to_string())));
    statuses.push(None);
    statuses
}

/// Every generated input, paired with the engine kind to run it under
fn generated_inputs() -> impl Iterator<Item = (DeploymentStatusInput, EngineKind)> {
    let statuses = coarse_statuses();
    (0u32..(1 << EVENT_CODES.len())).flat_map(move |mask| {
        let chronological: Vec<TimelineEvent> = EVENT_CODES
            .iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << *bit) != 0)
            .map(|(offset, code)| event(*code, offset))
            .collect();
        let reversed: Vec<TimelineEvent> = chronological.iter().rev().cloned().collect();

        let mut cases = Vec::new();
        for status in &statuses {
            for events in [&chronological, &reversed] {
                for kind in [EngineKind::FivePhase, EngineKind::ThreePhase] {
                    let input = DeploymentStatusInput {
                        coarse_status: status.clone(),
                        triggered_by: "ci".to_string(),
                        timelines: Some(events.clone()),
                        status_fetch_count: Some(2),
                        ..Default::default()
                    };
                    cases.push((input, kind));
                }
            }
        }
        cases
    })
}

fn assert_monotonic(breakdown: &DeploymentStatusBreakdown, input: &DeploymentStatusInput) {
    let icons = breakdown.icons();
    if let Some(last_success) = icons.iter().rposition(|icon| *icon == PhaseIcon::Success) {
        for (index, icon) in icons[..last_success].iter().enumerate() {
            assert_eq!(
                *icon,
                PhaseIcon::Success,
                "phase {index} is {icon:?} before a later success: {icons:?} for {input:?}"
            );
        }
    }
}

#[test]
fn test_success_never_follows_unresolved_phase() {
    for (input, kind) in generated_inputs() {
        let breakdown = build_breakdown(&input, kind);
        assert_monotonic(&breakdown, &input);
    }
}

#[test]
fn test_breakdown_covers_exactly_active_ordering() {
    for (input, kind) in generated_inputs() {
        let breakdown = build_breakdown(&input, kind);
        let phases: Vec<_> = breakdown.phases.keys().copied().collect();
        assert_eq!(phases, kind.phase_order());
    }
}

#[test]
fn test_repeated_calls_are_identical() {
    for (input, kind) in generated_inputs().step_by(7) {
        let first = serde_json::to_string(&build_breakdown(&input, kind)).unwrap();
        let second = serde_json::to_string(&build_breakdown(&input, kind)).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_sub_steps_only_on_apply_phase() {
    for (input, kind) in generated_inputs().step_by(3) {
        let breakdown = build_breakdown(&input, kind);
        for (phase, item) in &breakdown.phases {
            if *phase != deploy_breakdown::Phase::ApplyResources {
                assert!(item.sub_steps.is_none(), "{phase}");
                assert!(item.resource_details.is_none(), "{phase}");
            }
        }
    }
}

#[test]
fn test_last_failed_phase_matches_icons() {
    for (input, kind) in generated_inputs().step_by(5) {
        if input.events().is_empty() {
            continue;
        }
        let breakdown = build_breakdown(&input, kind);
        if let Some(phase) = breakdown.last_failed_phase {
            assert_eq!(breakdown.phase(phase).unwrap().icon, PhaseIcon::Failed);
            assert!(
                breakdown
                    .phases
                    .range(phase..)
                    .skip(1)
                    .all(|(_, item)| item.icon != PhaseIcon::Failed)
            );
        } else {
            assert!(breakdown.icons().iter().all(|icon| *icon != PhaseIcon::Failed));
        }
    }
}
