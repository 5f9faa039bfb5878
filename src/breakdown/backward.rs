//! Backward monotonicity enforcement
//!
//! Phases run strictly in sequence, so once a phase has been reached every
//! phase before it must have succeeded. The forward pass can leave gaps
//! (a step that was never logged, a failure that was later retried); this
//! pass closes them.

use crate::models::{DeploymentStatusBreakdown, PhaseIcon};

/// Force every phase before the furthest reached one to success
///
/// The furthest reached phase is the last one in canonical order whose icon
/// is success or in progress. Phases after it are left alone.
pub fn backward_pass(mut breakdown: DeploymentStatusBreakdown) -> DeploymentStatusBreakdown {
    let Some(frontier) = breakdown
        .phases
        .values()
        .rposition(|item| item.icon.is_frontier())
    else {
        return breakdown;
    };

    for item in breakdown.phases.values_mut().take(frontier) {
        item.set_state(PhaseIcon::Success, "");
    }
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakdown::skeleton::build_skeleton;
    use crate::models::{DeploymentStatus, DeploymentStatusInput, EngineKind, Phase};

    fn breakdown_with(icons: &[(Phase, PhaseIcon)]) -> DeploymentStatusBreakdown {
        let mut breakdown = build_skeleton(
            &DeploymentStatusInput::default(),
            EngineKind::FivePhase,
            DeploymentStatus::InProgress,
        );
        for (phase, icon) in icons {
            breakdown
                .phase_mut(*phase)
                .unwrap()
                .set_state(*icon, "Waiting");
        }
        breakdown
    }

    #[test]
    fn test_fills_gaps_before_frontier() {
        let breakdown = backward_pass(breakdown_with(&[
            (Phase::GitCommit, PhaseIcon::Failed),
            (Phase::ApplyResources, PhaseIcon::InProgress),
            (Phase::AppHealth, PhaseIcon::Unreachable),
        ]));

        assert_eq!(
            breakdown.icons(),
            vec![
                PhaseIcon::Success,
                PhaseIcon::Success,
                PhaseIcon::Success,
                PhaseIcon::InProgress,
                PhaseIcon::Unreachable,
            ]
        );
        let git = breakdown.phase(Phase::GitCommit).unwrap();
        assert!(git.display_sub_text.is_empty());
    }

    #[test]
    fn test_frontier_itself_is_untouched() {
        let breakdown = backward_pass(breakdown_with(&[(
            Phase::SyncEngine,
            PhaseIcon::InProgress,
        )]));
        let sync = breakdown.phase(Phase::SyncEngine).unwrap();
        assert_eq!(sync.icon, PhaseIcon::InProgress);
        assert_eq!(sync.display_sub_text, "Waiting");
    }

    #[test]
    fn test_no_frontier_is_noop() {
        let before = breakdown_with(&[(Phase::GitCommit, PhaseIcon::Failed)]);
        assert_eq!(backward_pass(before.clone()), before);
    }
}
