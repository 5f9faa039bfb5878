//! Deployment phase definitions
//!
//! A deployment moves through a fixed sequence of phases. Which phases apply
//! depends on the environment's engine kind: environments reconciled by a
//! sync engine go through all five, the rest skip the sync and apply phases.
//!
//! `Phase` derives `Ord` in five-phase canonical order. The three-phase order
//! is a subsequence of it, so an ordered map keyed by `Phase` always iterates
//! in canonical order whichever engine kind is active.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::TimelineStatus;

/// A deployment lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    DeploymentInitiated,
    GitCommit,
    SyncEngine,
    ApplyResources,
    AppHealth,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::DeploymentInitiated => "DEPLOYMENT_INITIATED",
            Phase::GitCommit => "GIT_COMMIT",
            Phase::SyncEngine => "SYNC_ENGINE",
            Phase::ApplyResources => "APPLY_RESOURCES",
            Phase::AppHealth => "APP_HEALTH",
        }
    }

    /// Phase a timeline status code belongs to, if any
    ///
    /// | Phase                | Status codes                                  |
    /// |----------------------|-----------------------------------------------|
    /// | DeploymentInitiated  | DEPLOYMENT_INITIATED                          |
    /// | GitCommit            | GIT_COMMIT, GIT_COMMIT_FAILED                 |
    /// | SyncEngine           | SYNC_ENGINE_SYNCED, SYNC_ENGINE_FAILED        |
    /// | ApplyResources       | APPLY_STARTED, APPLY_SYNCED                   |
    /// | AppHealth            | HEALTHY, DEGRADED, DEPLOYMENT_FAILED          |
    ///
    /// Every other code belongs to no phase.
    pub fn of_status(status: TimelineStatus) -> Option<Phase> {
        match status {
            TimelineStatus::DeploymentInitiated => Some(Phase::DeploymentInitiated),
            TimelineStatus::GitCommit | TimelineStatus::GitCommitFailed => Some(Phase::GitCommit),
            TimelineStatus::SyncEngineSynced | TimelineStatus::SyncEngineFailed => {
                Some(Phase::SyncEngine)
            }
            TimelineStatus::ApplyStarted | TimelineStatus::ApplySynced => {
                Some(Phase::ApplyResources)
            }
            TimelineStatus::Healthy
            | TimelineStatus::Degraded
            | TimelineStatus::DeploymentFailed => Some(Phase::AppHealth),
            TimelineStatus::SyncEngineInitiated
            | TimelineStatus::DeploymentSuperseded
            | TimelineStatus::FetchTimedOut
            | TimelineStatus::UnableToFetchStatus
            | TimelineStatus::Aborted
            | TimelineStatus::HelmPackageGenerated
            | TimelineStatus::HelmManifestPushed
            | TimelineStatus::HelmManifestPushFailed
            | TimelineStatus::Unrecognized => None,
        }
    }

    /// Whether a timeline status code resolves this phase
    pub fn matches(&self, status: TimelineStatus) -> bool {
        Phase::of_status(status) == Some(*self)
    }

    /// Phases that reconcile cluster resources; only these get the timeout
    /// detail message
    pub fn is_reconciliation(&self) -> bool {
        matches!(self, Phase::ApplyResources | Phase::AppHealth)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which canonical phase ordering applies to an environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngineKind {
    /// Reconciled through a sync engine: all five phases
    #[default]
    FivePhase,
    /// No sync engine component: initiated, git commit, app health
    ThreePhase,
}

impl EngineKind {
    const FIVE_PHASE_ORDER: [Phase; 5] = [
        Phase::DeploymentInitiated,
        Phase::GitCommit,
        Phase::SyncEngine,
        Phase::ApplyResources,
        Phase::AppHealth,
    ];

    const THREE_PHASE_ORDER: [Phase; 3] =
        [Phase::DeploymentInitiated, Phase::GitCommit, Phase::AppHealth];

    /// Canonical phase ordering for this engine kind
    pub fn phase_order(&self) -> &'static [Phase] {
        match self {
            EngineKind::FivePhase => &Self::FIVE_PHASE_ORDER,
            EngineKind::ThreePhase => &Self::THREE_PHASE_ORDER,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::FivePhase => "five-phase",
            EngineKind::ThreePhase => "three-phase",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EngineKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "five-phase" | "five" | "5" | "gitops" => Ok(EngineKind::FivePhase),
            "three-phase" | "three" | "3" | "helm" => Ok(EngineKind::ThreePhase),
            _ => Err(format!("Unknown engine kind: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_phase_order_is_subsequence() {
        let five = EngineKind::FivePhase.phase_order();
        let three = EngineKind::ThreePhase.phase_order();
        let mut cursor = five.iter();
        for phase in three {
            assert!(cursor.any(|p| p == phase), "{phase} out of order");
        }
    }

    #[test]
    fn test_orders_are_sorted() {
        for kind in [EngineKind::FivePhase, EngineKind::ThreePhase] {
            let order = kind.phase_order();
            assert!(order.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_phase_membership() {
        assert!(Phase::AppHealth.matches(TimelineStatus::Degraded));
        assert!(Phase::GitCommit.matches(TimelineStatus::GitCommitFailed));
        assert!(Phase::ApplyResources.matches(TimelineStatus::ApplySynced));
        assert!(!Phase::SyncEngine.matches(TimelineStatus::SyncEngineInitiated));
        assert_eq!(Phase::of_status(TimelineStatus::Unrecognized), None);
    }

    #[test]
    fn test_engine_kind_from_str() {
        assert_eq!("three-phase".parse::<EngineKind>(), Ok(EngineKind::ThreePhase));
        assert_eq!("FIVE".parse::<EngineKind>(), Ok(EngineKind::FivePhase));
        assert!("seven".parse::<EngineKind>().is_err());
    }
}
