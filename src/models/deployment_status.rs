//! Internal deployment status domain

use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized overall status of a deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeploymentStatus {
    Succeeded,
    Failed,
    TimedOut,
    UnableToFetch,
    InProgress,
    Starting,
    Queued,
    Unknown,
}

impl DeploymentStatus {
    /// Human readable status text
    pub fn display_text(&self) -> &'static str {
        match self {
            DeploymentStatus::Succeeded => "Succeeded",
            DeploymentStatus::Failed => "Failed",
            DeploymentStatus::TimedOut => "Timed out",
            DeploymentStatus::UnableToFetch => "Unable to fetch status",
            DeploymentStatus::InProgress => "In progress",
            DeploymentStatus::Starting => "Starting",
            DeploymentStatus::Queued => "Queued",
            DeploymentStatus::Unknown => "Unknown",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DeploymentStatus::Succeeded)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, DeploymentStatus::Failed)
    }

    /// Still moving forward: in progress, starting or queued
    pub fn is_progressing(&self) -> bool {
        matches!(
            self,
            DeploymentStatus::InProgress | DeploymentStatus::Starting | DeploymentStatus::Queued
        )
    }

    /// The rollout stalled or could not be observed
    pub fn is_stalled(&self) -> bool {
        matches!(
            self,
            DeploymentStatus::TimedOut | DeploymentStatus::UnableToFetch
        )
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_families_are_disjoint() {
        let all = [
            DeploymentStatus::Succeeded,
            DeploymentStatus::Failed,
            DeploymentStatus::TimedOut,
            DeploymentStatus::UnableToFetch,
            DeploymentStatus::InProgress,
            DeploymentStatus::Starting,
            DeploymentStatus::Queued,
            DeploymentStatus::Unknown,
        ];
        for status in all {
            let families = [
                status.is_success(),
                status.is_failed(),
                status.is_progressing(),
                status.is_stalled(),
            ];
            assert!(families.iter().filter(|f| **f).count() <= 1, "{status:?}");
        }
        assert!(!DeploymentStatus::Unknown.is_progressing());
    }

    #[test]
    fn test_display_text() {
        assert_eq!(DeploymentStatus::TimedOut.to_string(), "Timed out");
        assert_eq!(DeploymentStatus::InProgress.to_string(), "In progress");
    }
}
