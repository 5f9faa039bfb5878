//! Coarse status normalization

use super::diagnostics::DiagnosticsReporter;
use crate::models::{CoarseStatus, DeploymentStatus};

/// Status mapping table
///
/// Returns `None` for codes outside the known set.
pub fn lookup_status(status: &CoarseStatus) -> Option<DeploymentStatus> {
    match status {
        CoarseStatus::Succeeded | CoarseStatus::Healthy => Some(DeploymentStatus::Succeeded),
        CoarseStatus::Failed | CoarseStatus::Aborted | CoarseStatus::Superseded => {
            Some(DeploymentStatus::Failed)
        }
        CoarseStatus::TimedOut => Some(DeploymentStatus::TimedOut),
        CoarseStatus::UnableToFetch => Some(DeploymentStatus::UnableToFetch),
        CoarseStatus::Progressing | CoarseStatus::Running => Some(DeploymentStatus::InProgress),
        CoarseStatus::Starting | CoarseStatus::Initiating => Some(DeploymentStatus::Starting),
        CoarseStatus::Queued => Some(DeploymentStatus::Queued),
        CoarseStatus::Unknown => Some(DeploymentStatus::Unknown),
        CoarseStatus::Other(_) => None,
    }
}

/// Map the runner's coarse status onto the internal status domain
///
/// A missing status is treated as in progress. A status with no mapping is
/// reported to `reporter` and also treated as in progress.
pub fn normalize_status(
    status: Option<&CoarseStatus>,
    reporter: &dyn DiagnosticsReporter,
) -> DeploymentStatus {
    let Some(status) = status else {
        return DeploymentStatus::InProgress;
    };

    lookup_status(status).unwrap_or_else(|| {
        reporter.report_unrecognized_status(status.as_str());
        DeploymentStatus::InProgress
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakdown::diagnostics::MockDiagnosticsReporter;
    use mockall::predicate::eq;

    #[test]
    fn test_every_known_status_has_a_mapping() {
        for status in CoarseStatus::all() {
            assert!(lookup_status(status).is_some(), "{status} unmapped");
        }
    }

    #[test]
    fn test_known_status_is_not_reported() {
        let mut reporter = MockDiagnosticsReporter::new();
        reporter.expect_report_unrecognized_status().never();

        assert_eq!(
            normalize_status(Some(&CoarseStatus::Aborted), &reporter),
            DeploymentStatus::Failed
        );
        assert_eq!(
            normalize_status(Some(&CoarseStatus::Initiating), &reporter),
            DeploymentStatus::Starting
        );
    }

    #[test]
    fn test_unrecognized_status_is_reported_once() {
        let mut reporter = MockDiagnosticsReporter::new();
        reporter
            .expect_report_unrecognized_status()
            .with(eq("Hibernating"))
            .times(1)
            .return_const(());

        let status = CoarseStatus::Other("Hibernating".to_string());
        assert_eq!(
            normalize_status(Some(&status), &reporter),
            DeploymentStatus::InProgress
        );
    }

    #[test]
    fn test_missing_status_defaults_to_in_progress() {
        let mut reporter = MockDiagnosticsReporter::new();
        reporter.expect_report_unrecognized_status().never();
        assert_eq!(
            normalize_status(None, &reporter),
            DeploymentStatus::InProgress
        );
    }
}
