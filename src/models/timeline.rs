//! Deployment timeline input types
//!
//! A timeline is the raw, possibly sparse log of lifecycle transitions the
//! deployment went through. Status codes and resource sub-phases are closed
//! enums; anything not in the known set deserializes to an `Unrecognized`
//! variant and is ignored by the breakdown engine rather than rejected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::CoarseStatus;

/// Fine-grained status code carried by a single timeline event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimelineStatus {
    DeploymentInitiated,
    GitCommit,
    GitCommitFailed,
    SyncEngineInitiated,
    SyncEngineSynced,
    SyncEngineFailed,
    ApplyStarted,
    ApplySynced,
    Healthy,
    Degraded,
    DeploymentFailed,
    DeploymentSuperseded,
    FetchTimedOut,
    UnableToFetchStatus,
    Aborted,
    HelmPackageGenerated,
    HelmManifestPushed,
    HelmManifestPushFailed,
    #[serde(other)]
    Unrecognized,
}

impl TimelineStatus {
    /// True for the codes that record a failed step
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            TimelineStatus::GitCommitFailed
                | TimelineStatus::SyncEngineFailed
                | TimelineStatus::DeploymentFailed
                | TimelineStatus::HelmManifestPushFailed
        )
    }
}

/// Reconciliation sub-phase of a resource during the apply step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourcePhase {
    PreSync,
    Sync,
    PostSync,
    Skip,
    SyncFail,
    #[serde(other)]
    Unrecognized,
}

impl ResourcePhase {
    /// The fixed order sub-phases are applied in
    pub const ORDERED: [ResourcePhase; 5] = [
        ResourcePhase::PreSync,
        ResourcePhase::Sync,
        ResourcePhase::PostSync,
        ResourcePhase::Skip,
        ResourcePhase::SyncFail,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourcePhase::PreSync => "PreSync",
            ResourcePhase::Sync => "Sync",
            ResourcePhase::PostSync => "PostSync",
            ResourcePhase::Skip => "Skip",
            ResourcePhase::SyncFail => "SyncFail",
            ResourcePhase::Unrecognized => "Unrecognized",
        }
    }
}

impl fmt::Display for ResourcePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single resource touched by the apply step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDetail {
    pub resource_phase: ResourcePhase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
}

/// One raw lifecycle transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    #[serde(alias = "status")]
    pub status_code: TimelineStatus,
    #[serde(alias = "statusTime")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, alias = "statusDetail", skip_serializing_if = "Option::is_none")]
    pub detail_text: Option<String>,
    /// Only populated on `APPLY_STARTED` events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_details: Option<Vec<ResourceDetail>>,
}

impl TimelineEvent {
    pub fn new(status_code: TimelineStatus, timestamp: DateTime<Utc>) -> Self {
        Self {
            status_code,
            timestamp,
            detail_text: None,
            resource_details: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail_text = Some(detail.into());
        self
    }

    pub fn with_resources(mut self, resources: Vec<ResourceDetail>) -> Self {
        self.resource_details = Some(resources);
        self
    }
}

/// Snapshot of a deployment as delivered by the polling client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentStatusInput {
    #[serde(default, alias = "wfrStatus", skip_serializing_if = "Option::is_none")]
    pub coarse_status: Option<CoarseStatus>,
    #[serde(default)]
    pub triggered_by: String,
    #[serde(default, alias = "deploymentStartedOn", skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "deploymentFinishedOn", skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timelines: Option<Vec<TimelineEvent>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_last_fetched_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_fetch_count: Option<u32>,
}

impl DeploymentStatusInput {
    /// Timeline events, treating an absent timeline as empty
    pub fn events(&self) -> &[TimelineEvent] {
        self.timelines.as_deref().unwrap_or_default()
    }
}
