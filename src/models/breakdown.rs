//! Breakdown output types
//!
//! These are produced fresh on every engine call and handed to whatever
//! renders them. Nothing here is cached between calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{DeploymentStatus, Phase, ResourceDetail, ResourcePhase};

pub const SUBTEXT_WAITING: &str = "Waiting";
pub const SUBTEXT_IN_PROGRESS: &str = "In progress";
pub const SUBTEXT_FAILED: &str = "Failed";
pub const SUBTEXT_UNKNOWN: &str = "Unknown";
pub const SUBTEXT_DEGRADED: &str = "Degraded";

/// Display state of a phase or sub-step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseIcon {
    #[default]
    None,
    Success,
    Failed,
    InProgress,
    Unreachable,
    Disconnected,
    TimedOut,
    Degraded,
}

impl PhaseIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseIcon::None => "none",
            PhaseIcon::Success => "success",
            PhaseIcon::Failed => "failed",
            PhaseIcon::InProgress => "in-progress",
            PhaseIcon::Unreachable => "unreachable",
            PhaseIcon::Disconnected => "disconnected",
            PhaseIcon::TimedOut => "timed-out",
            PhaseIcon::Degraded => "degraded",
        }
    }

    /// Success or in-progress: the phase has been reached
    pub fn is_frontier(&self) -> bool {
        matches!(self, PhaseIcon::Success | PhaseIcon::InProgress)
    }
}

/// One reconciliation sub-phase row of the apply phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubStep {
    pub icon: PhaseIcon,
    pub message: String,
    pub phase: ResourcePhase,
}

impl SubStep {
    pub fn new(phase: ResourcePhase, icon: PhaseIcon) -> Self {
        Self {
            icon,
            message: format!("{}: Create and update resources based on manifest", phase),
            phase,
        }
    }
}

/// Display state of one phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseBreakdownItem {
    pub icon: PhaseIcon,
    pub display_text: String,
    pub display_sub_text: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub is_collapsed: bool,
    pub detail_text: String,
    /// Apply phase only: resources in the currently active sub-phase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_details: Option<Vec<ResourceDetail>>,
    /// Apply phase only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_steps: Option<Vec<SubStep>>,
}

impl PhaseBreakdownItem {
    /// A phase nothing has been observed for yet
    pub fn waiting(display_text: impl Into<String>) -> Self {
        Self {
            icon: PhaseIcon::None,
            display_text: display_text.into(),
            display_sub_text: String::new(),
            timestamp: None,
            is_collapsed: true,
            detail_text: String::new(),
            resource_details: None,
            sub_steps: None,
        }
    }

    pub fn set_state(&mut self, icon: PhaseIcon, sub_text: &str) {
        self.icon = icon;
        self.display_sub_text = sub_text.to_string();
    }
}

/// The complete per-phase view of one deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentStatusBreakdown {
    pub overall_status: DeploymentStatus,
    pub overall_status_text: String,
    pub trigger_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub triggered_by: String,
    pub last_failed_phase: Option<Phase>,
    /// Exactly the phases of the active ordering, iterated in canonical order
    pub phases: BTreeMap<Phase, PhaseBreakdownItem>,
}

impl DeploymentStatusBreakdown {
    pub fn phase(&self, phase: Phase) -> Option<&PhaseBreakdownItem> {
        self.phases.get(&phase)
    }

    pub fn phase_mut(&mut self, phase: Phase) -> Option<&mut PhaseBreakdownItem> {
        self.phases.get_mut(&phase)
    }

    /// Icons in canonical order
    pub fn icons(&self) -> Vec<PhaseIcon> {
        self.phases.values().map(|item| item.icon).collect()
    }

    /// Recompute `last_failed_phase` from the current icons
    pub(crate) fn refresh_last_failed_phase(&mut self) {
        self.last_failed_phase = self
            .phases
            .iter()
            .rev()
            .find(|(_, item)| item.icon == PhaseIcon::Failed)
            .map(|(phase, _)| *phase);
    }
}
