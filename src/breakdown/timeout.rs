//! Timeout and unreachable formatting
//!
//! When the runner gives up on a rollout (timed out) or can no longer observe
//! it (unable to fetch), the phase that was in flight is rewritten to show
//! that instead of a spinner.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::breakdown::SUBTEXT_UNKNOWN;
use crate::models::{DeploymentStatus, Phase, PhaseBreakdownItem, PhaseIcon};

const MISSING_VALUE: &str = "--";

/// Status polling bookkeeping supplied by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchBookkeeping {
    pub last_fetched_at: Option<DateTime<Utc>>,
    pub fetch_count: Option<u32>,
}

impl FetchBookkeeping {
    /// Detail message for a reconciliation phase that never became healthy
    pub fn timeout_detail(&self) -> String {
        let last_fetched = self
            .last_fetched_at
            .map(|at| at.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_else(|| MISSING_VALUE.to_string());
        let retries = match self.fetch_count {
            Some(count) if count > 0 => count.to_string(),
            _ => MISSING_VALUE.to_string(),
        };

        format!(
            "Below resources did not become healthy within the timeout window. \
             Resource status last fetched {}. {} retries failed.",
            last_fetched, retries
        )
    }
}

/// Rewrite an in-progress phase for a stalled rollout
///
/// Only touches `item` when it is in progress and `status` is timed out or
/// unable to fetch; resolved phases are never changed.
pub fn format_stalled_phase(
    item: &mut PhaseBreakdownItem,
    phase: Phase,
    status: DeploymentStatus,
    bookkeeping: &FetchBookkeeping,
) {
    if item.icon != PhaseIcon::InProgress {
        return;
    }

    let icon = match status {
        DeploymentStatus::TimedOut => PhaseIcon::TimedOut,
        DeploymentStatus::UnableToFetch => PhaseIcon::Disconnected,
        _ => return,
    };

    item.set_state(icon, SUBTEXT_UNKNOWN);
    item.is_collapsed = false;
    item.detail_text = if phase.is_reconciliation() {
        bookkeeping.timeout_detail()
    } else {
        String::new()
    };
}
