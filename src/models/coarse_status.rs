//! Coarse runner status definitions
//!
//! The runner reports a single overall status per deployment. This module
//! provides a closed enum for those codes so the rest of the crate never
//! compares raw strings. Codes the enum does not know about are kept verbatim
//! in [`CoarseStatus::Other`] so they can be reported.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Overall status reported by the external deployment runner
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CoarseStatus {
    Succeeded,
    Healthy,
    Failed,
    Aborted,
    Superseded,
    TimedOut,
    UnableToFetch,
    Progressing,
    Running,
    Starting,
    Initiating,
    Queued,
    Unknown,
    /// A code outside the known set, kept as received
    Other(String),
}

impl CoarseStatus {
    /// Get the wire name as a string
    pub fn as_str(&self) -> &str {
        match self {
            CoarseStatus::Succeeded => "Succeeded",
            CoarseStatus::Healthy => "Healthy",
            CoarseStatus::Failed => "Failed",
            CoarseStatus::Aborted => "Aborted",
            CoarseStatus::Superseded => "Superseded",
            CoarseStatus::TimedOut => "TimedOut",
            CoarseStatus::UnableToFetch => "UnableToFetch",
            CoarseStatus::Progressing => "Progressing",
            CoarseStatus::Running => "Running",
            CoarseStatus::Starting => "Starting",
            CoarseStatus::Initiating => "Initiating",
            CoarseStatus::Queued => "Queued",
            CoarseStatus::Unknown => "Unknown",
            CoarseStatus::Other(raw) => raw.as_str(),
        }
    }

    /// Get all known coarse status codes (excludes `Other`)
    pub fn all() -> &'static [Self] {
        &[
            CoarseStatus::Succeeded,
            CoarseStatus::Healthy,
            CoarseStatus::Failed,
            CoarseStatus::Aborted,
            CoarseStatus::Superseded,
            CoarseStatus::TimedOut,
            CoarseStatus::UnableToFetch,
            CoarseStatus::Progressing,
            CoarseStatus::Running,
            CoarseStatus::Starting,
            CoarseStatus::Initiating,
            CoarseStatus::Queued,
            CoarseStatus::Unknown,
        ]
    }

    /// Case-insensitive lookup, also accepting the snake/kebab spellings
    /// some runners emit (`timed_out`, `unable-to-fetch`, ...)
    pub fn from_str_case_insensitive(s: &str) -> Option<Self> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        match folded.as_str() {
            "succeeded" | "success" => Some(CoarseStatus::Succeeded),
            "healthy" => Some(CoarseStatus::Healthy),
            "failed" | "failure" => Some(CoarseStatus::Failed),
            "aborted" | "cancelled" => Some(CoarseStatus::Aborted),
            "superseded" => Some(CoarseStatus::Superseded),
            "timedout" => Some(CoarseStatus::TimedOut),
            "unabletofetch" | "unabletofetchstatus" => Some(CoarseStatus::UnableToFetch),
            "progressing" => Some(CoarseStatus::Progressing),
            "running" => Some(CoarseStatus::Running),
            "starting" => Some(CoarseStatus::Starting),
            "initiating" => Some(CoarseStatus::Initiating),
            "queued" => Some(CoarseStatus::Queued),
            "unknown" => Some(CoarseStatus::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for CoarseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CoarseStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_str_case_insensitive(s).unwrap_or_else(|| CoarseStatus::Other(s.to_string())))
    }
}

impl From<String> for CoarseStatus {
    fn from(s: String) -> Self {
        Self::from_str_case_insensitive(&s).unwrap_or(CoarseStatus::Other(s))
    }
}

impl From<CoarseStatus> for String {
    fn from(status: CoarseStatus) -> Self {
        status.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!(
            CoarseStatus::from_str_case_insensitive("succeeded"),
            Some(CoarseStatus::Succeeded)
        );
        assert_eq!(
            CoarseStatus::from_str_case_insensitive("TIMED_OUT"),
            Some(CoarseStatus::TimedOut)
        );
        assert_eq!(
            CoarseStatus::from_str_case_insensitive("unable-to-fetch"),
            Some(CoarseStatus::UnableToFetch)
        );
        assert_eq!(CoarseStatus::from_str_case_insensitive("Paused"), None);
    }

    #[test]
    fn test_unknown_code_is_kept() {
        let status: CoarseStatus = "Paused".parse().unwrap();
        assert_eq!(status, CoarseStatus::Other("Paused".to_string()));
        assert_eq!(status.to_string(), "Paused");
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&CoarseStatus::TimedOut).unwrap();
        assert_eq!(json, "\"TimedOut\"");

        let parsed: CoarseStatus = serde_json::from_str("\"Progressing\"").unwrap();
        assert_eq!(parsed, CoarseStatus::Progressing);

        let other: CoarseStatus = serde_json::from_str("\"Hibernating\"").unwrap();
        assert_eq!(other, CoarseStatus::Other("Hibernating".to_string()));
    }

    #[test]
    fn test_all_round_trips_through_as_str() {
        for status in CoarseStatus::all() {
            assert_eq!(
                CoarseStatus::from_str_case_insensitive(status.as_str()).as_ref(),
                Some(status)
            );
        }
    }
}
