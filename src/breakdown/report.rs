//! Plain-text breakdown summary
//!
//! One line per phase, sub-steps and details indented below it. Used by the
//! CLI's `text` output and by snapshot tests.

use chrono::SecondsFormat;

use crate::models::DeploymentStatusBreakdown;

/// Render a breakdown as plain text (no trailing newline)
pub fn render_text(breakdown: &DeploymentStatusBreakdown) -> String {
    let mut lines = Vec::new();

    let mut header = format!("Status: {}", breakdown.overall_status_text);
    if !breakdown.triggered_by.is_empty() {
        header.push_str(&format!(" (triggered by {})", breakdown.triggered_by));
    }
    lines.push(header);
    if let Some(phase) = breakdown.last_failed_phase {
        lines.push(format!("Last failed phase: {}", phase));
    }

    for (phase, item) in &breakdown.phases {
        let mut line = format!("{} [{}] {}", phase, item.icon.as_str(), item.display_text);
        if !item.display_sub_text.is_empty() {
            line.push_str(&format!(" - {}", item.display_sub_text));
        }
        if let Some(timestamp) = item.timestamp {
            line.push_str(&format!(
                " @ {}",
                timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
            ));
        }
        lines.push(line);

        for step in item.sub_steps.iter().flatten() {
            lines.push(format!("    [{}] {}", step.icon.as_str(), step.message));
        }
        if !item.detail_text.is_empty() {
            lines.push(format!("    ! {}", item.detail_text));
        }
    }

    lines.join("\n")
}
