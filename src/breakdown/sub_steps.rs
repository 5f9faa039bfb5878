//! Apply phase sub-step reconstruction
//!
//! The apply-started event lists the resources the sync engine is working
//! on, each tagged with a reconciliation sub-phase. Sub-phases always run in
//! [`ResourcePhase::ORDERED`] order, so the furthest one with any resources
//! is the one currently running and everything before it has finished.

use crate::models::{PhaseIcon, ResourceDetail, ResourcePhase, SubStep};

/// Last sub-phase in fixed order that has at least one resource
pub fn current_sub_phase(resources: &[ResourceDetail]) -> Option<ResourcePhase> {
    ResourcePhase::ORDERED
        .iter()
        .rev()
        .find(|phase| resources.iter().any(|r| r.resource_phase == **phase))
        .copied()
}

/// Resources belonging to the current sub-phase
pub fn active_resources(resources: &[ResourceDetail]) -> Vec<ResourceDetail> {
    match current_sub_phase(resources) {
        Some(current) => resources
            .iter()
            .filter(|r| r.resource_phase == current)
            .cloned()
            .collect(),
        None => Vec::new(),
    }
}

/// One sub-step per sub-phase present in `resources`, in fixed order
///
/// Sub-phases before the current one are done; the current one gets
/// `current_icon`.
pub fn reconstruct_sub_steps(resources: &[ResourceDetail], current_icon: PhaseIcon) -> Vec<SubStep> {
    let current = current_sub_phase(resources);

    ResourcePhase::ORDERED
        .iter()
        .filter(|phase| resources.iter().any(|r| r.resource_phase == **phase))
        .map(|phase| {
            let icon = if Some(*phase) == current {
                current_icon
            } else {
                PhaseIcon::Success
            };
            SubStep::new(*phase, icon)
        })
        .collect()
}
