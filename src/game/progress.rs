//! Per-course completion ledger.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Which sections of one course a user has finished, plus the derived percent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    pub completed_sections: BTreeSet<u32>,
    pub progress_percent: u8,
}

impl CourseProgress {
    /// Record completion of one section.
    ///
    /// Idempotent: re-marking an already-completed section changes nothing
    /// and returns false, so callers cannot double-award points for it.
    pub fn mark_section_complete(&mut self, section_index: u32, total_sections: u32) -> bool {
        if !self.completed_sections.insert(section_index) {
            return false;
        }
        self.progress_percent = percent_complete(self.completed_sections.len(), total_sections);
        true
    }
}

fn percent_complete(completed: usize, total_sections: u32) -> u8 {
    if total_sections == 0 {
        return 0;
    }
    (100.0 * completed as f64 / total_sections as f64).round() as u8
}
