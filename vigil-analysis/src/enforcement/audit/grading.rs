//! Severity tallies and the grade they imply.

use serde::Serialize;

use vigil_core::types::Grade;

use crate::enforcement::findings::{Finding, Severity};

/// Findings per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub critical: u32,
    pub warning: u32,
    pub info: u32,
    pub ok: u32,
}

impl SeverityCounts {
    pub fn tally<'a>(findings: impl IntoIterator<Item = &'a Finding>) -> Self {
        let mut counts = Self::default();
        for finding in findings {
            match finding.severity {
                Severity::Critical => counts.critical += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Info => counts.info += 1,
                Severity::Ok => counts.ok += 1,
            }
        }
        counts
    }

    pub fn grade(&self) -> Grade {
        Grade::from_counts(self.critical, self.warning)
    }

    /// No Critical or Warning findings.
    pub fn is_clean(&self) -> bool {
        self.critical == 0 && self.warning == 0
    }
}
