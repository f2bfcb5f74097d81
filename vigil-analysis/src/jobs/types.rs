//! Job-health document shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `{ jobs: [...], summary }` as written by the scheduler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobHealthDocument {
    #[serde(default)]
    pub jobs: Vec<JobRecord>,
    #[serde(default)]
    pub summary: Option<serde_json::Value>,
}

/// One scheduled job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub consecutive_failures: u32,
    #[serde(default)]
    pub circuit_open: bool,
    #[serde(default)]
    pub schedule: Option<String>,
    #[serde(default)]
    pub last_run_at: Option<DateTime<Utc>>,
}

impl JobRecord {
    /// Circuit open, or enough consecutive failures to count as open.
    pub fn is_tripped(&self, threshold: u32) -> bool {
        self.circuit_open || self.consecutive_failures >= threshold
    }

    pub fn last_run_failed(&self) -> bool {
        matches!(
            self.status.as_deref().map(str::to_ascii_lowercase).as_deref(),
            Some("failed" | "failure" | "error" | "errored")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_records() {
        let doc: JobHealthDocument = serde_json::from_str(
            r#"{"jobs":[{"id":"backup","status":"ok","consecutiveFailures":0,"circuitOpen":false,
                "schedule":"daily","lastRunAt":"2026-05-01T03:00:00Z"}],"summary":{"total":1}}"#,
        )
        .unwrap();
        let job = &doc.jobs[0];
        assert_eq!(job.id, "backup");
        assert!(!job.is_tripped(3));
        assert!(job.last_run_at.is_some());
    }

    #[test]
    fn tripped_and_failed() {
        let mut job: JobRecord = serde_json::from_str(r#"{"id":"sync","status":"FAILED"}"#).unwrap();
        assert!(job.last_run_failed());
        assert!(!job.is_tripped(3));
        job.consecutive_failures = 3;
        assert!(job.is_tripped(3));
        job.consecutive_failures = 0;
        job.circuit_open = true;
        assert!(job.is_tripped(3));
    }
}
