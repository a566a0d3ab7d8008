use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::summary::{RunSummary, UNKNOWN_COUNT};

/// One persisted test-suite run
///
/// Records are written once and never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRunReport {
    /// Unique ID (UUID)
    pub id: String,

    /// Invocation time
    pub run_at: DateTime<Utc>,

    /// `-1` when the runner could not be invoked
    pub total_tests: i64,

    pub passed_tests: i64,

    pub failed_tests: i64,

    pub skipped_tests: i64,

    /// `-1` when failures were seen but could not be counted
    pub errors: i64,

    /// Combined stdout and stderr of the runner
    pub report_output: Option<String>,

    pub was_successful: bool,
}

impl TestRunReport {
    /// Build a report from parsed counters
    pub fn from_summary(run_at: DateTime<Utc>, summary: &RunSummary, output: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            run_at,
            total_tests: summary.total_tests,
            passed_tests: summary.passed_tests,
            failed_tests: summary.failed_tests,
            skipped_tests: summary.skipped_tests,
            errors: summary.errors,
            report_output: Some(output),
            was_successful: summary.was_successful,
        }
    }

    /// Build the report written when the runner could not be invoked at all
    pub fn catastrophic(run_at: DateTime<Utc>, output: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            run_at,
            total_tests: UNKNOWN_COUNT,
            passed_tests: 0,
            failed_tests: 0,
            skipped_tests: 0,
            errors: 0,
            report_output: Some(output),
            was_successful: false,
        }
    }

    pub fn is_catastrophic(&self) -> bool {
        self.total_tests == UNKNOWN_COUNT
    }

    pub fn short_id(&self) -> &str {
        &self.id[..self.id.len().min(8)]
    }

    pub fn status_label(&self) -> &'static str {
        if self.was_successful {
            "Success"
        } else {
            "Failed"
        }
    }
}

impl fmt::Display for TestRunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Test Run at {} - {}",
            self.run_at.format("%Y-%m-%d %H:%M:%S"),
            self.status_label()
        )
    }
}
