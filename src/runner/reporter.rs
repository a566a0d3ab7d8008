use crate::Result;
use crate::runner::capture::OutputCapture;
use crate::runner::console::ConsoleReporter;
use crate::runner::invoker::{InvocationOutcome, SuiteInvoker};
use crate::store::{ReportStorage, TestRunReport};
use crate::summary::parse_summary;
use chrono::Utc;
use tracing::{error, info, warn};

/// Runs the configured suites once and persists exactly one report
pub struct TestRunReporter<I> {
    invoker: I,
    suites: Vec<String>,
    storage: ReportStorage,
    console: ConsoleReporter,
}

impl<I: SuiteInvoker> TestRunReporter<I> {
    pub fn new(invoker: I, suites: Vec<String>, storage: ReportStorage) -> Self {
        Self {
            invoker,
            suites,
            storage,
            console: ConsoleReporter::default(),
        }
    }

    pub fn with_console(mut self, console: ConsoleReporter) -> Self {
        self.console = console;
        self
    }

    pub fn invoker(&self) -> &I {
        &self.invoker
    }

    pub fn storage(&self) -> &ReportStorage {
        &self.storage
    }

    /// Invoke the suites, parse the output and store the report.
    ///
    /// Invocation failures become a report with `total_tests == -1`; only a
    /// failure to write the report is returned as an error.
    pub async fn run(&self) -> Result<TestRunReport> {
        let run_at = Utc::now();
        self.console.print_start(&self.invoker.describe(&self.suites));

        let mut capture = OutputCapture::new();
        match self.invoker.invoke(&self.suites, &mut capture).await {
            Ok(InvocationOutcome::Completed) => {}
            Ok(InvocationOutcome::Exited { code }) => {
                info!(?code, "Test runner exited with a status code");
                self.console.print_exit_code(code);
            }
            Err(e) => {
                error!("Exception during test execution: {}", e);
                let report =
                    TestRunReport::catastrophic(run_at, capture.into_failure_output(&e.to_string()));
                self.storage.append(&report)?;
                self.console.print_invocation_failure(&e, &report);
                return Ok(report);
            }
        }

        let output = capture.into_combined();
        self.console.print_parsing();

        let summary = parse_summary(&output);
        if summary.summary_line.is_missing() && !summary.was_successful {
            warn!("No OK/FAILED summary line in runner output");
            self.console.print_unparsed_warning();
        }
        if summary.counts_inconsistent {
            warn!(
                total = summary.total_tests,
                failed = summary.failed_tests,
                errors = summary.errors,
                skipped = summary.skipped_tests,
                "Summary counts exceed total tests"
            );
            self.console.print_inconsistent_warning();
        }

        let report = TestRunReport::from_summary(run_at, &summary, output);
        self.storage.append(&report)?;
        info!(id = %report.id, successful = report.was_successful, "Report saved");

        self.console.print_summary(&report);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::invoker::InvokeError;
    use tempfile::TempDir;

    struct CannedInvoker {
        stderr: &'static str,
        outcome: InvocationOutcome,
    }

    impl SuiteInvoker for CannedInvoker {
        async fn invoke(
            &self,
            _suites: &[String],
            capture: &mut OutputCapture,
        ) -> std::result::Result<InvocationOutcome, InvokeError> {
            capture.write_stderr(self.stderr.as_bytes());
            Ok(self.outcome)
        }
    }

    #[tokio::test]
    async fn test_nonzero_exit_still_parses() {
        let temp_dir = TempDir::new().unwrap();
        let reporter = TestRunReporter::new(
            CannedInvoker {
                stderr: "Ran 10 tests in 0.01s\n\nFAILED (failures=2, errors=1, skipped=1)\n",
                outcome: InvocationOutcome::Exited { code: Some(1) },
            },
            vec!["User".to_string()],
            ReportStorage::new(temp_dir.path()),
        )
        .with_console(ConsoleReporter::new(true));

        let report = reporter.run().await.unwrap();
        assert_eq!(report.total_tests, 10);
        assert_eq!(report.passed_tests, 6);
        assert!(!report.was_successful);

        let stored = reporter.storage().list().unwrap();
        assert_eq!(stored, vec![report]);
    }
}
