use crate::runner::invoker::InvokeError;
use crate::store::TestRunReport;
use crate::store::printer::format_count;
use colored::Colorize;

/// Operator-facing progress lines; nothing printed here is persisted
pub struct ConsoleReporter {
    quiet: bool,
}

impl ConsoleReporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Print run start
    pub fn print_start(&self, command_line: &str) {
        if self.quiet {
            return;
        }
        println!("Starting test execution...");
        println!("  {}", command_line.dimmed());
    }

    pub fn print_exit_code(&self, code: Option<i32>) {
        if self.quiet {
            return;
        }
        match code {
            Some(code) => println!("Test runner exited with code: {}", code),
            None => println!("Test runner was terminated by a signal"),
        }
    }

    pub fn print_parsing(&self) {
        if self.quiet {
            return;
        }
        println!("Test execution finished. Parsing results...");
    }

    pub fn print_unparsed_warning(&self) {
        eprintln!(
            "{}",
            "Could not parse test summary (OK/FAILED line not found). Report marked as unsuccessful."
                .yellow()
        );
    }

    pub fn print_inconsistent_warning(&self) {
        eprintln!(
            "{}",
            "Summary counts exceed the number of tests run. Report marked as unsuccessful."
                .yellow()
        );
    }

    /// Print the catastrophic path: exception and saved error report
    pub fn print_invocation_failure(&self, error: &InvokeError, report: &TestRunReport) {
        eprintln!(
            "{}: {}",
            "Exception during test execution".red().bold(),
            error
        );
        eprintln!(
            "{} ID: {}",
            "Test execution failed catastrophically. Report saved with error state.".red(),
            report.id
        );
    }

    /// Print the saved report's one-line summary
    pub fn print_summary(&self, report: &TestRunReport) {
        if !self.quiet {
            println!(
                "{} ID: {}",
                "Successfully ran tests and saved report.".green(),
                report.id
            );
        }

        println!(
            "Summary: Total={}, Passed={}, Failed={}, Errors={}, Skipped={}",
            format_count(report.total_tests),
            report.passed_tests.to_string().green(),
            report.failed_tests.to_string().red(),
            format_count(report.errors).red(),
            report.skipped_tests.to_string().dimmed()
        );

        if !report.was_successful {
            eprintln!(
                "{}",
                "Test run reported failures or errors, or could not be fully parsed."
                    .red()
                    .bold()
            );
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(false)
    }
}
