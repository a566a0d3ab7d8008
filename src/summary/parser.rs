use crate::summary::types::{RunSummary, SummaryLine, UNKNOWN_COUNT};
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Marker the runner prints in front of each failure detail block
const FAIL_DETAIL_MARKER: &str = "FAIL:";

/// Text the runner prints when there was nothing to run
const ZERO_TESTS_MARKER: &str = "Ran 0 tests";

fn ran_regex() -> &'static Regex {
    static RAN_REGEX: OnceLock<Regex> = OnceLock::new();
    RAN_REGEX.get_or_init(|| Regex::new(r"Ran (\d+) tests? in").unwrap())
}

fn ok_regex() -> &'static Regex {
    static OK_REGEX: OnceLock<Regex> = OnceLock::new();
    OK_REGEX.get_or_init(|| Regex::new(r"(?m)^OK(?: \(skipped=(\d+)\))?").unwrap())
}

fn failed_regex() -> &'static Regex {
    static FAILED_REGEX: OnceLock<Regex> = OnceLock::new();
    FAILED_REGEX.get_or_init(|| {
        Regex::new(r"(?m)^FAILED \(failures=(\d+)(?:, errors=(\d+))?(?:, skipped=(\d+))?\)")
            .unwrap()
    })
}

/// Read an optional numeric group, absent or unparseable groups count as 0
fn group_count(caps: &Captures, index: usize) -> i64 {
    caps.get(index)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Derive run counters from a test runner's combined output.
///
/// Recognised lines:
/// - `Ran 17 tests in 0.002s`
/// - `OK` / `OK (skipped=2)`
/// - `FAILED (failures=2, errors=1, skipped=1)`
///
/// `OK` takes priority over `FAILED`; the first match of each wins.
pub fn parse_summary(output: &str) -> RunSummary {
    let mut summary = RunSummary {
        total_tests: ran_regex()
            .captures(output)
            .map(|caps| group_count(&caps, 1))
            .unwrap_or(0),
        ..RunSummary::default()
    };

    if let Some(caps) = ok_regex().captures(output) {
        summary.summary_line = SummaryLine::Ok;
        summary.was_successful = true;
        summary.skipped_tests = group_count(&caps, 1);
    } else if let Some(caps) = failed_regex().captures(output) {
        summary.summary_line = SummaryLine::Failed;
        summary.was_successful = false;
        summary.failed_tests = group_count(&caps, 1);
        summary.errors = group_count(&caps, 2);
        summary.skipped_tests = group_count(&caps, 3);
    } else {
        summary.summary_line = SummaryLine::Missing;
        summary.was_successful = false;
        if output.contains(FAIL_DETAIL_MARKER) && summary.failed_tests == 0 && summary.errors == 0
        {
            summary.errors = UNKNOWN_COUNT;
        }
    }

    if summary.total_tests > 0 {
        // counts come from free text and may be arbitrarily large
        let passed = summary
            .total_tests
            .checked_sub(summary.failed_tests)
            .and_then(|n| n.checked_sub(summary.known_errors()))
            .and_then(|n| n.checked_sub(summary.skipped_tests))
            .filter(|n| *n >= 0);
        match passed {
            Some(passed) => summary.passed_tests = passed,
            None => {
                summary.passed_tests = 0;
                summary.was_successful = false;
                summary.counts_inconsistent = true;
            }
        }
    } else if summary.summary_line.is_missing() && output.contains(ZERO_TESTS_MARKER) {
        // Nothing ran, so there is nothing to summarise.
        summary = RunSummary {
            was_successful: true,
            ..RunSummary::default()
        };
    }

    summary
}
