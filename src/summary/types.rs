/// Sentinel stored in a counter that could not be determined.
///
/// `total_tests == UNKNOWN_COUNT` marks a run whose invocation failed;
/// `errors == UNKNOWN_COUNT` marks output that mentioned failures without a
/// parseable summary line.
pub const UNKNOWN_COUNT: i64 = -1;

/// Which terminal summary line was found in the runner output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryLine {
    /// `OK` or `OK (skipped=K)`
    Ok,
    /// `FAILED (failures=F[, errors=E][, skipped=K])`
    Failed,
    /// Neither line was present
    #[default]
    Missing,
}

impl SummaryLine {
    pub fn is_missing(&self) -> bool {
        matches!(self, SummaryLine::Missing)
    }
}

/// Counters derived from one run's combined output
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub total_tests: i64,
    pub passed_tests: i64,
    pub failed_tests: i64,
    pub skipped_tests: i64,

    /// May hold [`UNKNOWN_COUNT`]
    pub errors: i64,

    pub was_successful: bool,

    pub summary_line: SummaryLine,

    /// The summary counts added up to more than `total_tests`
    pub counts_inconsistent: bool,
}

impl RunSummary {
    /// `errors` as a real count, with the sentinel read as zero.
    ///
    /// The passed count subtracts this rather than the raw `errors` field;
    /// subtracting the `-1` sentinel would report more passes than tests run.
    pub fn known_errors(&self) -> i64 {
        self.errors.max(0)
    }

    pub fn errors_unknown(&self) -> bool {
        self.errors == UNKNOWN_COUNT
    }
}
