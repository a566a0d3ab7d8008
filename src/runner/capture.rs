/// Separator between the stdout and stderr sections of a parsed run
pub const STDERR_SEPARATOR: &str = "\n--- Captured Stderr ---\n";

/// Separator used when the runner could not be invoked
pub const FAILURE_STDERR_SEPARATOR: &str = "\n--- Errors (if any) ---\n";

/// Output captured from one runner invocation
///
/// The reporter owns the capture and lends it to the invoker, so no
/// process-wide stream is redirected. Consuming methods release both buffers.
#[derive(Debug, Default)]
pub struct OutputCapture {
    stdout: String,
    stderr: String,
}

impl OutputCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw stdout bytes, invalid UTF-8 is replaced
    pub fn write_stdout(&mut self, bytes: &[u8]) {
        self.stdout.push_str(&String::from_utf8_lossy(bytes));
    }

    /// Append raw stderr bytes, invalid UTF-8 is replaced
    pub fn write_stderr(&mut self, bytes: &[u8]) {
        self.stderr.push_str(&String::from_utf8_lossy(bytes));
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty() && self.stderr.is_empty()
    }

    /// Combined text handed to the summary parser
    pub fn into_combined(self) -> String {
        let mut output =
            String::with_capacity(self.stdout.len() + STDERR_SEPARATOR.len() + self.stderr.len());
        output.push_str(&self.stdout);
        output.push_str(STDERR_SEPARATOR);
        output.push_str(&self.stderr);
        output
    }

    /// Combined text for a failed invocation, followed by the failure message
    pub fn into_failure_output(self, message: &str) -> String {
        format!(
            "{}{}{}\nCOMMAND EXCEPTION: {}",
            self.stdout, FAILURE_STDERR_SEPARATOR, self.stderr, message
        )
    }
}
