pub mod config;
pub mod error;
pub mod logger;
pub mod runner;
pub mod store;
pub mod summary;

// Re-export commonly used types
pub use error::{ReportError, Result};
pub use runner::{OutputCapture, ProcessInvoker, SuiteInvoker, TestRunReporter};
pub use store::{ReportStorage, TestRunReport};
pub use summary::{RunSummary, SummaryLine, parse_summary};
