pub mod parser;
pub mod types;

pub use parser::parse_summary;
pub use types::{RunSummary, SummaryLine, UNKNOWN_COUNT};
