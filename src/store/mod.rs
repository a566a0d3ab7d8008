pub mod model;
pub mod printer;
pub mod selector;
pub mod storage;

pub use model::TestRunReport;
pub use printer::StatusFilter;
pub use selector::{SelectionStrategy, select_report};
pub use storage::ReportStorage;
