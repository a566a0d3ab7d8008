use crate::Result;
use crate::error::ReportError;
use crate::store::model::TestRunReport;
use crate::store::storage::ReportStorage;
use inquire::Select;

/// How many recent reports the interactive picker offers
const PICKER_DEPTH: usize = 50;

/// Selection strategy for a single report
pub enum SelectionStrategy {
    Latest,
    Id(String),
    Interactive,
}

/// Select one report, `Ok(None)` when the store is empty
pub fn select_report(
    storage: &ReportStorage,
    strategy: SelectionStrategy,
) -> Result<Option<TestRunReport>> {
    match strategy {
        SelectionStrategy::Latest => storage.latest(),
        SelectionStrategy::Id(id) => storage.find(&id).map(Some),
        SelectionStrategy::Interactive => select_interactive(storage),
    }
}

fn select_interactive(storage: &ReportStorage) -> Result<Option<TestRunReport>> {
    let reports = storage.recent(PICKER_DEPTH)?;
    if reports.is_empty() {
        return Ok(None);
    }

    #[derive(Clone)]
    struct ReportOption {
        index: usize,
        display: String,
    }

    impl std::fmt::Display for ReportOption {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.display)
        }
    }

    let options: Vec<ReportOption> = reports
        .iter()
        .enumerate()
        .map(|(index, r)| ReportOption {
            index,
            display: format_report_for_display(r),
        })
        .collect();

    let selected = Select::new("Select a test run:", options)
        .with_page_size(15)
        .with_help_message("Enter to show, type to filter")
        .prompt()
        .map_err(|e| ReportError::Other(format!("Selection canceled or failed: {}", e)))?;

    Ok(reports.into_iter().nth(selected.index))
}

fn format_report_for_display(r: &TestRunReport) -> String {
    let time = r.run_at.format("%Y-%m-%d %H:%M:%S");
    let id = r.short_id();
    let status = r.status_label();
    if r.is_catastrophic() {
        format!("[{status}] {id} runner not invoked ({time})")
    } else {
        format!(
            "[{status}] {id} {} tests, {} failed, {} errors ({time})",
            r.total_tests, r.failed_tests, r.errors
        )
    }
}
