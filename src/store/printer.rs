use super::model::TestRunReport;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, Table};

/// Which reports a listing should include
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Passed,
    Failed,
}

impl StatusFilter {
    pub fn matches(&self, report: &TestRunReport) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Passed => report.was_successful,
            StatusFilter::Failed => !report.was_successful,
        }
    }
}

/// Render a counter, showing sentinels as `n/a`
pub fn format_count(count: i64) -> String {
    if count < 0 {
        "n/a".to_string()
    } else {
        count.to_string()
    }
}

pub fn reports_table(reports: &[TestRunReport]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "ID", "Run at", "Total", "Passed", "Failed", "Skipped", "Errors", "Status",
    ]);

    for report in reports {
        let status_color = if report.was_successful {
            Color::Green
        } else {
            Color::Red
        };

        table.add_row(vec![
            Cell::new(report.short_id()),
            Cell::new(report.run_at.format("%Y-%m-%d %H:%M:%S")).add_attribute(Attribute::Dim),
            Cell::new(format_count(report.total_tests)),
            Cell::new(format_count(report.passed_tests)),
            Cell::new(format_count(report.failed_tests)),
            Cell::new(format_count(report.skipped_tests)),
            Cell::new(format_count(report.errors)),
            Cell::new(report.status_label()).fg(status_color),
        ]);
    }

    table
}

/// Keep up to `limit` reports matching `filter`, preserving order
pub fn select_matching(
    reports: Vec<TestRunReport>,
    filter: StatusFilter,
    limit: usize,
) -> Vec<TestRunReport> {
    reports
        .into_iter()
        .filter(|r| filter.matches(r))
        .take(limit)
        .collect()
}

/// Print a table of reports, already filtered and ordered newest first
pub fn print_reports(reports: &[TestRunReport]) {
    if reports.is_empty() {
        println!("No matching test run reports.");
        return;
    }

    println!("{}", reports_table(reports));
}

/// Print one report; `with_output` includes the captured runner output
pub fn print_report(report: &TestRunReport, with_output: bool) {
    let status = if report.was_successful {
        report.status_label().green().bold()
    } else {
        report.status_label().red().bold()
    };

    println!("\n{}", report.to_string().bold());
    println!("{}", "━".repeat(50));
    println!("  {:<9} {}", "ID:".bold(), report.id);
    println!("  {:<9} {}", "Status:".bold(), status);

    if report.is_catastrophic() {
        println!(
            "  {}",
            "The test runner could not be invoked; no counts were parsed.".red()
        );
    } else {
        println!(
            "  {:<9} {}",
            "Total:".bold(),
            format_count(report.total_tests)
        );
        println!(
            "  {:<9} {}",
            "Passed:".bold(),
            format_count(report.passed_tests).green()
        );
        println!(
            "  {:<9} {}",
            "Failed:".bold(),
            format_count(report.failed_tests).red()
        );
        println!(
            "  {:<9} {}",
            "Errors:".bold(),
            format_count(report.errors).red()
        );
        println!(
            "  {:<9} {}",
            "Skipped:".bold(),
            format_count(report.skipped_tests).dimmed()
        );
    }

    if with_output {
        println!("{}", "━".repeat(50));
        match report.report_output.as_deref() {
            Some(output) if !output.is_empty() => println!("{}", output),
            _ => println!("{}", "(no output captured)".dimmed()),
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(12), "12");
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(-1), "n/a");
    }

    #[test]
    fn test_status_filter() {
        let failed = TestRunReport::catastrophic(Utc::now(), String::new());
        let mut passed = failed.clone();
        passed.was_successful = true;

        assert!(StatusFilter::All.matches(&failed));
        assert!(StatusFilter::Failed.matches(&failed));
        assert!(!StatusFilter::Failed.matches(&passed));
        assert!(StatusFilter::Passed.matches(&passed));
    }

    #[test]
    fn test_select_matching_limits_after_filtering() {
        let failed = TestRunReport::catastrophic(Utc::now(), String::new());
        let mut passed = failed.clone();
        passed.was_successful = true;
        let reports = vec![
            passed.clone(),
            failed.clone(),
            passed.clone(),
            failed.clone(),
            failed.clone(),
        ];

        let matching = select_matching(reports.clone(), StatusFilter::Failed, 2);
        assert_eq!(matching.len(), 2);
        assert!(matching.iter().all(|r| !r.was_successful));

        assert_eq!(select_matching(reports.clone(), StatusFilter::Passed, 10).len(), 2);
        assert_eq!(select_matching(reports, StatusFilter::All, 3).len(), 3);
    }

    #[test]
    fn test_table_has_row_per_report() {
        let report = TestRunReport::catastrophic(Utc::now(), String::new());
        let table = reports_table(&[report.clone(), report.clone()]);
        assert_eq!(table.row_iter().count(), 2);
        assert!(table.to_string().contains(report.short_id()));
    }
}
