use chrono::Utc;
use runreport::store::{ReportStorage, TestRunReport};
use runreport::summary::parse_summary;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

#[test]
fn test_concurrent_appends() {
    let temp_dir = TempDir::new().unwrap();
    let store_dir = Arc::new(temp_dir.path().to_path_buf());

    let thread_count = 8;
    let reports_per_thread = 25;
    // a large output makes torn writes visible if locking were broken
    let output = format!("{}\nRan 3 tests in 0.1s\n\nOK\n", ".".repeat(4096));

    let mut handles = vec![];
    for _ in 0..thread_count {
        let dir = store_dir.clone();
        let output = output.clone();
        handles.push(thread::spawn(move || {
            // separate instances, as separate processes would have
            let storage = ReportStorage::new(dir.as_path());
            let mut ids = Vec::new();
            for _ in 0..reports_per_thread {
                let report =
                    TestRunReport::from_summary(Utc::now(), &parse_summary(&output), output.clone());
                storage.append(&report).unwrap();
                ids.push(report.id);
            }
            ids
        }));
    }

    let mut written = HashSet::new();
    for handle in handles {
        written.extend(handle.join().unwrap());
    }

    let storage = ReportStorage::new(store_dir.as_path());
    let reports = storage.list().unwrap();
    assert_eq!(reports.len(), thread_count * reports_per_thread);

    let stored: HashSet<String> = reports.iter().map(|r| r.id.clone()).collect();
    assert_eq!(stored, written);
    assert!(reports.iter().all(|r| r.total_tests == 3 && r.was_successful));
}
