#![cfg(unix)]

use runreport::runner::{
    ConsoleReporter, InvocationOutcome, InvokeError, OutputCapture, ProcessInvoker, SuiteInvoker,
    TestRunReporter,
};
use runreport::store::ReportStorage;
use tempfile::TempDir;

/// `sh -c <script> <suites...>`; the first suite lands in `$0`
fn shell(script: &str) -> ProcessInvoker {
    ProcessInvoker::new("sh").args(["-c", script])
}

#[tokio::test]
async fn test_captures_both_streams() {
    let invoker = shell("echo to-stdout; echo to-stderr 1>&2");
    let mut capture = OutputCapture::new();

    let outcome = invoker.invoke(&[], &mut capture).await.unwrap();
    assert_eq!(outcome, InvocationOutcome::Completed);
    assert_eq!(capture.stdout(), "to-stdout\n");
    assert_eq!(capture.stderr(), "to-stderr\n");
}

#[tokio::test]
async fn test_nonzero_exit_is_reported_as_exit() {
    let invoker = shell("echo partial; exit 3");
    let mut capture = OutputCapture::new();

    let outcome = invoker.invoke(&[], &mut capture).await.unwrap();
    assert_eq!(outcome, InvocationOutcome::Exited { code: Some(3) });
    assert_eq!(capture.stdout(), "partial\n");
}

#[tokio::test]
async fn test_suites_are_appended_as_arguments() {
    let invoker = shell(r#"echo "$0 $1 $2""#);
    let suites = vec!["User".to_string(), "Admins".to_string(), "Backend".to_string()];
    let mut capture = OutputCapture::new();

    invoker.invoke(&suites, &mut capture).await.unwrap();
    assert_eq!(capture.stdout(), "User Admins Backend\n");
}

#[tokio::test]
async fn test_working_dir_is_used() {
    let temp_dir = TempDir::new().unwrap();
    let invoker = shell("pwd").working_dir(temp_dir.path());
    let mut capture = OutputCapture::new();

    invoker.invoke(&[], &mut capture).await.unwrap();
    let expected = temp_dir.path().canonicalize().unwrap();
    let actual = std::path::PathBuf::from(capture.stdout().trim())
        .canonicalize()
        .unwrap();
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn test_missing_program_is_launch_error() {
    let invoker = ProcessInvoker::new("runreport-no-such-test-runner");
    let mut capture = OutputCapture::new();

    let result = invoker.invoke(&[], &mut capture).await;
    assert!(matches!(result, Err(InvokeError::Launch { .. })));
}

#[tokio::test]
async fn test_end_to_end_failed_run() {
    let temp_dir = TempDir::new().unwrap();
    let script = r#"printf 'F.s.\n======\nFAIL: test_signup (User.tests.SignupTest)\n------\nRan 4 tests in 0.050s\n\nFAILED (failures=1, skipped=1)\n' 1>&2; exit 1"#;
    let reporter = TestRunReporter::new(
        shell(script),
        vec!["User".to_string()],
        ReportStorage::new(temp_dir.path()),
    )
    .with_console(ConsoleReporter::new(true));

    let report = reporter.run().await.unwrap();
    assert_eq!(report.total_tests, 4);
    assert_eq!(report.failed_tests, 1);
    assert_eq!(report.errors, 0);
    assert_eq!(report.skipped_tests, 1);
    assert_eq!(report.passed_tests, 2);
    assert!(!report.was_successful);

    let latest = reporter.storage().latest().unwrap().unwrap();
    assert_eq!(latest, report);
}

#[tokio::test]
async fn test_end_to_end_launch_failure() {
    let temp_dir = TempDir::new().unwrap();
    let reporter = TestRunReporter::new(
        ProcessInvoker::new("runreport-no-such-test-runner"),
        vec!["User".to_string()],
        ReportStorage::new(temp_dir.path()),
    )
    .with_console(ConsoleReporter::new(true));

    let report = reporter.run().await.unwrap();
    assert_eq!(report.total_tests, -1);
    assert!(!report.was_successful);
    assert!(
        report
            .report_output
            .as_deref()
            .unwrap()
            .contains("COMMAND EXCEPTION: failed to launch `runreport-no-such-test-runner`")
    );
    assert_eq!(reporter.storage().list().unwrap().len(), 1);
}
