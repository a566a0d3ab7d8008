use super::model::TestRunReport;
use crate::Result;
use crate::config::StoreConfig;
use crate::error::ReportError;
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const STORE_DIR: &str = ".runreport";
pub const STORE_DIR_ENV: &str = "RUNREPORT_STORE_DIR";
const REPORTS_FILE: &str = "reports.jsonl";

/// Append-only report store backed by a JSON Lines file
///
/// Records are only ever appended; nothing here rewrites or removes one.
#[derive(Debug, Clone)]
pub struct ReportStorage {
    file_path: PathBuf,
}

impl ReportStorage {
    /// Store rooted at `dir`
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            file_path: dir.as_ref().join(REPORTS_FILE),
        }
    }

    /// Resolve the store directory: `RUNREPORT_STORE_DIR`, then config, then `.runreport`
    pub fn from_config(config: &StoreConfig) -> Self {
        let dir = std::env::var(STORE_DIR_ENV)
            .map(PathBuf::from)
            .ok()
            .or_else(|| config.dir.clone())
            .unwrap_or_else(|| PathBuf::from(STORE_DIR));
        Self::new(dir)
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.file_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Persist one report
    ///
    /// The line is written under `fs2::lock_exclusive`, so concurrent
    /// processes never interleave partial records.
    pub fn append(&self, report: &TestRunReport) -> Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string(report)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)?;

        file.lock_exclusive()?;
        writeln!(file, "{}", json)?;
        file.flush()?;
        drop(file);

        debug!(id = %report.id, path = %self.file_path.display(), "Report appended");
        Ok(())
    }

    /// All reports in insertion order (oldest first)
    pub fn list(&self) -> Result<Vec<TestRunReport>> {
        if !self.file_path.exists() {
            return Ok(Vec::new());
        }

        let file = fs::File::open(&self.file_path)?;
        file.lock_shared()?;

        let reader = BufReader::new(file);
        let mut reports = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<TestRunReport>(&line) {
                Ok(report) => reports.push(report),
                Err(e) => warn!(line = index + 1, "Skipping unreadable report record: {}", e),
            }
        }
        Ok(reports)
    }

    /// Up to `n` reports, most recent `run_at` first
    pub fn recent(&self, n: usize) -> Result<Vec<TestRunReport>> {
        let mut reports = self.list()?;
        // stable sort keeps later appends first among equal timestamps
        reports.reverse();
        reports.sort_by(|a, b| b.run_at.cmp(&a.run_at));
        reports.truncate(n);
        Ok(reports)
    }

    /// The most recent report, if any run has been recorded
    pub fn latest(&self) -> Result<Option<TestRunReport>> {
        Ok(self.recent(1)?.into_iter().next())
    }

    /// Look up a report by its full ID or a unique prefix of it
    pub fn find(&self, id_prefix: &str) -> Result<TestRunReport> {
        let id_prefix = id_prefix.trim();
        if id_prefix.is_empty() {
            return Err(ReportError::NotFound("empty id".to_string()));
        }

        let mut matches: Vec<TestRunReport> = self
            .list()?
            .into_iter()
            .filter(|r| r.id.starts_with(id_prefix))
            .collect();

        match matches.len() {
            0 => Err(ReportError::NotFound(id_prefix.to_string())),
            1 => Ok(matches.remove(0)),
            n => Err(ReportError::AmbiguousId(format!(
                "{} matches {} reports",
                id_prefix, n
            ))),
        }
    }
}
