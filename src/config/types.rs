use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// How to launch the test runner
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Executable to run
    pub program: String,

    /// Fixed arguments placed before the suite names
    pub args: Vec<String>,

    /// Suites passed to the runner on every invocation
    pub suites: Vec<String>,

    pub working_dir: Option<PathBuf>,

    /// Extra environment for the runner process, `${VAR}` is expanded
    pub env: HashMap<String, String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            program: "python".to_string(),
            args: vec![
                "manage.py".to_string(),
                "test".to_string(),
                "--verbosity".to_string(),
                "1".to_string(),
            ],
            suites: vec![
                "User".to_string(),
                "Admins".to_string(),
                "Backend".to_string(),
            ],
            working_dir: None,
            env: HashMap::new(),
        }
    }
}

/// Where reports are kept
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    pub dir: Option<PathBuf>,
}

/// Complete `runreport.toml`
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ReporterConfig {
    pub runner: RunnerConfig,
    pub store: StoreConfig,
}
