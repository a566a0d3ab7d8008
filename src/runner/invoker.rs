use crate::config::RunnerConfig;
use crate::runner::capture::OutputCapture;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

/// How an invocation that produced output ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationOutcome {
    /// The runner returned normally
    Completed,
    /// The runner asked to terminate with a status code; `None` if it was
    /// killed by a signal
    Exited { code: Option<i32> },
}

/// The runner could not be invoked at all
#[derive(Error, Debug)]
pub enum InvokeError {
    #[error("no test runner program configured")]
    MissingProgram,

    #[error("failed to launch `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Other(String),
}

/// Something that runs the named suites and writes their output into a capture
#[allow(async_fn_in_trait)]
pub trait SuiteInvoker {
    async fn invoke(
        &self,
        suites: &[String],
        capture: &mut OutputCapture,
    ) -> Result<InvocationOutcome, InvokeError>;

    /// Short description of what will run, for the operator console
    fn describe(&self, suites: &[String]) -> String {
        suites.join(" ")
    }
}

/// Runs the test runner as a child process
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    env: HashMap<String, String>,
}

impl ProcessInvoker {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
            env: HashMap::new(),
        }
    }

    pub fn from_config(config: &RunnerConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            working_dir: config.working_dir.clone(),
            env: config.env.clone(),
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Human-readable command line for logs
    pub fn command_line(&self, suites: &[String]) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .chain(suites.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl SuiteInvoker for ProcessInvoker {
    fn describe(&self, suites: &[String]) -> String {
        self.command_line(suites)
    }

    async fn invoke(
        &self,
        suites: &[String],
        capture: &mut OutputCapture,
    ) -> Result<InvocationOutcome, InvokeError> {
        if self.program.trim().is_empty() {
            return Err(InvokeError::MissingProgram);
        }

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .args(suites)
            .envs(&self.env)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        info!(command = %self.command_line(suites), "Invoking test runner");

        // no timeout: a hung runner blocks until it exits
        let output = command.output().await.map_err(|source| InvokeError::Launch {
            program: self.program.clone(),
            source,
        })?;

        capture.write_stdout(&output.stdout);
        capture.write_stderr(&output.stderr);
        debug!(
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            status = %output.status,
            "Test runner finished"
        );

        if output.status.success() {
            Ok(InvocationOutcome::Completed)
        } else {
            Ok(InvocationOutcome::Exited {
                code: output.status.code(),
            })
        }
    }
}
