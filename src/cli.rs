use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use runreport::config::{ConfigLoader, ReporterConfig};
use runreport::runner::{ConsoleReporter, ProcessInvoker, TestRunReporter};
use runreport::store::printer::{print_report, print_reports, select_matching};
use runreport::store::{ReportStorage, SelectionStrategy, StatusFilter, select_report};

pub type Result<T> = std::result::Result<T, anyhow::Error>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to runreport.toml (searched for when omitted)
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the configured test suites and save a report
    Run {
        /// Only print the summary line
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show the most recent report
    Latest {
        /// Include the captured runner output
        #[arg(long)]
        output: bool,
    },

    /// List recent reports, newest first
    List(ListArgs),

    /// Show one report by ID prefix, or pick one interactively
    Show {
        id: Option<String>,

        /// Include the captured runner output
        #[arg(long)]
        output: bool,
    },
}

#[derive(Args)]
pub struct ListArgs {
    /// Maximum number of reports
    #[arg(long, short = 'n', default_value_t = 20)]
    pub limit: usize,

    /// Only unsuccessful runs
    #[arg(long, conflicts_with = "passed")]
    pub failed: bool,

    /// Only successful runs
    #[arg(long)]
    pub passed: bool,
}

impl ListArgs {
    fn filter(&self) -> StatusFilter {
        if self.failed {
            StatusFilter::Failed
        } else if self.passed {
            StatusFilter::Passed
        } else {
            StatusFilter::All
        }
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = ConfigLoader::load(cli.config.as_deref()).context("failed to load config")?;
    let storage = ReportStorage::from_config(&config.store);

    match cli.command {
        Commands::Run { quiet } => run_tests(&config, storage, quiet).await,
        Commands::Latest { output } => show(&storage, SelectionStrategy::Latest, output),
        Commands::List(args) => {
            // filter after loading so `--limit` counts matching reports
            let reports = storage.recent(usize::MAX)?;
            print_reports(&select_matching(reports, args.filter(), args.limit));
            Ok(())
        }
        Commands::Show { id, output } => {
            let strategy = match id {
                Some(id) => SelectionStrategy::Id(id),
                None => SelectionStrategy::Interactive,
            };
            show(&storage, strategy, output)
        }
    }
}

async fn run_tests(config: &ReporterConfig, storage: ReportStorage, quiet: bool) -> Result<()> {
    let invoker = ProcessInvoker::from_config(&config.runner);
    let reporter = TestRunReporter::new(invoker, config.runner.suites.clone(), storage)
        .with_console(ConsoleReporter::new(quiet));

    reporter
        .run()
        .await
        .context("failed to save test run report")?;
    Ok(())
}

fn show(storage: &ReportStorage, strategy: SelectionStrategy, with_output: bool) -> Result<()> {
    match select_report(storage, strategy)? {
        Some(report) => print_report(&report, with_output),
        None => println!("No test run reports recorded yet."),
    }
    Ok(())
}
