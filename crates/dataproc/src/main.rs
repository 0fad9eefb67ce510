use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use dataproc_core::config::{resolve_project_root, ProjectPaths};
use dataproc_core::logging;
use dataproc_core::pipeline::{self, RunOutcome};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Derive and filter columns of a CSV batch", long_about = None)]
struct Cli {
    /// Project root that the default data paths are resolved against
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,
    /// Input CSV (default: <root>/data/sample_input.csv)
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,
    /// Output CSV (default: <root>/data/processed_output.csv)
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Log file (default: <root>/data/data_processing.log)
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,
}

impl Cli {
    fn project_paths(self) -> ProjectPaths {
        let mut paths = ProjectPaths::from_root(resolve_project_root(self.root));
        if let Some(input) = self.input {
            paths = paths.with_input(input);
        }
        if let Some(output) = self.output {
            paths = paths.with_output(output);
        }
        if let Some(log) = self.log {
            paths = paths.with_log(log);
        }
        paths
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let paths = Cli::parse().project_paths();

    if let Err(err) = logging::init(&paths.log) {
        eprintln!(
            "failed to initialise logging at {}: {err}",
            paths.log.display()
        );
        return ExitCode::FAILURE;
    }

    // Panics go to the log (with location) instead of the default stderr hook.
    panic::set_hook(Box::new(|info| error!("panic: {info}")));

    info!("Script execution started.");
    let code = match contain_panics(|| execute(&paths)) {
        Ok(outcome) => {
            info!(?outcome, "Run completed");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("An unhandled error occurred during script execution: {err:#}");
            ExitCode::FAILURE
        }
    };
    info!("Script execution finished.");
    code
}

fn execute(paths: &ProjectPaths) -> Result<RunOutcome> {
    pipeline::run(paths, &mut rand::rng()).with_context(|| {
        format!(
            "processing {} into {}",
            paths.input.display(),
            paths.output.display()
        )
    })
}

/// Turns a panic inside `run` into an error so it reaches the same exit path.
fn contain_panics<F>(run: F) -> Result<RunOutcome>
where
    F: FnOnce() -> Result<RunOutcome>,
{
    panic::catch_unwind(AssertUnwindSafe(run)).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        Err(anyhow!("run panicked: {message}"))
    })
}
