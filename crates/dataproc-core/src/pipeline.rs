use std::path::PathBuf;

use polars::prelude::DataFrame;
use rand::Rng;
use tracing::info;

use crate::config::ProjectPaths;
use crate::error::Result;
use crate::outputs::persist;
use crate::source::load_or_synthesize;
use crate::transform::transform;

const PREVIEW_ROWS: usize = 5;

/// How a run ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The processed batch was written to `path`.
    Written { path: PathBuf, rows: usize },
    /// Nothing was loaded: the input was empty, headers only, or could not be parsed.
    SkippedEmptyInput,
    /// Input had rows, but none passed the `value1` filter.
    SkippedAllFiltered { input_rows: usize },
}

impl RunOutcome {
    pub fn wrote_output(&self) -> bool {
        matches!(self, RunOutcome::Written { .. })
    }
}

/// Load (or synthesize), transform, and persist one batch using `paths`.
///
/// Recoverable input problems are logged and reported through [`RunOutcome`];
/// anything else (I/O failures, a batch missing required columns) is returned
/// as an error for the caller to report.
pub fn run<R: Rng + ?Sized>(paths: &ProjectPaths, rng: &mut R) -> Result<RunOutcome> {
    let mut df = load_or_synthesize(&paths.input, rng)?;

    if df.height() == 0 {
        info!("Input DataFrame is empty. No transformations will be applied.");
        persist(&mut df, &paths.output)?;
        return Ok(RunOutcome::SkippedEmptyInput);
    }

    let input_rows = df.height();
    info!("Original DataFrame head:\n{}", preview(&df));

    let mut processed = transform(&df)?;
    info!(
        "Processed DataFrame head (after filtering and adding 'value1_type'):\n{}",
        preview(&processed)
    );

    if persist(&mut processed, &paths.output)? {
        Ok(RunOutcome::Written {
            path: paths.output.clone(),
            rows: processed.height(),
        })
    } else {
        info!(
            input_rows,
            "Every input row was removed by the value1 filter; no output written."
        );
        Ok(RunOutcome::SkippedAllFiltered { input_rows })
    }
}

fn preview(df: &DataFrame) -> DataFrame {
    df.head(Some(PREVIEW_ROWS))
}
