use std::fs;
use std::path::Path;

use polars::prelude::*;
use rand::Rng;
use tracing::{error, info, warn};

use crate::error::Result;
use crate::outputs::write_csv;
use crate::sample::create_sample_frame;

/// Reads the input CSV, or synthesizes and saves a sample batch when the file is missing.
///
/// A zero-byte or unparseable file is not fatal: it is logged at ERROR and an
/// empty batch comes back. Columns are not checked here; a file without the
/// expected columns only fails once the derivations run.
///
/// Errors are reserved for faults outside the input itself, such as being
/// unable to write the synthesized sample.
pub fn load_or_synthesize<R: Rng + ?Sized>(input_path: &Path, rng: &mut R) -> Result<DataFrame> {
    if !input_path.exists() {
        warn!(
            "Input file '{}' not found. Generating sample data.",
            input_path.display()
        );
        let mut df = create_sample_frame(rng)?;
        write_csv(&mut df, input_path)?;
        info!(
            "Sample data generated and saved to: {}",
            input_path.display()
        );
        return Ok(df);
    }

    info!("Reading data from: {}", input_path.display());

    let is_empty = match fs::metadata(input_path) {
        Ok(meta) => meta.len() == 0,
        Err(err) => {
            error!(
                "Error reading input data from '{}': {}",
                input_path.display(),
                err
            );
            return Ok(DataFrame::empty());
        }
    };
    if is_empty {
        error!(
            "Input file '{}' is empty. Cannot process.",
            input_path.display()
        );
        return Ok(DataFrame::empty());
    }

    match read_csv(input_path) {
        Ok(df) => Ok(df),
        Err(err) => {
            error!(
                error = ?err,
                "Error reading input data from '{}': {}",
                input_path.display(),
                err
            );
            Ok(DataFrame::empty())
        }
    }
}

/// Parses a headed CSV file into a DataFrame, inferring column types.
pub fn read_csv(path: &Path) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
}
