use std::fs::{self, File};
use std::path::Path;

use polars::prelude::*;
use tracing::info;

use crate::error::Result;

/// Writes `df` as a headed CSV at `path`, creating the parent directory first.
///
/// Nulls are written as empty fields.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    Ok(())
}

/// Saves the processed batch, or does nothing when it has no rows.
///
/// Returns `true` when a file was written. An empty batch never produces a file.
pub fn persist(df: &mut DataFrame, output_path: &Path) -> Result<bool> {
    if df.height() == 0 {
        info!("No data to save after processing; skipping write.");
        return Ok(false);
    }

    write_csv(df, output_path)?;
    info!(
        rows = df.height(),
        "Processed data successfully saved to: {}",
        output_path.display()
    );
    Ok(true)
}
