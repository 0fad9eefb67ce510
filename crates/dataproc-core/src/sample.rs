use polars::prelude::*;
use rand::Rng;
use tracing::debug;

use crate::transform::{CATEGORY, ID, VALUE1, VALUE2};

pub const SAMPLE_ROWS: usize = 5;

const CATEGORY_CYCLE: [&str; SAMPLE_ROWS] = ["A", "B", "A", "C", "B"];
const VALUE1_RANGE: std::ops::Range<i64> = 10..50;
const VALUE2_SCALE: f64 = 100.0;

/// Generates the demonstration batch used when no input file exists.
///
/// The schema and categories are fixed; `value1` is a whole number in `[10, 50)`
/// and `value2` a float in `[0, 100)`, both drawn from `rng`.
pub fn create_sample_frame<R: Rng + ?Sized>(rng: &mut R) -> PolarsResult<DataFrame> {
    debug!("Creating sample DataFrame.");

    let ids: Vec<i64> = (1..=SAMPLE_ROWS as i64).collect();
    let value1: Vec<f64> = (0..SAMPLE_ROWS)
        .map(|_| rng.random_range(VALUE1_RANGE) as f64)
        .collect();
    let value2: Vec<f64> = (0..SAMPLE_ROWS)
        .map(|_| rng.random::<f64>() * VALUE2_SCALE)
        .collect();

    let df = DataFrame::new(vec![
        Series::new(ID.into(), ids).into(),
        Series::new(CATEGORY.into(), CATEGORY_CYCLE.to_vec()).into(),
        Series::new(VALUE1.into(), value1).into(),
        Series::new(VALUE2.into(), value2).into(),
    ])?;

    debug!("Sample DataFrame created with {} rows.", df.height());
    Ok(df)
}
