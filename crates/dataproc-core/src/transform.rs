use polars::prelude::*;
use tracing::debug;

pub const ID: &str = "id";
pub const CATEGORY: &str = "category";
pub const VALUE1: &str = "value1";
pub const VALUE2: &str = "value2";
pub const VALUE1_PLUS_10: &str = "value1_plus_10";
pub const VALUE2_DIV_VALUE1: &str = "value2_div_value1";
pub const VALUE1_TYPE: &str = "value1_type";

/// Rows with `value1` at or below this are dropped, and it is also the High/Medium cut.
pub const VALUE1_THRESHOLD: f64 = 20.0;
pub const VALUE1_OFFSET: f64 = 10.0;

pub const HIGH: &str = "High";
pub const MEDIUM: &str = "Medium";

// Strict: a cell that is present but not numeric is an error, not a null.
fn value1() -> Expr {
    col(VALUE1).strict_cast(DataType::Float64)
}

fn value2() -> Expr {
    col(VALUE2).strict_cast(DataType::Float64)
}

/// `value2 / value1`, null where `value1 == 0`.
fn ratio_expr() -> Expr {
    when(value1().eq(lit(0.0)))
        .then(lit(NULL).cast(DataType::Float64))
        .otherwise(value2() / value1())
        .alias(VALUE2_DIV_VALUE1)
}

fn classify_expr() -> Expr {
    when(value1().gt(lit(VALUE1_THRESHOLD)))
        .then(lit(HIGH))
        .otherwise(lit(MEDIUM))
        .alias(VALUE1_TYPE)
}

/// Adds `value1_plus_10` and `value2_div_value1` to every row. No rows are removed.
///
/// Fails if `value1` or `value2` is missing or holds a value that is not numeric.
pub fn derive_columns(df: &DataFrame) -> PolarsResult<DataFrame> {
    let derived = df
        .clone()
        .lazy()
        .with_column((value1() + lit(VALUE1_OFFSET)).alias(VALUE1_PLUS_10))
        .collect()?;
    debug!("Added '{}' column.", VALUE1_PLUS_10);

    let derived = derived.lazy().with_column(ratio_expr()).collect()?;
    debug!("Added '{}' column.", VALUE2_DIV_VALUE1);

    Ok(derived)
}

/// Full transformation: derive, keep `value1 > 20`, then classify `value1_type`.
pub fn transform(df: &DataFrame) -> PolarsResult<DataFrame> {
    debug!("Starting transformations.");
    let derived = derive_columns(df)?;

    let filtered = derived
        .lazy()
        .filter(value1().gt(lit(VALUE1_THRESHOLD)))
        .collect()?;
    debug!("Filtered DataFrame, {} rows remaining.", filtered.height());

    let classified = filtered.lazy().with_column(classify_expr()).collect()?;
    debug!("Added '{}' column.", VALUE1_TYPE);

    Ok(classified)
}
