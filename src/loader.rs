//! Dataset loading.
//!
//! Reads the delimited sales file into a `DataFrame`, checks the fixed
//! dashboard columns are present, and normalizes value columns so the rest
//! of the pipeline can assume a date-typed `Date` column and float-typed
//! numeric columns. Cells that fail to parse become null and drop out of
//! reductions; only a missing or structurally broken file is fatal.

use crate::error::{AnalyticsError, Result};
use crate::schema;
use itertools::Itertools;
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Numeric columns the reports reduce over.
const VALUE_COLUMNS: &[&str] = &[
    schema::QUANTITY_SOLD,
    schema::PRICE_PER_UNIT,
    schema::PRICE_PER_UNIT_SOLD,
    schema::REVENUE_INR,
    schema::SHELF_LIFE,
    schema::LAND_AREA,
    schema::COW_COUNT,
];

/// Load the sales dataset from `path`.
///
/// Fails with [`AnalyticsError::Load`] when the file is missing or cannot be
/// parsed as CSV, and with [`AnalyticsError::Schema`] when a required column
/// is absent from the header row.
pub fn load_dataset(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(AnalyticsError::Load(format!(
            "dataset file not found: {}",
            path.display()
        )));
    }

    info!("📂 Loading dataset: {}", path.display());
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(1000))
        .with_ignore_errors(true)
        .finish()
        .map_err(|e| {
            AnalyticsError::Load(format!("failed to read {}: {}", path.display(), e))
        })?
        .collect()
        .map_err(|e| {
            AnalyticsError::Load(format!("failed to parse {}: {}", path.display(), e))
        })?;
    info!("✅ Loaded {} rows, {} columns", df.height(), df.width());

    ensure_required_columns(&df)?;
    let df = normalize_dates(df)?;
    normalize_values(df)
}

fn ensure_required_columns(df: &DataFrame) -> Result<()> {
    let present = df.get_column_names();
    let missing: Vec<&str> = schema::REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !present.contains(c))
        .collect();
    if !missing.is_empty() {
        return Err(AnalyticsError::Schema(format!(
            "missing required column(s): {}",
            missing.iter().join(", ")
        )));
    }
    Ok(())
}

/// Ensure the `Date` column has a date dtype. String columns are parsed as
/// `%Y-%m-%d` non-strictly, so malformed dates become null instead of
/// aborting the load.
fn normalize_dates(df: DataFrame) -> Result<DataFrame> {
    match df.column(schema::DATE)?.dtype() {
        DataType::Date => Ok(df),
        DataType::Datetime(_, _) => Ok(df
            .lazy()
            .with_columns([col(schema::DATE).cast(DataType::Date)])
            .collect()?),
        dtype => {
            debug!("Parsing {} column from {:?}", schema::DATE, dtype);
            let options = StrptimeOptions {
                format: Some("%Y-%m-%d".into()),
                strict: false,
                ..Default::default()
            };
            Ok(df
                .lazy()
                .with_columns([col(schema::DATE)
                    .cast(DataType::String)
                    .str()
                    .to_date(options)
                    .alias(schema::DATE)])
                .collect()?)
        }
    }
}

/// Cast value columns to Float64. Non-strict, so stray text in a numeric
/// column coerces to null.
fn normalize_values(df: DataFrame) -> Result<DataFrame> {
    let casts: Vec<Expr> = VALUE_COLUMNS
        .iter()
        .map(|c| col(*c).cast(DataType::Float64))
        .collect();
    Ok(df.lazy().with_columns(casts).collect()?)
}
