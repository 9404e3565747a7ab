//! Currency normalization.
//!
//! The dataset reports revenue in INR; every dashboard view shows EUR. The
//! conversion is a linear rescale by a fixed factor, so it never fails and
//! null cells stay null.

use crate::error::Result;
use crate::schema;
use polars::prelude::*;

/// Fixed conversion rate used across the dashboard (1 INR ≈ 0.011 EUR).
pub const INR_TO_EUR: f64 = 0.011;

/// Convert a single INR amount to EUR.
pub fn inr_to_eur(amount_inr: f64) -> f64 {
    amount_inr * INR_TO_EUR
}

/// Append `target` = `source` × `factor` to the table.
pub fn convert(df: DataFrame, source: &str, target: &str, factor: f64) -> Result<DataFrame> {
    Ok(df
        .lazy()
        .with_columns([(col(source).cast(DataType::Float64) * lit(factor)).alias(target)])
        .collect()?)
}

/// Append the standard EUR revenue column derived from the INR one.
pub fn revenue_to_eur(df: DataFrame) -> Result<DataFrame> {
    convert(df, schema::REVENUE_INR, schema::REVENUE_EUR, INR_TO_EUR)
}
