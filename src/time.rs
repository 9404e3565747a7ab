//! Calendar derivation from the `Date` column.
//!
//! The trend charts group by year, month, or year-month, so those components
//! are derived once up front. Rows whose date failed to parse carry null
//! components and fall into the aggregator's null bucket.

use crate::cache::MemoCache;
use crate::error::Result;
use crate::schema;
use lazy_static::lazy_static;
use polars::prelude::*;

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

lazy_static! {
    static ref MONTH_LABELS: MemoCache<u32, Option<String>> = MemoCache::new();
}

/// Three-letter label for a 1-based month number, memoized for the process
/// lifetime.
pub fn month_label(month: u32) -> Option<String> {
    MONTH_LABELS.get_or_compute(month, |m| {
        let index = (*m as usize).checked_sub(1)?;
        MONTH_ABBR.get(index).map(|s| s.to_string())
    })
}

/// Append `Year`, `Month`, and `Year-Month` columns derived from `Date`.
pub fn with_calendar_columns(df: DataFrame) -> Result<DataFrame> {
    Ok(df
        .lazy()
        .with_columns([
            col(schema::DATE)
                .dt()
                .year()
                .cast(DataType::Int32)
                .alias(schema::YEAR),
            col(schema::DATE)
                .dt()
                .month()
                .cast(DataType::Int32)
                .alias(schema::MONTH),
            col(schema::DATE)
                .dt()
                .to_string("%Y-%m")
                .alias(schema::YEAR_MONTH),
        ])
        .collect()?)
}

/// Append a human-readable month label column derived from `Month`.
pub fn with_month_labels(mut df: DataFrame) -> Result<DataFrame> {
    let labels: Vec<Option<String>> = df
        .column(schema::MONTH)?
        .i32()?
        .into_iter()
        .map(|m| m.and_then(|m| u32::try_from(m).ok()).and_then(month_label))
        .collect();
    df.with_column(Series::new(schema::MONTH_LABEL, labels))?;
    Ok(df)
}
