//! One aggregate table per dashboard chart.
//!
//! Each function takes the loaded table, runs it through the currency
//! normalizer and the aggregator, and returns the table a chart renders
//! from. The tables are derived fresh per call and discarded after
//! rendering; nothing here mutates the input.

use crate::aggregate::{self, Reduction};
use crate::currency;
use crate::error::Result;
use crate::schema;
use crate::time;
use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

/// Headline widgets: totals and unit-price spread, revenue in EUR.
#[derive(Debug, Clone, Serialize)]
pub struct HeadlineMetrics {
    pub total_revenue_eur: f64,
    pub total_quantity_sold: f64,
    pub avg_unit_price_eur: f64,
    pub min_unit_price_eur: f64,
    pub max_unit_price_eur: f64,
}

pub fn headline_metrics(df: &DataFrame) -> Result<HeadlineMetrics> {
    let stats = df
        .clone()
        .lazy()
        .select([
            col(schema::REVENUE_INR).sum().alias("revenue_inr"),
            col(schema::QUANTITY_SOLD).sum().alias("quantity"),
            col(schema::PRICE_PER_UNIT).mean().alias("avg_price"),
            col(schema::PRICE_PER_UNIT).min().alias("min_price"),
            col(schema::PRICE_PER_UNIT).max().alias("max_price"),
        ])
        .collect()?;

    let scalar = |name: &str| -> Result<f64> {
        Ok(stats.column(name)?.f64()?.get(0).unwrap_or(0.0))
    };

    Ok(HeadlineMetrics {
        total_revenue_eur: currency::inr_to_eur(scalar("revenue_inr")?),
        total_quantity_sold: scalar("quantity")?,
        avg_unit_price_eur: currency::inr_to_eur(scalar("avg_price")?),
        min_unit_price_eur: currency::inr_to_eur(scalar("min_price")?),
        max_unit_price_eur: currency::inr_to_eur(scalar("max_price")?),
    })
}

/// Revenue per calendar month across years, for the monthly trend line.
pub fn monthly_revenue(df: &DataFrame) -> Result<DataFrame> {
    let calendar = time::with_calendar_columns(df.clone())?;
    let grouped = aggregate::group_reduce(
        &calendar,
        &[schema::YEAR, schema::MONTH],
        &[Reduction::sum(schema::REVENUE_INR)],
    )?;
    let converted = currency::revenue_to_eur(grouped)?;
    let labeled = time::with_month_labels(converted)?;
    Ok(labeled.select([
        schema::YEAR,
        schema::MONTH,
        schema::MONTH_LABEL,
        schema::REVENUE_EUR,
    ])?)
}

/// Total revenue per location, for the location bar chart.
pub fn revenue_by_location(df: &DataFrame) -> Result<DataFrame> {
    let converted = currency::revenue_to_eur(df.clone())?;
    aggregate::group_reduce(
        &converted,
        &[schema::LOCATION],
        &[Reduction::sum(schema::REVENUE_EUR)],
    )
}

/// Average farm size and total revenue per location, for the farm-size
/// scatter plot.
pub fn farm_stats(df: &DataFrame) -> Result<DataFrame> {
    let converted = currency::revenue_to_eur(df.clone())?;
    aggregate::group_reduce(
        &converted,
        &[schema::LOCATION],
        &[
            Reduction::mean(schema::LAND_AREA),
            Reduction::sum(schema::REVENUE_EUR),
        ],
    )
}

/// Herd size and total revenue per location, for the revenue-per-cow
/// scatter plot.
pub fn cow_stats(df: &DataFrame) -> Result<DataFrame> {
    let converted = currency::revenue_to_eur(df.clone())?;
    aggregate::group_reduce(
        &converted,
        &[schema::LOCATION],
        &[
            Reduction::sum(schema::COW_COUNT),
            Reduction::sum(schema::REVENUE_EUR),
        ],
    )
}

/// Total revenue per sales channel.
pub fn revenue_by_channel(df: &DataFrame) -> Result<DataFrame> {
    let converted = currency::revenue_to_eur(df.clone())?;
    aggregate::group_reduce(
        &converted,
        &[schema::SALES_CHANNEL],
        &[Reduction::sum(schema::REVENUE_EUR)],
    )
}

/// Top `n` products by total revenue.
pub fn top_products(df: &DataFrame, n: usize) -> Result<DataFrame> {
    let converted = currency::revenue_to_eur(df.clone())?;
    let grouped = aggregate::group_reduce(
        &converted,
        &[schema::PRODUCT_NAME],
        &[Reduction::sum(schema::REVENUE_EUR)],
    )?;
    aggregate::top_n(grouped, schema::REVENUE_EUR, n)
}

/// The `n` fastest-expiring product/brand pairs with the revenue at stake.
pub fn expiring_products(df: &DataFrame, n: usize) -> Result<DataFrame> {
    let converted = currency::revenue_to_eur(df.clone())?;
    let grouped = aggregate::group_reduce(
        &converted,
        &[schema::PRODUCT_NAME, schema::BRAND],
        &[
            Reduction::min(schema::SHELF_LIFE),
            Reduction::sum(schema::REVENUE_EUR),
        ],
    )?;
    Ok(aggregate::sort_asc(grouped, schema::SHELF_LIFE)?.head(Some(n)))
}

/// Revenue per sales channel, restricted to the `k` locations with the
/// highest total revenue. Backs the per-channel pie charts.
pub fn channel_split_for_top_locations(df: &DataFrame, k: usize) -> Result<DataFrame> {
    let ranked = aggregate::top_n(revenue_by_location(df)?, schema::REVENUE_EUR, k)?;
    let top_locations: Vec<String> = ranked
        .column(schema::LOCATION)?
        .str()?
        .into_iter()
        .flatten()
        .map(|s| s.to_string())
        .collect();
    debug!("Top {} locations by revenue: {:?}", k, top_locations);

    let converted = currency::revenue_to_eur(df.clone())?;
    let split = aggregate::group_reduce(
        &converted,
        &[schema::LOCATION, schema::SALES_CHANNEL],
        &[Reduction::sum(schema::REVENUE_EUR)],
    )?;

    let mut keep = lit(false);
    for location in &top_locations {
        keep = keep.or(col(schema::LOCATION).eq(lit(location.clone())));
    }
    Ok(split.lazy().filter(keep).collect()?)
}

/// Revenue per year-month and sales channel, for the channel trend lines.
pub fn channel_revenue_over_time(df: &DataFrame) -> Result<DataFrame> {
    let calendar = time::with_calendar_columns(df.clone())?;
    let converted = currency::revenue_to_eur(calendar)?;
    let grouped = aggregate::group_reduce(
        &converted,
        &[schema::YEAR_MONTH, schema::SALES_CHANNEL],
        &[Reduction::sum(schema::REVENUE_EUR)],
    )?;
    aggregate::sort_asc(grouped, schema::YEAR_MONTH)
}
