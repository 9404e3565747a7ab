//! Group-and-reduce over the loaded table.
//!
//! Every chart is backed by one call here: group rows by one or more keys,
//! reduce numeric columns, and hand the resulting table to the presentation
//! side. Output rows come back in first-appearance order of the key
//! combinations; ranked views sort explicitly afterwards.
//!
//! Rows whose grouping key is null are kept and collapse into a single null
//! bucket per key combination, so the sum over all groups always equals the
//! whole-table sum.

use crate::error::{AnalyticsError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reduce {
    Sum,
    Mean,
    Min,
    Count,
}

/// One reduced output column: `column` reduced via `op`, emitted under
/// `alias` (default: the source column name, or `count` for row counts).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reduction {
    pub column: String,
    pub op: Reduce,
    #[serde(default)]
    pub alias: Option<String>,
}

impl Reduction {
    pub fn sum(column: &str) -> Self {
        Self {
            column: column.to_string(),
            op: Reduce::Sum,
            alias: None,
        }
    }

    pub fn mean(column: &str) -> Self {
        Self {
            column: column.to_string(),
            op: Reduce::Mean,
            alias: None,
        }
    }

    pub fn min(column: &str) -> Self {
        Self {
            column: column.to_string(),
            op: Reduce::Min,
            alias: None,
        }
    }

    /// Row count per group; `column` is not consulted.
    pub fn count() -> Self {
        Self {
            column: String::new(),
            op: Reduce::Count,
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    pub fn output_name(&self) -> String {
        match (&self.alias, self.op) {
            (Some(alias), _) => alias.clone(),
            (None, Reduce::Count) => "count".to_string(),
            (None, _) => self.column.clone(),
        }
    }
}

/// Group `df` by `keys` and apply every reduction, one output row per unique
/// key combination in first-appearance order. An empty input table yields an
/// empty result.
pub fn group_reduce(df: &DataFrame, keys: &[&str], reductions: &[Reduction]) -> Result<DataFrame> {
    if keys.is_empty() {
        return Err(AnalyticsError::Aggregation(
            "at least one grouping key is required".to_string(),
        ));
    }
    let names = df.get_column_names();
    for key in keys {
        if !names.contains(key) {
            return Err(AnalyticsError::Aggregation(format!(
                "unknown grouping key: {key}"
            )));
        }
    }

    let mut aggs = Vec::with_capacity(reductions.len());
    for reduction in reductions {
        let expr = match reduction.op {
            Reduce::Count => len(),
            Reduce::Sum => value_col(&names, &reduction.column)?.sum(),
            Reduce::Mean => value_col(&names, &reduction.column)?.mean(),
            Reduce::Min => value_col(&names, &reduction.column)?.min(),
        };
        aggs.push(expr.alias(&reduction.output_name()));
    }

    let key_cols: Vec<Expr> = keys.iter().map(|k| col(*k)).collect();
    Ok(df
        .clone()
        .lazy()
        .group_by_stable(key_cols)
        .agg(aggs)
        .collect()?)
}

fn value_col(names: &[&str], column: &str) -> Result<Expr> {
    if names.contains(&column) {
        Ok(col(column))
    } else {
        Err(AnalyticsError::Aggregation(format!(
            "unknown reduction column: {column}"
        )))
    }
}

/// Sort descending by a value column, nulls last.
pub fn sort_desc(df: DataFrame, by: &str) -> Result<DataFrame> {
    Ok(df
        .lazy()
        .sort_by_exprs(
            vec![col(by)],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_nulls_last(true),
        )
        .collect()?)
}

/// Sort ascending by a value column, nulls last.
pub fn sort_asc(df: DataFrame, by: &str) -> Result<DataFrame> {
    Ok(df
        .lazy()
        .sort_by_exprs(
            vec![col(by)],
            SortMultipleOptions::default().with_nulls_last(true),
        )
        .collect()?)
}

/// Top `n` rows when sorted descending by `by`.
pub fn top_n(df: DataFrame, by: &str, n: usize) -> Result<DataFrame> {
    Ok(sort_desc(df, by)?.head(Some(n)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sales() -> DataFrame {
        df![
            "Location" => ["A", "A", "B"],
            "Revenue" => [10.0, 20.0, 5.0],
        ]
        .unwrap()
    }

    #[test]
    fn groups_and_sums_per_key() {
        let out = group_reduce(&sales(), &["Location"], &[Reduction::sum("Revenue")]).unwrap();
        assert_eq!(out.height(), 2);
        // First-appearance order: A before B.
        let locations = out.column("Location").unwrap().str().unwrap();
        assert_eq!(locations.get(0), Some("A"));
        assert_eq!(locations.get(1), Some("B"));
        let revenue = out.column("Revenue").unwrap().f64().unwrap();
        assert_eq!(revenue.get(0), Some(30.0));
        assert_eq!(revenue.get(1), Some(5.0));
    }

    #[test]
    fn empty_table_yields_empty_result() {
        let empty = sales().head(Some(0));
        let out = group_reduce(&empty, &["Location"], &[Reduction::sum("Revenue")]).unwrap();
        assert_eq!(out.height(), 0);
    }

    #[test]
    fn group_sums_conserve_the_table_total() {
        let df = df![
            "Location" => [Some("A"), Some("B"), None, Some("A"), None],
            "Channel" => ["Retail", "Online", "Retail", "Online", "Online"],
            "Revenue" => [10.0, 20.0, 30.0, 40.0, 50.0],
        ]
        .unwrap();
        let total = df.column("Revenue").unwrap().f64().unwrap().sum().unwrap();

        for keys in [
            vec!["Location"],
            vec!["Channel"],
            vec!["Location", "Channel"],
        ] {
            let out = group_reduce(&df, &keys, &[Reduction::sum("Revenue")]).unwrap();
            let grouped = out.column("Revenue").unwrap().f64().unwrap().sum().unwrap();
            assert!(
                (grouped - total).abs() < 1e-9,
                "grouping by {keys:?} lost rows"
            );
        }
    }

    #[test]
    fn null_keys_collapse_into_one_bucket() {
        let df = df![
            "Location" => [Some("A"), None, None, Some("B")],
            "Revenue" => [1.0, 2.0, 3.0, 4.0],
        ]
        .unwrap();
        let out = group_reduce(&df, &["Location"], &[Reduction::sum("Revenue")]).unwrap();
        assert_eq!(out.height(), 3);
        assert_eq!(out.column("Location").unwrap().null_count(), 1);

        let locations = out.column("Location").unwrap().str().unwrap();
        let revenue = out.column("Revenue").unwrap().f64().unwrap();
        for i in 0..out.height() {
            if locations.get(i).is_none() {
                assert_eq!(revenue.get(i), Some(5.0));
            }
        }
    }

    #[test]
    fn mean_min_and_count_reductions() {
        let df = df![
            "Location" => ["A", "A", "B"],
            "Shelf" => [5.0, 3.0, 7.0],
        ]
        .unwrap();
        let out = group_reduce(
            &df,
            &["Location"],
            &[
                Reduction::mean("Shelf").with_alias("avg_shelf"),
                Reduction::min("Shelf").with_alias("min_shelf"),
                Reduction::count(),
            ],
        )
        .unwrap();
        let avg = out.column("avg_shelf").unwrap().f64().unwrap();
        let min = out.column("min_shelf").unwrap().f64().unwrap();
        assert_eq!(avg.get(0), Some(4.0));
        assert_eq!(min.get(0), Some(3.0));
        assert_eq!(min.get(1), Some(7.0));
        let counts = out.column("count").unwrap();
        assert_eq!(counts.get(0).unwrap().try_extract::<u64>().unwrap(), 2);
    }

    #[test]
    fn unknown_columns_are_rejected() {
        let err = group_reduce(&sales(), &["Nope"], &[Reduction::sum("Revenue")]).unwrap_err();
        assert!(matches!(err, AnalyticsError::Aggregation(_)));

        let err = group_reduce(&sales(), &["Location"], &[Reduction::sum("Nope")]).unwrap_err();
        match err {
            AnalyticsError::Aggregation(msg) => assert!(msg.contains("Nope")),
            other => panic!("expected aggregation error, got {other}"),
        }
    }

    #[test]
    fn reduction_round_trips_through_json() {
        let reduction = Reduction::sum("Revenue").with_alias("total");
        let json = serde_json::to_string(&reduction).unwrap();
        let back: Reduction = serde_json::from_str(&json).unwrap();
        assert_eq!(back.op, Reduce::Sum);
        assert_eq!(back.output_name(), "total");
    }
}
