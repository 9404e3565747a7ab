//! Analytics engine behind the dairy-goods sales dashboard.
//!
//! Pipeline per page render: [`loader`] reads the dataset, [`currency`]
//! rescales revenue from INR to EUR, [`aggregate`] reduces rows per
//! dimension, and [`reports`] packages one table per chart for the
//! presentation layer.

pub mod aggregate;
pub mod cache;
pub mod currency;
pub mod error;
pub mod loader;
pub mod reports;
pub mod schema;
pub mod time;

pub use error::{AnalyticsError, Result};
