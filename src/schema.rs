//! Column names of the Dairy Goods Sales Dataset.
//!
//! The dataset ships with fixed, human-readable headers (units embedded in
//! the name), so every pipeline stage refers to these constants instead of
//! repeating string literals.

/// Transaction date, normalized to a date dtype by the loader.
pub const DATE: &str = "Date";
/// Farm location (also the consumer region in this dataset).
pub const LOCATION: &str = "Location";
pub const PRODUCT_NAME: &str = "Product Name";
pub const BRAND: &str = "Brand";
pub const SALES_CHANNEL: &str = "Sales Channel";
pub const QUANTITY_SOLD: &str = "Quantity Sold (liters/kg)";
pub const PRICE_PER_UNIT: &str = "Price per Unit";
pub const PRICE_PER_UNIT_SOLD: &str = "Price per Unit (sold)";
pub const REVENUE_INR: &str = "Approx. Total Revenue(INR)";
pub const SHELF_LIFE: &str = "Shelf Life (days)";
pub const LAND_AREA: &str = "Total Land Area (acres)";
pub const COW_COUNT: &str = "Number of Cows";

// Derived columns
pub const REVENUE_EUR: &str = "Total Revenue (EUR)";
pub const YEAR: &str = "Year";
pub const MONTH: &str = "Month";
pub const MONTH_LABEL: &str = "Month Name";
pub const YEAR_MONTH: &str = "Year-Month";

/// Columns every dashboard page relies on. The loader rejects a file where
/// any of these is absent from the header row.
pub const REQUIRED_COLUMNS: &[&str] = &[
    DATE,
    LOCATION,
    PRODUCT_NAME,
    BRAND,
    SALES_CHANNEL,
    QUANTITY_SOLD,
    PRICE_PER_UNIT,
    PRICE_PER_UNIT_SOLD,
    REVENUE_INR,
    SHELF_LIFE,
    LAND_AREA,
    COW_COUNT,
];
