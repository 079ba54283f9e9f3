//! Sales aggregation.
//!
//! Combines a range's sales with its fixed costs into revenue and profit
//! totals, per-day and per-product rollups, and the break-even date.

pub mod error;
pub mod service;
pub mod types;


pub use error::StatsError;
pub use service::{DEFAULT_TOP_PRODUCTS, StatsAggregator};
pub use types::{
    AggregationResult, BreakEven, ChartSeries, DayStats, PaymentMethod, ProductFilter,
    ProductStats, SaleRecord,
};
