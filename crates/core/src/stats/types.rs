//! Sales aggregation data types.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use equilibrio_shared::types::{ProductId, SaleId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment method recorded on a sale.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Instant bank transfer.
    #[default]
    Pix,
    /// Credit card.
    Credit,
    /// Debit card.
    Debit,
    /// Cash.
    Cash,
    /// Sold through a third-party platform.
    Platform,
}

/// A sale transaction read from the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Ledger identifier, if any.
    #[serde(default)]
    pub id: Option<SaleId>,
    /// When the sale happened. `None` when the ledger had no usable date.
    #[serde(default, deserialize_with = "crate::calendar::lenient::instant")]
    pub date: Option<DateTime<Utc>>,
    /// Revenue from the sale.
    pub revenue_amount: Decimal,
    /// Variable cost of the goods sold.
    pub cost_amount: Decimal,
    /// Payment method.
    #[serde(default)]
    pub payment_method: PaymentMethod,
    /// Product sold.
    #[serde(default)]
    pub product_id: Option<ProductId>,
    /// Product display name.
    #[serde(default)]
    pub product_name: Option<String>,
    /// Units sold.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl SaleRecord {
    /// Creates a single-unit sale paid with the default method.
    #[must_use]
    pub fn new(date: DateTime<Utc>, revenue_amount: Decimal, cost_amount: Decimal) -> Self {
        Self {
            id: None,
            date: Some(date),
            revenue_amount,
            cost_amount,
            payment_method: PaymentMethod::default(),
            product_id: None,
            product_name: None,
            quantity: default_quantity(),
        }
    }

    /// Attaches a product reference.
    #[must_use]
    pub fn with_product(mut self, id: impl Into<ProductId>, name: impl Into<String>) -> Self {
        self.product_id = Some(id.into());
        self.product_name = Some(name.into());
        self
    }

    /// Sets the payment method.
    #[must_use]
    pub fn paid_with(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self
    }

    /// Sets the number of units sold.
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }
}

/// Restricts an aggregation to one product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductFilter {
    /// Every product. Fixed costs are included.
    #[default]
    All,
    /// One product only. Fixed costs are not apportioned per product.
    Only(ProductId),
}

impl ProductFilter {
    /// Parses a caller-supplied filter; empty or `"all"` means no filter.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("" | "all") => Self::All,
            Some(id) => Self::Only(ProductId::new(id)),
        }
    }

    /// Returns true if `sale` passes the filter.
    #[must_use]
    pub fn matches(&self, sale: &SaleRecord) -> bool {
        match self {
            Self::All => true,
            Self::Only(id) => sale.product_id.as_ref() == Some(id),
        }
    }

    /// Returns true if fixed costs count toward the aggregation.
    #[must_use]
    pub const fn includes_fixed_costs(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// Break-even state of a chronological sale walk.
///
/// Latches once: after `ReachedAt` it never changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "date", rename_all = "snake_case")]
pub enum BreakEven {
    /// Cumulative revenue has not yet covered cumulative costs.
    #[default]
    Unset,
    /// Timestamp of the sale at which revenue first covered costs.
    ReachedAt(DateTime<Utc>),
}

impl BreakEven {
    /// Records `at` as the crossing unless one is already recorded.
    pub fn latch(&mut self, at: DateTime<Utc>) {
        if let Self::Unset = self {
            *self = Self::ReachedAt(at);
        }
    }

    /// Returns true once the crossing is recorded.
    #[must_use]
    pub const fn is_reached(&self) -> bool {
        matches!(self, Self::ReachedAt(_))
    }

    /// Crossing timestamp, if reached.
    #[must_use]
    pub const fn date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Unset => None,
            Self::ReachedAt(at) => Some(*at),
        }
    }
}

/// Revenue and sale count for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayStats {
    /// Revenue on the day.
    pub revenue: Decimal,
    /// Sales on the day.
    pub count: u32,
}

impl DayStats {
    pub(crate) fn add(&mut self, revenue: Decimal) {
        self.revenue = self.revenue.saturating_add(revenue);
        self.count = self.count.saturating_add(1);
    }

    /// Average revenue per sale on the day, 0 when there were none.
    ///
    /// Exact quotient; rounding is left to whoever displays it.
    #[must_use]
    pub fn ticket(&self) -> Decimal {
        if self.count == 0 {
            Decimal::ZERO
        } else {
            self.revenue / Decimal::from(self.count)
        }
    }
}

/// Per-product rollup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductStats {
    /// Product identifier.
    pub product_id: ProductId,
    /// Product display name.
    pub name: String,
    /// Units sold.
    pub quantity: u64,
    /// Revenue from the product.
    pub revenue: Decimal,
}

/// Everything the aggregator derives for one range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationResult {
    /// Revenue from all sales in scope.
    pub total_revenue: Decimal,
    /// Variable cost of all sales in scope.
    pub total_variable_cost: Decimal,
    /// Fixed cost incurred in the range; 0 under a product filter.
    pub total_fixed_cost: Decimal,
    /// Variable plus fixed cost.
    pub total_cost: Decimal,
    /// Revenue minus variable cost.
    pub gross_profit: Decimal,
    /// Revenue minus variable and fixed cost.
    pub net_profit: Decimal,
    /// Revenue per sale, 0 with no sales. Not rounded.
    pub ticket_average: Decimal,
    /// Sales in scope.
    pub sales_count: u32,
    /// Sale count per payment method.
    pub sales_by_payment_method: BTreeMap<PaymentMethod, u32>,
    /// Revenue and count per UTC day, in day order.
    pub sales_by_day: BTreeMap<NaiveDate, DayStats>,
    /// Best-selling products by revenue.
    pub top_products: Vec<ProductStats>,
    /// First sale at which cumulative revenue covered cumulative costs.
    pub break_even: BreakEven,
}

/// Day-ordered series for charting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Day labels, `DD/MM`.
    pub labels: Vec<String>,
    /// Revenue per day.
    pub revenue: Vec<Decimal>,
    /// Average ticket per day.
    pub ticket: Vec<Decimal>,
}
