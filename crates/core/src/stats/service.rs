//! Sales and fixed-cost aggregation.

use std::collections::{BTreeMap, HashMap};

use equilibrio_shared::types::ProductId;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::error::StatsError;
use super::types::{
    AggregationResult, BreakEven, ChartSeries, DayStats, PaymentMethod, ProductFilter,
    ProductStats, SaleRecord,
};
use crate::calendar::{self, DateRange};
use crate::recurrence::{CostDefinition, RecurrenceEngine};

/// Default number of products kept in the ranking.
pub const DEFAULT_TOP_PRODUCTS: usize = 5;

/// Combines sales with fixed costs into the metrics bundle for a range.
///
/// Stateless apart from its limits: every call reads caller-owned slices
/// and allocates its own accumulators, so calls can run in parallel freely.
#[derive(Debug, Clone, Copy)]
pub struct StatsAggregator {
    recurrence: RecurrenceEngine,
    top_products: usize,
}

impl StatsAggregator {
    /// Creates an aggregator with default limits.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            recurrence: RecurrenceEngine::new(),
            top_products: DEFAULT_TOP_PRODUCTS,
        }
    }

    /// Uses `recurrence` for the fixed cost total.
    #[must_use]
    pub const fn with_recurrence(mut self, recurrence: RecurrenceEngine) -> Self {
        self.recurrence = recurrence;
        self
    }

    /// Keeps at most `top_products` products in the ranking.
    #[must_use]
    pub const fn with_top_products(mut self, top_products: usize) -> Self {
        self.top_products = top_products;
        self
    }

    /// Aggregates `sales` and `costs` over `range`.
    ///
    /// Sales are re-filtered to the range and product, then walked in
    /// chronological order. The break-even date is the first sale at which
    /// cumulative revenue reaches the whole range's fixed cost plus the
    /// cumulative variable cost so far.
    ///
    /// A sale without a date is counted in the totals and the running sums
    /// but left out of the day and product rollups. It cannot be the
    /// break-even sale itself. A sale that would overflow the totals is
    /// skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Recurrence` if the range is too long to simulate
    /// and `StatsError::Overflow` if a derived figure does not fit.
    pub fn aggregate(
        &self,
        sales: &[SaleRecord],
        costs: &[CostDefinition],
        range: &DateRange,
        filter: &ProductFilter,
    ) -> Result<AggregationResult, StatsError> {
        let mut in_scope: Vec<&SaleRecord> = sales
            .iter()
            .filter(|sale| sale.date.is_none_or(|date| range.contains(date)))
            .filter(|sale| filter.matches(sale))
            .collect();
        in_scope.sort_by_key(|sale| sale.date);

        let total_fixed_cost = if filter.includes_fixed_costs() {
            self.recurrence.total_due(costs, range)?
        } else {
            Decimal::ZERO
        };

        let mut totals = Totals::default();
        let mut break_even = BreakEven::Unset;
        let mut by_method: BTreeMap<PaymentMethod, u32> = BTreeMap::new();
        let mut by_day: BTreeMap<_, DayStats> = BTreeMap::new();
        let mut products = ProductRollup::default();

        for sale in in_scope {
            if !totals.add(sale) {
                warn!(
                    sale = ?sale.id,
                    revenue = %sale.revenue_amount,
                    cost = %sale.cost_amount,
                    "Skipping sale that overflows the running totals"
                );
                continue;
            }
            *by_method.entry(sale.payment_method).or_default() += 1;

            // Undated sales feed the running sums but cannot carry the crossing.
            let Some(date) = sale.date else {
                continue;
            };
            if totals.covers(total_fixed_cost) {
                break_even.latch(date);
            }
            by_day.entry(date.date_naive()).or_default().add(sale.revenue_amount);
            products.add(sale);
        }

        let ticket_average = if totals.count == 0 {
            Decimal::ZERO
        } else {
            totals.revenue / Decimal::from(totals.count)
        };
        let total_cost = totals
            .variable_cost
            .checked_add(total_fixed_cost)
            .ok_or(StatsError::Overflow)?;
        let gross_profit = totals
            .revenue
            .checked_sub(totals.variable_cost)
            .ok_or(StatsError::Overflow)?;
        let net_profit = gross_profit
            .checked_sub(total_fixed_cost)
            .ok_or(StatsError::Overflow)?;

        let result = AggregationResult {
            total_revenue: totals.revenue,
            total_variable_cost: totals.variable_cost,
            total_fixed_cost,
            total_cost,
            gross_profit,
            net_profit,
            ticket_average,
            sales_count: totals.count,
            sales_by_payment_method: by_method,
            sales_by_day: by_day,
            top_products: products.top(self.top_products),
            break_even,
        };

        debug!(
            start = %range.start(),
            end = %range.end(),
            sales = result.sales_count,
            revenue = %result.total_revenue,
            fixed_cost = %result.total_fixed_cost,
            break_even = ?result.break_even.date(),
            "Aggregated sales"
        );
        Ok(result)
    }
}

impl Default for StatsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl AggregationResult {
    /// Day-ordered chart series derived from `sales_by_day`.
    #[must_use]
    pub fn chart_series(&self) -> ChartSeries {
        let mut chart = ChartSeries::default();
        for (day, stats) in &self.sales_by_day {
            chart.labels.push(calendar::day_label(*day));
            chart.revenue.push(stats.revenue);
            chart.ticket.push(stats.ticket());
        }
        chart
    }
}

/// Running sums over the chronological walk.
#[derive(Default)]
struct Totals {
    revenue: Decimal,
    variable_cost: Decimal,
    count: u32,
}

impl Totals {
    /// Adds `sale`, or leaves the sums untouched and returns false on overflow.
    fn add(&mut self, sale: &SaleRecord) -> bool {
        let (Some(revenue), Some(variable_cost), Some(count)) = (
            self.revenue.checked_add(sale.revenue_amount),
            self.variable_cost.checked_add(sale.cost_amount),
            self.count.checked_add(1),
        ) else {
            return false;
        };
        self.revenue = revenue;
        self.variable_cost = variable_cost;
        self.count = count;
        true
    }

    /// Revenue so far covers `fixed_cost` plus variable cost so far.
    fn covers(&self, fixed_cost: Decimal) -> bool {
        self.variable_cost
            .checked_add(fixed_cost)
            .is_some_and(|costs| self.revenue >= costs)
    }
}

/// Per-product sums kept in first-seen order so ranking ties stay stable.
#[derive(Default)]
struct ProductRollup {
    index: HashMap<ProductId, usize>,
    stats: Vec<ProductStats>,
}

impl ProductRollup {
    fn add(&mut self, sale: &SaleRecord) {
        let Some(product_id) = &sale.product_id else {
            return;
        };
        let slot = if let Some(&slot) = self.index.get(product_id) {
            slot
        } else {
            self.stats.push(ProductStats {
                product_id: product_id.clone(),
                name: sale
                    .product_name
                    .clone()
                    .unwrap_or_else(|| product_id.to_string()),
                quantity: 0,
                revenue: Decimal::ZERO,
            });
            self.index.insert(product_id.clone(), self.stats.len() - 1);
            self.stats.len() - 1
        };
        let stats = &mut self.stats[slot];
        stats.quantity = stats.quantity.saturating_add(u64::from(sale.quantity));
        stats.revenue = stats.revenue.saturating_add(sale.revenue_amount);
    }

    fn top(mut self, limit: usize) -> Vec<ProductStats> {
        self.stats.sort_by(|a, b| b.revenue.cmp(&a.revenue));
        self.stats.truncate(limit);
        self.stats
    }
}
