//! Dashboard data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::DateRange;
use crate::stats::{AggregationResult, BreakEven, ChartSeries, ProductFilter};

/// What the caller wants summarised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardRequest {
    /// Range for the summary and charts.
    pub range: DateRange,
    /// Product restriction for the summary and charts.
    #[serde(default)]
    pub product_filter: ProductFilter,
}

/// Dashboard response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    /// Aggregation over the requested range and product.
    pub summary: AggregationResult,
    /// Progress of the current calendar month against its costs.
    pub monthly_goal: MonthlyGoal,
    /// Day series of the summary.
    pub charts: ChartSeries,
}

/// Current month progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyGoal {
    /// Revenue so far this month.
    pub total_revenue: Decimal,
    /// Variable cost so far this month.
    pub total_variable_cost: Decimal,
    /// Fixed cost due this month.
    pub total_fixed_cost: Decimal,
    /// Revenue minus all costs.
    pub net_profit: Decimal,
    /// Break-even state within the month.
    pub break_even: BreakEven,
    /// Revenue as a percentage of all costs.
    pub percentage: Decimal,
}

impl MonthlyGoal {
    /// Builds the goal from an unfiltered aggregation of one month.
    #[must_use]
    pub fn from_result(month: &AggregationResult) -> Self {
        Self {
            total_revenue: month.total_revenue,
            total_variable_cost: month.total_variable_cost,
            total_fixed_cost: month.total_fixed_cost,
            net_profit: month.net_profit,
            break_even: month.break_even,
            percentage: coverage_percentage(month.total_revenue, month.total_cost),
        }
    }
}

/// `revenue / costs * 100` to 2 dp. With no costs: 100 if anything was sold, else 0.
fn coverage_percentage(revenue: Decimal, costs: Decimal) -> Decimal {
    if costs > Decimal::ZERO {
        revenue
            .checked_div(costs)
            .unwrap_or(Decimal::MAX)
            .saturating_mul(Decimal::ONE_HUNDRED)
            .round_dp(2)
    } else if revenue > Decimal::ZERO {
        Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}
