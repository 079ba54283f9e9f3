//! Dashboard composition.

use chrono::NaiveDate;
use tracing::debug;

use super::types::{Dashboard, DashboardRequest, MonthlyGoal};
use crate::calendar::DateRange;
use crate::recurrence::CostDefinition;
use crate::stats::{ProductFilter, SaleRecord, StatsAggregator, StatsError};

/// Builds the dashboard from one tenant's ledger.
#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardService {
    aggregator: StatsAggregator,
}

impl DashboardService {
    /// Creates a service around `aggregator`.
    #[must_use]
    pub const fn new(aggregator: StatsAggregator) -> Self {
        Self { aggregator }
    }

    /// Builds the summary for `request` and the goal for the month of `today`.
    ///
    /// `sales` must cover both the requested range and the current month;
    /// each aggregation keeps only the sales inside its own range. The two
    /// aggregations are independent and run in parallel.
    ///
    /// # Errors
    ///
    /// Returns the first error of either aggregation.
    pub fn build(
        &self,
        sales: &[SaleRecord],
        costs: &[CostDefinition],
        request: &DashboardRequest,
        today: NaiveDate,
    ) -> Result<Dashboard, StatsError> {
        let month = DateRange::month_of(today)?;

        let (summary, monthly) = rayon::join(
            || {
                self.aggregator
                    .aggregate(sales, costs, &request.range, &request.product_filter)
            },
            || {
                self.aggregator
                    .aggregate(sales, costs, &month, &ProductFilter::All)
            },
        );
        let summary = summary?;
        let monthly_goal = MonthlyGoal::from_result(&monthly?);

        debug!(
            start = %request.range.start(),
            end = %request.range.end(),
            month = %month.first_day(),
            net_profit = %summary.net_profit,
            goal_percentage = %monthly_goal.percentage,
            "Built dashboard"
        );
        Ok(Dashboard {
            charts: summary.chart_series(),
            summary,
            monthly_goal,
        })
    }
}
