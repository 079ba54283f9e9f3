//! Day-granular recurrence simulation.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::{debug, trace, warn};

use super::error::RecurrenceError;
use super::types::{CostDefinition, Occurrence, RecurrenceKind, ScheduledCharge};
use crate::calendar::{self, DateRange};

/// Default cap on simulated range length, about five years.
pub const DEFAULT_MAX_RANGE_DAYS: u32 = 1830;

/// Decides when recurring fixed costs fall due and sums them over a range.
///
/// The engine walks every calendar day of the range and asks each cost
/// whether it is due that day. Walking days rather than months is what lets
/// the due day clamp per month and lets partial ranges count only the due
/// days they actually contain.
#[derive(Debug, Clone, Copy)]
pub struct RecurrenceEngine {
    max_range_days: u32,
}

impl RecurrenceEngine {
    /// Creates an engine with the default range cap.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_range_days: DEFAULT_MAX_RANGE_DAYS,
        }
    }

    /// Sets the longest range, in calendar days, the engine will simulate.
    #[must_use]
    pub const fn with_max_range_days(mut self, max_range_days: u32) -> Self {
        self.max_range_days = max_range_days;
        self
    }

    /// Configured range cap.
    #[must_use]
    pub const fn max_range_days(&self) -> u32 {
        self.max_range_days
    }

    /// Returns which occurrence of `cost` falls due on `day`, if any.
    ///
    /// A cost is eligible from the first day of its anchor month onwards.
    /// Its due day is the anchor's day of month clamped to the month's
    /// length. Installments stop after `installment_count` months.
    #[must_use]
    pub fn occurrence_on(cost: &CostDefinition, day: NaiveDate) -> Option<Occurrence> {
        if cost.amount <= Decimal::ZERO {
            return None;
        }
        let anchor = cost.anchor_date?;
        if day < anchor && !calendar::same_month(day, anchor) {
            return None;
        }
        if day.day() != calendar::clamped_day(anchor.day(), day.year(), day.month()) {
            return None;
        }

        match cost.kind {
            RecurrenceKind::Monthly => Some(Occurrence::Recurring),
            RecurrenceKind::Installment => {
                let elapsed = calendar::months_between(anchor, day);
                if !(0..i64::from(cost.installment_count)).contains(&elapsed) {
                    return None;
                }
                Some(Occurrence::Installment {
                    number: u32::try_from(elapsed + 1).ok()?,
                    of: cost.installment_count,
                })
            }
        }
    }

    /// Amount `cost` charges on `day`, or `None` if it is not due.
    #[must_use]
    pub fn charge_on(cost: &CostDefinition, day: NaiveDate) -> Option<Decimal> {
        Self::occurrence_on(cost, day).map(|_| cost.amount)
    }

    /// Every charge accrued by `costs` inside `range`, in day order.
    ///
    /// # Errors
    ///
    /// Returns `RecurrenceError::RangeTooLong` if the range spans more days
    /// than the engine allows.
    pub fn schedule(
        &self,
        costs: &[CostDefinition],
        range: &DateRange,
    ) -> Result<Vec<ScheduledCharge>, RecurrenceError> {
        let active = self.prepare(costs, range)?;
        let charges: Vec<ScheduledCharge> = range
            .days()
            .flat_map(|day| {
                active.iter().filter_map(move |cost| {
                    Self::occurrence_on(cost, day).map(|occurrence| ScheduledCharge {
                        date: day,
                        cost_id: cost.id.clone(),
                        cost_name: cost.name.clone(),
                        amount: cost.amount,
                        occurrence,
                    })
                })
            })
            .inspect(|charge| {
                trace!(
                    date = %charge.date,
                    cost = %charge.cost_name,
                    amount = %charge.amount,
                    occurrence = ?charge.occurrence,
                    "Fixed cost due"
                );
            })
            .collect();

        debug!(
            start = %range.start(),
            end = %range.end(),
            charges = charges.len(),
            "Built fixed cost schedule"
        );
        Ok(charges)
    }

    /// Total fixed cost incurred by `costs` inside `range`.
    ///
    /// A charge that would overflow the total is skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `RecurrenceError::RangeTooLong` if the range spans more days
    /// than the engine allows.
    pub fn total_due(
        &self,
        costs: &[CostDefinition],
        range: &DateRange,
    ) -> Result<Decimal, RecurrenceError> {
        let active = self.prepare(costs, range)?;
        let total = range
            .days()
            .flat_map(|day| {
                active.iter().filter_map(move |cost| {
                    Self::charge_on(cost, day).map(|due| (day, cost, due))
                })
            })
            .fold(Decimal::ZERO, |total, (day, cost, due)| {
                total.checked_add(due).unwrap_or_else(|| {
                    warn!(
                        date = %day,
                        cost = %cost.name,
                        amount = %due,
                        "Skipping fixed cost charge that overflows the total"
                    );
                    total
                })
            });

        debug!(
            start = %range.start(),
            end = %range.end(),
            costs = active.len(),
            total = %total,
            "Computed total fixed cost"
        );
        Ok(total)
    }

    /// Enforces the range cap and drops costs that can never accrue.
    fn prepare<'a>(
        &self,
        costs: &'a [CostDefinition],
        range: &DateRange,
    ) -> Result<Vec<&'a CostDefinition>, RecurrenceError> {
        let days = range.day_count();
        if days > u64::from(self.max_range_days) {
            return Err(RecurrenceError::RangeTooLong {
                days,
                max: self.max_range_days,
            });
        }

        Ok(costs
            .iter()
            .filter(|cost| {
                let active = cost.is_active();
                if !active {
                    warn!(
                        cost = %cost.name,
                        amount = %cost.amount,
                        anchor = ?cost.anchor_date,
                        "Skipping fixed cost that can never accrue"
                    );
                }
                active
            })
            .collect())
    }
}

impl Default for RecurrenceEngine {
    fn default() -> Self {
        Self::new()
    }
}
