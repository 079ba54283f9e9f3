//! Recurring cost data types.

use chrono::{Datelike, NaiveDate};
use equilibrio_shared::types::CostId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar;

/// How a fixed cost repeats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceKind {
    /// Due every month, with no end.
    #[default]
    Monthly,
    /// Due for a fixed number of consecutive months.
    Installment,
}

/// A recurring fixed cost (rent, installment purchase, subscription).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostDefinition {
    /// Identifier assigned by the cost source, if any.
    #[serde(default)]
    pub id: Option<CostId>,
    /// Display label.
    pub name: String,
    /// Amount due in full each time the cost recurs.
    pub amount: Decimal,
    /// First due date. Its day of month is the recurring due day.
    ///
    /// `None` when the source had no usable date; such costs never accrue.
    /// Full timestamps are accepted and reduced to their UTC date.
    #[serde(default, deserialize_with = "crate::calendar::lenient::date")]
    pub anchor_date: Option<NaiveDate>,
    /// Recurrence rule.
    #[serde(default)]
    pub kind: RecurrenceKind,
    /// Total number of charges. Only read for installments.
    #[serde(default = "default_installment_count")]
    pub installment_count: u32,
}

fn default_installment_count() -> u32 {
    1
}

impl CostDefinition {
    /// Creates a monthly cost.
    #[must_use]
    pub fn monthly(name: impl Into<String>, amount: Decimal, anchor_date: NaiveDate) -> Self {
        Self {
            id: None,
            name: name.into(),
            amount,
            anchor_date: Some(anchor_date),
            kind: RecurrenceKind::Monthly,
            installment_count: default_installment_count(),
        }
    }

    /// Creates an installment cost charged `count` times.
    #[must_use]
    pub fn installment(
        name: impl Into<String>,
        amount: Decimal,
        anchor_date: NaiveDate,
        count: u32,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            amount,
            anchor_date: Some(anchor_date),
            kind: RecurrenceKind::Installment,
            installment_count: count,
        }
    }

    /// Returns true if the cost can ever accrue: it has an anchor date and a
    /// positive amount.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.anchor_date.is_some() && self.amount > Decimal::ZERO
    }

    /// Number of installments already due on or before `as_of`, capped at
    /// `installment_count`.
    ///
    /// Returns `None` for monthly costs and for costs without an anchor.
    #[must_use]
    pub fn installments_paid(&self, as_of: NaiveDate) -> Option<u32> {
        if self.kind != RecurrenceKind::Installment {
            return None;
        }
        let anchor = self.anchor_date?;
        let elapsed = calendar::months_between(anchor, as_of);
        if elapsed < 0 {
            return Some(0);
        }
        let due_day = calendar::clamped_day(anchor.day(), as_of.year(), as_of.month());
        let paid = elapsed + i64::from(as_of.day() >= due_day);
        let capped = paid.min(i64::from(self.installment_count));
        Some(u32::try_from(capped).unwrap_or(self.installment_count))
    }
}

/// Which charge of a cost's recurrence a scheduled charge is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Occurrence {
    /// A monthly charge.
    Recurring,
    /// Installment `number` of `of`, 1-based.
    Installment {
        /// 1-based installment number.
        number: u32,
        /// Total number of installments.
        of: u32,
    },
}

/// A single charge accrued by the recurrence simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledCharge {
    /// Day the charge falls due.
    pub date: NaiveDate,
    /// Cost identifier, if the source assigned one.
    pub cost_id: Option<CostId>,
    /// Cost display label.
    pub cost_name: String,
    /// Amount charged.
    pub amount: Decimal,
    /// Position in the cost's recurrence.
    pub occurrence: Occurrence,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_deserialize_defaults() {
        let cost: CostDefinition =
            serde_json::from_str(r#"{"name":"Aluguel","amount":1000,"anchor_date":"2024-01-05"}"#)
                .unwrap();
        assert_eq!(cost.kind, RecurrenceKind::Monthly);
        assert_eq!(cost.installment_count, 1);
        assert_eq!(cost.amount, dec!(1000));
        assert!(cost.is_active());
    }

    #[test]
    fn test_missing_anchor_is_inactive() {
        let cost: CostDefinition =
            serde_json::from_str(r#"{"name":"Internet","amount":"99.90","kind":"monthly"}"#)
                .unwrap();
        assert!(cost.anchor_date.is_none());
        assert!(!cost.is_active());
    }

    #[test]
    fn test_non_positive_amount_is_inactive() {
        let cost = CostDefinition::monthly("Refund", dec!(-10), date(2024, 1, 1));
        assert!(!cost.is_active());
    }

    #[test]
    fn test_installments_paid() {
        let cost = CostDefinition::installment("Carro", dec!(500), date(2024, 1, 10), 12);
        assert_eq!(cost.installments_paid(date(2023, 12, 31)), Some(0));
        assert_eq!(cost.installments_paid(date(2024, 1, 9)), Some(0));
        assert_eq!(cost.installments_paid(date(2024, 1, 10)), Some(1));
        assert_eq!(cost.installments_paid(date(2024, 3, 9)), Some(2));
        assert_eq!(cost.installments_paid(date(2024, 3, 10)), Some(3));
        assert_eq!(cost.installments_paid(date(2026, 1, 1)), Some(12));
    }

    #[test]
    fn test_installments_paid_clamps_due_day() {
        let cost = CostDefinition::installment("Notebook", dec!(300), date(2023, 1, 31), 3);
        assert_eq!(cost.installments_paid(date(2023, 2, 27)), Some(1));
        assert_eq!(cost.installments_paid(date(2023, 2, 28)), Some(2));
    }

    #[test]
    fn test_installments_paid_not_applicable_to_monthly() {
        let cost = CostDefinition::monthly("Aluguel", dec!(1000), date(2024, 1, 5));
        assert_eq!(cost.installments_paid(date(2024, 6, 1)), None);
    }
}
