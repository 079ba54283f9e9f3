//! Property-based tests for the recurrence engine.

use chrono::{Datelike, Months, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::engine::RecurrenceEngine;
use super::types::{CostDefinition, Occurrence, RecurrenceKind};
use crate::calendar::{self, DateRange};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Strategy for any valid calendar date between 2000 and 2030.
fn any_date() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2030, 1u32..=12, 1u32..=31)
        .prop_map(|(y, m, d)| date(y, m, d.min(calendar::days_in_month(y, m))))
}

/// Strategy for amounts from 0.01 to 100,000.00.
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn any_cost() -> impl Strategy<Value = CostDefinition> {
    (
        positive_amount(),
        any_date(),
        prop_oneof![Just(RecurrenceKind::Monthly), Just(RecurrenceKind::Installment)],
        0u32..24,
    )
        .prop_map(|(amount, anchor, kind, count)| CostDefinition {
            id: None,
            name: "cost".to_string(),
            amount,
            anchor_date: Some(anchor),
            kind,
            installment_count: count,
        })
}

fn month_range(first_of_month: NaiveDate) -> DateRange {
    DateRange::month_of(first_of_month).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A monthly cost anchored on any day accrues exactly once in every full
    /// month after its anchor month, on the clamped due day.
    #[test]
    fn prop_monthly_clamped_once_per_month(
        anchor_day in 1u32..=31,
        amount in positive_amount(),
        months_later in 1u32..120,
    ) {
        let anchor = date(2000, 1, anchor_day);
        let cost = CostDefinition::monthly("Aluguel", amount, anchor);
        let target = date(2000, 1, 1) + Months::new(months_later);
        let range = month_range(target);

        let schedule = RecurrenceEngine::new().schedule(&[cost.clone()], &range).unwrap();
        prop_assert_eq!(schedule.len(), 1);
        prop_assert_eq!(
            schedule[0].date.day(),
            anchor_day.min(calendar::days_in_month(target.year(), target.month()))
        );
        prop_assert_eq!(RecurrenceEngine::new().total_due(&[cost], &range).unwrap(), amount);
    }

    /// An installment cost accrues in its first `count` months and never after,
    /// even when the range is much longer.
    #[test]
    fn prop_installment_cap(
        anchor in any_date(),
        count in 1u32..=12,
        amount in positive_amount(),
    ) {
        let cost = CostDefinition::installment("Parcela", amount, anchor, count);
        let first = anchor.with_day(1).unwrap();
        let last = (first + Months::new(24)).pred_opt().unwrap();
        let range = DateRange::whole_days(first, last).unwrap();

        let schedule = RecurrenceEngine::new().schedule(&[cost.clone()], &range).unwrap();
        prop_assert_eq!(schedule.len(), count as usize);
        for (index, charge) in schedule.iter().enumerate() {
            let expected_month = first + Months::new(u32::try_from(index).unwrap());
            prop_assert!(calendar::same_month(charge.date, expected_month));
            prop_assert_eq!(
                charge.occurrence,
                Occurrence::Installment { number: u32::try_from(index).unwrap() + 1, of: count }
            );
        }
        prop_assert_eq!(
            RecurrenceEngine::new().total_due(&[cost], &range).unwrap(),
            amount * Decimal::from(count)
        );
    }

    /// No cost accrues in any month before its anchor month.
    #[test]
    fn prop_nothing_before_anchor_month(cost in any_cost(), months_before in 1u32..36) {
        let anchor = cost.anchor_date.unwrap();
        let target = anchor.with_day(1).unwrap() - Months::new(months_before);
        let total = RecurrenceEngine::new().total_due(&[cost], &month_range(target)).unwrap();
        prop_assert_eq!(total, Decimal::ZERO);
    }

    /// Same inputs, same output.
    #[test]
    fn prop_total_due_is_idempotent(
        costs in prop::collection::vec(any_cost(), 0..6),
        start in any_date(),
        span in 0u64..400,
    ) {
        let end = start.checked_add_days(chrono::Days::new(span)).unwrap();
        let range = DateRange::whole_days(start, end).unwrap();
        let engine = RecurrenceEngine::new();

        let first = engine.total_due(&costs, &range).unwrap();
        let second = engine.total_due(&costs, &range).unwrap();
        prop_assert_eq!(first, second);

        let scheduled: Decimal = engine
            .schedule(&costs, &range)
            .unwrap()
            .iter()
            .map(|charge| charge.amount)
            .sum();
        prop_assert_eq!(first, scheduled);
    }

    /// Splitting a range at a day boundary splits the total.
    #[test]
    fn prop_total_due_is_additive(
        costs in prop::collection::vec(any_cost(), 1..6),
        start in any_date(),
        left in 0u64..200,
        right in 1u64..200,
    ) {
        let mid = start.checked_add_days(chrono::Days::new(left)).unwrap();
        let end = mid.checked_add_days(chrono::Days::new(right)).unwrap();
        let engine = RecurrenceEngine::new();

        let whole = engine.total_due(&costs, &DateRange::whole_days(start, end).unwrap()).unwrap();
        let head = engine.total_due(&costs, &DateRange::whole_days(start, mid).unwrap()).unwrap();
        let tail = engine
            .total_due(&costs, &DateRange::whole_days(mid.succ_opt().unwrap(), end).unwrap())
            .unwrap();
        prop_assert_eq!(whole, head + tail);
    }
}

#[test]
fn test_anchor_31st_clamps_to_february() {
    let cost = CostDefinition::monthly("Aluguel", dec!(800), date(2023, 1, 31));
    let engine = RecurrenceEngine::new();

    let non_leap = engine.schedule(&[cost.clone()], &month_range(date(2023, 2, 1))).unwrap();
    assert_eq!(non_leap.len(), 1);
    assert_eq!(non_leap[0].date, date(2023, 2, 28));

    let leap = engine.schedule(&[cost], &month_range(date(2024, 2, 1))).unwrap();
    assert_eq!(leap.len(), 1);
    assert_eq!(leap[0].date, date(2024, 2, 29));
}

#[test]
fn test_installment_three_over_twelve_months() {
    let cost = CostDefinition::installment("Geladeira", dec!(250), date(2024, 3, 20), 3);
    let range = DateRange::whole_days(date(2024, 1, 1), date(2024, 12, 31)).unwrap();

    let schedule = RecurrenceEngine::new().schedule(&[cost], &range).unwrap();
    let dates: Vec<_> = schedule.iter().map(|charge| charge.date).collect();
    assert_eq!(
        dates,
        vec![date(2024, 3, 20), date(2024, 4, 20), date(2024, 5, 20)]
    );
}

#[test]
fn test_eligibility_gate_around_anchor_month() {
    let cost = CostDefinition::monthly("Aluguel", dec!(1000), date(2024, 1, 15));
    let engine = RecurrenceEngine::new();

    let december = month_range(date(2023, 12, 1));
    assert_eq!(engine.total_due(&[cost.clone()], &december).unwrap(), Decimal::ZERO);

    let early_january = DateRange::whole_days(date(2024, 1, 1), date(2024, 1, 14)).unwrap();
    assert_eq!(engine.total_due(&[cost.clone()], &early_january).unwrap(), Decimal::ZERO);

    let january = engine.schedule(&[cost], &month_range(date(2024, 1, 1))).unwrap();
    assert_eq!(january.len(), 1);
    assert_eq!(january[0].date, date(2024, 1, 15));
}

#[test]
fn test_mixed_costs_over_leap_february() {
    let costs = [
        CostDefinition::monthly("Aluguel", dec!(1000), date(2024, 1, 5)),
        CostDefinition::installment("Parcela Carro", dec!(500), date(2024, 1, 10), 12),
    ];
    let range = month_range(date(2024, 2, 1));
    assert_eq!(
        RecurrenceEngine::new().total_due(&costs, &range).unwrap(),
        dec!(1500)
    );
}
