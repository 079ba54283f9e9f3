//! Recurring fixed-cost amortization.
//!
//! Turns recurring cost definitions (rent, installment purchases,
//! subscriptions) into the fixed cost incurred over an arbitrary range.

pub mod engine;
pub mod error;
pub mod types;

#[cfg(test)]
mod tests;

pub use engine::{DEFAULT_MAX_RANGE_DAYS, RecurrenceEngine};
pub use error::RecurrenceError;
pub use types::{CostDefinition, Occurrence, RecurrenceKind, ScheduledCharge};
