//! Dashboard composition.
//!
//! Pairs the summary for a requested range with the current month's goal.

pub mod service;
pub mod types;

pub use service::DashboardService;
pub use types::{Dashboard, DashboardRequest, MonthlyGoal};
