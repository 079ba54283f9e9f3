//! Core business logic for Equilibrio.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Callers own every input slice; nothing here keeps state between calls.
//!
//! # Modules
//!
//! - `calendar` - Date ranges, month arithmetic and range widening
//! - `recurrence` - Fixed cost recurrence (monthly and installments)
//! - `stats` - Sales aggregation and break-even detection
//! - `dashboard` - Summary plus current month goal
//! - `source` - Ledger collaborator traits and an in-memory ledger

pub mod calendar;
pub mod dashboard;
mod error;
pub mod recurrence;
pub mod source;
pub mod stats;
