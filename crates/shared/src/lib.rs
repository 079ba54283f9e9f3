//! Shared identifiers, errors, and configuration for Equilibrio.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for references handed over by the external ledger
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
