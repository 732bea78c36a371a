//! Milefolio Core - Mileage rewards accrual and goal-viability engine.
//!
//! This crate contains the rule-engine core of Milefolio. It is
//! storage-agnostic and defines repository traits that are implemented
//! in-memory here and by the application's storage layer.

pub mod accrual;
pub mod constants;
pub mod errors;
pub mod fx;
pub mod goals;
pub mod history;
pub mod programs;
pub mod promotions;
pub mod rules;
pub mod scope;
pub mod viability;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
