//! Accrual module - miles computation and the spend pipeline.

mod accrual_calculator;
mod accrual_errors;
mod accrual_model;
mod accrual_service;

pub use accrual_calculator::AccrualCalculator;
pub use accrual_errors::AccrualError;
pub use accrual_model::SpendEvent;
pub use accrual_service::{AccrualService, AccrualServiceTrait};
