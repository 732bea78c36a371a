//! History module - append-only mileage ledger and accrual velocity.

mod history_errors;
mod history_model;
mod history_repository;
mod history_service;
mod history_traits;

pub use history_errors::HistoryError;
pub use history_model::{MileageHistoryRecord, NewMileageHistoryRecord};
pub use history_repository::HistoryRepository;
pub use history_service::HistoryService;
pub use history_traits::{HistoryRepositoryTrait, HistoryServiceTrait};
