//! Programs module - synced loyalty program balances (separate mile pool).

mod programs_errors;
mod programs_model;
mod programs_repository;
mod programs_service;
mod programs_traits;

pub use programs_errors::ProgramError;
pub use programs_model::{MileageProgramBalance, NewMileageProgramBalance};
pub use programs_repository::ProgramBalanceRepository;
pub use programs_service::ProgramService;
pub use programs_traits::{ProgramBalanceRepositoryTrait, ProgramServiceTrait};
