//! Goals module - mileage goals and recompute-from-source progress.

mod goals_errors;
mod goals_model;
mod goals_repository;
mod goals_service;
mod goals_traits;

pub use goals_errors::GoalError;
pub use goals_model::{GoalProgress, MileageGoal, NewMileageGoal};
pub use goals_repository::GoalRepository;
pub use goals_service::GoalService;
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
