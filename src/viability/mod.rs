//! Viability module - projects goal completion and suggests redemptions.

mod viability_model;
mod viability_service;

pub use viability_model::{GoalAnalysis, GoalViability};
pub use viability_service::{ViabilityService, ViabilityServiceTrait};
