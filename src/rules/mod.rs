//! Rules module - accrual rule storage, validation, and card grouping.

mod rules_errors;
mod rules_grouper;
mod rules_model;
mod rules_repository;
mod rules_service;
mod rules_traits;

pub use rules_errors::RuleError;
pub use rules_grouper::{group_rules_by_card, CardRuleGroup, GroupActivation, RuleRateSummary};
pub use rules_model::{
    MileageRule, NewMileageRule, PurchaseType, PURCHASE_TYPE_DOMESTIC, PURCHASE_TYPE_INTERNATIONAL,
};
pub use rules_repository::RuleRepository;
pub use rules_service::RuleService;
pub use rules_traits::{RuleRepositoryTrait, RuleServiceTrait};
