use std::sync::Arc;

use milefolio_core::accrual::{AccrualCalculator, AccrualService};
use milefolio_core::fx::{ExchangeRateEntry, RateSnapshotConverter};
use milefolio_core::goals::{GoalRepository, GoalService};
use milefolio_core::history::{HistoryRepository, HistoryService};
use milefolio_core::programs::{ProgramBalanceRepository, ProgramService};
use milefolio_core::promotions::PromotionRepository;
use milefolio_core::rules::{RuleRepository, RuleService};
use milefolio_core::viability::ViabilityService;

/// A fully wired engine over the in-memory stores.
pub struct TestEngine {
    pub rule_service: Arc<RuleService>,
    pub history_service: Arc<HistoryService>,
    pub goal_service: Arc<GoalService>,
    pub program_service: ProgramService,
    pub promotion_repository: Arc<PromotionRepository>,
    pub accrual_service: AccrualService,
    pub viability_service: ViabilityService,
}

/// Wires every service the way the host application does, with a fixed
/// exchange-rate snapshot for the home currency.
pub fn build_engine(home_currency: &str, rates: Vec<ExchangeRateEntry>) -> TestEngine {
    let rule_repository = Arc::new(RuleRepository::new());
    let history_repository = Arc::new(HistoryRepository::new());
    let goal_repository = Arc::new(GoalRepository::new());
    let promotion_repository = Arc::new(PromotionRepository::new());
    let program_repository = Arc::new(ProgramBalanceRepository::new());

    let rule_service = Arc::new(RuleService::new(rule_repository.clone()));
    let history_service = Arc::new(HistoryService::new(history_repository));
    let goal_service = Arc::new(GoalService::new(
        goal_repository.clone(),
        rule_repository,
        history_service.clone(),
    ));
    let program_service = ProgramService::new(program_repository);

    let converter =
        RateSnapshotConverter::new(rates).expect("test rate snapshot should be valid");
    let calculator = AccrualCalculator::new(Arc::new(converter), home_currency.to_string());
    let accrual_service = AccrualService::new(
        rule_service.clone(),
        history_service.clone(),
        goal_service.clone(),
        calculator,
    );
    let viability_service = ViabilityService::new(
        goal_repository,
        history_service.clone(),
        promotion_repository.clone(),
    );

    TestEngine {
        rule_service,
        history_service,
        goal_service,
        program_service,
        promotion_repository,
        accrual_service,
        viability_service,
    }
}
