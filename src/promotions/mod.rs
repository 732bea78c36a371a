//! Promotions module - externally maintained redemption catalog.

mod promotions_model;
mod promotions_repository;
mod promotions_traits;

pub use promotions_model::Promotion;
pub use promotions_repository::PromotionRepository;
pub use promotions_traits::PromotionRepositoryTrait;
