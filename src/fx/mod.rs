//! FX (Foreign Exchange) module - currency normalization for accrual.

mod currency_converter;
mod fx_errors;
mod fx_model;
mod fx_traits;

pub use currency_converter::RateSnapshotConverter;
pub use fx_errors::FxError;
pub use fx_model::ExchangeRateEntry;
pub use fx_traits::CurrencyConverterTrait;
