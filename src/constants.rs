/// Decimal precision for accrual and velocity calculations
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Months of history used to derive the accrual velocity
pub const DEFAULT_VELOCITY_LOOKBACK_MONTHS: u32 = 6;

/// Projection horizon for goals without a target date
pub const DEFAULT_PROJECTION_HORIZON_MONTHS: u32 = 24;
