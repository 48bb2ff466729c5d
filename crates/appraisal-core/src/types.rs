use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates. At the `CashFlowSeries` boundary these are percentages
/// (10 = 10%); once normalized via [`from_percent`] they are fractions.
pub type Rate = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// Convert a user-facing percentage (10 = 10%) to the fraction used internally.
pub fn from_percent(rate: Rate) -> Rate {
    rate / dec!(100)
}

/// Convert an internal fraction back to the percentage representation.
pub fn to_percent(rate: Rate) -> Rate {
    rate * dec!(100)
}

/// A fixed schedule of period-end cash flows describing one investment project.
///
/// The sole value object of the crate: immutable for the duration of a
/// calculation, constructed by the caller immediately before each computation.
/// Recomputation after any field change is expected and cheap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowSeries {
    /// Outflow at time 0, stored as a positive magnitude
    pub initial_investment: Money,
    /// Ordered annual cash flows; index 0 is the end of period 1.
    /// Values may be positive or negative.
    pub cash_flows: Vec<Money>,
    /// Cost of capital as a percentage (e.g. 10 means 10%). Must exceed -100.
    pub discount_rate: Rate,
    /// Reinvestment rate for MIRR, same representation as `discount_rate`
    pub reinvestment_rate: Rate,
    /// Average annual accounting profit, used only by ARR / average ROR
    pub average_annual_profit: Money,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
