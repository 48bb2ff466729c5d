use rust_decimal_macros::dec;

use crate::types::{CashFlowSeries, Rate};

/// Accounting Rate of Return: average annual profit over average investment
/// (half the initial outlay under straight-line recovery), as a percentage.
/// `None` when the investment is zero.
pub fn accounting_rate_of_return(series: &CashFlowSeries) -> Option<Rate> {
    if series.initial_investment.is_zero() {
        return None;
    }
    Some(series.average_annual_profit / (series.initial_investment / dec!(2)) * dec!(100))
}

/// Average Rate of Return: average annual profit over the full initial
/// outlay, as a percentage. `None` when the investment is zero.
pub fn average_rate_of_return(series: &CashFlowSeries) -> Option<Rate> {
    if series.initial_investment.is_zero() {
        return None;
    }
    Some(series.average_annual_profit / series.initial_investment * dec!(100))
}
