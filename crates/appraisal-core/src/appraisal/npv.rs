use rust_decimal::Decimal;

use crate::time_value::present_value;
use crate::types::{from_percent, CashFlowSeries, Money};
use crate::AppraisalResult;

/// Net Present Value: discounted inflows at the stated cost of capital,
/// less the initial investment. Positive means value-creating.
pub fn npv(series: &CashFlowSeries) -> AppraisalResult<Money> {
    let pv = present_value(&series.cash_flows, from_percent(series.discount_rate))?;
    Ok(pv - series.initial_investment)
}

/// Profitability Index: discounted inflows per unit of initial investment.
///
/// PI > 1 is mathematically equivalent to NPV > 0; kept as a separate metric
/// because it normalizes by investment size and is used for capital
/// rationing. Returns `None` when the initial investment is zero.
pub fn profitability_index(series: &CashFlowSeries) -> AppraisalResult<Option<Decimal>> {
    if series.initial_investment.is_zero() {
        return Ok(None);
    }
    let pv = present_value(&series.cash_flows, from_percent(series.discount_rate))?;
    Ok(Some(pv / series.initial_investment))
}
