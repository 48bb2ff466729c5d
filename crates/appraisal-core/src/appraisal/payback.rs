use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::time_value::discount_flows;
use crate::types::{from_percent, CashFlowSeries, Money, Years};
use crate::AppraisalResult;

/// Outcome of a payback-style calculation.
///
/// Modeled as a tagged result rather than a magic negative number so callers
/// cannot mistake "never recovered" for an unusual but valid payback period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Payback {
    /// Recovered part-way through a period; `years` carries the
    /// within-period interpolated fraction
    Recovered { years: Years },
    /// Cumulative flows never reach the initial investment
    NotRecovered,
}

impl Payback {
    pub fn years(&self) -> Option<Years> {
        match self {
            Payback::Recovered { years } => Some(*years),
            Payback::NotRecovered => None,
        }
    }

    pub fn is_recovered(&self) -> bool {
        matches!(self, Payback::Recovered { .. })
    }
}

/// Undiscounted payback period in years.
pub fn payback(series: &CashFlowSeries) -> Payback {
    recover(series.initial_investment, &series.cash_flows)
}

/// Discounted payback period: the same walk, over flows discounted at the
/// cost of capital. Always at least as long as the undiscounted payback
/// for positive rates.
pub fn discounted_payback(series: &CashFlowSeries) -> AppraisalResult<Payback> {
    let discounted = discount_flows(&series.cash_flows, from_percent(series.discount_rate))?;
    Ok(recover(series.initial_investment, &discounted))
}

/// Payback reciprocal (100 / payback years), a rough IRR proxy for very
/// long-lived projects. Zero when the investment is never recovered.
/// Explicitly an approximation, not a substitute for IRR.
pub fn payback_reciprocal(series: &CashFlowSeries) -> Decimal {
    match payback(series) {
        Payback::Recovered { years } if !years.is_zero() => dec!(100) / years,
        _ => Decimal::ZERO,
    }
}

/// Walk the flows accumulating a running total; recovery happens in the
/// first period where the total reaches the target, with the remainder
/// interpolated against that period's flow.
///
/// A zero or negative flow cannot close the remaining gap, so such a period
/// is never treated as the recovery period; accumulation just continues.
fn recover(target: Money, flows: &[Money]) -> Payback {
    let mut cumulative = Decimal::ZERO;

    for (i, cf) in flows.iter().enumerate() {
        let before = cumulative;
        cumulative += cf;
        if cumulative >= target && *cf > Decimal::ZERO {
            let fraction = (target - before) / cf;
            return Payback::Recovered {
                years: Decimal::from(i as u32) + fraction,
            };
        }
    }

    Payback::NotRecovered
}
