use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::AppraisalError;
use crate::types::{Money, Rate};
use crate::AppraisalResult;

/// Discount a series of period-end cash flows at a per-period rate.
///
/// The flow at index `i` falls at the end of period `i + 1`, so it is
/// divided by `(1 + rate)^(i + 1)`. This is the shared primitive behind
/// NPV, the profitability index, discounted payback, and the IRR solver's
/// evaluation convention; keeping one loop avoids drift between formulas
/// that must stay numerically consistent.
pub fn discount_flows(cash_flows: &[Money], rate: Rate) -> AppraisalResult<Vec<Money>> {
    if rate <= dec!(-1) {
        return Err(AppraisalError::InvalidInput {
            field: "rate".into(),
            reason: "Per-period rate must be greater than -100%".into(),
        });
    }

    let one_plus_r = Decimal::ONE + rate;
    let mut discount = Decimal::ONE;
    let mut discounted = Vec::with_capacity(cash_flows.len());

    for (t, cf) in cash_flows.iter().enumerate() {
        discount *= one_plus_r;
        if discount.is_zero() {
            return Err(AppraisalError::DivisionByZero {
                context: format!("discount factor at period {}", t + 1),
            });
        }
        discounted.push(cf / discount);
    }

    Ok(discounted)
}

/// Present value of a series of period-end cash flows.
pub fn present_value(cash_flows: &[Money], rate: Rate) -> AppraisalResult<Money> {
    Ok(discount_flows(cash_flows, rate)?.iter().sum())
}
