use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::AppraisalError;
use crate::time_value::discount_flows;
use crate::types::{from_percent, to_percent, CashFlowSeries, Rate};
use crate::AppraisalResult;

/// Modified Internal Rate of Return, as a percentage.
///
/// Positive flows are compounded forward to the end of the series at the
/// reinvestment rate; the initial outlay and any negative flows are
/// discounted at the cost of capital. The result is the geometric-mean
/// rate equating the two sides over the series length.
///
/// Returns `None` when the outflow present value is not positive, or when
/// the inflow future value is negative: a fractional power of a
/// non-positive base has no real value and must not be coerced into one.
pub fn mirr(series: &CashFlowSeries) -> AppraisalResult<Option<Rate>> {
    let n = series.cash_flows.len();
    if n == 0 {
        return Err(AppraisalError::InsufficientData(
            "MIRR requires at least one cash flow".into(),
        ));
    }

    let reinvest_rate = from_percent(series.reinvestment_rate);
    if reinvest_rate <= dec!(-1) {
        return Err(AppraisalError::InvalidInput {
            field: "reinvestment_rate".into(),
            reason: "Reinvestment rate must be greater than -100%".into(),
        });
    }

    // Future value of the strictly-positive flows at the reinvestment rate.
    // The flow at index i compounds for n - i - 1 periods, so walking the
    // series backwards lets one running factor cover every exponent.
    let one_plus_rr = Decimal::ONE + reinvest_rate;
    let mut fv = Decimal::ZERO;
    let mut compound = Decimal::ONE;
    for cf in series.cash_flows.iter().rev() {
        if *cf > Decimal::ZERO {
            fv += cf * compound;
        }
        compound *= one_plus_rr;
    }

    // Present value of the outflows: the initial outlay plus the magnitude
    // of every strictly-negative flow discounted at the cost of capital.
    let discounted = discount_flows(&series.cash_flows, from_percent(series.discount_rate))?;
    let mut pv = series.initial_investment;
    for (cf, disc) in series.cash_flows.iter().zip(&discounted) {
        if *cf < Decimal::ZERO {
            pv -= disc;
        }
    }

    if pv <= Decimal::ZERO || fv < Decimal::ZERO {
        return Ok(None);
    }
    if fv.is_zero() {
        // No positive flows at all: the outlay is a total loss
        return Ok(Some(dec!(-100)));
    }

    let ratio = fv / pv;
    let root = ratio.powd(Decimal::ONE / Decimal::from(n as u32));
    Ok(Some(to_percent(root - Decimal::ONE)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn series(
        investment: Decimal,
        flows: Vec<Decimal>,
        discount: Decimal,
        reinvest: Decimal,
    ) -> CashFlowSeries {
        CashFlowSeries {
            initial_investment: investment,
            cash_flows: flows,
            discount_rate: discount,
            reinvestment_rate: reinvest,
            average_annual_profit: Decimal::ZERO,
        }
    }

    #[test]
    fn test_mirr_five_year_project() {
        // FV at 8% = 300k*1.08^4 + 350k*1.08^3 + 400k*1.08^2 + 450k*1.08 + 500k
        //          ~ 2,301,606; PV = 1,000,000; MIRR = 2.301606^(1/5) - 1 ~ 18.14%
        let s = series(
            dec!(1_000_000),
            vec![
                dec!(300_000),
                dec!(350_000),
                dec!(400_000),
                dec!(450_000),
                dec!(500_000),
            ],
            dec!(10),
            dec!(8),
        );
        let result = mirr(&s).unwrap().unwrap();
        assert!(
            (result - dec!(18.14)).abs() < dec!(0.05),
            "expected MIRR ~18.14, got {result}"
        );
    }

    #[test]
    fn test_mirr_single_period_matches_simple_return() {
        // One period: no reinvestment happens, MIRR = FV/PV - 1 = 10%
        let s = series(dec!(1_000), vec![dec!(1_100)], dec!(10), dec!(8));
        let result = mirr(&s).unwrap().unwrap();
        assert_eq!(result, dec!(10));
    }

    #[test]
    fn test_mirr_negative_flow_joins_outflow_side() {
        // The year-2 outflow is discounted at 10% and added to the PV base,
        // not compounded with the inflows
        let s = series(
            dec!(1_000),
            vec![dec!(600), dec!(-121), dec!(600)],
            dec!(10),
            dec!(8),
        );
        let result = mirr(&s).unwrap().unwrap();
        // PV = 1000 + 121/1.1^2 = 1100; FV = 600*1.08^2 + 600 = 1299.84
        // MIRR = (1299.84/1100)^(1/3) - 1 ~ 5.73%
        assert!((result - dec!(5.73)).abs() < dec!(0.05));
    }

    #[test]
    fn test_mirr_undefined_on_zero_investment() {
        // No outlay and no negative flows leaves a zero denominator
        let s = series(Decimal::ZERO, vec![dec!(100), dec!(100)], dec!(10), dec!(8));
        assert_eq!(mirr(&s).unwrap(), None);
    }

    #[test]
    fn test_mirr_all_negative_flows_is_total_loss() {
        let s = series(dec!(1_000), vec![dec!(-100), dec!(-100)], dec!(10), dec!(8));
        assert_eq!(mirr(&s).unwrap(), Some(dec!(-100)));
    }

    #[test]
    fn test_mirr_empty_series_rejected() {
        let s = series(dec!(1_000), vec![], dec!(10), dec!(8));
        assert!(mirr(&s).is_err());
    }

    #[test]
    fn test_mirr_equal_rates_still_differs_from_irr() {
        // With reinvestment at the cost of capital, MIRR sits between the
        // discount rate and the IRR for a value-creating project
        let s = series(
            dec!(1_000_000),
            vec![
                dec!(300_000),
                dec!(350_000),
                dec!(400_000),
                dec!(450_000),
                dec!(500_000),
            ],
            dec!(10),
            dec!(10),
        );
        let result = mirr(&s).unwrap().unwrap();
        assert!(result > dec!(10) && result < dec!(25.7));
    }
}
