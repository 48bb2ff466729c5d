use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::AppraisalError;
use crate::types::{to_percent, CashFlowSeries, Rate};
use crate::AppraisalResult;

/// Newton-Raphson starting point (10%).
pub const IRR_DEFAULT_GUESS: Rate = dec!(0.10);
/// Absolute tolerance on the rate step, not on NPV.
pub const IRR_RATE_TOLERANCE: Decimal = dec!(0.0001);
pub const MAX_IRR_ITERATIONS: u32 = 100;

/// The rate (as a percentage) at which the project NPV is zero, plus the
/// solver's own account of how it got there.
///
/// `converged == false` means the iteration cap was hit or a Newton step was
/// undefined; `rate` is then the last computed estimate, best-effort and
/// unverified, never an error. Callers that need certainty must check the
/// flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrSolution {
    /// Rate as a percentage, matching the representation of `discount_rate`
    pub rate: Rate,
    /// Whether the rate tolerance was met within the iteration cap
    pub converged: bool,
    /// Newton steps taken
    pub iterations: u32,
}

/// Internal Rate of Return with the standard solver parameters.
///
/// Cash-flow sequences with more than one sign change can have zero, one,
/// or several mathematically valid roots; this solver reports whichever
/// root the iteration's basin of attraction leads to and does not detect
/// or enumerate alternates.
pub fn irr(series: &CashFlowSeries) -> AppraisalResult<IrrSolution> {
    irr_with_params(
        series,
        IRR_DEFAULT_GUESS,
        IRR_RATE_TOLERANCE,
        MAX_IRR_ITERATIONS,
    )
}

/// Newton-Raphson root-finding on `f(r) = -investment + sum(CF_t / (1+r)^t)`
/// with explicit guess, tolerance, and iteration cap.
///
/// The iteration stops once the absolute rate step falls below `tolerance`.
/// Hitting `max_iterations`, or landing on a zero derivative, returns the
/// current estimate with `converged: false` rather than failing.
pub fn irr_with_params(
    series: &CashFlowSeries,
    guess: Rate,
    tolerance: Decimal,
    max_iterations: u32,
) -> AppraisalResult<IrrSolution> {
    if series.cash_flows.is_empty() {
        return Err(AppraisalError::InsufficientData(
            "IRR requires at least one cash flow".into(),
        ));
    }

    let mut rate = guess;

    for i in 0..max_iterations {
        let (f, df) = npv_and_derivative(series, rate);

        if df.is_zero() {
            // Newton step undefined; surface the current estimate instead
            // of letting a division blow up
            return Ok(IrrSolution {
                rate: to_percent(rate),
                converged: false,
                iterations: i,
            });
        }

        let step = f / df;
        rate -= step;

        if step.abs() < tolerance {
            return Ok(IrrSolution {
                rate: to_percent(rate),
                converged: true,
                iterations: i + 1,
            });
        }

        // Guard against divergence
        if rate < dec!(-0.99) {
            rate = dec!(-0.99);
        } else if rate > dec!(100.0) {
            rate = dec!(100.0);
        }
    }

    Ok(IrrSolution {
        rate: to_percent(rate),
        converged: false,
        iterations: max_iterations,
    })
}

/// Evaluate `f(r)` and `f'(r)` in one pass over the flows, with the
/// period-end convention: flow at index `i` is divided by `(1+r)^(i+1)`.
/// The derivative term for period t is `-t * CF_t / (1+r)^(t+1)`.
fn npv_and_derivative(series: &CashFlowSeries, rate: Rate) -> (Decimal, Decimal) {
    let one_plus_r = Decimal::ONE + rate;
    let mut f = -series.initial_investment;
    let mut df = Decimal::ZERO;
    let mut discount = Decimal::ONE;

    for (i, cf) in series.cash_flows.iter().enumerate() {
        discount *= one_plus_r;
        if discount.is_zero() {
            break;
        }
        let period = Decimal::from(i as u32 + 1);
        f += cf / discount;
        df -= period * cf / (discount * one_plus_r);
    }

    (f, df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn series(investment: Decimal, flows: Vec<Decimal>, rate: Decimal) -> CashFlowSeries {
        CashFlowSeries {
            initial_investment: investment,
            cash_flows: flows,
            discount_rate: rate,
            reinvestment_rate: rate,
            average_annual_profit: Decimal::ZERO,
        }
    }

    #[test]
    fn test_irr_closed_form_single_period() {
        // 1,000,000 -> 1,100,000 in one year: the root is exactly 10%
        let s = series(dec!(1_000_000), vec![dec!(1_100_000)], dec!(10));
        let solution = irr(&s).unwrap();
        assert!(solution.converged);
        assert_eq!(solution.rate, dec!(10));
    }

    #[test]
    fn test_irr_five_year_project() {
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
        );
        let solution = irr(&s).unwrap();
        assert!(solution.converged);
        assert!(
            solution.rate > dec!(25.7) && solution.rate < dec!(25.8),
            "expected IRR in (25.7, 25.8), got {}",
            solution.rate
        );
    }

    #[test]
    fn test_irr_converges_quickly_on_conventional_flows() {
        let s = series(
            dec!(1_000),
            vec![dec!(400), dec!(400), dec!(400)],
            dec!(10),
        );
        let solution = irr(&s).unwrap();
        assert!(solution.converged);
        assert!(solution.iterations < 20);
        // Known value ~9.7%
        assert!((solution.rate - dec!(9.7)).abs() < dec!(0.1));
    }

    #[test]
    fn test_irr_iteration_cap_returns_last_estimate() {
        let s = series(
            dec!(1_000_000),
            vec![dec!(300_000), dec!(350_000), dec!(400_000)],
            dec!(10),
        );
        // A single permitted iteration cannot meet the tolerance here
        let solution = irr_with_params(&s, IRR_DEFAULT_GUESS, IRR_RATE_TOLERANCE, 1).unwrap();
        assert!(!solution.converged);
        assert_eq!(solution.iterations, 1);
        // The estimate is still a finite number, moved off the guess
        assert!(solution.rate.abs() < dec!(10_001));
    }

    #[test]
    fn test_irr_zero_derivative_short_circuits() {
        // All-zero flows: f'(r) is identically zero, so the solver must
        // hand back the guess untouched instead of dividing by zero
        let s = series(dec!(1_000), vec![dec!(0), dec!(0)], dec!(10));
        let solution = irr(&s).unwrap();
        assert!(!solution.converged);
        assert_eq!(solution.iterations, 0);
        assert_eq!(solution.rate, dec!(10));
    }

    #[test]
    fn test_irr_empty_series_rejected() {
        let s = series(dec!(1_000), vec![], dec!(10));
        assert!(irr(&s).is_err());
    }

    #[test]
    fn test_irr_tighter_tolerance_still_converges() {
        let s = series(
            dec!(1_000),
            vec![dec!(500), dec!(500), dec!(500)],
            dec!(10),
        );
        let loose = irr_with_params(&s, IRR_DEFAULT_GUESS, dec!(0.01), 100).unwrap();
        let tight = irr_with_params(&s, IRR_DEFAULT_GUESS, dec!(0.0000001), 100).unwrap();
        assert!(loose.converged);
        assert!(tight.converged);
        assert!(tight.iterations >= loose.iterations);
        assert!((tight.rate - loose.rate).abs() < dec!(1));
    }

    #[test]
    fn test_irr_negative_for_losing_project() {
        let s = series(dec!(1_000), vec![dec!(300), dec!(300), dec!(300)], dec!(10));
        let solution = irr(&s).unwrap();
        assert!(solution.converged);
        assert!(solution.rate < Decimal::ZERO);
    }
}
