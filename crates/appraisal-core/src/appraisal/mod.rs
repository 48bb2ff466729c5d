//! Capital-budgeting appraisal of a fixed schedule of period-end cash flows.
//!
//! Each technique is a pure, stateless function over an immutable
//! [`CashFlowSeries`]; none depends on another's output, only on the shared
//! discounting primitive in [`crate::time_value`], so they can run in any
//! order with identical results. [`appraise`] runs the full suite and maps
//! every metric to an accept/reject verdict.

pub mod accounting;
pub mod decision;
pub mod irr;
pub mod mirr;
pub mod npv;
pub mod payback;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::AppraisalError;
use crate::types::{with_metadata, CashFlowSeries, ComputationOutput, Money, Rate};
use crate::AppraisalResult;

pub use decision::{DecisionSummary, Verdict};
pub use irr::{IrrSolution, IRR_DEFAULT_GUESS, IRR_RATE_TOLERANCE, MAX_IRR_ITERATIONS};
pub use payback::Payback;

/// Every appraisal metric for one project, plus the per-technique verdicts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppraisalOutput {
    /// Net present value at the stated discount rate
    pub npv: Money,
    /// Discounted inflows per unit of investment; absent when the
    /// investment is zero
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profitability_index: Option<Decimal>,
    /// Undiscounted payback period
    pub payback: Payback,
    /// Payback period on discounted flows
    pub discounted_payback: Payback,
    /// 100 / payback years; zero when never recovered
    pub payback_reciprocal: Decimal,
    /// Internal rate of return with convergence status
    pub irr: IrrSolution,
    /// Modified IRR as a percentage; absent when undefined
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirr: Option<Rate>,
    /// Average profit over average (half) investment, as a percentage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounting_rate_of_return: Option<Rate>,
    /// Average profit over the full investment, as a percentage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rate_of_return: Option<Rate>,
    /// Accept/reject per technique
    pub decisions: DecisionSummary,
}

/// Run the full appraisal suite over one cash-flow series.
pub fn appraise(series: &CashFlowSeries) -> AppraisalResult<ComputationOutput<AppraisalOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_series(series)?;

    let npv_value = npv::npv(series)?;
    let pi = npv::profitability_index(series)?;
    let payback_value = payback::payback(series);
    let discounted_payback_value = payback::discounted_payback(series)?;
    let payback_reciprocal_value = payback::payback_reciprocal(series);
    let irr_solution = irr::irr(series)?;
    let mirr_value = mirr::mirr(series)?;
    let arr = accounting::accounting_rate_of_return(series);
    let avg_ror = accounting::average_rate_of_return(series);

    if !irr_solution.converged {
        warnings.push(format!(
            "IRR did not meet the {IRR_RATE_TOLERANCE} rate tolerance after {} iterations; \
             the reported {:.4}% is best-effort and unverified",
            irr_solution.iterations, irr_solution.rate
        ));
    }
    if series.initial_investment.is_zero() {
        warnings.push(
            "Initial investment is zero; PI, MIRR, ARR and average ROR are undefined".into(),
        );
    }
    if !payback_value.is_recovered() {
        warnings.push(format!(
            "Initial investment is not recovered within the {}-period horizon",
            series.cash_flows.len()
        ));
    }

    let decisions = decision::evaluate(
        npv_value,
        pi,
        &irr_solution,
        mirr_value,
        series.discount_rate,
    );

    let output = AppraisalOutput {
        npv: npv_value,
        profitability_index: pi,
        payback: payback_value,
        discounted_payback: discounted_payback_value,
        payback_reciprocal: payback_reciprocal_value,
        irr: irr_solution,
        mirr: mirr_value,
        accounting_rate_of_return: arr,
        average_rate_of_return: avg_ror,
        decisions,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Capital Budgeting Appraisal (NPV / PI / Payback / IRR / MIRR / ARR)",
        series,
        warnings,
        elapsed,
        output,
    ))
}

/// Check the series-level invariants shared by every technique.
fn validate_series(series: &CashFlowSeries) -> AppraisalResult<()> {
    if series.cash_flows.is_empty() {
        return Err(AppraisalError::InsufficientData(
            "Appraisal requires at least one cash flow".into(),
        ));
    }
    if series.discount_rate <= dec!(-100) {
        return Err(AppraisalError::InvalidInput {
            field: "discount_rate".into(),
            reason: "Discount rate must be greater than -100%".into(),
        });
    }
    if series.reinvestment_rate <= dec!(-100) {
        return Err(AppraisalError::InvalidInput {
            field: "reinvestment_rate".into(),
            reason: "Reinvestment rate must be greater than -100%".into(),
        });
    }
    if series.initial_investment < Decimal::ZERO {
        return Err(AppraisalError::InvalidInput {
            field: "initial_investment".into(),
            reason: "Initial investment is the time-0 outflow stored as a positive magnitude"
                .into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_series() -> CashFlowSeries {
        CashFlowSeries {
            initial_investment: dec!(1_000_000),
            cash_flows: vec![
                dec!(300_000),
                dec!(350_000),
                dec!(400_000),
                dec!(450_000),
                dec!(500_000),
            ],
            discount_rate: dec!(10),
            reinvestment_rate: dec!(8),
            average_annual_profit: dec!(200_000),
        }
    }

    #[test]
    fn test_appraise_full_suite() {
        let result = appraise(&sample_series()).unwrap();
        let out = &result.result;

        assert!((out.npv - dec!(480_326)).abs() < dec!(5));
        assert!(out.profitability_index.is_some());
        assert!(out.payback.is_recovered());
        assert!(out.discounted_payback.is_recovered());
        assert!(out.irr.converged);
        assert!(out.mirr.is_some());
        assert_eq!(out.accounting_rate_of_return, Some(dec!(40)));
        assert_eq!(out.average_rate_of_return, Some(dec!(20)));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_appraise_all_decisions_accept() {
        let result = appraise(&sample_series()).unwrap();
        let d = &result.result.decisions;

        assert_eq!(d.npv, Verdict::Accept);
        assert_eq!(d.profitability_index, Some(Verdict::Accept));
        assert_eq!(d.irr, Verdict::Accept);
        assert_eq!(d.mirr, Some(Verdict::Accept));
    }

    #[test]
    fn test_appraise_zero_investment_warns() {
        let mut series = sample_series();
        series.initial_investment = Decimal::ZERO;

        let result = appraise(&series).unwrap();
        let out = &result.result;

        assert!(out.profitability_index.is_none());
        assert!(out.mirr.is_none());
        assert!(out.accounting_rate_of_return.is_none());
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_appraise_not_recovered_warns() {
        let mut series = sample_series();
        series.cash_flows = vec![dec!(100), dec!(100)];

        let result = appraise(&series).unwrap();
        assert_eq!(result.result.payback, Payback::NotRecovered);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("not recovered")));
    }

    #[test]
    fn test_appraise_empty_flows_rejected() {
        let mut series = sample_series();
        series.cash_flows = vec![];
        assert!(appraise(&series).is_err());
    }

    #[test]
    fn test_appraise_rate_floor_rejected() {
        let mut series = sample_series();
        series.discount_rate = dec!(-100);
        assert!(appraise(&series).is_err());
    }

    #[test]
    fn test_appraise_negative_investment_rejected() {
        let mut series = sample_series();
        series.initial_investment = dec!(-1);
        assert!(appraise(&series).is_err());
    }

    #[test]
    fn test_appraise_methodology_and_metadata() {
        let result = appraise(&sample_series()).unwrap();
        assert!(result.methodology.contains("Capital Budgeting"));
        assert_eq!(result.metadata.precision, "rust_decimal_128bit");
    }
}
