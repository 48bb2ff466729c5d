use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

use super::irr::IrrSolution;

/// Accept/reject verdict under a single appraisal technique's decision rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Accept,
    Reject,
}

/// NPV rule: accept a value-creating project (NPV strictly positive).
pub fn npv_verdict(npv: Money) -> Verdict {
    if npv > Decimal::ZERO {
        Verdict::Accept
    } else {
        Verdict::Reject
    }
}

/// PI rule: accept when discounted inflows exceed the outlay (PI > 1).
pub fn profitability_index_verdict(pi: Decimal) -> Verdict {
    if pi > Decimal::ONE {
        Verdict::Accept
    } else {
        Verdict::Reject
    }
}

/// Hurdle-rate rule for IRR and MIRR: accept when the project's rate beats
/// the cost of capital. Both sides are percentages.
pub fn hurdle_verdict(rate: Rate, hurdle: Rate) -> Verdict {
    if rate > hurdle {
        Verdict::Accept
    } else {
        Verdict::Reject
    }
}

/// Verdicts for every technique that carries a decision rule. Undefined
/// metrics carry no verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionSummary {
    pub npv: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profitability_index: Option<Verdict>,
    pub irr: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirr: Option<Verdict>,
}

/// Map the computed metrics to per-technique verdicts. Consumes only the
/// finished numbers, never the calculators themselves.
pub fn evaluate(
    npv: Money,
    profitability_index: Option<Decimal>,
    irr: &IrrSolution,
    mirr: Option<Rate>,
    discount_rate: Rate,
) -> DecisionSummary {
    DecisionSummary {
        npv: npv_verdict(npv),
        profitability_index: profitability_index.map(profitability_index_verdict),
        irr: hurdle_verdict(irr.rate, discount_rate),
        mirr: mirr.map(|m| hurdle_verdict(m, discount_rate)),
    }
}
