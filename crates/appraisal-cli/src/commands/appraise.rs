use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use appraisal_core::appraisal::{self, irr, npv, payback};
use appraisal_core::types::CashFlowSeries;

use crate::input;

/// Cash-flow series arguments shared by every appraisal subcommand
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SeriesArgs {
    /// Path to a JSON input file with the cash-flow series (overrides
    /// individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Initial investment at time 0, as a positive magnitude
    #[arg(long)]
    pub initial_investment: Option<Decimal>,

    /// Period-end cash flows (comma-separated, e.g. "300000,350000,-50000")
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub cash_flows: Option<Vec<Decimal>>,

    /// Discount rate as a percentage (e.g. 10 for 10%)
    #[arg(long)]
    pub discount_rate: Option<Decimal>,

    /// Reinvestment rate for MIRR as a percentage (defaults to the
    /// discount rate)
    #[arg(long)]
    pub reinvestment_rate: Option<Decimal>,

    /// Average annual accounting profit for ARR / average ROR
    #[arg(long)]
    pub average_annual_profit: Option<Decimal>,
}

fn resolve_series(args: SeriesArgs) -> Result<CashFlowSeries, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        Ok(input::read_json(path)?)
    } else if let Some(data) = input::read_stdin()? {
        Ok(serde_json::from_value(data)?)
    } else {
        let discount_rate = args
            .discount_rate
            .ok_or("--discount-rate is required (or provide --input)")?;

        Ok(CashFlowSeries {
            initial_investment: args
                .initial_investment
                .ok_or("--initial-investment is required (or provide --input)")?,
            cash_flows: args
                .cash_flows
                .ok_or("--cash-flows is required (or provide --input)")?,
            discount_rate,
            reinvestment_rate: args.reinvestment_rate.unwrap_or(discount_rate),
            average_annual_profit: args.average_annual_profit.unwrap_or(Decimal::ZERO),
        })
    }
}

pub fn run_appraise(args: SeriesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let series = resolve_series(args)?;
    let result = appraisal::appraise(&series)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_npv(args: SeriesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let series = resolve_series(args)?;
    let npv_value = npv::npv(&series)?;
    let pi = npv::profitability_index(&series)?;
    Ok(serde_json::json!({
        "npv": npv_value,
        "profitability_index": pi,
    }))
}

pub fn run_irr(args: SeriesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let series = resolve_series(args)?;
    let solution = irr::irr(&series)?;
    Ok(serde_json::to_value(solution)?)
}

pub fn run_payback(args: SeriesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let series = resolve_series(args)?;
    let plain = payback::payback(&series);
    let discounted = payback::discounted_payback(&series)?;
    let reciprocal = payback::payback_reciprocal(&series);
    Ok(serde_json::json!({
        "payback": plain,
        "discounted_payback": discounted,
        "payback_reciprocal": reciprocal,
    }))
}
