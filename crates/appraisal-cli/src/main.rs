mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::appraise::SeriesArgs;

/// Capital-budgeting investment appraisal
#[derive(Parser)]
#[command(
    name = "capex",
    version,
    about = "Capital-budgeting investment appraisal with decimal precision",
    long_about = "Evaluates a capital investment project from a fixed schedule of \
                  period-end cash flows. Computes NPV, profitability index, payback \
                  and discounted payback, IRR (Newton-Raphson), MIRR, ARR and average \
                  ROR, and maps each metric to an accept/reject verdict."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full appraisal suite over one cash-flow series
    Appraise(SeriesArgs),
    /// Net present value only
    Npv(SeriesArgs),
    /// Internal rate of return only
    Irr(SeriesArgs),
    /// Payback, discounted payback, and payback reciprocal only
    Payback(SeriesArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Appraise(args) => commands::appraise::run_appraise(args),
        Commands::Npv(args) => commands::appraise::run_npv(args),
        Commands::Irr(args) => commands::appraise::run_irr(args),
        Commands::Payback(args) => commands::appraise::run_payback(args),
        Commands::Version => {
            println!("capex {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
