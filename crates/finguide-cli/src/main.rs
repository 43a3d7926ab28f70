mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::analysis::{ExportArgs, SessionArgs, TemplateArgs};
use commands::benchmark::BenchmarkArgs;
use commands::budget::{CashBudgetArgs, SalesBudgetArgs, WhatIfArgs};

/// Financial statement analysis for small businesses
#[derive(Parser)]
#[command(
    name = "finguide",
    version,
    about = "Financial statement analysis for small businesses",
    long_about = "Computes liquidity, solvency and profitability ratios, intermediate \
                  management balances and rule-based recommendations from a balance \
                  sheet and income statement, with decimal precision. Also runs \
                  sales, cash and what-if budget simulations."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log filter for stderr (overridden by RUST_LOG)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print an empty session file (zero-filled statements and default profile)
    Template(TemplateArgs),
    /// Compute financial ratios
    Ratios(SessionArgs),
    /// Compute intermediate management balances
    Sig(SessionArgs),
    /// Rule-based recommendations with ratio interpretations
    Recommend(SessionArgs),
    /// Full analysis: ratios, balances, recommendations and diagnostics
    Analyze(SessionArgs),
    /// Write the report workbook as one CSV file per sheet
    Export(ExportArgs),
    /// Compare ratios against a sector reference
    Benchmark(BenchmarkArgs),
    /// Twelve-month sales budget
    SalesBudget(SalesBudgetArgs),
    /// Twelve-month cash budget
    CashBudget(CashBudgetArgs),
    /// Pessimistic / realistic / optimistic profitability scenarios
    WhatIf(WhatIfArgs),
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

    if let Err(e) = logging::init(&cli.log_level) {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(1);
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Template(args) => commands::analysis::run_template(args),
        Commands::Ratios(args) => commands::analysis::run_ratios(args),
        Commands::Sig(args) => commands::analysis::run_sig(args),
        Commands::Recommend(args) => commands::analysis::run_recommend(args),
        Commands::Analyze(args) => commands::analysis::run_analyze(args),
        Commands::Export(args) => commands::analysis::run_export(args),
        Commands::Benchmark(args) => commands::benchmark::run_benchmark(args),
        Commands::SalesBudget(args) => commands::budget::run_sales_budget(args),
        Commands::CashBudget(args) => commands::budget::run_cash_budget(args),
        Commands::WhatIf(args) => commands::budget::run_what_if(args),
        Commands::Version => {
            println!("finguide {}", env!("CARGO_PKG_VERSION"));
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
