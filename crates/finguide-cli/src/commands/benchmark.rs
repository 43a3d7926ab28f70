use clap::Args;
use serde_json::{json, Value};

use finguide_core::benchmarks::{compare_to_sector, Sector};
use finguide_core::ratios::compute_ratios_with;

use super::analysis::{load_session, SessionArgs};

#[derive(Args)]
pub struct BenchmarkArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Commerce, Industry, Services, Technology or Construction
    #[arg(long)]
    pub sector: String,
}

pub fn run_benchmark(args: BenchmarkArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sector: Sector = args.sector.parse()?;
    let session = load_session(&args.session)?;
    let report = compute_ratios_with(
        session.balance_sheet.as_ref(),
        session.income_statement.as_ref(),
        &session.profile,
        &session.missing,
    );

    let rows: Vec<Value> = compare_to_sector(&report.ratios, sector)
        .into_iter()
        .map(|row| {
            json!({
                "ratio": row.ratio.label(),
                "company": row.company,
                "sector": row.sector,
                "difference": row.difference,
            })
        })
        .collect();
    Ok(Value::Array(rows))
}
