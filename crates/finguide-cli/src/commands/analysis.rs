use clap::{Args, ValueEnum};
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tracing::info;

use finguide_core::ratios::{compute_ratios_with, AnalysisProfile, NetResultPolicy};
use finguide_core::session::{run_analysis, Session};
use finguide_core::statements::{BalanceSheet, IncomeStatement};

use crate::input;

/// How net result is derived for profitability ratios
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum NetResultArg {
    /// Revenue minus charges, financial income ignored
    Quirk,
    /// Bottom of the intermediate-balance cascade
    Cascade,
}

impl From<NetResultArg> for NetResultPolicy {
    fn from(arg: NetResultArg) -> Self {
        match arg {
            NetResultArg::Quirk => NetResultPolicy::ChargesExcludingFinancialIncome,
            NetResultArg::Cascade => NetResultPolicy::IntermediateBalances,
        }
    }
}

/// Session input shared by every analysis command
#[derive(Args)]
pub struct SessionArgs {
    /// Path to a session JSON file (otherwise read from stdin)
    #[arg(long)]
    pub input: Option<String>,

    /// Profile preset: comprehensive or essentials
    #[arg(long)]
    pub profile: Option<String>,

    /// Path to a JSON or YAML analysis profile
    #[arg(long, conflicts_with = "profile")]
    pub profile_file: Option<String>,

    /// Net-result policy, overriding the profile
    #[arg(long)]
    pub net_result: Option<NetResultArg>,
}

#[derive(Args)]
pub struct TemplateArgs {
    /// Start from the essentials profile instead of comprehensive
    #[arg(long)]
    pub essentials: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Directory receiving one CSV file per sheet
    #[arg(long)]
    pub out_dir: String,
}

pub fn run_template(args: TemplateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let profile = if args.essentials {
        AnalysisProfile::essentials()
    } else {
        AnalysisProfile::comprehensive()
    };
    Ok(json!({
        "balance_sheet": BalanceSheet::template(),
        "income_statement": IncomeStatement::template(),
        "profile": profile,
    }))
}

pub fn run_ratios(args: SessionArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let session = load_session(&args)?;
    let report = compute_ratios_with(
        session.balance_sheet.as_ref(),
        session.income_statement.as_ref(),
        &session.profile,
        &session.missing,
    );
    Ok(serde_json::to_value(report)?)
}

pub fn run_sig(args: SessionArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let session = load_session(&args)?;
    sig_rows(&session)
}

/// Cascade rows, refused when the statement is absent, incomplete or overflows.
fn sig_rows(session: &Session) -> Result<Value, Box<dyn std::error::Error>> {
    let balances = session
        .intermediate_balances()
        .map_err(|diagnostic| diagnostic.message)?;
    let rows: Vec<Value> = balances
        .iter()
        .map(|(kind, value)| {
            json!({
                "balance": kind.label(),
                "value": value,
                "formula": kind.formula(),
            })
        })
        .collect();
    Ok(Value::Array(rows))
}

pub fn run_recommend(args: SessionArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let session = load_session(&args)?;
    let analysis = session.analyze();
    let interpretations: Vec<Value> = analysis
        .interpretations
        .iter()
        .map(|i| {
            json!({
                "ratio": i.kind.label(),
                "value": i.value,
                "band": i.band.label(),
                "interpretation": i.message(),
            })
        })
        .collect();
    Ok(json!({
        "recommendations": analysis.recommendations,
        "interpretations": interpretations,
    }))
}

pub fn run_analyze(args: SessionArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let session = load_session(&args)?;
    Ok(serde_json::to_value(run_analysis(&session))?)
}

pub fn run_export(args: ExportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let session = load_session(&args.session)?;
    let workbook = session
        .workbook()
        .ok_or("both a balance sheet and an income statement are required for export")?;

    let out_dir = PathBuf::from(&args.out_dir);
    fs::create_dir_all(&out_dir)
        .map_err(|e| format!("Failed to create '{}': {}", out_dir.display(), e))?;

    let mut files = Vec::with_capacity(workbook.sheets.len());
    for sheet in &workbook.sheets {
        let path = out_dir.join(format!("{}.csv", file_stem(&sheet.name)));
        let mut wtr = csv::Writer::from_path(&path)
            .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))?;
        wtr.write_record(&sheet.headers)?;
        for row in &sheet.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        info!(sheet = %sheet.name, rows = sheet.rows.len(), "sheet exported");
        files.push(path.display().to_string());
    }

    Ok(json!({
        "out_dir": out_dir.display().to_string(),
        "files": files,
    }))
}

/// Build the session from input, then apply profile flags on top.
pub(crate) fn load_session(args: &SessionArgs) -> Result<Session, Box<dyn std::error::Error>> {
    let value = input::read_value(args.input.as_deref())?
        .ok_or("--input <session.json> or stdin required")?;
    let session = Session::from_value(&value)?;
    apply_profile_flags(session, args)
}

/// `--profile-file` or `--profile` replace the session's profile; `--net-result` wins last.
fn apply_profile_flags(
    mut session: Session,
    args: &SessionArgs,
) -> Result<Session, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.profile_file {
        session.profile = input::file::read_config(path)?;
    } else if let Some(ref preset) = args.profile {
        session.profile = AnalysisProfile::from_preset(preset)?;
    }
    if let Some(policy) = args.net_result {
        session.profile.net_result = policy.into();
    }
    Ok(session)
}

/// "Intermediate Balances" -> "intermediate_balances"
fn file_stem(sheet_name: &str) -> String {
    sheet_name
        .split_whitespace()
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}
