use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Serialize;

use finguide_core::session::Session;
use finguide_core::statements::ingest::income_statement_from_value;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn to_json(value: &impl Serialize) -> NapiResult<String> {
    serde_json::to_string(value).map_err(to_napi_error)
}

/// Parse a session document: `{ balance_sheet?, income_statement?, profile? }`.
fn parse_session(session_json: &str) -> NapiResult<Session> {
    let value: serde_json::Value = serde_json::from_str(session_json).map_err(to_napi_error)?;
    Session::from_value(&value).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

#[napi]
pub fn balance_sheet_template() -> NapiResult<String> {
    to_json(&finguide_core::statements::BalanceSheet::template())
}

#[napi]
pub fn income_statement_template() -> NapiResult<String> {
    to_json(&finguide_core::statements::IncomeStatement::template())
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_ratios(session_json: String) -> NapiResult<String> {
    let session = parse_session(&session_json)?;
    let report = finguide_core::ratios::compute_ratios_with(
        session.balance_sheet.as_ref(),
        session.income_statement.as_ref(),
        &session.profile,
        &session.missing,
    );
    to_json(&report)
}

#[napi]
pub fn intermediate_balances(income_statement_json: String) -> NapiResult<String> {
    let value: serde_json::Value =
        serde_json::from_str(&income_statement_json).map_err(to_napi_error)?;
    let ingested = income_statement_from_value(&value).map_err(to_napi_error)?;
    if !ingested.missing.is_empty() {
        let names: Vec<String> = ingested.missing.iter().map(|m| m.to_string()).collect();
        return Err(to_napi_error(format!(
            "Intermediate balances need every income-statement item; missing {}",
            names.join(", ")
        )));
    }
    let balances = finguide_core::sig::compute_intermediate_balances(&ingested.statement)
        .ok_or_else(|| to_napi_error("Intermediate balances overflowed decimal range"))?;
    to_json(&balances)
}

#[napi]
pub fn recommendations(ratios_json: String) -> NapiResult<String> {
    let ratios: finguide_core::ratios::RatioSet =
        serde_json::from_str(&ratios_json).map_err(to_napi_error)?;
    to_json(&finguide_core::recommendations::generate_recommendations(
        &ratios,
    ))
}

#[napi]
pub fn analyze(session_json: String) -> NapiResult<String> {
    let session = parse_session(&session_json)?;
    to_json(&finguide_core::session::run_analysis(&session))
}

#[napi]
pub fn build_report(session_json: String) -> NapiResult<String> {
    let session = parse_session(&session_json)?;
    let workbook = session.workbook().ok_or_else(|| {
        to_napi_error("both a balance sheet and an income statement are required")
    })?;
    to_json(&workbook)
}

#[napi]
pub fn compare_to_sector(ratios_json: String, sector: String) -> NapiResult<String> {
    let ratios: finguide_core::ratios::RatioSet =
        serde_json::from_str(&ratios_json).map_err(to_napi_error)?;
    let sector: finguide_core::benchmarks::Sector = sector.parse().map_err(to_napi_error)?;
    to_json(&finguide_core::benchmarks::compare_to_sector(
        &ratios, sector,
    ))
}

// ---------------------------------------------------------------------------
// Budget
// ---------------------------------------------------------------------------

#[napi]
pub fn sales_budget(input_json: String) -> NapiResult<String> {
    let input: finguide_core::budget::SalesBudgetInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finguide_core::budget::sales_budget(&input).map_err(to_napi_error)?;
    to_json(&output)
}

#[napi]
pub fn cash_budget(input_json: String) -> NapiResult<String> {
    let input: finguide_core::budget::CashBudgetInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finguide_core::budget::cash_budget(&input).map_err(to_napi_error)?;
    to_json(&output)
}

#[napi]
pub fn what_if(input_json: String) -> NapiResult<String> {
    let input: finguide_core::budget::WhatIfInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finguide_core::budget::what_if(&input).map_err(to_napi_error)?;
    to_json(&output)
}
