//! Owned analysis state: the statements being edited, what was never
//! supplied, and the profile to analyse them with.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::info;

use crate::ratios::{compute_ratios_with, interpret_all, AnalysisProfile, Interpretation, RatioSet};
use crate::recommendations::{generate_recommendations, Recommendation};
use crate::report::{build_workbook, Workbook};
use crate::sig::{compute_intermediate_balances, BalanceKind, IntermediateBalances};
use crate::statements::ingest::{
    balance_sheet_from_value, income_statement_from_value, unknown_key_diagnostic, Ingested,
};
use crate::statements::{
    BalanceSheet, BalanceSheetItem, IncomeStatement, IncomeStatementItem, LineItem, MissingItems,
};
use crate::types::{with_metadata, ComputationOutput, Diagnostic, DiagnosticCode, Money, Severity};
use crate::FinGuideResult;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub balance_sheet: Option<BalanceSheet>,
    pub income_statement: Option<IncomeStatement>,
    pub missing: MissingItems,
    /// Input keys that matched no line item, kept for reporting.
    pub unknown_keys: Vec<String>,
    pub profile: AnalysisProfile,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything derived from a session in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub ratios: RatioSet,
    /// `None` when the income statement is absent, a cascade input is
    /// missing, or the cascade overflowed.
    pub intermediate_balances: Option<IntermediateBalances>,
    pub recommendations: Vec<Recommendation>,
    pub interpretations: Vec<Interpretation>,
    pub diagnostics: Vec<Diagnostic>,
    /// `None` without a balance sheet or when the total overflowed.
    pub total_assets: Option<Money>,
    pub total_liabilities: Option<Money>,
    pub balanced: Option<bool>,
}

impl Analysis {
    pub fn warnings(&self) -> Vec<String> {
        self.diagnostics
            .iter()
            .filter(|d| d.is_warning())
            .map(|d| d.message.clone())
            .collect()
    }
}

#[derive(Deserialize)]
struct SessionFile {
    #[serde(default)]
    balance_sheet: Option<Value>,
    #[serde(default)]
    income_statement: Option<Value>,
    #[serde(default)]
    profile: Option<AnalysisProfile>,
}

impl Session {
    /// Both statements present and zero-filled.
    pub fn new() -> Self {
        Self {
            balance_sheet: Some(BalanceSheet::template()),
            income_statement: Some(IncomeStatement::template()),
            missing: MissingItems::new(),
            unknown_keys: Vec::new(),
            profile: AnalysisProfile::default(),
        }
    }

    /// No statements loaded yet.
    pub fn empty() -> Self {
        Self {
            balance_sheet: None,
            income_statement: None,
            ..Self::new()
        }
    }

    pub fn with_profile(mut self, profile: AnalysisProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Load a session document of the form
    /// `{ "balance_sheet": {..}, "income_statement": {..}, "profile": {..} }`.
    /// Every key is optional.
    pub fn from_value(value: &Value) -> FinGuideResult<Self> {
        let file: SessionFile = serde_json::from_value(value.clone())?;
        let mut session = Self::empty();
        if let Some(profile) = file.profile {
            session.profile = profile;
        }
        if let Some(bs) = file.balance_sheet.as_ref() {
            let ingested = balance_sheet_from_value(bs)?;
            session.absorb(ingested, "balance_sheet", |s, bs| s.balance_sheet = Some(bs));
        }
        if let Some(is) = file.income_statement.as_ref() {
            let ingested = income_statement_from_value(is)?;
            session.absorb(ingested, "income_statement", |s, is| {
                s.income_statement = Some(is)
            });
        }
        Ok(session)
    }

    /// Replace the balance sheet; all of its items count as supplied.
    pub fn set_balance_sheet(&mut self, balance_sheet: BalanceSheet) {
        self.missing
            .retain(|item| !matches!(item, LineItem::BalanceSheet(_)));
        self.balance_sheet = Some(balance_sheet);
    }

    /// Replace the income statement; all of its items count as supplied.
    pub fn set_income_statement(&mut self, income_statement: IncomeStatement) {
        self.missing
            .retain(|item| !matches!(item, LineItem::IncomeStatement(_)));
        self.income_statement = Some(income_statement);
    }

    /// Set one amount. Starting from no balance sheet creates one in which
    /// every other item is still missing.
    pub fn set_balance_item(&mut self, item: BalanceSheetItem, amount: Money) {
        let missing = &mut self.missing;
        let bs = self.balance_sheet.get_or_insert_with(|| {
            missing.extend(BalanceSheetItem::ALL.into_iter().map(LineItem::from));
            BalanceSheet::template()
        });
        bs.set(item, amount);
        self.missing.remove(&LineItem::from(item));
    }

    /// Income-statement counterpart of [`Session::set_balance_item`].
    pub fn set_income_item(&mut self, item: IncomeStatementItem, amount: Money) {
        let missing = &mut self.missing;
        let is = self.income_statement.get_or_insert_with(|| {
            missing.extend(IncomeStatementItem::ALL.into_iter().map(LineItem::from));
            IncomeStatement::template()
        });
        is.set(item, amount);
        self.missing.remove(&LineItem::from(item));
    }

    /// Back to zero-filled statements, keeping the profile.
    pub fn reset(&mut self) {
        let profile = self.profile.clone();
        *self = Self::new().with_profile(profile);
    }

    pub fn analyze(&self) -> Analysis {
        let mut diagnostics = self.ingest_diagnostics();

        let report = compute_ratios_with(
            self.balance_sheet.as_ref(),
            self.income_statement.as_ref(),
            &self.profile,
            &self.missing,
        );
        diagnostics.extend(report.diagnostics);
        let ratios = report.ratios;

        let intermediate_balances = match self.intermediate_balances() {
            Ok(balances) => Some(balances),
            // the ratio engine already reported the absent statement
            Err(d) if d.code == DiagnosticCode::MissingInput => None,
            Err(d) => {
                diagnostics.push(d);
                None
            }
        };

        let recommendations = generate_recommendations(&ratios);
        let interpretations = interpret_all(&ratios);
        let bs = self.balance_sheet.as_ref();

        Analysis {
            recommendations,
            interpretations,
            intermediate_balances,
            diagnostics,
            total_assets: bs.and_then(BalanceSheet::total_assets),
            total_liabilities: bs.and_then(BalanceSheet::total_liabilities),
            balanced: bs.map(BalanceSheet::is_balanced),
            ratios,
        }
    }

    /// The SIG cascade, or why it cannot be computed: no income statement,
    /// a cascade input never supplied, or decimal overflow.
    pub fn intermediate_balances(&self) -> Result<IntermediateBalances, Diagnostic> {
        let Some(is) = self.income_statement.as_ref() else {
            return Err(Diagnostic::new(
                Severity::Info,
                DiagnosticCode::MissingInput,
                "Intermediate balances not yet computable: income statement not provided",
            )
            .about("intermediate_balances"));
        };

        let absent: Vec<String> = BalanceKind::NetResult
            .inputs()
            .into_iter()
            .map(LineItem::from)
            .filter(|item| self.missing.contains(item))
            .map(|item| item.to_string())
            .collect();
        if !absent.is_empty() {
            return Err(Diagnostic::new(
                Severity::Warning,
                DiagnosticCode::MissingLineItems,
                format!("Intermediate balances omitted: missing {}", absent.join(", ")),
            )
            .about("intermediate_balances"));
        }

        compute_intermediate_balances(is).ok_or_else(|| {
            Diagnostic::new(
                Severity::Warning,
                DiagnosticCode::Overflow,
                "Intermediate balances overflowed decimal range",
            )
            .about("intermediate_balances")
        })
    }

    /// The exportable report, once both statements are loaded. The
    /// intermediate-balances sheet is left empty when the cascade is not
    /// computable.
    pub fn workbook(&self) -> Option<Workbook> {
        let bs = self.balance_sheet.as_ref()?;
        let is = self.income_statement.as_ref()?;
        let ratios = compute_ratios_with(Some(bs), Some(is), &self.profile, &self.missing).ratios;
        let balances = self.intermediate_balances().ok();
        Some(build_workbook(bs, is, &ratios, balances.as_ref()))
    }

    fn absorb<T>(
        &mut self,
        ingested: Ingested<T>,
        prefix: &str,
        store: impl FnOnce(&mut Self, T),
    ) {
        self.missing.extend(ingested.missing);
        self.unknown_keys.extend(
            ingested
                .unknown_keys
                .into_iter()
                .map(|key| format!("{prefix}.{key}")),
        );
        store(self, ingested.statement);
    }

    fn ingest_diagnostics(&self) -> Vec<Diagnostic> {
        self.unknown_keys
            .iter()
            .map(|key| unknown_key_diagnostic(key))
            .collect()
    }
}

/// Analyse a session and wrap the result in the standard envelope.
pub fn run_analysis(session: &Session) -> ComputationOutput<Analysis> {
    let start = Instant::now();
    let analysis = session.analyze();
    let warnings = analysis.warnings();

    info!(
        ratios = analysis.ratios.len(),
        recommendations = analysis.recommendations.len(),
        warnings = warnings.len(),
        "analysis complete"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "profile": session.profile,
        "missing_items": session.missing.iter().map(|m| m.to_string()).collect::<Vec<_>>(),
        "inventory_days_basis": "360-day commercial year",
    });

    with_metadata(
        "Balance-sheet ratio analysis with intermediate management balances",
        &assumptions,
        warnings,
        elapsed,
        analysis,
    )
}
