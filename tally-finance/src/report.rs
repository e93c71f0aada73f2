//! Printable and serialisable cost report.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use tally_core::round_cents;

use crate::aggregator::{BlockContribution, CostSummary};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostReport {
    #[serde(flatten)]
    pub summary: CostSummary,
    #[serde(with = "rust_decimal::serde::str")]
    pub resale_discount: Decimal,
    /// `None` when no balance row was recognised.
    #[serde(with = "rust_decimal::serde::str_option")]
    pub wallet_balance: Option<Decimal>,
}

impl CostReport {
    pub fn new(summary: CostSummary, resale_discount: Decimal, wallet_balance: Option<Decimal>) -> Self {
        Self {
            summary,
            resale_discount,
            wallet_balance: wallet_balance.map(round_cents),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serialize cost report")
    }
}

impl fmt::Display for CostReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;
        writeln!(f, "====== Cost summary ======")?;
        writeln!(f, "Marketplace income (wallet credit):      {:.2}", s.market_income)?;
        writeln!(
            f,
            "Marketplace cost basis (x{}):          {:.2}",
            self.resale_discount.normalize(),
            s.market_cost_basis
        )?;
        writeln!(f, "Direct spend (e-wallet / bank card):     {:.2}", s.direct_external)?;
        writeln!(f, "------------------------------------------------")?;
        writeln!(f, "Estimated total cost:                    {:.2}", s.total_cost)?;
        match self.wallet_balance {
            Some(balance) => writeln!(f, "Current wallet balance (from history):   {balance:.2}")?,
            None => writeln!(f, "Current wallet balance: not determined from the history.")?,
        }
        writeln!(f, "If the totals look wrong, check that the whole history was pasted.")?;
        write!(f, "==========================")
    }
}

#[derive(Serialize)]
struct DetailedReport<'a> {
    #[serde(flatten)]
    report: &'a CostReport,
    blocks: Vec<&'a BlockContribution>,
}

/// Report plus every block that moved either total, as JSON.
pub fn breakdown_json(report: &CostReport, contributions: &[BlockContribution]) -> Result<String> {
    let detailed = DetailedReport {
        report,
        blocks: contributions.iter().filter(|c| !c.is_zero()).collect(),
    };
    serde_json::to_string_pretty(&detailed).context("serialize cost breakdown")
}

/// One line per block that moved either total.
pub fn render_breakdown(contributions: &[BlockContribution]) -> String {
    let mut out = String::new();
    for c in contributions.iter().filter(|c| !c.is_zero()) {
        let date = c
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        let header = c.header.replace('\t', " ");
        out.push_str(&format!(
            "{date}  external={:.2} [{}]  market={:.2}  | {header}\n",
            round_cents(c.external),
            c.strategy.unwrap_or("-"),
            round_cents(c.market_income),
        ));
    }
    out
}
