//! tally-finance: record classification, external-spend estimation, cost
//! aggregation, wallet balance detection and the cost report.

pub mod aggregator;
pub mod balance;
pub mod classifier;
pub mod report;
pub mod spend;

pub use aggregator::{BlockContribution, CostAggregator, CostSummary, Totals, default_resale_discount};
pub use balance::detect_wallet_balance;
pub use classifier::{Classification, classify};
pub use report::{CostReport, breakdown_json, render_breakdown};
pub use spend::{SpendChain, SpendEstimate, SpendStrategy};

use anyhow::Result;
use rust_decimal::Decimal;
use std::path::Path;
use tally_core::{AmountExtractor, DateMarker, Precision};
use tally_ingest::{read_lines, split_blocks};

/// Tunables for a cost run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostSettings {
    pub precision: Precision,
    pub resale_discount: Decimal,
}

impl Default for CostSettings {
    fn default() -> Self {
        Self {
            precision: Precision::default(),
            resale_discount: default_resale_discount(),
        }
    }
}

/// Result of running the cost pipeline over one document.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub report: CostReport,
    pub totals: Totals,
    pub contributions: Vec<BlockContribution>,
}

/// Segment, classify and fold the document lines, then look for the balance.
pub fn analyze(lines: &[String], settings: &CostSettings) -> Result<Analysis> {
    let marker = DateMarker::new()?;
    let amounts = AmountExtractor::new(settings.precision)?;

    let blocks = split_blocks(lines, &marker);
    let aggregator = CostAggregator::new(amounts, settings.resale_discount);
    let (totals, contributions) = aggregator.fold(&blocks);
    let summary = aggregator.summarize(&totals);
    let wallet_balance = detect_wallet_balance(lines, aggregator.amounts());

    tracing::info!(
        blocks = blocks.len(),
        external_spend = %totals.external_spend,
        market_income = %totals.market_income,
        total_cost = %summary.total_cost,
        balance_found = wallet_balance.is_some(),
        "cost analysis complete"
    );

    Ok(Analysis {
        report: CostReport::new(summary, settings.resale_discount, wallet_balance),
        totals,
        contributions,
    })
}

pub fn analyze_file(path: &Path, settings: &CostSettings) -> Result<Analysis> {
    let lines = read_lines(path)?;
    analyze(&lines, settings)
}
