//! Folds classified records into running totals and derives the cost summary.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_core::{AmountExtractor, round_cents};
use tally_ingest::Block;

use crate::classifier::{Classification, classify};
use crate::spend::SpendChain;

/// Share of marketplace income assumed to have been paid in real money.
pub fn default_resale_discount() -> Decimal {
    Decimal::new(90, 2)
}

/// What a single block adds to the totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockContribution {
    pub date: Option<NaiveDate>,
    pub header: String,
    pub classification: Classification,
    /// Spend strategy that produced `external`, if any did.
    pub strategy: Option<&'static str>,
    pub external: Decimal,
    pub market_income: Decimal,
}

impl BlockContribution {
    pub fn is_zero(&self) -> bool {
        self.external.is_zero() && self.market_income.is_zero()
    }
}

/// Unrounded running sums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub external_spend: Decimal,
    pub market_income: Decimal,
}

/// Final figures, rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostSummary {
    #[serde(with = "rust_decimal::serde::str")]
    pub market_income: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub market_cost_basis: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub direct_external: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_cost: Decimal,
}

pub struct CostAggregator {
    amounts: AmountExtractor,
    chain: SpendChain,
    resale_discount: Decimal,
}

impl CostAggregator {
    pub fn new(amounts: AmountExtractor, resale_discount: Decimal) -> Self {
        Self {
            amounts,
            chain: SpendChain::default(),
            resale_discount,
        }
    }

    pub fn with_chain(mut self, chain: SpendChain) -> Self {
        self.chain = chain;
        self
    }

    pub fn amounts(&self) -> &AmountExtractor {
        &self.amounts
    }

    /// External spend and marketplace income for one block.
    pub fn contribution(&self, block: &Block) -> BlockContribution {
        let classification = classify(block);
        let precision = self.amounts.precision();

        let market_income = if classification.is_marketplace {
            precision.sum(block.lines().map(|l| self.amounts.credit_total(l)))
        } else {
            Decimal::ZERO
        };

        let estimate = if classification.is_external_payment {
            self.chain.estimate(block, &self.amounts)
        } else {
            None
        };

        let contribution = BlockContribution {
            date: block.date,
            header: block.header().to_string(),
            classification,
            strategy: estimate.map(|e| e.strategy),
            external: estimate.map(|e| e.amount).unwrap_or(Decimal::ZERO),
            market_income,
        };

        if !contribution.is_zero() {
            tracing::debug!(
                date = ?contribution.date,
                header = %contribution.header,
                strategy = ?contribution.strategy,
                external = %contribution.external,
                market_income = %contribution.market_income,
                "block contribution"
            );
        }

        contribution
    }

    /// Left-to-right fold over all blocks.
    pub fn fold(&self, blocks: &[Block]) -> (Totals, Vec<BlockContribution>) {
        let precision = self.amounts.precision();
        let mut totals = Totals::default();
        let mut contributions = Vec::with_capacity(blocks.len());

        for block in blocks {
            let c = self.contribution(block);
            totals.external_spend = precision.add(totals.external_spend, c.external);
            totals.market_income = precision.add(totals.market_income, c.market_income);
            contributions.push(c);
        }

        (totals, contributions)
    }

    /// Discount marketplace income to its assumed cost basis and add the
    /// direct spend. Each figure is rounded to cents before it is combined.
    pub fn summarize(&self, totals: &Totals) -> CostSummary {
        let precision = self.amounts.precision();
        let market_cost_basis =
            round_cents(precision.mul(totals.market_income, self.resale_discount));
        let direct_external = round_cents(totals.external_spend);
        let total_cost = round_cents(precision.add(direct_external, market_cost_basis));

        CostSummary {
            market_income: round_cents(totals.market_income),
            market_cost_basis,
            direct_external,
            total_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use tally_core::Precision;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn block(lines: &[&str]) -> Block {
        Block {
            date: None,
            dated: true,
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }

    fn aggregator() -> CostAggregator {
        let amounts = AmountExtractor::new(Precision::default()).unwrap();
        CostAggregator::new(amounts, default_resale_discount())
    }

    #[test]
    fn test_default_discount() {
        assert_eq!(default_resale_discount(), d("0.90"));
    }

    #[test]
    fn test_marketplace_block() {
        let b = block(&["2025 年 12 月 1 日\tSteam 社区市场", "市场交易", "资金", "+¥128.00"]);
        let c = aggregator().contribution(&b);
        assert_eq!(c.market_income, d("128.00"));
        assert_eq!(c.external, Decimal::ZERO);
        assert_eq!(c.strategy, None);
    }

    #[test]
    fn test_marketplace_income_sums_every_credit() {
        let b = block(&["Steam 社区市场", "资金", "+¥128.00\t+¥128.00\t¥31.37", "-¥2.00"]);
        assert_eq!(aggregator().contribution(&b).market_income, d("256.00"));
    }

    #[test]
    fn test_payment_block() {
        let b = block(&["2025 年 11 月 20 日\tBaldur's Gate 3", "支付宝", "¥59.00"]);
        let c = aggregator().contribution(&b);
        assert_eq!(c.external, d("59.00"));
        assert_eq!(c.market_income, Decimal::ZERO);
        assert_eq!(c.strategy, Some("residual-amount-lines"));
    }

    #[test]
    fn test_marketplace_and_payment_in_one_block() {
        let b = block(&["Steam 社区市场", "资金", "+¥5.00", "微信支付\t¥ 20.00"]);
        let c = aggregator().contribution(&b);
        assert!(c.classification.is_marketplace && c.classification.is_external_payment);
        assert_eq!(c.market_income, d("5.00"));
        assert_eq!(c.external, d("20.00"));
        assert_eq!(c.strategy, Some("direct-method-lines"));
    }

    #[test]
    fn test_custom_chain() {
        use crate::spend::{LargestSignedAmount, SpendChain};

        let b = block(&["支付宝\t¥ 20.00", "-¥ 35.00\t¥ 0.00"]);
        let default_chain = aggregator().contribution(&b);
        assert_eq!(default_chain.external, d("20.00"));

        let signed_only = aggregator().with_chain(SpendChain::new(vec![Box::new(LargestSignedAmount)]));
        let c = signed_only.contribution(&b);
        assert_eq!(c.external, d("35.00"));
        assert_eq!(c.strategy, Some("largest-signed-amount"));
    }

    #[test]
    fn test_irrelevant_block_contributes_nothing() {
        let b = block(&["这是一段说明文字", "没有金额"]);
        let c = aggregator().contribution(&b);
        assert!(c.is_zero());

        let empty = Block {
            date: None,
            dated: false,
            lines: vec![],
        };
        assert!(aggregator().contribution(&empty).is_zero());
    }

    #[test]
    fn test_amounts_outside_classified_blocks_are_ignored() {
        let b = block(&["2025 年 1 月 1 日\t购买", "¥ 99.00"]);
        assert!(aggregator().contribution(&b).is_zero());
    }

    #[test]
    fn test_fold_and_summarize() {
        let blocks = vec![
            block(&["Steam 社区市场", "资金", "+¥50.00"]),
            block(&["微信支付 ¥60.00"]),
            block(&["Visa", "¥40.00"]),
        ];
        let agg = aggregator();
        let (totals, contributions) = agg.fold(&blocks);
        assert_eq!(contributions.len(), 3);
        assert_eq!(totals.external_spend, d("100.00"));
        assert_eq!(totals.market_income, d("50.00"));

        let summary = agg.summarize(&totals);
        assert_eq!(summary.market_cost_basis, d("45.00"));
        assert_eq!(summary.direct_external, d("100.00"));
        assert_eq!(summary.total_cost, d("145.00"));
    }

    #[test]
    fn test_summary_rounds_each_figure() {
        let totals = Totals {
            external_spend: d("10.005"),
            market_income: d("0.05"),
        };
        let summary = aggregator().summarize(&totals);
        assert_eq!(summary.direct_external, d("10.00"));
        assert_eq!(summary.market_cost_basis, d("0.04"));
        assert_eq!(summary.total_cost, d("10.04"));
    }
}
