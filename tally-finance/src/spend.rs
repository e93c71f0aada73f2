//! External-spend estimation for payment records.
//!
//! Payment records come in several layouts, so the amount is recovered by an
//! ordered chain of strategies, most specific first. The first strategy that
//! finds a non-zero amount wins; later ones are not consulted. The result is
//! a best-effort estimate, not an exact parse.

use rust_decimal::Decimal;
use tally_core::keywords::{mentions_balance, mentions_external_method};
use tally_core::{AmountExtractor, has_glyph, has_signed_token};
use tally_ingest::Block;

pub trait SpendStrategy {
    fn name(&self) -> &'static str;

    /// Non-zero amount found by this strategy, if any.
    fn estimate(&self, block: &Block, amounts: &AmountExtractor) -> Option<Decimal>;
}

/// Lines naming a payment method and carrying an amount: `微信支付\t¥ 59.00`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectMethodLines;

impl SpendStrategy for DirectMethodLines {
    fn name(&self) -> &'static str {
        "direct-method-lines"
    }

    fn estimate(&self, block: &Block, amounts: &AmountExtractor) -> Option<Decimal> {
        let total = amounts.precision().sum(
            block
                .lines()
                .filter(|l| mentions_external_method(l) && has_glyph(l))
                .map(|l| amounts.line_total(l)),
        );
        non_zero(total)
    }
}

/// Unsigned amount lines that are not wallet/balance bookkeeping, e.g. a
/// lone `¥ 149.00` under the payment method line.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResidualAmountLines;

impl SpendStrategy for ResidualAmountLines {
    fn name(&self) -> &'static str {
        "residual-amount-lines"
    }

    fn estimate(&self, block: &Block, amounts: &AmountExtractor) -> Option<Decimal> {
        let total = amounts.precision().sum(
            block
                .lines()
                .filter(|l| has_glyph(l) && !mentions_balance(l) && !has_signed_token(l))
                .map(|l| amounts.line_total(l)),
        );
        non_zero(total)
    }
}

/// Wallet top-ups: only signed rows carry figures and the largest first
/// figure on such a row is taken as the transaction total.
#[derive(Debug, Clone, Copy, Default)]
pub struct LargestSignedAmount;

impl SpendStrategy for LargestSignedAmount {
    fn name(&self) -> &'static str {
        "largest-signed-amount"
    }

    fn estimate(&self, block: &Block, amounts: &AmountExtractor) -> Option<Decimal> {
        block
            .lines()
            .filter(|l| has_signed_token(l))
            .filter_map(|l| amounts.extract(l).first().copied())
            .max()
            .and_then(non_zero)
    }
}

/// Which strategy produced a block's external spend, and how much.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpendEstimate {
    pub strategy: &'static str,
    pub amount: Decimal,
}

pub struct SpendChain {
    strategies: Vec<Box<dyn SpendStrategy>>,
}

impl Default for SpendChain {
    fn default() -> Self {
        Self::new(vec![
            Box::new(DirectMethodLines),
            Box::new(ResidualAmountLines),
            Box::new(LargestSignedAmount),
        ])
    }
}

impl SpendChain {
    pub fn new(strategies: Vec<Box<dyn SpendStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn estimate(&self, block: &Block, amounts: &AmountExtractor) -> Option<SpendEstimate> {
        self.strategies.iter().find_map(|s| {
            s.estimate(block, amounts).map(|amount| SpendEstimate {
                strategy: s.name(),
                amount,
            })
        })
    }
}

fn non_zero(amount: Decimal) -> Option<Decimal> {
    if amount.is_zero() { None } else { Some(amount) }
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

    fn amounts() -> AmountExtractor {
        AmountExtractor::new(Precision::default()).unwrap()
    }

    #[test]
    fn test_direct_method_line() {
        let b = block(&["2025 年 11 月 20 日\tBaldur's Gate 3", "购买", "微信支付\t¥ 59.00"]);
        let est = SpendChain::default().estimate(&b, &amounts()).unwrap();
        assert_eq!(est.strategy, "direct-method-lines");
        assert_eq!(est.amount, d("59.00"));
    }

    #[test]
    fn test_direct_method_lines_accumulate() {
        let b = block(&["支付宝 ¥10.00", "Visa ¥5.50 ¥1.00"]);
        assert_eq!(DirectMethodLines.estimate(&b, &amounts()), Some(d("16.50")));
    }

    #[test]
    fn test_full_width_glyph_counts_in_unsigned_steps() {
        let direct = block(&["购买", "支付宝 ￥10.00"]);
        let est = SpendChain::default().estimate(&direct, &amounts()).unwrap();
        assert_eq!(est.strategy, "direct-method-lines");
        assert_eq!(est.amount, d("10.00"));

        let residual = block(&["支付宝", "￥ 12.50"]);
        let est = SpendChain::default().estimate(&residual, &amounts()).unwrap();
        assert_eq!(est.strategy, "residual-amount-lines");
        assert_eq!(est.amount, d("12.50"));
    }

    #[test]
    fn test_residual_lines_skip_balance_and_signed() {
        let b = block(&[
            "2025 年 11 月 15 日\tCyberpunk 2077",
            "Visa",
            "¥ 149.00",
            "钱包余额 ¥ 3.00",
            "-¥ 20.00",
        ]);
        let est = SpendChain::default().estimate(&b, &amounts()).unwrap();
        assert_eq!(est.strategy, "residual-amount-lines");
        assert_eq!(est.amount, d("149.00"));
    }

    #[test]
    fn test_largest_signed_first_amount() {
        let b = block(&[
            "2025 年 10 月 30 日\t已购买 ¥100.00 钱包资金",
            "银行卡",
            "+¥100.00\t+¥100.00\t¥100.00",
            "-¥ 30.00\t¥ 500.00",
        ]);
        let est = SpendChain::default().estimate(&b, &amounts()).unwrap();
        assert_eq!(est.strategy, "largest-signed-amount");
        assert_eq!(est.amount, d("100.00"));
    }

    #[test]
    fn test_nothing_found() {
        let b = block(&["支付宝", "已退款"]);
        assert_eq!(SpendChain::default().estimate(&b, &amounts()), None);

        let zeroes = block(&["支付宝", "-¥0.00"]);
        assert_eq!(SpendChain::default().estimate(&zeroes, &amounts()), None);
    }

    #[test]
    fn test_chain_order() {
        assert_eq!(
            SpendChain::default().strategy_names(),
            vec!["direct-method-lines", "residual-amount-lines", "largest-signed-amount"]
        );
    }
}
