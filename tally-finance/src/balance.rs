//! Current wallet balance, recognised by shape rather than wording.
//!
//! The history's balance row reads like `¥ 76.80\t-¥ 31.37\t¥ 0.00`
//! (total, wallet change, balance), so the first row with three or more
//! amounts is taken and its third figure returned.

use rust_decimal::Decimal;
use tally_core::AmountExtractor;

pub fn detect_wallet_balance(lines: &[String], amounts: &AmountExtractor) -> Option<Decimal> {
    lines.iter().find_map(|line| {
        let amts = amounts.extract(line);
        amts.get(2).copied()
    })
}
