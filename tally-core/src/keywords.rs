//! Literal keyword sets used to recognise record content.
//!
//! Matching is plain case-sensitive substring containment.

/// Names the platform's community marketplace in a record header.
pub const MARKETPLACE_MARKER: &str = "Steam 社区市场";

/// Marks a wallet-funds movement line.
pub const FUNDS_MARKER: &str = "资金";

/// Real-money payment methods: e-wallets, bank cards and card networks.
pub const EXTERNAL_METHOD_KEYWORDS: [&str; 9] = [
    "支付宝",
    "微信支付",
    "微信",
    "银行卡",
    "银联",
    "China UnionPay",
    "Visa",
    "MasterCard",
    "American Express",
];

/// Wallet / balance / change wording; lines carrying these are not purchase totals.
pub const BALANCE_WORDS: [&str; 3] = ["钱包", "余额", "变更"];

/// Record-type labels that the formatter renders as list items.
pub const CATEGORY_KEYWORDS: [&str; 6] = ["市场交易", "购买", "游戏内购买", "资金", "钱包", "支付宝"];

pub fn contains_any(line: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| line.contains(k))
}

pub fn mentions_external_method(line: &str) -> bool {
    contains_any(line, &EXTERNAL_METHOD_KEYWORDS)
}

pub fn mentions_balance(line: &str) -> bool {
    contains_any(line, &BALANCE_WORDS)
}

pub fn is_category_keyword(text: &str) -> bool {
    CATEGORY_KEYWORDS.contains(&text)
}
