use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;
use tally_finance::{CostSettings, analyze_file};

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("sample_cost.md")
}

fn d(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Sample history: one record per spend strategy, two marketplace sales and
/// two records that contribute nothing.
#[test]
fn test_sample_totals() {
    let analysis = analyze_file(&sample_path(), &CostSettings::default()).unwrap();

    assert_eq!(analysis.totals.external_spend, d("384.80"));
    assert_eq!(analysis.totals.market_income, d("1152.50"));

    let s = &analysis.report.summary;
    assert_eq!(s.market_income, d("1152.50"));
    assert_eq!(s.market_cost_basis, d("1037.25"));
    assert_eq!(s.direct_external, d("384.80"));
    assert_eq!(s.total_cost, d("1422.05"));
    assert_eq!(analysis.report.wallet_balance, Some(d("0.00")));
}

#[test]
fn test_sample_strategies_per_block() {
    let analysis = analyze_file(&sample_path(), &CostSettings::default()).unwrap();
    assert_eq!(analysis.contributions.len(), 9);

    let strategies: Vec<Option<&str>> = analysis.contributions.iter().map(|c| c.strategy).collect();
    assert_eq!(
        strategies,
        vec![
            None,
            Some("largest-signed-amount"),
            None,
            Some("direct-method-lines"),
            Some("residual-amount-lines"),
            Some("largest-signed-amount"),
            None,
            None,
            None,
        ]
    );

    let market: Vec<Decimal> = analysis
        .contributions
        .iter()
        .filter(|c| c.classification.is_marketplace)
        .map(|c| c.market_income)
        .collect();
    assert_eq!(market, vec![d("128.00"), d("1024.50")]);
}

#[test]
fn test_sample_report_text() {
    let analysis = analyze_file(&sample_path(), &CostSettings::default()).unwrap();
    let text = analysis.report.to_string();
    assert!(text.contains("1422.05"));
    assert!(text.contains("Current wallet balance (from history):   0.00"));
}

#[test]
fn test_missing_input_is_fatal() {
    let missing = sample_path().with_file_name("no_such_history.md");
    assert!(analyze_file(&missing, &CostSettings::default()).is_err());
}
