use anyhow::{Context, Result, bail};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tally_core::Precision;
use tally_core::precision::DEFAULT_SIGNIFICANT_DIGITS;
use tally_finance::{CostSettings, default_resale_discount};

/// Looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE: &str = "tally.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub paths: PathsSection,
    pub costing: CostingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsSection {
    /// Pasted billing history.
    pub input: PathBuf,
    /// Where `tally format` writes the readable copy.
    pub formatted: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostingSection {
    /// Real-money share of marketplace income, e.g. "0.90".
    #[serde(with = "rust_decimal::serde::str")]
    pub resale_discount: Decimal,
    pub significant_digits: u32,
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            input: PathBuf::from("cost.md"),
            formatted: PathBuf::from("cost_formatted.md"),
        }
    }
}

impl Default for CostingSection {
    fn default() -> Self {
        Self {
            resale_discount: default_resale_discount(),
            significant_digits: DEFAULT_SIGNIFICANT_DIGITS,
        }
    }
}

impl Config {
    pub fn cost_settings(&self) -> Result<CostSettings> {
        let discount = self.costing.resale_discount;
        if discount.is_sign_negative() || discount > Decimal::ONE {
            bail!("costing.resale_discount must be between 0 and 1, got {discount}");
        }
        Ok(CostSettings {
            precision: Precision::new(self.costing.significant_digits),
            resale_discount: discount,
        })
    }
}

pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

/// An explicitly named config must exist; the default one is optional.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let p = config_path(explicit);
    if !p.exists() {
        if explicit.is_some() {
            bail!("config not found: {}", p.display());
        }
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    let cfg = toml::from_str(&s).with_context(|| format!("parse {}", p.display()))?;
    tracing::debug!(path = %p.display(), "loaded config");
    Ok(cfg)
}

pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(explicit: Option<&Path>) -> Result<()> {
    let p = config_path(explicit);
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&p, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
