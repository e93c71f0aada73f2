use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tally_finance::{analyze_file, breakdown_json, render_breakdown};
use tally_ingest::Formatter;
use tracing_subscriber::EnvFilter;

mod config;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TALLY_BUILD_REV"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "tally",
    version,
    long_version = LONG_VERSION,
    about = "Estimate real-money spend from a pasted wallet billing history"
)]
struct Cli {
    /// Config file (default: ./tally.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate total spend and print a summary
    Report {
        /// Billing history to read (default: cost.md)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,

        /// List each record that contributed to the totals
        #[arg(long)]
        breakdown: bool,
    },

    /// Write a readable copy of the billing history
    Format {
        /// Billing history to read (default: cost.md)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Destination (default: cost_formatted.md)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Config file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default tally.toml (never overwrites)
    Init,

    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_arg = cli.config.as_deref();

    match cli.command {
        Command::Report {
            input,
            json,
            breakdown,
        } => {
            let cfg = config::load_config(config_arg)?;
            let settings = cfg.cost_settings()?;
            let input = input.unwrap_or(cfg.paths.input);

            let analysis = analyze_file(&input, &settings)
                .with_context(|| format!("analyzing {}", input.display()))?;

            if json && breakdown {
                println!("{}", breakdown_json(&analysis.report, &analysis.contributions)?);
            } else if json {
                println!("{}", analysis.report.to_json()?);
            } else {
                if breakdown {
                    print!("{}", render_breakdown(&analysis.contributions));
                    println!();
                }
                println!("{}", analysis.report);
            }
        }

        Command::Format { input, output } => {
            let cfg = config::load_config(config_arg)?;
            let input = input.unwrap_or(cfg.paths.input);
            let output = output.unwrap_or(cfg.paths.formatted);

            let summary = Formatter::new()?
                .format_file(&input, &output)
                .with_context(|| format!("formatting {}", input.display()))?;

            println!(
                "Formatted {} records ({} lines in, {} lines out)",
                summary.records, summary.lines_read, summary.lines_written
            );
            println!("Formatted file written to: {}", output.display());
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => {
                config::init_config(config_arg)?;
            }
            ConfigCommand::Show => {
                let cfg = config::load_config(config_arg)?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}
