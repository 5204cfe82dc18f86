//! staffcheck CLI - data-quality checks for employee tables
//!
//! This binary loads an employee CSV file, evaluates the data-quality rules
//! and reports how many records violate each one.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use staffcheck_cli::commands::{self, check::CheckOptions, OutputFormat};
use staffcheck_cli::logging;

/// staffcheck - Employee data-quality checker
#[derive(Parser)]
#[command(name = "staffcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check an employee CSV file against the data-quality rules
    Check {
        /// Path to the employee CSV file
        #[arg(short, long)]
        input: String,

        /// Path to a JSON rule configuration (date floors)
        #[arg(short, long)]
        config: Option<String>,

        /// Disable specific rules (can be repeated)
        #[arg(long = "disable-rule", value_name = "RULE_ID")]
        disable_rules: Vec<String>,

        /// Only run these rules (comma-separated list)
        #[arg(long = "only-rules", value_name = "RULE_IDS")]
        only_rules: Option<String>,

        /// Treat warnings as errors (fail if any summary rule is violated)
        #[arg(long)]
        strict: bool,

        /// Write a salary histogram PNG to this path
        #[arg(long, value_name = "PNG")]
        histogram: Option<String>,

        /// Number of histogram bins
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..))]
        bins: u16,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// List the available rules
    Rules {
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}

fn parse_format(format: &str) -> OutputFormat {
    format
        .parse::<OutputFormat>()
        .expect("clap should have validated format")
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            input,
            config,
            disable_rules,
            only_rules,
            strict,
            histogram,
            bins,
            format,
        } => commands::check::run(&CheckOptions {
            input: &input,
            config: config.as_deref(),
            disable_rules: &disable_rules,
            only_rules: only_rules.as_deref(),
            strict,
            histogram: histogram.as_deref(),
            bins: bins as usize,
            format: parse_format(&format),
        }),
        Commands::Rules { format } => commands::rules::run(parse_format(&format)),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
