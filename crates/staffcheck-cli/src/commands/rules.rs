//! Rules command implementation
//!
//! Lists the registered data-quality rules.

use anyhow::Result;
use colored::Colorize;
use staffcheck_lint::{RuleMetadata, RuleRegistry, Severity};
use std::process::ExitCode;

use super::OutputFormat;

/// Run the rules command.
pub fn run(format: OutputFormat) -> Result<ExitCode> {
    let metadata = RuleRegistry::default_rules().rule_metadata();

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&metadata)?);
    } else {
        print_text_output(&metadata);
    }

    Ok(ExitCode::SUCCESS)
}

fn print_text_output(metadata: &[RuleMetadata]) {
    println!("{} ({})", "Rules:".cyan().bold(), metadata.len());
    for rule in metadata {
        let severity = match rule.severity {
            Severity::Error => "error".red(),
            Severity::Warning => "warning".yellow(),
            Severity::Info => "info".blue(),
        };
        println!("  {:<32} {:<8} {}", rule.id, severity, rule.description);
    }
}
