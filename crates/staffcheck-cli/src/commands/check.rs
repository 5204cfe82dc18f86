//! Check command implementation
//!
//! Loads an employee table, runs the data-quality rules and reports the
//! violation count of each rule.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use staffcheck_lint::{
    Histogram, LintReport, RuleConfig, RuleOutcome, RuleRegistry, RuleScope, SalaryDistribution,
    SalarySummary, Severity,
};
use staffcheck_table::{Coercion, Table};
use std::path::Path;
use std::process::ExitCode;

use super::{error_codes, JsonError, OutputFormat};
use crate::chart::{self, ChartConfig, ChartError};

/// How many offending rows or keys to list per rule in text output.
const MAX_LISTED: usize = 10;

/// Options for the check command.
#[derive(Debug, Clone)]
pub struct CheckOptions<'a> {
    /// Path to the CSV file.
    pub input: &'a str,
    /// Optional JSON rule configuration.
    pub config: Option<&'a str>,
    /// Rule IDs to disable.
    pub disable_rules: &'a [String],
    /// Comma-separated rule IDs to run exclusively.
    pub only_rules: Option<&'a str>,
    /// Fail on warnings as well as errors.
    pub strict: bool,
    /// Where to write the salary histogram PNG, if anywhere.
    pub histogram: Option<&'a str>,
    /// Histogram bin count.
    pub bins: usize,
    pub format: OutputFormat,
}

/// Rendered histogram details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistogramOutput {
    /// Path of the written PNG.
    pub path: String,
    /// BLAKE3 hash of the PNG bytes.
    pub hash: String,
    /// Bin edges and counts that were plotted.
    pub histogram: Histogram,
}

/// JSON output for the check command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOutput {
    /// Whether the check passed.
    pub success: bool,
    /// Path to the checked file.
    pub input: String,
    /// The evaluation report (absent if loading failed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<LintReport>,
    /// Descriptive statistics over the salaries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_summary: Option<SalarySummary>,
    /// Cells that were unparseable and treated as missing.
    #[serde(default)]
    pub coercions: Vec<Coercion>,
    /// Histogram output, when requested and rendered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histogram: Option<HistogramOutput>,
    /// Fatal or side-output errors.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<JsonError>,
}

impl CheckOutput {
    fn failed(input: &str, error: JsonError) -> Self {
        Self {
            success: false,
            input: input.to_string(),
            report: None,
            salary_summary: None,
            coercions: Vec::new(),
            histogram: None,
            errors: vec![error],
        }
    }
}

/// Builds the registry, applying rule selection flags.
pub fn build_registry(disable_rules: &[String], only_rules: Option<&str>) -> RuleRegistry {
    let mut registry = RuleRegistry::default_rules();

    for rule_id in disable_rules {
        if !registry.contains(rule_id) {
            tracing::warn!(rule = %rule_id, "ignoring unknown rule in --disable-rule");
        }
        registry.disable_rule(rule_id);
    }

    if let Some(only) = only_rules {
        let rules: Vec<&str> = only
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();
        for rule_id in &rules {
            if !registry.contains(rule_id) {
                tracing::warn!(rule = %rule_id, "ignoring unknown rule in --only-rules");
            }
        }
        registry.enable_only(&rules);
    }

    registry
}

/// Run the check command.
///
/// # Returns
/// Exit code: 0 if passed, 1 if an error-level rule was violated (or a
/// warning-level rule in strict mode), or the input could not be loaded.
pub fn run(opts: &CheckOptions<'_>) -> Result<ExitCode> {
    let registry = build_registry(opts.disable_rules, opts.only_rules);

    let config = match opts.config {
        Some(path) => match RuleConfig::from_file(Path::new(path)) {
            Ok(config) => config,
            Err(e) => return fail(opts, error_codes::CONFIG_FAILED, anyhow::Error::new(e)),
        },
        None => RuleConfig::default(),
    };

    let table = match Table::from_csv_path(Path::new(opts.input))
        .with_context(|| format!("Failed to load employee table: {}", opts.input))
    {
        Ok(table) => table,
        Err(e) => return fail(opts, error_codes::LOAD_FAILED, e),
    };

    let report = registry.evaluate(&table, &config);

    let mut errors = Vec::new();
    let histogram = match opts.histogram {
        Some(path) => match render(&report.distribution, path, opts.bins) {
            Ok(output) => Some(output),
            Err(e) => {
                tracing::warn!(error = %e, "histogram not written");
                errors.push(JsonError::new(
                    error_codes::CHART_FAILED,
                    format!("Failed to write histogram {}: {}", path, e),
                ));
                None
            }
        },
        None => None,
    };

    let success = if opts.strict {
        report.ok && !report.has_warnings()
    } else {
        report.ok
    };

    if opts.format == OutputFormat::Json {
        let output = CheckOutput {
            success,
            input: opts.input.to_string(),
            salary_summary: report.distribution.summary(),
            report: Some(report),
            coercions: table.coercions().to_vec(),
            histogram,
            errors,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_text_output(opts, &table, &report, histogram.as_ref(), &errors);
    }

    if success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn render(distribution: &SalaryDistribution, path: &str, bins: usize) -> Result<HistogramOutput, ChartError> {
    let histogram = distribution.histogram(bins);
    let hash = chart::write_histogram_png(&histogram, Path::new(path), &ChartConfig::default())?;
    Ok(HistogramOutput {
        path: path.to_string(),
        hash,
        histogram,
    })
}

/// Reports a fatal error. Text mode propagates it; JSON mode prints it.
fn fail(opts: &CheckOptions<'_>, code: &str, error: anyhow::Error) -> Result<ExitCode> {
    if opts.format == OutputFormat::Json {
        let output = CheckOutput::failed(opts.input, JsonError::new(code, format!("{:#}", error)));
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(ExitCode::from(1))
    } else {
        Err(error)
    }
}

/// Print check results in human-readable text format.
fn print_text_output(
    opts: &CheckOptions<'_>,
    table: &Table,
    report: &LintReport,
    histogram: Option<&HistogramOutput>,
    errors: &[JsonError],
) {
    println!(
        "{} {} ({} records)",
        "Checking:".cyan().bold(),
        opts.input,
        report.record_count
    );
    println!();

    for outcome in &report.outcomes {
        print_outcome(table, outcome);
    }

    println!();
    match report.distribution.summary() {
        Some(s) => {
            println!(
                "{} n={} mean={:.2} std={} min={:.2} q1={:.2} median={:.2} q3={:.2} max={:.2}",
                "Salary distribution:".cyan(),
                s.count,
                s.mean,
                s.std_dev
                    .map(|sd| format!("{:.2}", sd))
                    .unwrap_or_else(|| "n/a".to_string()),
                s.min,
                s.q1,
                s.median,
                s.q3,
                s.max
            );
        }
        None => println!("{} no salaries", "Salary distribution:".cyan()),
    }

    let coerced = table.coercions().len();
    if coerced > 0 {
        println!(
            "{} {} unparseable cell(s) treated as missing",
            "note:".yellow().bold(),
            coerced
        );
    }

    if let Some(h) = histogram {
        println!("{} {} ({})", "Histogram:".cyan(), h.path, &h.hash[..16]);
    }
    for error in errors {
        eprintln!("{}: {}", "warning".yellow().bold(), error.message);
    }

    let summary = format!(
        "{} error rule(s), {} warning rule(s), {} violation(s)",
        report.summary.error_count, report.summary.warning_count, report.summary.total_violations
    );

    if report.ok && (!opts.strict || !report.has_warnings()) {
        println!("\n{} {}", "PASSED".green().bold(), summary.dimmed());
    } else {
        println!("\n{} {}", "FAILED".red().bold(), summary.dimmed());
    }
}

fn print_outcome(table: &Table, outcome: &RuleOutcome) {
    let count = outcome.count.to_string();
    let count = match (outcome.violated(), outcome.severity) {
        (false, _) => count.green(),
        (true, Severity::Error) => count.red().bold(),
        (true, Severity::Warning) => count.yellow().bold(),
        (true, Severity::Info) => count.blue(),
    };
    println!(
        "Number of records that violate {}: {}",
        outcome.assertion, count
    );

    if !outcome.violated() {
        return;
    }

    let (label, items): (&str, Vec<String>) = match outcome.scope {
        RuleScope::Row => (
            "lines",
            outcome
                .rows
                .iter()
                .map(|&i| table.get(i).map_or(i + 1, |r| r.line).to_string())
                .collect(),
        ),
        RuleScope::Aggregate => ("keys", outcome.keys.clone()),
    };
    let more = items.len().saturating_sub(MAX_LISTED);
    let mut listed = items.into_iter().take(MAX_LISTED).collect::<Vec<_>>().join(", ");
    if more > 0 {
        listed.push_str(&format!(", ... ({} more)", more));
    }
    println!(
        "    {} [{}] {}: {}",
        "->".dimmed(),
        outcome.rule_id.cyan(),
        label,
        listed
    );
}
