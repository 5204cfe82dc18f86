//! Lint report types for structured output.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::distribution::SalaryDistribution;

/// Severity level for rule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational; never fails a run.
    Info,
    /// Summary-level problems, fail only in strict mode.
    Warning,
    /// Record-level integrity problems, always fail.
    Error,
}

/// Whether a rule flags individual records or groups of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleScope {
    Row,
    Aggregate,
}

/// The result of one rule over the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleOutcome {
    /// Rule identifier (e.g., "row/unique-phone").
    pub rule_id: String,

    /// Phrase naming the assertion, for report lines.
    pub assertion: String,

    pub scope: RuleScope,

    pub severity: Severity,

    /// Number of violating records (row rules) or groups (aggregate rules).
    pub count: usize,

    /// 0-based indices of violating records. Empty for aggregate rules.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub rows: Vec<usize>,

    /// Violating group keys, sorted. Empty for row rules.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub keys: Vec<String>,
}

impl RuleOutcome {
    /// Returns true if the rule found any violation.
    pub fn violated(&self) -> bool {
        self.count > 0
    }
}

/// Summary statistics for a lint run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintSummary {
    /// Number of error-level rules with violations.
    pub error_count: usize,
    /// Number of warning-level rules with violations.
    pub warning_count: usize,
    /// Number of info-level rules with violations.
    pub info_count: usize,
    /// Sum of all rule counts.
    pub total_violations: usize,
}

/// Complete report for one evaluation of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintReport {
    /// True if no error-level rule was violated.
    pub ok: bool,
    /// Number of records evaluated.
    pub record_count: usize,
    /// One outcome per evaluated rule, in evaluation order.
    pub outcomes: Vec<RuleOutcome>,
    /// Summary statistics.
    pub summary: LintSummary,
    /// Salary values for downstream reporting.
    pub distribution: SalaryDistribution,
}

impl LintReport {
    /// Creates an empty report for a table of `record_count` records.
    pub fn new(record_count: usize) -> Self {
        Self {
            ok: true,
            record_count,
            outcomes: Vec::new(),
            summary: LintSummary::default(),
            distribution: SalaryDistribution::default(),
        }
    }

    /// Adds a rule outcome and updates the summary.
    pub fn add_outcome(&mut self, outcome: RuleOutcome) {
        self.summary.total_violations += outcome.count;
        if outcome.violated() {
            match outcome.severity {
                Severity::Info => self.summary.info_count += 1,
                Severity::Warning => self.summary.warning_count += 1,
                Severity::Error => {
                    self.summary.error_count += 1;
                    self.ok = false;
                }
            }
        }
        self.outcomes.push(outcome);
    }

    /// Returns the mapping from rule id to violation count.
    pub fn counts(&self) -> BTreeMap<String, usize> {
        self.outcomes
            .iter()
            .map(|o| (o.rule_id.clone(), o.count))
            .collect()
    }

    /// Looks up the outcome of a rule by id.
    pub fn outcome(&self, rule_id: &str) -> Option<&RuleOutcome> {
        self.outcomes.iter().find(|o| o.rule_id == rule_id)
    }

    /// Returns the violation count of a rule, if it was evaluated.
    pub fn count(&self, rule_id: &str) -> Option<usize> {
        self.outcome(rule_id).map(|o| o.count)
    }

    /// Returns true if there are any errors.
    pub fn has_errors(&self) -> bool {
        !self.ok
    }

    /// Returns true if there are any warnings.
    pub fn has_warnings(&self) -> bool {
        self.summary.warning_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn outcome(id: &str, severity: Severity, count: usize) -> RuleOutcome {
        RuleOutcome {
            rule_id: id.to_string(),
            assertion: format!("the {} assertion", id),
            scope: RuleScope::Row,
            severity,
            count,
            rows: (0..count).collect(),
            keys: Vec::new(),
        }
    }

    #[test]
    fn test_add_outcome_updates_summary() {
        let mut report = LintReport::new(10);
        assert!(report.ok);

        report.add_outcome(outcome("aggregate/a", Severity::Warning, 2));
        assert!(report.ok);
        assert!(report.has_warnings());

        report.add_outcome(outcome("row/b", Severity::Error, 0));
        assert!(report.ok);
        assert_eq!(report.summary.error_count, 0);

        report.add_outcome(outcome("row/c", Severity::Error, 3));
        assert!(!report.ok);
        assert!(report.has_errors());
        assert_eq!(report.summary.error_count, 1);
        assert_eq!(report.summary.total_violations, 5);
    }

    #[test]
    fn test_counts_mapping() {
        let mut report = LintReport::new(3);
        report.add_outcome(outcome("row/x", Severity::Error, 1));
        report.add_outcome(outcome("row/y", Severity::Error, 0));

        let counts = report.counts();
        assert_eq!(counts.get("row/x"), Some(&1));
        assert_eq!(counts.get("row/y"), Some(&0));
        assert_eq!(report.count("row/x"), Some(1));
        assert_eq!(report.count("row/z"), None);
    }

    #[test]
    fn test_serialization_skips_empty_lists() {
        let json = serde_json::to_value(outcome("row/x", Severity::Error, 0)).unwrap();
        assert!(json.get("rows").is_none());
        assert!(json.get("keys").is_none());
        assert_eq!(json["severity"], "error");
        assert_eq!(json["scope"], "row");
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }
}
