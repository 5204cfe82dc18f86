//! Lint rule trait and the rule modules.

use crate::config::RuleConfig;
use crate::report::{RuleScope, Severity};
use staffcheck_table::Table;

pub mod aggregate;
pub mod row;

/// What a rule found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// One flag per record, in table order; `true` marks a violation.
    Rows(Vec<bool>),
    /// Grouping keys that violate the rule, sorted.
    Groups(Vec<String>),
}

impl Evaluation {
    /// Number of violations (flagged rows or offending groups).
    pub fn count(&self) -> usize {
        match self {
            Evaluation::Rows(flags) => flags.iter().filter(|f| **f).count(),
            Evaluation::Groups(keys) => keys.len(),
        }
    }

    /// Indices of flagged rows. Empty for group evaluations.
    pub fn flagged_rows(&self) -> Vec<usize> {
        match self {
            Evaluation::Rows(flags) => flags
                .iter()
                .enumerate()
                .filter_map(|(i, f)| f.then_some(i))
                .collect(),
            Evaluation::Groups(_) => Vec::new(),
        }
    }
}

/// A data-quality rule over an employee table.
pub trait LintRule: Send + Sync {
    /// Unique identifier (e.g., "row/salary-positive").
    fn id(&self) -> &'static str;

    /// Human-readable description.
    fn description(&self) -> &'static str;

    /// Short phrase naming the assertion, used in report lines
    /// ("Number of records that violate <assertion>: N").
    fn assertion(&self) -> &'static str;

    /// Whether the rule flags rows or groups.
    fn scope(&self) -> RuleScope;

    /// Default severity.
    fn default_severity(&self) -> Severity;

    /// Runs the rule. Must not depend on any other rule's result.
    fn check(&self, table: &Table, config: &RuleConfig) -> Evaluation;
}
