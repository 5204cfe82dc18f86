//! Aggregate rules.
//!
//! These group the table by an optional column and flag groups that are
//! too small. Records with a missing grouping value take no part.

use std::collections::BTreeMap;

use crate::config::RuleConfig;
use crate::report::{RuleScope, Severity};
use crate::rules::{Evaluation, LintRule};
use staffcheck_table::Table;

/// Returns the keys that occur in exactly one record, in sorted order.
fn singleton_keys<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, n)| *n == 1)
        .map(|(key, _)| key.to_string())
        .collect()
}

/// Flags cities that have only one employee.
pub struct CityMinEmployeesRule;

impl LintRule for CityMinEmployeesRule {
    fn id(&self) -> &'static str {
        "aggregate/city-min-employees"
    }

    fn description(&self) -> &'static str {
        "Each city must have more than one employee"
    }

    fn assertion(&self) -> &'static str {
        "the cities has more than only one employee assertion"
    }

    fn scope(&self) -> RuleScope {
        RuleScope::Aggregate
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, table: &Table, _config: &RuleConfig) -> Evaluation {
        Evaluation::Groups(singleton_keys(
            table.iter().filter_map(|r| r.city.as_deref()),
        ))
    }
}

/// Flags managers with exactly one direct report.
pub struct ManagerMinReportsRule;

impl LintRule for ManagerMinReportsRule {
    fn id(&self) -> &'static str {
        "aggregate/manager-min-reports"
    }

    fn description(&self) -> &'static str {
        "Each manager must have more than one direct report"
    }

    fn assertion(&self) -> &'static str {
        "the manager has more than one report assertion"
    }

    fn scope(&self) -> RuleScope {
        RuleScope::Aggregate
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, table: &Table, _config: &RuleConfig) -> Evaluation {
        Evaluation::Groups(singleton_keys(
            table
                .iter()
                .filter_map(|r| r.reports_to.as_ref().map(|m| m.as_str())),
        ))
    }
}

/// Returns all aggregate rules in evaluation order.
pub fn all_rules() -> Vec<Box<dyn LintRule>> {
    vec![Box::new(CityMinEmployeesRule), Box::new(ManagerMinReportsRule)]
}
