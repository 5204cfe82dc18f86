//! Rule registry for managing and running lint rules.

use crate::config::RuleConfig;
use crate::distribution::SalaryDistribution;
use crate::report::{LintReport, RuleOutcome, RuleScope, Severity};
use crate::rules::{aggregate, row, Evaluation, LintRule};
use staffcheck_table::Table;
use std::collections::HashSet;

/// Registry of all available lint rules.
pub struct RuleRegistry {
    rules: Vec<Box<dyn LintRule>>,
    disabled_rules: HashSet<String>,
    enabled_only: Option<HashSet<String>>,
}

impl RuleRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            disabled_rules: HashSet::new(),
            enabled_only: None,
        }
    }

    /// Creates a registry with all default rules registered.
    pub fn default_rules() -> Self {
        let mut registry = Self::new();

        for rule in row::all_rules() {
            registry.register(rule);
        }
        for rule in aggregate::all_rules() {
            registry.register(rule);
        }

        registry
    }

    /// Registers a new lint rule.
    pub fn register(&mut self, rule: Box<dyn LintRule>) {
        self.rules.push(rule);
    }

    /// Disables a rule by ID.
    pub fn disable_rule(&mut self, rule_id: &str) {
        self.disabled_rules.insert(rule_id.to_string());
    }

    /// Enables only the specified rules (disables all others).
    pub fn enable_only(&mut self, rule_ids: &[&str]) {
        self.enabled_only = Some(rule_ids.iter().map(|s| s.to_string()).collect());
    }

    /// Returns all registered rules.
    pub fn rules(&self) -> &[Box<dyn LintRule>] {
        &self.rules
    }

    /// Returns true if a rule with this ID is registered.
    pub fn contains(&self, rule_id: &str) -> bool {
        self.rules.iter().any(|r| r.id() == rule_id)
    }

    /// Returns rule metadata for documentation/introspection.
    pub fn rule_metadata(&self) -> Vec<RuleMetadata> {
        self.rules
            .iter()
            .map(|r| RuleMetadata {
                id: r.id().to_string(),
                description: r.description().to_string(),
                scope: r.scope(),
                severity: r.default_severity(),
            })
            .collect()
    }

    /// Returns the number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Checks if a rule is enabled.
    fn is_rule_enabled(&self, rule_id: &str) -> bool {
        if self.disabled_rules.contains(rule_id) {
            return false;
        }
        if let Some(ref enabled) = self.enabled_only {
            return enabled.contains(rule_id);
        }
        true
    }

    /// Runs every enabled rule over `table`.
    ///
    /// All rules see the same table and run unconditionally, in
    /// registration order; one rule's result never affects another.
    pub fn evaluate(&self, table: &Table, config: &RuleConfig) -> LintReport {
        let mut report = LintReport::new(table.len());

        for rule in &self.rules {
            if !self.is_rule_enabled(rule.id()) {
                tracing::debug!(rule = rule.id(), "rule disabled");
                continue;
            }

            let evaluation = rule.check(table, config);
            let count = evaluation.count();
            tracing::debug!(rule = rule.id(), count, "rule evaluated");

            let rows = evaluation.flagged_rows();
            let keys = match evaluation {
                Evaluation::Groups(keys) => keys,
                Evaluation::Rows(_) => Vec::new(),
            };

            report.add_outcome(RuleOutcome {
                rule_id: rule.id().to_string(),
                assertion: rule.assertion().to_string(),
                scope: rule.scope(),
                severity: rule.default_severity(),
                count,
                rows,
                keys,
            });
        }

        report.distribution = SalaryDistribution::from_table(table);

        tracing::info!(
            records = table.len(),
            rules = report.outcomes.len(),
            violations = report.summary.total_violations,
            ok = report.ok,
            "evaluation complete"
        );

        report
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::default_rules()
    }
}

/// Metadata about a lint rule for documentation/introspection.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RuleMetadata {
    /// Rule identifier.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Whether the rule flags rows or groups.
    pub scope: RuleScope,
    /// Default severity level.
    pub severity: Severity,
}

#[cfg(test)]
mod tests {
    use super::*;
    use staffcheck_table::Record;

    #[test]
    fn test_empty_registry() {
        let registry = RuleRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_default_registry() {
        let registry = RuleRegistry::default_rules();
        // Row: 8, Aggregate: 2
        assert_eq!(registry.len(), 10);
        assert!(registry.contains("row/unique-phone"));
        assert!(registry.contains("aggregate/city-min-employees"));
        assert!(!registry.contains("row/nonexistent"));
    }

    #[test]
    fn test_rule_ids_are_unique() {
        let registry = RuleRegistry::default_rules();
        let ids: HashSet<_> = registry.rules().iter().map(|r| r.id()).collect();
        assert_eq!(ids.len(), registry.len());
    }

    #[test]
    fn test_disable_rule() {
        let mut registry = RuleRegistry::new();
        registry.disable_rule("row/unique-phone");
        assert!(!registry.is_rule_enabled("row/unique-phone"));
        assert!(registry.is_rule_enabled("row/name-present"));
    }

    #[test]
    fn test_enable_only() {
        let mut registry = RuleRegistry::new();
        registry.enable_only(&["row/name-present", "row/salary-positive"]);
        assert!(registry.is_rule_enabled("row/name-present"));
        assert!(registry.is_rule_enabled("row/salary-positive"));
        assert!(!registry.is_rule_enabled("row/unique-phone"));
    }

    #[test]
    fn test_evaluate_skips_disabled_rules() {
        let mut registry = RuleRegistry::default_rules();
        registry.disable_rule("row/name-present");

        let table = Table::new(vec![Record::builder().build()]);
        let report = registry.evaluate(&table, &RuleConfig::default());

        assert_eq!(report.outcomes.len(), 9);
        assert!(report.outcome("row/name-present").is_none());
        assert_eq!(report.count("row/salary-positive"), Some(1));
    }

    #[test]
    fn test_evaluate_empty_table() {
        let registry = RuleRegistry::default_rules();
        let report = registry.evaluate(&Table::default(), &RuleConfig::default());

        assert!(report.ok);
        assert_eq!(report.record_count, 0);
        assert!(report.counts().values().all(|c| *c == 0));
        assert!(report.distribution.values.is_empty());
    }

    #[test]
    fn test_metadata_matches_rules() {
        let registry = RuleRegistry::default_rules();
        let metadata = registry.rule_metadata();
        assert_eq!(metadata.len(), registry.len());
        assert_eq!(metadata[0].id, "row/name-present");
        assert_eq!(metadata[0].severity, Severity::Error);
        assert_eq!(metadata[9].scope, RuleScope::Aggregate);
        assert_eq!(metadata[9].severity, Severity::Warning);
    }
}
