//! Row-level rules.
//!
//! Each rule yields one flag per record. Rules are independent: a record
//! with a missing birth date is flagged by the presence rule and simply not
//! flagged by the rules that compare birth dates.

use std::collections::{HashMap, HashSet};

use crate::config::RuleConfig;
use crate::report::{RuleScope, Severity};
use crate::rules::{Evaluation, LintRule};
use staffcheck_table::{Record, Table};

fn flag_each(table: &Table, predicate: impl Fn(&Record) -> bool) -> Evaluation {
    Evaluation::Rows(table.iter().map(predicate).collect())
}

// =============================================================================
// Existence
// =============================================================================

/// Flags records whose name is absent or only whitespace.
pub struct NamePresentRule;

impl LintRule for NamePresentRule {
    fn id(&self) -> &'static str {
        "row/name-present"
    }

    fn description(&self) -> &'static str {
        "Every employee must have a non-blank name"
    }

    fn assertion(&self) -> &'static str {
        "the name must be present assertion"
    }

    fn scope(&self) -> RuleScope {
        RuleScope::Row
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, table: &Table, _config: &RuleConfig) -> Evaluation {
        flag_each(table, |r| {
            r.name.as_deref().map_or(true, |name| name.trim().is_empty())
        })
    }
}

/// Flags records with a missing or unparseable birth date.
pub struct BirthDatePresentRule;

impl LintRule for BirthDatePresentRule {
    fn id(&self) -> &'static str {
        "row/birth-date-present"
    }

    fn description(&self) -> &'static str {
        "Every employee must have a valid birth_date"
    }

    fn assertion(&self) -> &'static str {
        "the birth_date must be present assertion"
    }

    fn scope(&self) -> RuleScope {
        RuleScope::Row
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, table: &Table, _config: &RuleConfig) -> Evaluation {
        flag_each(table, |r| r.birth_date.is_none())
    }
}

// =============================================================================
// Intra-record
// =============================================================================

/// Flags records born on or after their hire date.
pub struct BirthBeforeHireRule;

impl LintRule for BirthBeforeHireRule {
    fn id(&self) -> &'static str {
        "row/birth-before-hire"
    }

    fn description(&self) -> &'static str {
        "birth_date must be strictly earlier than hire_date"
    }

    fn assertion(&self) -> &'static str {
        "the birth-before-hire assertion"
    }

    fn scope(&self) -> RuleScope {
        RuleScope::Row
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, table: &Table, _config: &RuleConfig) -> Evaluation {
        flag_each(table, |r| match (r.birth_date, r.hire_date) {
            (Some(birth), Some(hire)) => birth >= hire,
            _ => false,
        })
    }
}

/// Flags records whose salary is missing, zero or negative.
pub struct SalaryPositiveRule;

impl LintRule for SalaryPositiveRule {
    fn id(&self) -> &'static str {
        "row/salary-positive"
    }

    fn description(&self) -> &'static str {
        "salary must be present and greater than zero"
    }

    fn assertion(&self) -> &'static str {
        "the salary > 0 assertion"
    }

    fn scope(&self) -> RuleScope {
        RuleScope::Row
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, table: &Table, _config: &RuleConfig) -> Evaluation {
        flag_each(table, |r| r.salary.map_or(true, |s| s <= 0.0))
    }
}

// =============================================================================
// Limits
// =============================================================================

/// Flags records hired before the configured floor (2015-01-01 by default).
pub struct HireDateFloorRule;

impl LintRule for HireDateFloorRule {
    fn id(&self) -> &'static str {
        "row/hire-date-floor"
    }

    fn description(&self) -> &'static str {
        "hire_date must not be earlier than the hire-date floor"
    }

    fn assertion(&self) -> &'static str {
        "the hire-after-2015 assertion"
    }

    fn scope(&self) -> RuleScope {
        RuleScope::Row
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, table: &Table, config: &RuleConfig) -> Evaluation {
        flag_each(table, |r| {
            r.hire_date.is_some_and(|d| d < config.hire_date_floor)
        })
    }
}

/// Flags records born before the configured floor (1940-01-01 by default).
pub struct BirthDateFloorRule;

impl LintRule for BirthDateFloorRule {
    fn id(&self) -> &'static str {
        "row/birth-date-floor"
    }

    fn description(&self) -> &'static str {
        "birth_date must not be earlier than the birth-date floor"
    }

    fn assertion(&self) -> &'static str {
        "the birth_date after 01/01/1940 assertion"
    }

    fn scope(&self) -> RuleScope {
        RuleScope::Row
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, table: &Table, config: &RuleConfig) -> Evaluation {
        flag_each(table, |r| {
            r.birth_date.is_some_and(|d| d < config.birth_date_floor)
        })
    }
}

// =============================================================================
// Inter-record
// =============================================================================

/// Flags records whose `reports_to` names no known employee.
pub struct KnownManagerRule;

impl LintRule for KnownManagerRule {
    fn id(&self) -> &'static str {
        "row/known-manager"
    }

    fn description(&self) -> &'static str {
        "reports_to, when present, must match some employee's eid"
    }

    fn assertion(&self) -> &'static str {
        "the manager must be a known employee assertion"
    }

    fn scope(&self) -> RuleScope {
        RuleScope::Row
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, table: &Table, _config: &RuleConfig) -> Evaluation {
        let known: HashSet<_> = table.iter().filter_map(|r| r.eid.as_ref()).collect();
        flag_each(table, |r| {
            r.reports_to
                .as_ref()
                .is_some_and(|manager| !known.contains(manager))
        })
    }
}

/// Flags every record that shares its phone number with another record.
pub struct UniquePhoneRule;

impl LintRule for UniquePhoneRule {
    fn id(&self) -> &'static str {
        "row/unique-phone"
    }

    fn description(&self) -> &'static str {
        "No two employees may share a phone number"
    }

    fn assertion(&self) -> &'static str {
        "the unique phone number assertion"
    }

    fn scope(&self) -> RuleScope {
        RuleScope::Row
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, table: &Table, _config: &RuleConfig) -> Evaluation {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for phone in table.iter().filter_map(|r| r.phone.as_deref()) {
            *counts.entry(phone).or_default() += 1;
        }
        flag_each(table, |r| {
            r.phone
                .as_deref()
                .is_some_and(|phone| counts.get(phone).copied().unwrap_or(0) > 1)
        })
    }
}

/// Returns all row-level rules in evaluation order.
pub fn all_rules() -> Vec<Box<dyn LintRule>> {
    vec![
        Box::new(NamePresentRule),
        Box::new(BirthDatePresentRule),
        Box::new(BirthBeforeHireRule),
        Box::new(SalaryPositiveRule),
        Box::new(HireDateFloorRule),
        Box::new(BirthDateFloorRule),
        Box::new(KnownManagerRule),
        Box::new(UniquePhoneRule),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use staffcheck_table::EmployeeId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// A record that passes every row rule.
    fn valid(eid: u32) -> Record {
        Record::builder()
            .eid(eid)
            .name(format!("Employee {}", eid))
            .birth_date(date(1990, 1, 1))
            .hire_date(date(2020, 1, 1))
            .salary(50_000.0)
            .phone(format!("555-{:04}", eid))
            .city("Springfield")
            .build()
    }

    fn flags(rule: &dyn LintRule, records: Vec<Record>) -> Vec<bool> {
        match rule.check(&Table::new(records), &RuleConfig::default()) {
            Evaluation::Rows(flags) => flags,
            other => panic!("expected row evaluation, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_records_pass_every_rule() {
        let records = vec![valid(1), valid(2), valid(3)];
        for rule in all_rules() {
            assert_eq!(
                flags(rule.as_ref(), records.clone()),
                vec![false, false, false],
                "{} flagged a valid record",
                rule.id()
            );
        }
    }

    #[test]
    fn test_name_present() {
        let mut missing = valid(2);
        missing.name = None;
        let mut blank = valid(3);
        blank.name = Some(" \t ".to_string());
        let mut padded = valid(4);
        padded.name = Some("  Ada ".to_string());

        assert_eq!(
            flags(&NamePresentRule, vec![valid(1), missing, blank, padded]),
            vec![false, true, true, false]
        );
    }

    #[test]
    fn test_birth_date_present() {
        let mut missing = valid(2);
        missing.birth_date = None;
        assert_eq!(
            flags(&BirthDatePresentRule, vec![valid(1), missing]),
            vec![false, true]
        );
    }

    #[test]
    fn test_birth_before_hire_equal_dates_violate() {
        let mut same_day = valid(1);
        same_day.hire_date = same_day.birth_date;
        let mut reversed = valid(2);
        reversed.birth_date = Some(date(2021, 1, 1));
        let mut no_hire = valid(3);
        no_hire.hire_date = None;

        assert_eq!(
            flags(&BirthBeforeHireRule, vec![same_day, reversed, no_hire, valid(4)]),
            vec![true, true, false, false]
        );
    }

    #[test]
    fn test_salary_positive() {
        let mut zero = valid(1);
        zero.salary = Some(0.0);
        let mut negative = valid(2);
        negative.salary = Some(-5.0);
        let mut missing = valid(3);
        missing.salary = None;
        let mut tiny = valid(4);
        tiny.salary = Some(0.01);

        assert_eq!(
            flags(&SalaryPositiveRule, vec![zero, negative, missing, tiny]),
            vec![true, true, true, false]
        );
    }

    #[test]
    fn test_hire_date_floor() {
        let mut early = valid(1);
        early.hire_date = Some(date(2014, 12, 31));
        let mut boundary = valid(2);
        boundary.hire_date = Some(date(2015, 1, 1));
        let mut missing = valid(3);
        missing.hire_date = None;

        assert_eq!(
            flags(&HireDateFloorRule, vec![early, boundary, missing]),
            vec![true, false, false]
        );
    }

    #[test]
    fn test_hire_date_floor_uses_config() {
        let config = RuleConfig {
            hire_date_floor: date(2021, 1, 1),
            ..RuleConfig::default()
        };
        let table = Table::new(vec![valid(1)]);
        assert_eq!(
            HireDateFloorRule.check(&table, &config),
            Evaluation::Rows(vec![true])
        );
    }

    #[test]
    fn test_birth_date_floor() {
        let mut old = valid(1);
        old.birth_date = Some(date(1939, 12, 31));
        let mut boundary = valid(2);
        boundary.birth_date = Some(date(1940, 1, 1));
        let mut unknown = valid(3);
        unknown.birth_date = None;

        assert_eq!(
            flags(&BirthDateFloorRule, vec![old, boundary, unknown]),
            vec![true, false, false]
        );
    }

    #[test]
    fn test_known_manager() {
        let mut known = valid(2);
        known.reports_to = Some(EmployeeId::from(1u32));
        let mut unknown = valid(3);
        unknown.reports_to = Some(EmployeeId::from(99u32));
        let mut self_managed = valid(4);
        self_managed.reports_to = Some(EmployeeId::from(4u32));

        assert_eq!(
            flags(&KnownManagerRule, vec![valid(1), known, unknown, self_managed]),
            vec![false, false, true, false]
        );
    }

    #[test]
    fn test_known_manager_ignores_records_without_eid() {
        let mut anonymous = valid(1);
        anonymous.eid = None;
        let mut report = valid(2);
        report.reports_to = Some(EmployeeId::from(1u32));

        assert_eq!(
            flags(&KnownManagerRule, vec![anonymous, report]),
            vec![false, true]
        );
    }

    #[test]
    fn test_unique_phone_flags_whole_group() {
        let mut a = valid(1);
        a.phone = Some("555".to_string());
        let mut b = valid(2);
        b.phone = Some("555".to_string());
        let mut c = valid(3);
        c.phone = Some("555".to_string());
        let mut none_1 = valid(4);
        none_1.phone = None;
        let mut none_2 = valid(5);
        none_2.phone = None;

        assert_eq!(
            flags(&UniquePhoneRule, vec![a, valid(6), b, none_1, c, none_2]),
            vec![true, false, true, false, true, false]
        );
    }

    #[test]
    fn test_rules_report_row_scope() {
        for rule in all_rules() {
            assert_eq!(rule.scope(), RuleScope::Row);
            assert!(rule.id().starts_with("row/"));
        }
    }
}
