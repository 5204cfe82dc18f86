//! Data-quality lint system for employee tables.
//!
//! Evaluates a fixed, ordered list of independent rules over a loaded
//! [`staffcheck_table::Table`] and reports a violation count per rule.
//!
//! # Example
//!
//! ```
//! use staffcheck_lint::{RuleConfig, RuleRegistry};
//! use staffcheck_table::Table;
//!
//! let csv = "eid,name,birth_date,hire_date,salary,reports_to,phone,city\n\
//!            1,Ada,1990-01-01,2020-01-01,50000,,555,London\n\
//!            2,Bob,1985-01-01,2019-01-01,-5,1,555,London\n";
//! let table = Table::from_csv_str(csv).unwrap();
//!
//! let report = RuleRegistry::default_rules().evaluate(&table, &RuleConfig::default());
//! assert_eq!(report.count("row/salary-positive"), Some(1));
//! assert_eq!(report.count("row/unique-phone"), Some(2));
//! assert!(!report.ok);
//! ```

pub mod config;
pub mod distribution;
pub mod registry;
pub mod report;
pub mod rules;

pub use config::{ConfigError, RuleConfig};
pub use distribution::{Histogram, SalaryDistribution, SalarySummary};
pub use registry::{RuleMetadata, RuleRegistry};
pub use report::{LintReport, LintSummary, RuleOutcome, RuleScope, Severity};
pub use rules::{Evaluation, LintRule};
