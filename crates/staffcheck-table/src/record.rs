//! Employee record types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parse::is_missing_token;

/// Largest integer magnitude that survives a round trip through `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Canonical employee identifier.
///
/// `eid` and `reports_to` must compare equal when they name the same
/// employee even if one column was written as `7` and the other as `7.0`,
/// so integral numbers are normalised to their integer rendering. Any other
/// text is kept verbatim after trimming.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    /// Parses and canonicalises a raw identifier. Blank input or a
    /// missing-value token yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        if is_missing_token(raw) {
            return None;
        }
        let s = raw.trim();

        if let Ok(n) = s.parse::<f64>() {
            if n.is_nan() {
                return None;
            }
            if n.is_finite() && n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER {
                return Some(Self(format!("{}", n as i64)));
            }
        }

        Some(Self(s.to_string()))
    }

    /// Returns the canonical text form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u32> for EmployeeId {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

/// One row of the employee table.
///
/// Every field is optional: a blank or unparseable cell is stored as `None`.
/// Required-ness is a property of the lint rules, not of the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// 1-based line in the source file (0 for records built in memory).
    pub line: usize,
    pub eid: Option<EmployeeId>,
    /// Raw name text. Only an empty cell is `None`; whitespace is kept.
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub hire_date: Option<NaiveDate>,
    pub salary: Option<f64>,
    pub reports_to: Option<EmployeeId>,
    pub phone: Option<String>,
    pub city: Option<String>,
}

impl Record {
    /// Starts building a record in memory.
    pub fn builder() -> RecordBuilder {
        RecordBuilder::default()
    }
}

/// Builder for [`Record`].
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    pub fn line(mut self, line: usize) -> Self {
        self.record.line = line;
        self
    }

    pub fn eid(mut self, eid: impl Into<EmployeeId>) -> Self {
        self.record.eid = Some(eid.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.record.name = Some(name.into());
        self
    }

    pub fn birth_date(mut self, date: NaiveDate) -> Self {
        self.record.birth_date = Some(date);
        self
    }

    pub fn hire_date(mut self, date: NaiveDate) -> Self {
        self.record.hire_date = Some(date);
        self
    }

    pub fn salary(mut self, salary: f64) -> Self {
        self.record.salary = Some(salary);
        self
    }

    pub fn reports_to(mut self, manager: impl Into<EmployeeId>) -> Self {
        self.record.reports_to = Some(manager.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.record.phone = Some(phone.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.record.city = Some(city.into());
        self
    }

    pub fn build(self) -> Record {
        self.record
    }
}
