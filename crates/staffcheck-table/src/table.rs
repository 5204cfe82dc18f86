//! The employee table and its CSV loader.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::csv::{read_rows, RawRow};
use crate::error::LoadError;
use crate::parse::{is_missing_token, parse_date, parse_id, parse_name, parse_number, parse_text};
use crate::record::Record;

/// Columns every input file must provide, in canonical order.
pub const COLUMNS: [&str; 8] = [
    "eid",
    "name",
    "birth_date",
    "hire_date",
    "salary",
    "reports_to",
    "phone",
    "city",
];

/// A cell that held text but could not be parsed into its column's type.
///
/// The record stores `None` for such cells; the note is kept so callers
/// can tell a blank cell from a malformed one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coercion {
    /// 1-based source line.
    pub line: usize,
    /// Column name.
    pub column: String,
    /// Original cell text.
    pub raw: String,
}

/// An ordered, read-only collection of employee records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    records: Vec<Record>,
    coercions: Vec<Coercion>,
}

impl Table {
    /// Creates a table from records built in memory.
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            coercions: Vec::new(),
        }
    }

    /// Loads a table from a CSV file.
    pub fn from_csv_path(path: &Path) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path)?;
        let table = Self::from_csv_str(&text)?;
        tracing::info!(
            path = %path.display(),
            records = table.len(),
            coerced = table.coercions.len(),
            "loaded employee table"
        );
        Ok(table)
    }

    /// Parses a table from CSV text with a header row.
    pub fn from_csv_str(input: &str) -> Result<Self, LoadError> {
        let mut rows = read_rows(input)?.into_iter();
        let header = rows.next().ok_or(LoadError::Empty)?;
        let layout = ColumnLayout::from_header(&header)?;

        let mut records = Vec::new();
        let mut coercions = Vec::new();
        for row in rows {
            records.push(layout.record(&row, &mut coercions)?);
        }

        Ok(Self { records, coercions })
    }

    /// Returns all records in source order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the record at `index`.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Returns an iterator over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the cells that were present but unparseable.
    pub fn coercions(&self) -> &[Coercion] {
        &self.coercions
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Maps each required column to its position in the header.
struct ColumnLayout {
    positions: [usize; COLUMNS.len()],
    width: usize,
}

impl ColumnLayout {
    fn from_header(header: &RawRow) -> Result<Self, LoadError> {
        let mut seen: HashMap<String, usize> = HashMap::new();
        for (i, name) in header.fields.iter().enumerate() {
            let key = name.trim().to_lowercase();
            if !COLUMNS.contains(&key.as_str()) {
                continue;
            }
            if seen.insert(key.clone(), i).is_some() {
                return Err(LoadError::DuplicateColumn(key));
            }
        }

        let mut positions = [0; COLUMNS.len()];
        for (slot, column) in positions.iter_mut().zip(COLUMNS) {
            *slot = *seen
                .get(column)
                .ok_or_else(|| LoadError::MissingColumn(column.to_string()))?;
        }

        Ok(Self {
            positions,
            width: header.fields.len(),
        })
    }

    /// Returns the text of column `idx`; absent trailing fields read as "".
    fn cell<'r>(&self, row: &'r RawRow, idx: usize) -> &'r str {
        row.fields
            .get(self.positions[idx])
            .map(String::as_str)
            .unwrap_or("")
    }

    fn record(&self, row: &RawRow, coercions: &mut Vec<Coercion>) -> Result<Record, LoadError> {
        if row.fields.len() > self.width {
            return Err(LoadError::RaggedRow {
                line: row.line,
                expected: self.width,
                found: row.fields.len(),
            });
        }

        let cell = |idx: usize| self.cell(row, idx);

        let mut coerce = |idx: usize, parsed_ok: bool| {
            let raw = cell(idx);
            if !parsed_ok && !is_missing_token(raw) {
                tracing::debug!(
                    line = row.line,
                    column = COLUMNS[idx],
                    raw,
                    "coerced unparseable cell to missing"
                );
                coercions.push(Coercion {
                    line: row.line,
                    column: COLUMNS[idx].to_string(),
                    raw: raw.to_string(),
                });
            }
        };

        let eid = parse_id(cell(0));
        let name = parse_name(cell(1));
        let birth_date = parse_date(cell(2));
        coerce(2, birth_date.is_some());
        let hire_date = parse_date(cell(3));
        coerce(3, hire_date.is_some());
        let salary = parse_number(cell(4));
        coerce(4, salary.is_some());
        let reports_to = parse_id(cell(5));
        let phone = parse_text(cell(6));
        let city = parse_text(cell(7));

        Ok(Record {
            line: row.line,
            eid,
            name,
            birth_date,
            hire_date,
            salary,
            reports_to,
            phone,
            city,
        })
    }
}
