//! Shared helpers for staffcheck integration tests.

use std::path::{Path, PathBuf};

use staffcheck_table::Table;

/// CSV header with every required column.
pub const HEADER: &str = "eid,name,birth_date,hire_date,salary,reports_to,phone,city";

/// Path to a file under `fixtures/`.
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

/// Loads a fixture table, panicking on failure.
pub fn load_fixture(name: &str) -> Table {
    let path = fixture_path(name);
    Table::from_csv_path(&path)
        .unwrap_or_else(|e| panic!("failed to load fixture {}: {}", path.display(), e))
}

/// Writes `rows` under a header into `dir/name` and returns the path.
pub fn write_csv(dir: &Path, name: &str, rows: &[&str]) -> PathBuf {
    let mut text = String::from(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    let path = dir.join(name);
    std::fs::write(&path, text).expect("write csv fixture");
    path
}
