//! Employee table model and loader for staffcheck.
//!
//! Loads a delimited employee file into an in-memory [`Table`]. Cells that
//! fail to parse are coerced to missing values rather than failing the load;
//! only structural problems (unreadable file, missing columns, malformed
//! quoting) produce a [`LoadError`].
//!
//! # Example
//!
//! ```
//! use staffcheck_table::Table;
//!
//! let csv = "eid,name,birth_date,hire_date,salary,reports_to,phone,city\n\
//!            1,Ada,1990-01-01,2020-01-01,50000,,555-0100,London\n";
//! let table = Table::from_csv_str(csv).unwrap();
//! assert_eq!(table.len(), 1);
//! ```

mod csv;
pub mod error;
pub mod parse;
pub mod record;
pub mod table;

pub use error::LoadError;
pub use record::{EmployeeId, Record, RecordBuilder};
pub use table::{Coercion, Table, COLUMNS};
