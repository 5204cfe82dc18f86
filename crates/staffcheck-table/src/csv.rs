//! Minimal delimited-text reader.
//!
//! Handles comma-separated fields, double-quoted fields with `""` escapes,
//! newlines inside quotes, LF/CRLF/CR line endings and a leading BOM.
//! Lines with no content are skipped.

use crate::error::LoadError;

/// A physical row split into fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawRow {
    /// 1-based line the row starts on.
    pub line: usize,
    pub fields: Vec<String>,
}

impl RawRow {
    fn is_blank(&self) -> bool {
        self.fields.len() == 1 && self.fields[0].trim().is_empty()
    }
}

struct RowBuilder {
    rows: Vec<RawRow>,
    fields: Vec<String>,
    field: String,
    row_start: usize,
}

impl RowBuilder {
    fn end_field(&mut self) {
        self.fields.push(std::mem::take(&mut self.field));
    }

    fn end_row(&mut self, next_line: usize) {
        self.end_field();
        let row = RawRow {
            line: self.row_start,
            fields: std::mem::take(&mut self.fields),
        };
        if !row.is_blank() {
            self.rows.push(row);
        }
        self.row_start = next_line;
    }
}

/// Splits `input` into rows of raw string fields.
pub(crate) fn read_rows(input: &str) -> Result<Vec<RawRow>, LoadError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    let mut builder = RowBuilder {
        rows: Vec::new(),
        fields: Vec::new(),
        field: String::new(),
        row_start: 1,
    };
    let mut line = 1;
    let mut in_quotes = false;
    let mut quote_line = 1;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    builder.field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    builder.field.push('\n');
                }
                _ => builder.field.push(c),
            }
            continue;
        }

        match c {
            '"' => {
                in_quotes = true;
                quote_line = line;
            }
            ',' => builder.end_field(),
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                line += 1;
                builder.end_row(line);
            }
            _ => builder.field.push(c),
        }
    }

    if in_quotes {
        return Err(LoadError::UnterminatedQuote { line: quote_line });
    }
    if !builder.field.is_empty() || !builder.fields.is_empty() {
        builder.end_row(line + 1);
    }

    Ok(builder.rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fields(rows: &[RawRow]) -> Vec<Vec<&str>> {
        rows.iter()
            .map(|r| r.fields.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_simple_rows() {
        let rows = read_rows("a,b,c\n1,2,3\n").unwrap();
        assert_eq!(fields(&rows), vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]);
        assert_eq!(rows[0].line, 1);
        assert_eq!(rows[1].line, 2);
    }

    #[test]
    fn test_missing_trailing_newline() {
        let rows = read_rows("a,b\n1,2").unwrap();
        assert_eq!(fields(&rows), vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn test_empty_fields() {
        let rows = read_rows("a,b,c\n,,\n").unwrap();
        assert_eq!(fields(&rows)[1], vec!["", "", ""]);
    }

    #[test]
    fn test_quoted_fields() {
        let rows = read_rows("name,city\n\"Smith, John\",\"He said \"\"hi\"\"\"\n").unwrap();
        assert_eq!(fields(&rows)[1], vec!["Smith, John", "He said \"hi\""]);
    }

    #[test]
    fn test_quoted_newline_tracks_lines() {
        let rows = read_rows("a,b\n\"x\ny\",1\n2,3\n").unwrap();
        assert_eq!(fields(&rows)[1], vec!["x\ny", "1"]);
        assert_eq!(rows[1].line, 2);
        assert_eq!(rows[2].line, 4);
    }

    #[test]
    fn test_crlf_and_bom() {
        let rows = read_rows("\u{feff}a,b\r\n1,2\r\n").unwrap();
        assert_eq!(fields(&rows), vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let rows = read_rows("a,b\n\n1,2\n   \n3,4\n").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].line, 3);
        assert_eq!(rows[2].line, 5);
    }

    #[test]
    fn test_unterminated_quote() {
        let err = read_rows("a,b\n1,\"open\n").unwrap_err();
        assert!(matches!(err, LoadError::UnterminatedQuote { line: 2 }));
    }

    #[test]
    fn test_empty_input() {
        assert!(read_rows("").unwrap().is_empty());
    }
}
