//! CLI command implementations

pub mod check;
pub mod rules;

use serde::{Deserialize, Serialize};

/// Output format shared by all commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "unknown format '{}', expected 'text' or 'json'",
                s
            )),
        }
    }
}

/// Machine-readable error for JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonError {
    /// Stable error code (e.g., "LOAD_FAILED").
    pub code: String,
    /// Human-readable message including the cause chain.
    pub message: String,
}

impl JsonError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Error codes used in JSON output.
pub mod error_codes {
    pub const LOAD_FAILED: &str = "LOAD_FAILED";
    pub const CONFIG_FAILED: &str = "CONFIG_FAILED";
    pub const CHART_FAILED: &str = "CHART_FAILED";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
