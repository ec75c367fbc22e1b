//! Formatting utilities for the infractl client.
//!
//! This module provides functionality for formatting output in the supported
//! formats: tab-separated values for scripts and humans, JSON and YAML.

use serde::Serialize;
use std::str::FromStr;

pub const TSV: &str = "tsv";
pub const JSON: &str = "json";
pub const YAML: &str = "yaml";

/// Error types that can occur during formatting operations
#[derive(Debug, thiserror::Error)]
pub enum FormattingError {
    /// Error when an unsupported output format is requested
    #[error("invalid output format {0}")]
    UnsupportedOutputFormat(String),
    /// Error specific to CSV/TSV operations
    #[error("TSV error: {0}")]
    CsvError(#[from] csv::Error),
    /// Error when converting bytes to UTF-8 string
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
    #[error("TSV writer into inner error: {0}")]
    CsvIntoInnerError(#[from] csv::IntoInnerError<csv::Writer<Vec<u8>>>),
    #[error("JSON serialization error: {0}")]
    JsonSerializationError(#[from] serde_json::Error),
    #[error("YAML serialization error: {0}")]
    YamlSerializationError(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputFormatOptions {
    pub with_headers: bool,
    pub pretty: bool,
}

/// Enum representing the supported output formats
#[derive(Debug, Clone, PartialEq)]
pub enum OutputFormat {
    /// Tab-separated values, one record per line
    Tsv(OutputFormatOptions),
    /// JSON (JavaScript Object Notation) format
    Json(OutputFormatOptions),
    /// YAML format
    Yaml(OutputFormatOptions),
}

impl OutputFormat {
    /// Returns a vector of all supported format names as strings
    pub fn names() -> Vec<&'static str> {
        vec![TSV, JSON, YAML]
    }

    pub fn from_string_with_options(
        format_str: &str,
        options: OutputFormatOptions,
    ) -> Result<OutputFormat, FormattingError> {
        let normalized_format = format_str.to_lowercase();
        match normalized_format.as_str() {
            TSV => Ok(OutputFormat::Tsv(options)),
            JSON => Ok(OutputFormat::Json(options)),
            YAML => Ok(OutputFormat::Yaml(options)),
            _ => Err(FormattingError::UnsupportedOutputFormat(normalized_format)),
        }
    }

    /// JSON and YAML are meant for programs; their output must stay well-formed.
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputFormat::Json(_) | OutputFormat::Yaml(_))
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Tsv(OutputFormatOptions::default())
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            OutputFormat::Tsv(_) => write!(f, "{}", TSV),
            OutputFormat::Json(_) => write!(f, "{}", JSON),
            OutputFormat::Yaml(_) => write!(f, "{}", YAML),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = FormattingError;

    fn from_str(format_str: &str) -> Result<OutputFormat, FormattingError> {
        Self::from_string_with_options(format_str, OutputFormatOptions::default())
    }
}

/// Trait for types that can be rendered as rows of a table
pub trait TabularRecord {
    /// Column names, used when headers are requested
    fn header() -> Vec<&'static str>;

    /// The values of this record, in header order
    fn record(&self) -> Vec<String>;
}

fn to_tsv<T: TabularRecord>(items: &[T], with_headers: bool) -> Result<String, FormattingError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(vec![]);

    if with_headers {
        wtr.write_record(T::header())?;
    }
    for item in items {
        wtr.write_record(item.record())?;
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn to_structured<S: Serialize + ?Sized>(
    value: &S,
    format: &OutputFormat,
) -> Result<String, FormattingError> {
    match format {
        OutputFormat::Json(options) if options.pretty => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Json(_) => Ok(serde_json::to_string(value)?),
        OutputFormat::Yaml(_) => Ok(serde_yaml::to_string(value)?),
        OutputFormat::Tsv(_) => Err(FormattingError::UnsupportedOutputFormat(format.to_string())),
    }
}

/// Render a single value.
pub fn format_one<T>(item: &T, format: &OutputFormat) -> Result<String, FormattingError>
where
    T: TabularRecord + Serialize,
{
    match format {
        OutputFormat::Tsv(options) => to_tsv(std::slice::from_ref(item), options.with_headers),
        _ => to_structured(item, format),
    }
}

/// Render a list of values.
pub fn format_list<T>(items: &[T], format: &OutputFormat) -> Result<String, FormattingError>
where
    T: TabularRecord + Serialize,
{
    match format {
        OutputFormat::Tsv(options) => to_tsv(items, options.with_headers),
        _ => to_structured(items, format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        id: String,
        name: String,
    }

    impl TabularRecord for Row {
        fn header() -> Vec<&'static str> {
            vec!["ID", "NAME"]
        }

        fn record(&self) -> Vec<String> {
            vec![self.id.clone(), self.name.clone()]
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: "1".to_string(), name: "alpha".to_string() },
            Row { id: "2".to_string(), name: "beta".to_string() },
        ]
    }

    #[test]
    fn test_format_names() {
        assert_eq!(OutputFormat::names(), vec!["tsv", "json", "yaml"]);
        assert_eq!(OutputFormat::from_str("JSON").unwrap().to_string(), "json");
        assert!(OutputFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_tsv_with_and_without_headers() {
        let with_headers = OutputFormat::Tsv(OutputFormatOptions { with_headers: true, pretty: false });
        let output = format_list(&rows(), &with_headers).unwrap();
        assert_eq!(output, "ID\tNAME\n1\talpha\n2\tbeta\n");

        let output = format_list(&rows(), &OutputFormat::default()).unwrap();
        assert_eq!(output, "1\talpha\n2\tbeta\n");
    }

    #[test]
    fn test_json_single_value_is_an_object() {
        let row = Row { id: "1".to_string(), name: "alpha".to_string() };
        let output = format_one(&row, &OutputFormat::Json(OutputFormatOptions::default())).unwrap();
        assert_eq!(output, r#"{"id":"1","name":"alpha"}"#);
    }

    #[test]
    fn test_yaml_list() {
        let output = format_list(&rows(), &OutputFormat::Yaml(OutputFormatOptions::default())).unwrap();
        assert!(output.contains("- id: '1'"));
        assert!(output.contains("name: beta"));
    }

    #[test]
    fn test_structured_formats() {
        assert!(OutputFormat::Json(OutputFormatOptions::default()).is_structured());
        assert!(OutputFormat::Yaml(OutputFormatOptions::default()).is_structured());
        assert!(!OutputFormat::default().is_structured());
    }
}
