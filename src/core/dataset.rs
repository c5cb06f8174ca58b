//! Dataset loading from semicolon-delimited exports
//!
//! The format is deliberately loose: optional UTF-8 BOM, `\n` or `\r\n` line
//! endings, blank lines anywhere, no quoting, and rows that may be shorter or
//! longer than the header. None of these are errors.

use csv::{ReaderBuilder, StringRecord, Terminator};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;

use crate::core::error::DashboardError;
use crate::core::number::ToNumber;

/// Column names the dashboard reads. Other columns are carried along untouched.
pub mod fields {
    pub const CONTRACT: &str = "Contrato";
    pub const SERVICE_FRONT: &str = "Frente de Servico";
    pub const PLANNED_LENGTH: &str = "Extensao Edital (m)";
    pub const EXECUTED_LENGTH: &str = "Extensao Executivo (m)";
    pub const PLANNED_DIAMETER: &str = "Diametro Edital (mm)";
    pub const PLANNED_METHOD: &str = "Metodo Edital";
    pub const EXECUTED_DIAMETER: &str = "Diametro Executivo (mm)";
    pub const EXECUTED_METHOD: &str = "Metodo Executivo";
}

pub const DELIMITER: u8 = b';';

const BOM: char = '\u{feff}';

/// One data row keyed by header field name, in header order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, String>,
}

impl Record {
    /// Build a record from (field, value) pairs; later duplicates overwrite earlier ones
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of a field, empty string when the field is unknown
    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }

    /// Parsed numeric value of a field
    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).to_number()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.values().map(String::as_str)
    }

    pub fn contract(&self) -> &str {
        self.get(fields::CONTRACT)
    }

    pub fn service_front(&self) -> &str {
        self.get(fields::SERVICE_FRONT)
    }
}

/// The loaded rows, immutable once built
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    headers: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    /// Parse raw delimited text.
    ///
    /// The first non-blank line is the header. Missing trailing values become
    /// empty strings and extra values past the header are dropped.
    pub fn parse(text: &str) -> Self {
        let text = text.strip_prefix(BOM).unwrap_or(text);

        let mut reader = ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .terminator(Terminator::Any(b'\n'))
            .from_reader(text.as_bytes());

        let mut lines = reader
            .records()
            .filter_map(|r| match r {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::debug!("skipping unreadable line: {}", e);
                    None
                }
            })
            .filter(|record| !is_blank(record));

        let Some(header_line) = lines.next() else {
            return Self::default();
        };

        let headers: Vec<String> = header_line.iter().map(|h| h.trim().to_string()).collect();

        let records: Vec<Record> = lines
            .map(|line| {
                Record::from_pairs(headers.iter().enumerate().map(|(i, name)| {
                    (
                        name.clone(),
                        line.get(i).map(str::trim).unwrap_or("").to_string(),
                    )
                }))
            })
            .collect();

        tracing::debug!(
            columns = headers.len(),
            records = records.len(),
            "parsed dataset"
        );

        Self { headers, records }
    }

    /// Read and parse a data file
    pub fn load(path: &Path) -> Result<Self, DashboardError> {
        let text = std::fs::read_to_string(path).map_err(|source| DashboardError::ReadData {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// Header names as they appeared in the file (duplicates included)
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct non-empty contracts in first-occurrence order
    pub fn contracts(&self) -> Vec<&str> {
        distinct_non_empty(self.records.iter().map(Record::contract))
    }
}

/// A line that is empty once trimmed (a lone `\r` included)
fn is_blank(record: &StringRecord) -> bool {
    record.len() <= 1 && record.get(0).map_or(true, |f| f.trim().is_empty())
}

pub(crate) fn distinct_non_empty<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = indexmap::IndexSet::new();
    for value in values.filter(|v| !v.is_empty()) {
        seen.insert(value);
    }
    seen.into_iter().collect()
}
