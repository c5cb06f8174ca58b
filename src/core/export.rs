//! Re-serialize a filtered subset back to delimited text

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::core::dataset::{Record, DELIMITER};
use crate::core::error::DashboardError;

pub const DEFAULT_EXPORT_FILENAME: &str = "dados_filtrados.csv";

/// Render records as `;`-delimited text with every value double-quoted.
///
/// The header is taken from the first record. Embedded quotes and delimiters
/// are written as-is. Fails when there is nothing to export.
pub fn export_delimited(records: &[&Record]) -> Result<String, DashboardError> {
    let first = records.first().ok_or(DashboardError::EmptyExport)?;
    let header: Vec<&str> = first.field_names().collect();
    let delimiter = char::from(DELIMITER).to_string();

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(header.join(delimiter.as_str()));
    for record in records {
        let row: Vec<String> = header
            .iter()
            .map(|field| format!("\"{}\"", record.get(field)))
            .collect();
        lines.push(row.join(delimiter.as_str()));
    }

    Ok(lines.join("\n"))
}

/// Destination for an exported blob
pub trait ExportSink {
    /// Store `blob` under `filename`, returning where it went
    fn save(&mut self, blob: &str, filename: &str) -> Result<PathBuf, DashboardError>;
}

/// Writes exports into a directory
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ExportSink for FileSink {
    fn save(&mut self, blob: &str, filename: &str) -> Result<PathBuf, DashboardError> {
        let path = self.dir.join(filename);
        let write_err = |source| DashboardError::WriteExport {
            path: path.clone(),
            source,
        };

        let file = File::create(&path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(blob.as_bytes()).map_err(write_err)?;
        writer.flush().map_err(write_err)?;

        tracing::debug!(path = %path.display(), bytes = blob.len(), "export written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::Dataset;
    use tempfile::tempdir;

    #[test]
    fn test_export_empty_fails() {
        let err = export_delimited(&[]).unwrap_err();
        assert!(matches!(err, DashboardError::EmptyExport));
    }

    #[test]
    fn test_export_quotes_values() {
        let ds = Dataset::parse("Contrato;Frente de Servico;Metodo Edital\nA;F1;MND\nB;;VCA\n");
        let subset: Vec<&Record> = ds.records().iter().collect();
        let text = export_delimited(&subset).unwrap();
        assert_eq!(
            text,
            "Contrato;Frente de Servico;Metodo Edital\n\"A\";\"F1\";\"MND\"\n\"B\";\"\";\"VCA\""
        );
    }

    #[test]
    fn test_export_header_follows_first_record() {
        let first = Record::from_pairs([("b", "1"), ("a", "2")]);
        let second = Record::from_pairs([("a", "3"), ("b", "4")]);
        let text = export_delimited(&[&first, &second]).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("b;a"));
        assert_eq!(lines.next(), Some("\"1\";\"2\""));
        assert_eq!(lines.next(), Some("\"4\";\"3\""));
    }

    #[test]
    fn test_export_does_not_escape() {
        let rec = Record::from_pairs([("a", "say \"hi\"")]);
        assert_eq!(export_delimited(&[&rec]).unwrap(), "a\n\"say \"hi\"\"");
    }

    #[test]
    fn test_file_sink_writes() {
        let dir = tempdir().unwrap();
        let mut sink = FileSink::new(dir.path());
        let path = sink.save("a\n\"1\"", DEFAULT_EXPORT_FILENAME).unwrap();
        assert_eq!(path, dir.path().join("dados_filtrados.csv"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "a\n\"1\"");
    }

    #[test]
    fn test_file_sink_missing_dir() {
        let mut sink = FileSink::new("/nonexistent/export/dir");
        let err = sink.save("x", "out.csv").unwrap_err();
        assert!(matches!(err, DashboardError::WriteExport { .. }));
    }
}
