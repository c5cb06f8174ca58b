//! Error types for the dashboard pipeline
//!
//! Field-level and structural anomalies in the data never surface here; they
//! degrade to zeros and empty charts instead.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum DashboardError {
    #[error("could not read data file {path}")]
    #[diagnostic(
        code(pipedash::data::read),
        help("pass --data <FILE> or set data_file in .pipedash.yaml")
    )]
    ReadData {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no records match the current filters, nothing to export")]
    #[diagnostic(
        code(pipedash::export::empty),
        help("clear or change the contract / service front filters")
    )]
    EmptyExport,

    #[error("could not write export file {path}")]
    #[diagnostic(code(pipedash::export::write))]
    WriteExport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {path}: {message}")]
    #[diagnostic(code(pipedash::config::parse))]
    Config { path: PathBuf, message: String },
}
