//! Core module - the UI-free parse, filter, aggregate and export pipeline

pub mod aggregate;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod export;
pub mod filter;
pub mod format;
pub mod number;

pub use aggregate::{Breakdown, BreakdownRow, Bucket, BucketKey, Summary};
pub use config::Config;
pub use dashboard::{Dashboard, DashboardView, Kpis, RenderSurface, SummaryBar};
pub use dataset::{fields, Dataset, Record};
pub use error::DashboardError;
pub use export::{export_delimited, ExportSink, FileSink};
pub use filter::{resolve_fronts, FilterSelection, FrontResolution};
pub use number::{parse_number, ToNumber};
