//! Dashboard controller: filter -> aggregate -> publish
//!
//! The loaded dataset and the filter selection live in one explicit state
//! value. Every change re-runs the whole pipeline against the unchanged
//! dataset; nothing is cached between runs.

use serde::Serialize;
use std::path::PathBuf;

use crate::core::aggregate::{Breakdown, BreakdownRow, Summary};
use crate::core::dataset::{Dataset, Record};
use crate::core::error::DashboardError;
use crate::core::export::{export_delimited, ExportSink, DEFAULT_EXPORT_FILENAME};
use crate::core::filter::{FilterSelection, FrontResolution};
use crate::core::format::{format_decimal, format_difference};

pub const PLANNED_LABEL: &str = "Edital";
pub const EXECUTED_LABEL: &str = "Executivo";

/// KPI panel text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Kpis {
    pub count: String,
    pub planned: String,
    pub executed: String,
    pub difference: String,
}

impl Kpis {
    pub fn from_summary(summary: &Summary) -> Self {
        Self {
            count: summary.count.to_string(),
            planned: format_decimal(summary.planned),
            executed: format_decimal(summary.executed),
            difference: format_difference(summary.difference, summary.percentage),
        }
    }
}

/// A labelled value of the summary chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryBar {
    pub label: &'static str,
    pub value: f64,
}

/// Everything one pipeline run produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub selection: FilterSelection,
    pub summary: Summary,
    pub kpis: Kpis,
    pub summary_chart: [SummaryBar; 2],
    /// `None` when no record has a complete (diameter, method, length) triple
    pub breakdown: Option<Vec<BreakdownRow>>,
}

/// Where pipeline results are published.
///
/// Publishing is idempotent: each call replaces whatever the surface showed
/// before.
pub trait RenderSurface {
    fn publish_kpis(&mut self, kpis: &Kpis);

    fn publish_summary(&mut self, bars: &[SummaryBar; 2]);

    /// `None` means there is no breakdown data for the current subset
    fn publish_breakdown(&mut self, rows: Option<&[BreakdownRow]>);
}

/// Application state
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Dataset,
    selection: FilterSelection,
    export_filename: String,
}

impl Dashboard {
    /// A dashboard only exists once its data is loaded
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            selection: FilterSelection::default(),
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
        }
    }

    pub fn with_export_filename(mut self, filename: impl Into<String>) -> Self {
        self.export_filename = filename.into();
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// Contract dropdown options (without the "all" sentinel)
    pub fn contracts(&self) -> Vec<&str> {
        self.dataset.contracts()
    }

    /// Service-front options for the current contract
    pub fn fronts(&self) -> FrontResolution {
        self.selection.fronts(&self.dataset)
    }

    pub fn select_contract(&mut self, contract: Option<String>) -> FrontResolution {
        self.selection.set_contract(&self.dataset, contract)
    }

    /// Select a front; values not offered under the current contract reset to "all"
    pub fn select_front(&mut self, front: Option<String>) {
        self.selection.set_front(front);
        let resolution = self.fronts();
        self.selection.front = resolution.front;
    }

    pub fn clear_filters(&mut self) {
        self.selection.clear();
    }

    /// Current working subset
    pub fn subset(&self) -> Vec<&Record> {
        self.selection.apply(&self.dataset)
    }

    /// Run filter and aggregation without publishing
    pub fn view(&self) -> DashboardView {
        let subset = self.subset();
        let summary = Summary::compute(&subset);
        let breakdown = Breakdown::compute(&subset);

        tracing::debug!(
            contract = self.selection.contract.as_deref().unwrap_or("*"),
            front = self.selection.front.as_deref().unwrap_or("*"),
            records = summary.count,
            buckets = breakdown.len(),
            "pipeline run"
        );

        DashboardView {
            selection: self.selection.clone(),
            kpis: Kpis::from_summary(&summary),
            summary_chart: [
                SummaryBar {
                    label: PLANNED_LABEL,
                    value: summary.planned,
                },
                SummaryBar {
                    label: EXECUTED_LABEL,
                    value: summary.executed,
                },
            ],
            breakdown: (!breakdown.is_empty()).then(|| breakdown.series()),
            summary,
        }
    }

    /// Run the pipeline and publish every panel
    pub fn refresh(&self, surface: &mut dyn RenderSurface) -> DashboardView {
        let view = self.view();
        surface.publish_kpis(&view.kpis);
        surface.publish_summary(&view.summary_chart);
        surface.publish_breakdown(view.breakdown.as_deref());
        view
    }

    /// Export the current subset through `sink`
    pub fn export(&self, sink: &mut dyn ExportSink) -> Result<PathBuf, DashboardError> {
        let blob = export_delimited(&self.subset())?;
        sink.save(&blob, &self.export_filename)
    }
}
