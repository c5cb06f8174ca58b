//! Shared utilities for CLI commands

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::cli::helpers::{info, success, warn};
use crate::cli::render::{Panels, TableSurface};
use crate::cli::{FilterArgs, GlobalOpts, OutputFormat};
use crate::core::{Config, Dashboard, Dataset};

/// Loaded data and the resolved output format
pub struct Session {
    pub dashboard: Dashboard,
    pub format: OutputFormat,
}

/// Load configuration and data; nothing else runs before this succeeds
pub fn open_session(global: &GlobalOpts) -> Result<Session> {
    let config = Config::load();
    let path = global.data.clone().unwrap_or_else(|| config.data_file());

    info(global.quiet, &format!("Loading {}", path.display()));
    let dataset = Dataset::load(&path)?;
    tracing::info!(path = %path.display(), records = dataset.len(), "dataset loaded");

    let format = match (global.format, config.default_format.as_deref()) {
        (OutputFormat::Auto, Some(configured)) => OutputFormat::from_config(configured)
            .unwrap_or_else(|| {
                warn(&format!("Ignoring unknown default_format '{}'", configured));
                OutputFormat::Auto
            }),
        (format, _) => format,
    };

    let dashboard = Dashboard::new(dataset).with_export_filename(config.export_file());
    Ok(Session { dashboard, format })
}

/// Apply contract then front, warning when the front is not offered under the contract
pub fn apply_filters(dashboard: &mut Dashboard, filter: &FilterArgs) {
    let fronts = dashboard.select_contract(filter.contract.clone());
    if let Some(contract) = dashboard.selection().contract.as_deref() {
        if !dashboard.contracts().contains(&contract) {
            warn(&format!("Contract '{}' not found in data", contract));
        }
    }

    if let Some(front) = filter.front.as_deref().filter(|f| !f.is_empty()) {
        if fronts.domain.iter().any(|d| d == front) {
            dashboard.select_front(Some(front.to_string()));
        } else {
            warn(&format!(
                "Service front '{}' not found for the selected contract, showing all fronts",
                front
            ));
        }
    }
}

/// Render selected panels in the requested format
pub fn render_panels(session: &Session, panels: Panels) -> Result<String> {
    match session.format {
        OutputFormat::Json => {
            let view = session.dashboard.view();
            let mut value = serde_json::to_value(&view).into_diagnostic()?;
            if let Some(obj) = value.as_object_mut() {
                if !panels.kpis {
                    obj.remove("kpis");
                }
                if !panels.summary {
                    obj.remove("summary_chart");
                }
                if !panels.breakdown {
                    obj.remove("breakdown");
                }
            }
            let json = serde_json::to_string_pretty(&value).into_diagnostic()?;
            Ok(format!("{}\n", json))
        }
        OutputFormat::Md => {
            let mut surface = TableSurface::markdown(panels);
            session.dashboard.refresh(&mut surface);
            Ok(surface.render())
        }
        OutputFormat::Auto => {
            let mut surface = TableSurface::terminal(panels);
            session.dashboard.refresh(&mut surface);
            Ok(surface.render())
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{}", json);
    Ok(())
}

/// Write content to a file, or stdout when no path is given
pub fn write_output(content: &str, output_path: Option<PathBuf>, quiet: bool) -> Result<()> {
    match output_path {
        Some(path) => {
            let file = File::create(&path).into_diagnostic()?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content.as_bytes()).into_diagnostic()?;
            writer.flush().into_diagnostic()?;
            success(quiet, &format!("Written to {}", path.display()));
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
