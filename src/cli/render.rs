//! Terminal rendering surface
//!
//! Each publish call replaces its panel, so the surface can be refreshed any
//! number of times and `render()` always shows the latest run.

use console::style;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{bar, truncate_str};
use crate::core::aggregate::BreakdownRow;
use crate::core::dashboard::{Kpis, RenderSurface, SummaryBar, EXECUTED_LABEL, PLANNED_LABEL};
use crate::core::format::format_compact;

const BAR_WIDTH: usize = 24;
const LABEL_WIDTH: usize = 40;

/// Which panels a command shows
#[derive(Debug, Clone, Copy)]
pub struct Panels {
    pub kpis: bool,
    pub summary: bool,
    pub breakdown: bool,
}

impl Panels {
    pub const ALL: Panels = Panels {
        kpis: true,
        summary: true,
        breakdown: true,
    };
}

/// Renders panels as tables with text bars
#[derive(Debug)]
pub struct TableSurface {
    markdown: bool,
    panels: Panels,
    kpis: Option<String>,
    summary: Option<String>,
    breakdown: Option<String>,
}

impl TableSurface {
    /// Styled terminal tables
    pub fn terminal(panels: Panels) -> Self {
        Self::new(false, panels)
    }

    /// Markdown tables, suitable for reports
    pub fn markdown(panels: Panels) -> Self {
        Self::new(true, panels)
    }

    fn new(markdown: bool, panels: Panels) -> Self {
        Self {
            markdown,
            panels,
            kpis: None,
            summary: None,
            breakdown: None,
        }
    }

    fn heading(&self, title: &str) -> String {
        if self.markdown {
            format!("## {}\n\n", title)
        } else {
            format!("{}\n", style(title).bold().underlined())
        }
    }

    fn table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        if self.markdown {
            table.with(Style::markdown());
        } else {
            table.with(Style::rounded());
        }
        format!("{}\n", table)
    }

    /// All published panels, in display order
    pub fn render(&self) -> String {
        [&self.kpis, &self.summary, &self.breakdown]
            .into_iter()
            .flatten()
            .cloned()
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Chart data label: empty for zero bars
fn length_label(value: f64) -> String {
    if value != 0.0 {
        format!("{} m", format_compact(value))
    } else {
        String::new()
    }
}

impl RenderSurface for TableSurface {
    fn publish_kpis(&mut self, kpis: &Kpis) {
        if !self.panels.kpis {
            return;
        }
        let mut builder = Builder::default();
        builder.push_record(["Indicator", "Value"]);
        builder.push_record(["Service fronts", kpis.count.as_str()]);
        builder.push_record([format!("{} (m)", PLANNED_LABEL), kpis.planned.clone()]);
        builder.push_record([format!("{} (m)", EXECUTED_LABEL), kpis.executed.clone()]);
        builder.push_record(["Difference", kpis.difference.as_str()]);

        let panel = format!("{}{}", self.heading("Indicators"), self.table(builder));
        self.kpis = Some(panel);
    }

    fn publish_summary(&mut self, bars: &[SummaryBar; 2]) {
        if !self.panels.summary {
            return;
        }
        let max = bars.iter().map(|b| b.value).fold(0.0, f64::max);
        let mut builder = Builder::default();
        builder.push_record(["", "Length", ""]);
        for b in bars {
            builder.push_record([
                b.label.to_string(),
                length_label(b.value),
                bar(b.value, max, BAR_WIDTH),
            ]);
        }

        let panel = format!(
            "{}{}",
            self.heading("Planned vs. executed"),
            self.table(builder)
        );
        self.summary = Some(panel);
    }

    fn publish_breakdown(&mut self, rows: Option<&[BreakdownRow]>) {
        if !self.panels.breakdown {
            return;
        }
        let heading = self.heading("Method x diameter");
        let Some(rows) = rows else {
            let note = if self.markdown {
                "_No diameter/method data for the current filters._\n".to_string()
            } else {
                format!(
                    "{}\n",
                    style("No diameter/method data for the current filters.").dim()
                )
            };
            self.breakdown = Some(format!("{}{}", heading, note));
            return;
        };

        let max = rows
            .iter()
            .flat_map(|r| [r.planned, r.executed])
            .fold(0.0, f64::max);
        let mut builder = Builder::default();
        builder.push_record([
            String::new(),
            format!("{} (m)", PLANNED_LABEL),
            format!("{} (m)", EXECUTED_LABEL),
            String::new(),
        ]);
        for row in rows {
            let bars = format!(
                "{}\n{}",
                bar(row.planned, max, BAR_WIDTH),
                bar(row.executed, max, BAR_WIDTH)
            );
            builder.push_record([
                truncate_str(&row.label, LABEL_WIDTH),
                length_label(row.planned),
                length_label(row.executed),
                if self.markdown { String::new() } else { bars },
            ]);
        }

        self.breakdown = Some(format!("{}{}", heading, self.table(builder)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::Dataset;
    use crate::core::Dashboard;

    fn dashboard() -> Dashboard {
        Dashboard::new(Dataset::parse(
            "Contrato;Extensao Edital (m);Extensao Executivo (m);Diametro Edital (mm);Metodo Edital;Diametro Executivo (mm);Metodo Executivo\n\
             A;1.000,00;900,00;200;X;200;X\n",
        ))
    }

    #[test]
    fn test_markdown_panels() {
        let mut surface = TableSurface::markdown(Panels::ALL);
        dashboard().refresh(&mut surface);
        let out = surface.render();
        assert!(out.contains("## Indicators"));
        assert!(out.contains("-100,00 (-10.0%)"));
        assert!(out.contains("1.000 m"));
        assert!(out.contains("DN 200 – X"));
    }

    #[test]
    fn test_publish_replaces_panel() {
        let dash = dashboard();
        let mut surface = TableSurface::markdown(Panels::ALL);
        dash.refresh(&mut surface);
        dash.refresh(&mut surface);
        assert_eq!(surface.render().matches("## Indicators").count(), 1);
    }

    #[test]
    fn test_empty_breakdown_note() {
        let mut surface = TableSurface::markdown(Panels::ALL);
        surface.publish_breakdown(None);
        assert!(surface.render().contains("No diameter/method data"));
    }

    #[test]
    fn test_disabled_panels_skipped() {
        let panels = Panels {
            kpis: true,
            summary: false,
            breakdown: false,
        };
        let mut surface = TableSurface::markdown(panels);
        dashboard().refresh(&mut surface);
        let out = surface.render();
        assert!(out.contains("Indicators"));
        assert!(!out.contains("Method x diameter"));
    }
}
