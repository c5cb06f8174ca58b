//! `pipedash summary` command - KPIs and planned vs. executed totals

use miette::Result;
use std::path::PathBuf;

use crate::cli::render::Panels;
use crate::cli::{FilterArgs, GlobalOpts};

use super::utils::{apply_filters, open_session, render_panels, write_output};

#[derive(clap::Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Only the KPI panel, without the totals chart
    #[arg(long)]
    pub kpis_only: bool,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: SummaryArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = open_session(global)?;
    apply_filters(&mut session.dashboard, &args.filter);

    let panels = Panels {
        kpis: true,
        summary: !args.kpis_only,
        breakdown: false,
    };
    let content = render_panels(&session, panels)?;
    write_output(&content, args.output, global.quiet)
}
