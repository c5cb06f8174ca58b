//! `pipedash breakdown` command - lengths by diameter and method

use miette::Result;
use std::path::PathBuf;

use crate::cli::render::Panels;
use crate::cli::{FilterArgs, GlobalOpts};

use super::utils::{apply_filters, open_session, render_panels, write_output};

#[derive(clap::Args, Debug)]
pub struct BreakdownArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: BreakdownArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = open_session(global)?;
    apply_filters(&mut session.dashboard, &args.filter);

    let panels = Panels {
        kpis: false,
        summary: false,
        breakdown: true,
    };
    let content = render_panels(&session, panels)?;
    write_output(&content, args.output, global.quiet)
}
