//! `pipedash dashboard` command - every panel for the selected filters

use miette::Result;
use std::path::PathBuf;

use crate::cli::render::Panels;
use crate::cli::{FilterArgs, GlobalOpts};

use super::utils::{apply_filters, open_session, render_panels, write_output};

#[derive(clap::Args, Debug)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: DashboardArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = open_session(global)?;
    apply_filters(&mut session.dashboard, &args.filter);

    let content = render_panels(&session, Panels::ALL)?;
    write_output(&content, args.output, global.quiet)
}
