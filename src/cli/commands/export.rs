//! `pipedash export` command - write the filtered records to a file

use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::success;
use crate::cli::{FilterArgs, GlobalOpts};
use crate::core::export::{export_delimited, FileSink};

use super::utils::{apply_filters, open_session};

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Directory to write into
    #[arg(long, short = 'o', default_value = ".")]
    pub output: PathBuf,

    /// File name (default: export_file from config, else dados_filtrados.csv)
    #[arg(long)]
    pub filename: Option<String>,

    /// Print the export to stdout instead of writing a file
    #[arg(long, conflicts_with_all = ["output", "filename"])]
    pub stdout: bool,
}

pub fn run(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = open_session(global)?;
    apply_filters(&mut session.dashboard, &args.filter);

    if args.stdout {
        let blob = export_delimited(&session.dashboard.subset())?;
        println!("{}", blob);
        return Ok(());
    }

    let mut dashboard = session.dashboard;
    if let Some(filename) = args.filename {
        dashboard = dashboard.with_export_filename(filename);
    }

    let mut sink = FileSink::new(args.output);
    let path = dashboard.export(&mut sink)?;
    success(
        global.quiet,
        &format!(
            "Exported {} record(s) to {}",
            dashboard.subset().len(),
            path.display()
        ),
    );
    Ok(())
}
