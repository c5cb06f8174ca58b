//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    breakdown::BreakdownArgs, completions::CompletionsArgs, config::ConfigCommands,
    dashboard::DashboardArgs, export::ExportArgs, filters::FiltersArgs,
    interactive::InteractiveArgs, summary::SummaryArgs,
};

#[derive(Parser)]
#[command(name = "pipedash")]
#[command(author, version, about = "Planned vs. executed pipeline dashboard")]
#[command(long_about = "Reports planned (edital) against executed (executivo) pipeline lengths from a semicolon-delimited export, by contract and service front.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Data file (default: data_file from config, else ./dados.csv)
    #[arg(long, short = 'd', global = true, env = "PIPEDASH_DATA")]
    pub data: Option<PathBuf>,
}

/// Contract and service-front selection shared by reporting commands
#[derive(clap::Args, Clone, Debug, Default)]
pub struct FilterArgs {
    /// Only records of this contract (`Contrato`)
    #[arg(long, short = 'c')]
    pub contract: Option<String>,

    /// Only records of this service front (`Frente de Servico`) within the contract
    #[arg(long = "front", short = 's')]
    pub front: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show KPIs, the planned vs. executed chart and the diameter x method breakdown
    Dashboard(DashboardArgs),

    /// Show KPIs and the planned vs. executed totals
    Summary(SummaryArgs),

    /// Show planned vs. executed lengths by diameter and method
    Breakdown(BreakdownArgs),

    /// List contract and service-front filter options
    Filters(FiltersArgs),

    /// Export the filtered records as semicolon-delimited text
    Export(ExportArgs),

    /// Pick filters interactively and re-render after each change
    Interactive(InteractiveArgs),

    /// Show configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Styled tables and bars for the terminal
    #[default]
    Auto,
    /// Markdown tables
    Md,
    /// JSON format (for programming)
    Json,
}

impl OutputFormat {
    /// Parse a configured default_format value
    pub fn from_config(value: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(value, true).ok()
    }
}
