//! `pipedash interactive` command - pick filters from menus
//!
//! Every change re-runs the whole pipeline and redraws the dashboard, the
//! same way the contract and front dropdowns drive the page.

use console::{style, Term};
use dialoguer::{theme::ColorfulTheme, Select};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::{success, warn};
use crate::cli::render::{Panels, TableSurface};
use crate::cli::{FilterArgs, GlobalOpts};
use crate::core::error::DashboardError;
use crate::core::export::FileSink;
use crate::core::filter::{ALL_CONTRACTS, ALL_FRONTS};
use crate::core::Dashboard;

use super::utils::{apply_filters, open_session};

#[derive(clap::Args, Debug)]
pub struct InteractiveArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Directory exports are written to
    #[arg(long, short = 'o', default_value = ".")]
    pub output: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Contract,
    Front,
    Clear,
    Export,
    Quit,
}

impl Action {
    const ALL: [Action; 5] = [
        Action::Contract,
        Action::Front,
        Action::Clear,
        Action::Export,
        Action::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            Action::Contract => "Change contract",
            Action::Front => "Change service front",
            Action::Clear => "Clear filters",
            Action::Export => "Export filtered records",
            Action::Quit => "Quit",
        }
    }
}

pub fn run(args: InteractiveArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = open_session(global)?;
    apply_filters(&mut session.dashboard, &args.filter);

    let term = Term::stdout();
    let theme = ColorfulTheme::default();
    let mut surface = TableSurface::terminal(Panels::ALL);
    let mut sink = FileSink::new(args.output);
    let dashboard = &mut session.dashboard;

    loop {
        term.clear_screen().into_diagnostic()?;
        print_selection(dashboard);
        dashboard.refresh(&mut surface);
        println!("{}", surface.render());

        let labels: Vec<&str> = Action::ALL.iter().map(|a| a.label()).collect();
        let choice = Select::with_theme(&theme)
            .with_prompt("Action")
            .items(&labels)
            .default(0)
            .interact_on(&term)
            .into_diagnostic()?;

        match Action::ALL[choice] {
            Action::Contract => {
                let contract = pick_contract(dashboard, &theme, &term)?;
                dashboard.select_contract(contract);
            }
            Action::Front => {
                let front = pick_front(dashboard, &theme, &term)?;
                dashboard.select_front(front);
            }
            Action::Clear => dashboard.clear_filters(),
            Action::Export => match dashboard.export(&mut sink) {
                Ok(path) => {
                    success(global.quiet, &format!("Exported to {}", path.display()));
                    pause(&term)?;
                }
                Err(DashboardError::EmptyExport) => {
                    warn(&DashboardError::EmptyExport.to_string());
                    pause(&term)?;
                }
                Err(e) => return Err(e.into()),
            },
            Action::Quit => break,
        }
    }

    Ok(())
}

fn print_selection(dashboard: &Dashboard) {
    let selection = dashboard.selection();
    println!(
        "{} {}   {} {}\n",
        style("Contract:").dim(),
        style(selection.contract.as_deref().unwrap_or(ALL_CONTRACTS)).cyan(),
        style("Service front:").dim(),
        style(selection.front.as_deref().unwrap_or(ALL_FRONTS)).cyan(),
    );
}

fn pick_contract(dashboard: &Dashboard, theme: &ColorfulTheme, term: &Term) -> Result<Option<String>> {
    let contracts = dashboard.contracts();
    let options: Vec<&str> = std::iter::once(ALL_CONTRACTS)
        .chain(contracts.iter().copied())
        .collect();
    let current = dashboard
        .selection()
        .contract
        .as_deref()
        .and_then(|c| contracts.iter().position(|o| *o == c))
        .map_or(0, |i| i + 1);

    let idx = Select::with_theme(theme)
        .with_prompt("Contract")
        .items(&options)
        .default(current)
        .interact_on(term)
        .into_diagnostic()?;

    Ok((idx > 0).then(|| options[idx].to_string()))
}

fn pick_front(dashboard: &Dashboard, theme: &ColorfulTheme, term: &Term) -> Result<Option<String>> {
    let fronts = dashboard.fronts();
    let options = fronts.options();
    let current = fronts
        .front
        .as_deref()
        .and_then(|f| fronts.domain.iter().position(|d| d == f))
        .map_or(0, |i| i + 1);

    let idx = Select::with_theme(theme)
        .with_prompt("Service front")
        .items(&options)
        .default(current)
        .interact_on(term)
        .into_diagnostic()?;

    Ok((idx > 0).then(|| options[idx].to_string()))
}

fn pause(term: &Term) -> Result<()> {
    println!("{}", style("Press any key to continue").dim());
    term.read_key().into_diagnostic()?;
    Ok(())
}
