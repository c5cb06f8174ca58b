//! `pipedash filters` command - contract and service-front options

use console::style;
use miette::Result;
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use crate::cli::{FilterArgs, GlobalOpts, OutputFormat};
use crate::core::filter::{ALL_CONTRACTS, ALL_FRONTS};

use super::utils::{apply_filters, open_session, print_json};

#[derive(clap::Args, Debug)]
pub struct FiltersArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Serialize)]
struct FilterOptions<'a> {
    columns: &'a [String],
    contracts: Vec<&'a str>,
    contract: Option<&'a str>,
    fronts: Vec<String>,
    front: Option<String>,
}

pub fn run(args: FiltersArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = open_session(global)?;
    apply_filters(&mut session.dashboard, &args.filter);

    let dashboard = &session.dashboard;
    let fronts = dashboard.fronts();
    let options = FilterOptions {
        columns: dashboard.dataset().headers(),
        contracts: dashboard.contracts(),
        contract: dashboard.selection().contract.as_deref(),
        fronts: fronts.domain.clone(),
        front: fronts.front.clone(),
    };

    match session.format {
        OutputFormat::Json => print_json(&options),
        OutputFormat::Md | OutputFormat::Auto => {
            let markdown = session.format == OutputFormat::Md;
            let contracts = std::iter::once(ALL_CONTRACTS).chain(options.contracts.iter().copied());
            print_options(
                "Contracts",
                contracts,
                options.contract.unwrap_or(ALL_CONTRACTS),
                markdown,
            );
            println!();
            print_options(
                "Service fronts",
                fronts.options().into_iter(),
                options.front.as_deref().unwrap_or(ALL_FRONTS),
                markdown,
            );
            println!();
            print_options(
                "Columns",
                options.columns.iter().map(String::as_str).filter(|c| !c.is_empty()),
                "",
                markdown,
            );
            Ok(())
        }
    }
}

fn print_options<'a>(
    title: &str,
    options: impl Iterator<Item = &'a str>,
    selected: &str,
    markdown: bool,
) {
    let mut builder = Builder::default();
    builder.push_record(["", title]);
    for option in options {
        let marker = if option == selected { "*" } else { "" };
        builder.push_record([marker, option]);
    }

    let mut table = builder.build();
    if markdown {
        table.with(Style::markdown());
    } else {
        println!("{}", style(title).bold());
        table.with(Style::rounded());
    }
    println!("{}", table);
}
