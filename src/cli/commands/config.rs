//! `pipedash config` command - Configuration inspection
//!
//! Configuration is layered: global user file, then `./.pipedash.yaml`, then
//! environment variables, then command-line flags.

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::{Config, PROJECT_CONFIG_FILE};

use super::utils::print_json;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration values
    Show(ShowArgs),

    /// Show paths to configuration files
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

/// Valid configuration keys
const VALID_KEYS: &[(&str, &str)] = &[
    ("data_file", "Semicolon-delimited data file (default: dados.csv)"),
    (
        "export_file",
        "File name written by `pipedash export` (default: dados_filtrados.csv)",
    ),
    ("default_format", "Default output format (auto, md, json)"),
];

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args, global),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();

    if let Some(key) = &args.key {
        let value = get_config_value(&config, key)?;
        println!("{}", value);
        return Ok(());
    }

    if global.format == OutputFormat::Json {
        return print_json(&config);
    }

    for (key, _) in VALID_KEYS {
        let value = get_config_value(&config, key)?;
        println!("{}: {}", style(key).cyan(), value);
    }
    Ok(())
}

/// Effective value of a key, defaults applied
fn get_config_value(config: &Config, key: &str) -> Result<String> {
    match key {
        "data_file" => Ok(config.data_file().display().to_string()),
        "export_file" => Ok(config.export_file()),
        "default_format" => Ok(config
            .default_format
            .clone()
            .unwrap_or_else(|| "auto".to_string())),
        _ => Err(miette::miette!(
            help = "run `pipedash config keys` to list valid keys",
            "Unknown configuration key '{}'",
            key
        )),
    }
}

fn run_path() -> Result<()> {
    match Config::global_config_path() {
        Some(path) => println!(
            "{} {}{}",
            style("global: ").dim(),
            path.display(),
            exists_marker(path.exists())
        ),
        None => println!("{} (no home directory)", style("global: ").dim()),
    }
    let project = Config::project_config_path();
    println!(
        "{} {}{}",
        style("project:").dim(),
        PROJECT_CONFIG_FILE,
        exists_marker(project.exists())
    );
    Ok(())
}

fn exists_marker(exists: bool) -> String {
    if exists {
        String::new()
    } else {
        style(" (not found)").dim().to_string()
    }
}

fn run_keys() -> Result<()> {
    for (key, description) in VALID_KEYS {
        println!("{:<16} {}", style(key).cyan(), description);
    }
    Ok(())
}
