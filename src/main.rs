use clap::Parser;
use miette::Result;
use pipedash::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_logging(global.verbose);

    match cli.command {
        Commands::Dashboard(args) => pipedash::cli::commands::dashboard::run(args, &global),
        Commands::Summary(args) => pipedash::cli::commands::summary::run(args, &global),
        Commands::Breakdown(args) => pipedash::cli::commands::breakdown::run(args, &global),
        Commands::Filters(args) => pipedash::cli::commands::filters::run(args, &global),
        Commands::Export(args) => pipedash::cli::commands::export::run(args, &global),
        Commands::Interactive(args) => pipedash::cli::commands::interactive::run(args, &global),
        Commands::Config(cmd) => pipedash::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => pipedash::cli::commands::completions::run(args),
    }
}

/// Diagnostics go to stderr; RUST_LOG overrides the flag-derived level
fn init_logging(verbose: bool) {
    let default_level = if verbose { "pipedash=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
