//! filter-tabs CLI.
//!
//! Provides commands for:
//! - `build`: Build a site from markdown sources with tab groups

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::BuildArgs;
use output::Output;

/// filter-tabs - tabbed content for static documentation.
#[derive(Parser)]
#[command(name = "ft", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a site from markdown sources.
    Build(BuildArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Build(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN.
    // Group logging from `tabs.debug` is emitted at INFO by ft_tabs only.
    let filter = if verbose {
        EnvFilter::new(log_directives(true))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(log_directives(false)))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
    };

    if let Err(err) = result {
        output.fatal(&err);
        std::process::exit(1);
    }
}

fn log_directives(verbose: bool) -> &'static str {
    if verbose { "info" } else { "warn,ft_tabs=info" }
}
