//! API management operator CLI
//!
//! Resolves subsystem options from an APIManager document against a
//! file-backed secret store, and prints static alerting-rule bundles.

mod cli;
mod commands;
mod error;
mod logging;

use amp_rules::RuleFactoryRegistry;
use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    // Built once, read-only from here on.
    let registry = RuleFactoryRegistry::with_builtins();

    match cli.command {
        Commands::Resolve {
            spec,
            component,
            namespace,
            secrets,
            format,
            plan,
        } => commands::run_resolve(&commands::ResolveArgs {
            spec,
            component,
            namespace,
            secrets,
            format,
            plan,
        }),
        Commands::Rules { component, format } => {
            commands::run_rules(&registry, component.as_deref(), format)
        }
        Commands::Components => commands::run_components(&registry),
    }
}
