//! pnp-vendorize - copy Yarn Plug'n'Play packages into a vendor directory
//!
//! Reads the "vendorize" block of the current package's package.json, resolves
//! every listed package through the PnP state, and copies each one into a plain
//! directory that works without the PnP runtime.

use clap::Parser;

mod cli;
mod commands;
mod common;
mod config;
mod domain;
mod error;
mod logging;
mod pnp;
mod resolver;
mod vendor;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let result = match cli.command.unwrap_or_default() {
        Commands::Run(args) => commands::run::run(cli.cwd, &args),
        Commands::List(args) => commands::list::run(cli.cwd, &args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        tracing::debug!(kind = ?e.kind(), "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
