//! Command line front end for the `cdl` crate.
//!
//! The binary is a thin shell over [`run`]: it parses [`Cli`], sets up
//! logging and reports errors. Keeping dispatch here lets tests drive every
//! subcommand with an in-memory writer.

pub mod cli;
pub mod commands;
pub mod config;

use std::io::Write;

use anyhow::Result;

pub use cli::{Cli, Command};
pub use config::PipelineConfig;

/// Runs one parsed invocation, writing its output to `out`.
pub fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let config = PipelineConfig::new(cli.snapshot, cli.reports_dir);

    match cli.command {
        Command::Resolve {
            namespace,
            name,
            choices,
            lenient,
        } => commands::resolve(&config, &namespace, &name, choices, lenient, out),
        Command::Classify => commands::classify_options(&config, out),
        Command::Table { input } => {
            commands::table(&config.with_single_token_input(input), out)
        }
        Command::Classes { output } => commands::classes(&config, output.as_deref(), out),
        Command::Revise => commands::revise_axes(&config, out),
        Command::Lint { json } => commands::lint_tokens(&config, json, out),
        Command::Props { input } => commands::props(&config.with_table_input(input), out),
    }
}
