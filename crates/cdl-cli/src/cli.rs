//! Command line definition.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::config::{DEFAULT_REPORTS_DIR, DEFAULT_SNAPSHOT};

#[derive(Debug, Parser)]
#[command(name = "cdl")]
#[command(version, about = "CDL variant compiler and whitelist pipeline")]
pub struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Registry snapshot to load
    #[arg(long, global = true, env = "CDL_VARIANTS_JSON", default_value = DEFAULT_SNAPSHOT)]
    pub snapshot: PathBuf,

    /// Directory reports are written to
    #[arg(long, global = true, env = "CDL_REPORTS_DIR", default_value = DEFAULT_REPORTS_DIR)]
    pub reports_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve one definition into a class string
    Resolve {
        /// Namespace of the definition (e.g. "button")
        namespace: String,
        /// Definition name (e.g. "buttonSizeVariants")
        name: String,
        /// Axis choices as axis=option
        #[arg(value_parser = parse_choice)]
        choices: Vec<(String, String)>,
        /// Skip unknown options instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Write the single- and multi-token reports
    Classify,

    /// Build the prefix/value whitelist table from the single-token report
    Table {
        /// Single-token report to read
        #[arg(long, env = "SINGLE_TOKEN_REPORT")]
        input: Option<PathBuf>,
    },

    /// Write every distinct class the registry can emit
    Classes {
        /// Output file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Report which axes could become utility props
    Revise,

    /// List tokens carrying modifiers or arbitrary values
    Lint {
        /// Print findings as JSON
        #[arg(long)]
        json: bool,
    },

    /// Emit the utility-props map from the whitelist table
    Props {
        /// Whitelist table to read
        #[arg(long, env = "UTILITIES_PURE_JSON")]
        input: Option<PathBuf>,
    },
}

/// Parses `axis=option`. An empty option is allowed and reads as unset.
pub fn parse_choice(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((axis, option)) if !axis.trim().is_empty() => {
            Ok((axis.trim().to_string(), option.trim().to_string()))
        }
        _ => Err(format!("expected axis=option, got \"{raw}\"")),
    }
}
