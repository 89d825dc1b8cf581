//! Command-line argument definitions for the mapforge CLI.
//!
//! Only the outer surface is defined here with [`clap`]: configuration
//! file selection and logging verbosity. The compiler tokens themselves
//! (stage selectors, stage flags, map and output names) are collected
//! verbatim and handed to the stage-scoped grammar in
//! [`mapforge::args`], which clap's flag model cannot express.

use clap::Parser;

/// Command-line arguments for the mapforge level compiler front end
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a tool configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Compiler tokens: [-gbsp|-gvis|-glight] [stage flags] <mapname> [destname]
    ///
    /// Options above must precede the first compiler token.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub tokens: Vec<String>,
}
