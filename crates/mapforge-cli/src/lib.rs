//! CLI logic for the mapforge level compiler front end.
//!
//! This module wires the pieces together: configuration discovery, the
//! stage-scoped token grammar, the compiler backend, and the pipeline run.

pub mod error_adapter;

mod args;
mod config;
mod usage;

pub use args::Args;
pub use usage::usage;

use log::info;

use mapforge::{
    CompileError, CompileJob,
    config::ToolConfig,
    gateway::{CompilerBackend, dylib::DylibBackend},
};

/// Run the mapforge CLI application
///
/// Loads the tool configuration, interprets the compiler tokens on top of
/// it, binds the compiler library it names, and drives the enabled
/// pipeline stages.
///
/// # Errors
///
/// Returns `CompileError` for:
/// - Configuration file errors
/// - Command-line grammar errors
/// - Compiler library load/initialization errors
/// - Stage failures
pub fn run(args: &Args) -> Result<(), CompileError> {
    let tool_config = config::load_config(args.config.as_ref())?;
    let backend = DylibBackend::new(tool_config.library_path());
    run_with_backend(&args.tokens, &tool_config, &backend)
}

/// As [`run`], against a caller-supplied compiler backend.
///
/// This is the seam the end-to-end tests use: everything the CLI does runs
/// unchanged, with the dynamic-library backend swapped for a double.
pub fn run_with_backend(
    tokens: &[String],
    tool_config: &ToolConfig,
    backend: &dyn CompilerBackend,
) -> Result<(), CompileError> {
    let job = CompileJob::from_tokens(tokens, tool_config)?;
    info!(
        map = job.parms().map_name.as_str(),
        dest = job.parms().dest_path().as_str();
        "Starting compile run"
    );
    job.run(backend)
}
