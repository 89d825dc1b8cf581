//! Error types for mapforge compile runs.
//!
//! One enum per phase (argument grammar, compiler gateway, pipeline stages)
//! plus [`CompileError`], the unified type a full run returns. Every failure
//! class maps to its own process exit code so batch scripts can tell the
//! modes apart.

use std::path::PathBuf;

use thiserror::Error;

/// Command-line grammar errors.
#[derive(Debug, Error)]
pub enum ArgsError {
    /// Incomplete or malformed invocation: no tokens at all, no map name,
    /// or a stray third positional. Callers print the usage text for this
    /// class instead of an error report.
    #[error("invalid invocation")]
    Usage,

    /// A value-consuming flag ran out of trailing tokens.
    #[error("missing argument for {flag}")]
    MissingValue {
        /// The flag that wanted more tokens.
        flag: &'static str,
    },

    /// A consumed token failed numeric parsing.
    #[error("bad argument for {flag}: {value:?}")]
    BadValue {
        /// The flag whose argument was malformed.
        flag: &'static str,
        /// The offending token.
        value: String,
    },
}

/// Reported by a compiler entry point that signalled failure.
///
/// The compiler prints its own diagnostics through the registered message
/// sinks, so the failure value itself carries no detail.
#[derive(Debug, Error)]
#[error("compiler entry point reported failure")]
pub struct StageFailure;

/// Errors acquiring or initializing the external compiler library.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The compiler library could not be loaded at all.
    #[error("compiler library {path} could not be loaded")]
    Unavailable {
        /// Path the loader was pointed at.
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The library loaded but lacks a required entry point.
    #[error("compiler library is missing the {symbol} entry point")]
    MissingEntryPoint {
        /// Name of the unresolved symbol.
        symbol: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The library's initialization hook returned no function table.
    #[error("compiler library initialization returned no function table")]
    InitFailed,
}

/// Stage failures surfaced by the orchestrator.
///
/// Each variant names the artifact path the failing entry point was working
/// on. Visibility and lighting failures halt the run like any other, but
/// are reported in a softer warning tone than geometry failures.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("BSP compile failed for {path}")]
    Compile { path: String },

    #[error("BSP save failed for {path}")]
    Save { path: String },

    #[error("entity update failed for {path}")]
    EntityUpdate { path: String },

    #[error("visibility processing failed for {path}")]
    Vis { path: String },

    #[error("lighting processing failed for {path}")]
    Light { path: String },
}

impl PipelineError {
    /// Whether this failure is reported in the warning tone.
    pub fn is_warning(&self) -> bool {
        matches!(self, PipelineError::Vis { .. } | PipelineError::Light { .. })
    }
}

/// The unified error type for a full compile run.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Args(#[from] ArgsError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// The tool configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl CompileError {
    /// Process exit code for this failure class.
    ///
    /// Zero is success. Usage errors are their own class; option-value and
    /// configuration problems share a code; every gateway and stage failure
    /// class gets a distinct code.
    pub fn exit_code(&self) -> i32 {
        match self {
            CompileError::Args(ArgsError::Usage) => 1,
            CompileError::Args(_) | CompileError::Config(_) => 2,
            CompileError::Gateway(GatewayError::Unavailable { .. }) => 3,
            CompileError::Gateway(_) => 4,
            CompileError::Pipeline(PipelineError::Compile { .. }) => 5,
            CompileError::Pipeline(PipelineError::Save { .. }) => 6,
            CompileError::Pipeline(PipelineError::EntityUpdate { .. }) => 7,
            CompileError::Pipeline(PipelineError::Vis { .. }) => 8,
            CompileError::Pipeline(PipelineError::Light { .. }) => 9,
        }
    }

    /// Whether this failure is reported in the warning tone.
    pub fn is_warning(&self) -> bool {
        matches!(self, CompileError::Pipeline(err) if err.is_warning())
    }
}
