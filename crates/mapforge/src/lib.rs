//! mapforge - front end for a three-stage level-compilation pipeline.
//!
//! The heavy lifting (BSP geometry generation, potentially-visible-set
//! computation, lighting) belongs to an external compiler library loaded at
//! runtime. This crate owns everything around it: the typed configuration
//! for the three stages, the stage-scoped command-line grammar, the
//! artifact path rules, and the orchestrator that sequences the compiler's
//! entry points and maps their outcomes onto the error taxonomy.

pub mod args;
pub mod config;
pub mod gateway;
pub mod pipeline;
pub mod settings;

mod error;

pub use error::{ArgsError, CompileError, GatewayError, PipelineError, StageFailure};

pub use mapforge_core::{parms, path, vector};

use config::{CompilerParms, ToolConfig};
use gateway::{CompilerBackend, MessageSinks};

/// A fully-configured compile run.
///
/// Built from command-line tokens on top of tool-configuration seeds, then
/// run against a compiler backend.
///
/// # Examples
///
/// ```rust,no_run
/// use mapforge::{CompileJob, config::ToolConfig, gateway::dylib::DylibBackend};
///
/// let config = ToolConfig::default();
/// let job = CompileJob::from_tokens(&["-gbsp", "-verbose", "level1"], &config)
///     .expect("malformed invocation");
/// let backend = DylibBackend::new(config.library_path());
/// job.run(&backend).expect("compile failed");
/// ```
#[derive(Debug, Clone)]
pub struct CompileJob {
    parms: CompilerParms,
}

impl CompileJob {
    /// Interprets command-line tokens on top of the configuration's seeds.
    ///
    /// # Errors
    ///
    /// Returns the first grammar error; see [`args::parse`].
    pub fn from_tokens<S: AsRef<str>>(
        tokens: &[S],
        config: &ToolConfig,
    ) -> Result<Self, ArgsError> {
        Ok(Self {
            parms: args::parse(tokens, config.initial_parms())?,
        })
    }

    /// The completed parameter aggregate.
    pub fn parms(&self) -> &CompilerParms {
        &self.parms
    }

    /// Loads a compiler session from `backend` and runs the enabled stages.
    ///
    /// The session, and with it the library handle, is released when the
    /// run finishes, successful or not.
    ///
    /// # Errors
    ///
    /// [`CompileError::Gateway`] when the compiler cannot be loaded,
    /// otherwise the [`CompileError::Pipeline`] variant of the first
    /// failing stage.
    pub fn run(&self, backend: &dyn CompilerBackend) -> Result<(), CompileError> {
        let mut session = backend.load(MessageSinks::default())?;
        pipeline::run(&self.parms, session.as_mut())?;
        Ok(())
    }
}
