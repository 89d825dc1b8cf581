//! The compiler gateway boundary.
//!
//! All geometric and radiometric work is delegated to an external compiler
//! library; this module owns the capability boundary the rest of the crate
//! talks through. A [`CompilerBackend`] acquires a [`CompilerSession`]; the
//! session exposes one method per compiler entry point and releases the
//! library when dropped. The [`dylib`] backend binds a real dynamic
//! library; tests substitute their own session types so nothing in the
//! orchestrator ever depends on an on-disk library.

pub mod dylib;

use mapforge_core::parms::{BspParms, LightParms, VisParms};

use crate::error::{GatewayError, StageFailure};

/// Message sinks registered with the compiler at load time.
///
/// The compiler reports progress and diagnostics as preformatted lines.
/// The defaults forward both streams into [`log`] under the `compiler`
/// target.
#[derive(Debug, Clone, Copy)]
pub struct MessageSinks {
    /// Progress/print line sink.
    pub progress: fn(&str),
    /// Diagnostic/error line sink.
    pub error: fn(&str),
}

impl Default for MessageSinks {
    fn default() -> Self {
        Self {
            progress: |line| log::info!(target: "compiler", "{line}"),
            error: |line| log::error!(target: "compiler", "{line}"),
        }
    }
}

/// One loaded compiler instance.
///
/// A session owns the library handle and the compiled-geometry state the
/// compiler keeps internally between [`create_bsp`](Self::create_bsp) and
/// [`free_bsp`](Self::free_bsp). Dropping the session releases the library;
/// there is no explicit release call to forget or to double-invoke.
///
/// Entry points report failure without detail; the compiler's own
/// diagnostics arrive through the registered [`MessageSinks`].
pub trait CompilerSession {
    /// Full geometry compile of a source map.
    fn create_bsp(&mut self, map_path: &str, parms: &BspParms) -> Result<(), StageFailure>;

    /// Entity-only update from a source map into an existing artifact.
    fn update_entities(&mut self, map_path: &str, bsp_path: &str) -> Result<(), StageFailure>;

    /// Write the compiled geometry to the destination artifact.
    fn save_bsp(&mut self, bsp_path: &str) -> Result<(), StageFailure>;

    /// Release the compiler's in-memory compiled geometry.
    fn free_bsp(&mut self);

    /// Compute the potentially-visible set for a compiled artifact.
    fn vis_bsp(&mut self, bsp_path: &str, parms: &VisParms) -> Result<(), StageFailure>;

    /// Compute lighting for a compiled artifact.
    fn light_bsp(&mut self, bsp_path: &str, parms: &LightParms) -> Result<(), StageFailure>;
}

/// Binds compiler sessions.
pub trait CompilerBackend {
    /// Loads the compiler and registers the message sinks.
    ///
    /// # Errors
    ///
    /// [`GatewayError::Unavailable`] when the compiler cannot be found, and
    /// the init-failure variants when it loads but cannot be initialized.
    fn load(&self, sinks: MessageSinks) -> Result<Box<dyn CompilerSession>, GatewayError>;
}
