//! Error adapter for converting [`CompileError`] to miette diagnostics.
//!
//! The library crates report plain `thiserror` values; this adapter gives
//! them a diagnostic code, contextual help, and a severity so the CLI can
//! render them with miette's graphical handler. Visibility and lighting
//! failures render as warnings, everything else as errors.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, Severity};

use mapforge::{ArgsError, CompileError, GatewayError, PipelineError};

/// Adapter wrapping a [`CompileError`] for rendering.
pub struct ErrorAdapter<'a>(pub &'a CompileError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CompileError::Args(_) => "mapforge::args",
            CompileError::Config(_) => "mapforge::config",
            CompileError::Gateway(_) => "mapforge::gateway",
            CompileError::Pipeline(_) => "mapforge::pipeline",
        };
        Some(Box::new(code))
    }

    fn severity(&self) -> Option<Severity> {
        if self.0.is_warning() {
            Some(Severity::Warning)
        } else {
            Some(Severity::Error)
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            CompileError::Args(ArgsError::MissingValue { .. } | ArgsError::BadValue { .. }) => {
                "run mapforge with no arguments to see the option tables"
            }
            CompileError::Gateway(GatewayError::Unavailable { .. }) => {
                "set `library` in the tool configuration to point at the compiler library"
            }
            CompileError::Pipeline(PipelineError::Vis { .. } | PipelineError::Light { .. }) => {
                "the BSP artifact must exist before this stage; run -gbsp first"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_the_error_class() {
        let err: CompileError = ArgsError::MissingValue { flag: "-bounce" }.into();
        let adapter = ErrorAdapter(&err);
        assert_eq!(adapter.code().unwrap().to_string(), "mapforge::args");

        let err: CompileError = PipelineError::Compile { path: "a.map".into() }.into();
        let adapter = ErrorAdapter(&err);
        assert_eq!(adapter.code().unwrap().to_string(), "mapforge::pipeline");
    }

    #[test]
    fn late_stage_failures_render_as_warnings() {
        let err: CompileError = PipelineError::Vis { path: "a.bsp".into() }.into();
        assert_eq!(ErrorAdapter(&err).severity(), Some(Severity::Warning));

        let err: CompileError = PipelineError::Save { path: "a.bsp".into() }.into();
        assert_eq!(ErrorAdapter(&err).severity(), Some(Severity::Error));
    }

    #[test]
    fn value_errors_point_at_the_option_tables() {
        let err: CompileError = ArgsError::BadValue {
            flag: "-lightscale",
            value: "abc".into(),
        }
        .into();
        let help = ErrorAdapter(&err).help().unwrap().to_string();
        assert!(help.contains("option tables"));
    }
}
