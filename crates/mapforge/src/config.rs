//! The compiler parameter aggregate and the tool configuration.
//!
//! [`CompilerParms`] is the one mutable record a run is driven by: seeded
//! from [`ToolConfig`] defaults, mutated exactly once by the argument
//! grammar, read-only afterwards. [`ToolConfig`] deserializes from the TOML
//! tool configuration file the CLI discovers.

use std::path::PathBuf;

use serde::Deserialize;

use mapforge_core::{
    parms::{BspParms, LightParms, VisParms},
    path,
};

/// The full set of parameters for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompilerParms {
    /// Level source identifier; the `.map` extension may be left off.
    pub map_name: String,
    /// Output artifact name; derived from `map_name` when absent.
    pub bsp_name: Option<String>,
    /// Run the BSP geometry stage.
    pub bsp_enabled: bool,
    /// Run the visibility stage.
    pub vis_enabled: bool,
    /// Run the lighting stage.
    pub light_enabled: bool,
    /// BSP stage parameters.
    pub bsp: BspParms,
    /// Visibility stage parameters.
    pub vis: VisParms,
    /// Lighting stage parameters.
    pub light: LightParms,
}

impl CompilerParms {
    /// The normalized source path handed to the compiler, with the `.map`
    /// default extension applied.
    pub fn source_path(&self) -> String {
        path::with_default_extension(&path::normalize_separators(&self.map_name), ".map")
    }

    /// The normalized destination path. Derived from the source name when
    /// no explicit destination was given; either way the `.bsp` default
    /// extension is applied. The visibility and lighting stages read and
    /// rewrite this same artifact.
    pub fn dest_path(&self) -> String {
        let name = match &self.bsp_name {
            Some(name) => path::normalize_separators(name),
            None => path::derive_destination(&path::normalize_separators(&self.map_name)),
        };
        path::with_default_extension(&name, ".bsp")
    }
}

/// Tool configuration, loaded from `config.toml`.
///
/// Every section is optional. The file can point the front end at a
/// specific compiler library and pre-seed any per-stage parameter default;
/// command-line flags are applied on top of the seeds.
///
/// ```toml
/// library = "libmapcomp.so"
///
/// [light]
/// light_scale = 1.5
/// min_light = [10.0, 10.0, 10.0]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Compiler library to load, overriding the platform default name.
    library: Option<PathBuf>,
    /// Seeds for the BSP stage parameters.
    bsp: BspParms,
    /// Seeds for the visibility stage parameters.
    vis: VisParms,
    /// Seeds for the lighting stage parameters.
    light: LightParms,
}

impl ToolConfig {
    /// Path of the compiler library to load. Falls back to the
    /// platform-decorated default name next to the working directory.
    pub fn library_path(&self) -> PathBuf {
        self.library.clone().unwrap_or_else(|| {
            PathBuf::from(libloading::library_filename(
                crate::gateway::dylib::DEFAULT_LIBRARY,
            ))
        })
    }

    /// Initial [`CompilerParms`] carrying this configuration's seeds, with
    /// no stages enabled and no names set.
    pub fn initial_parms(&self) -> CompilerParms {
        CompilerParms {
            bsp: self.bsp,
            vis: self.vis,
            light: self.light,
            ..CompilerParms::default()
        }
    }
}
