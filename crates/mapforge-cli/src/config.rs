//! Tool configuration loading for the CLI
//!
//! This module handles finding and loading the TOML tool configuration
//! from the usual locations (explicit path, local directory, platform
//! config directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use mapforge::{CompileError, config::ToolConfig};

/// Configuration-related errors for the CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    Read(String),
}

impl From<ConfigError> for CompileError {
    fn from(err: ConfigError) -> Self {
        CompileError::Config(err.to_string())
    }
}

/// Find and load the tool configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (mapforge/config.toml)
/// 3. Platform-specific config directory
/// 4. Default configuration if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but the file doesn't exist
/// - A config file exists but cannot be read or parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<ToolConfig, CompileError> {
    // 1. Try the explicitly provided path first if available
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    // 2. Try the local project directory
    let local_config = Path::new("mapforge/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    // 3. Try the platform-specific config directory
    if let Some(proj_dirs) = ProjectDirs::from("com", "mapforge", "mapforge") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    // 4. If no config is found, return default config
    debug!("No configuration file found, using default configuration");
    Ok(ToolConfig::default())
}

/// Load the tool configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<ToolConfig, CompileError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content =
        fs::read_to_string(path).map_err(|e| ConfigError::Read(e.to_string()))?;

    let config: ToolConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn explicit_file_seeds_parameters() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(
            file,
            r#"
library = "custom-compiler.so"

[vis]
full_vis = true

[light]
light_scale = 2.5
min_light = [10.0, 10.0, 10.0]
"#
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.library_path(), PathBuf::from("custom-compiler.so"));

        let parms = config.initial_parms();
        assert!(parms.vis.full_vis);
        assert_eq!(parms.light.light_scale, 2.5);
        assert_eq!(parms.light.min_light, mapforge::vector::Vec3::new(10.0, 10.0, 10.0));
        // Unmentioned fields keep the compiled-in defaults.
        assert_eq!(parms.light.bounce, 10);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_config(Some("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, CompileError::Config(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "light = 3").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, CompileError::Config(_)));
    }
}
