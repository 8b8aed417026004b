//! Loading of [`SimulationConfig`] values from TOML documents.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use starforge_nexus_core::{ConfigError, SimulationConfig};
use thiserror::Error;

/// Reasons a configuration file could not be turned into a usable config.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// The file could not be read.
    #[error("failed to read configuration file {}", path.display())]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The document is not valid TOML or names unknown value types.
    #[error("failed to parse configuration")]
    Parse(#[from] toml::de::Error),
    /// The document parsed but describes an unplayable board.
    #[error("configuration is invalid")]
    Invalid(#[from] ConfigError),
}

/// Parses and validates a configuration document.
///
/// Keys missing from the document keep their default values.
pub fn from_toml_str(document: &str) -> Result<SimulationConfig, ConfigLoadError> {
    let config: SimulationConfig = toml::from_str(document)?;
    config.validate()?;
    Ok(config)
}

/// Reads, parses and validates the configuration file at `path`.
pub fn from_path(path: impl AsRef<Path>) -> Result<SimulationConfig, ConfigLoadError> {
    let path = path.as_ref();
    let document = fs::read_to_string(path).map_err(|source| ConfigLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    from_toml_str(&document)
}
