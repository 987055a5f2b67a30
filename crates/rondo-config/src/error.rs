//! Error types for configuration operations.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong reading, writing or checking a rig or scene.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A rig or scene file could not be read.
    #[error("cannot read '{path}': {source}")]
    ReadFile {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A rig file could not be written.
    #[error("cannot write '{path}': {source}")]
    WriteFile {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The parent directory of a rig file could not be created.
    #[error("cannot create directory '{path}': {source}")]
    CreateDir {
        /// Directory path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML or a field of the wrong type.
    #[error("invalid TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A rig could not be rendered as TOML.
    #[error("cannot encode TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Neither a factory scene nor a readable scene file.
    #[error("scene not found: {0}")]
    SceneNotFound(String),

    /// The file parsed but holds unusable values.
    #[error("invalid rig: {0}")]
    Validation(#[from] crate::validation::ValidationError),
}

impl ConfigError {
    /// [`ConfigError::ReadFile`] for `path`.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// [`ConfigError::WriteFile`] for `path`.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// [`ConfigError::CreateDir`] for `path`.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }
}
