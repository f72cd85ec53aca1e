//! Errors raised while loading scenes or validating options.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur before rendering starts.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("failed to read scene file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("material '{0}' is defined more than once")]
    DuplicateMaterial(String),

    #[error("entity {index} references unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },

    #[error("material '{name}' has invalid refractive index {value} (must be > 0)")]
    InvalidRefractiveIndex { name: String, value: f32 },

    #[error("entity {index} is invalid: {reason}")]
    InvalidEntity { index: usize, reason: String },

    #[error("invalid render options: {0}")]
    InvalidOptions(String),
}

pub type SceneResult<T> = Result<T, SceneError>;
