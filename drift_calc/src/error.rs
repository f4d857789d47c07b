use std::io;

use config::ConfigError;
use thiserror::Error;
use wind_triangle::error::WindTriangleError;

pub(crate) type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug, Error)]
pub(crate) enum ApplicationError {
    #[error("Error regarding config: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("System input/output error: {0}")]
    IoError(#[from] io::Error),
    #[error("Wind triangle error: {0}")]
    WindTriangleError(#[from] WindTriangleError),
    #[error("Failed to serialize JSON report: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Failed to serialize config: {0}")]
    TomlError(#[from] toml::ser::Error),
    #[error("Failed to render HTML report: {0}")]
    TemplateError(#[from] askama::Error),
    #[error("Missing input: {0}")]
    MissingInput(&'static str),
}
