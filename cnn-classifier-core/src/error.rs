//! Error types for the classifier pipeline.
//!
//! Uses `thiserror` for structured variants split into three families:
//! configuration, I/O (filesystem and network), and format (parsing and
//! decoding) errors.

use std::path::PathBuf;

/// Top-level error type for the cnn-classifier core library.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Format error: {0}")]
    Format(#[from] FormatError),
}

/// Coarse classification of a [`ClassifierError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Io,
    Format,
}

impl ClassifierError {
    /// Which of the three error families this error belongs to.
    ///
    /// Network failures count as I/O.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Config,
            Self::Io(_) | Self::Http(_) => ErrorKind::Io,
            Self::Format(_) => ErrorKind::Format,
        }
    }
}

/// Errors from loading and validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("yaml file is empty: {path}")]
    EmptyFile { path: PathBuf },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Configuration parse error: {message}")]
    ParseError { message: String },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        match &err.kind {
            figment::error::Kind::MissingField(field) => {
                let mut path = err.path.clone();
                path.push(field.to_string());
                Self::MissingField {
                    field: path.join("."),
                }
            }
            _ => Self::ParseError {
                message: err.to_string(),
            },
        }
    }
}

/// Errors from parsing or decoding file contents.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("zip archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("binary blob: {0}")]
    Binary(#[from] bincode::Error),

    #[error("base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("{field} '{value}' is not a single file name")]
    UnsafePath { field: &'static str, value: String },
}

impl From<serde_yaml::Error> for ClassifierError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Format(err.into())
    }
}

impl From<serde_json::Error> for ClassifierError {
    fn from(err: serde_json::Error) -> Self {
        Self::Format(err.into())
    }
}

impl From<zip::result::ZipError> for ClassifierError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io) => Self::Io(io),
            other => Self::Format(other.into()),
        }
    }
}

impl From<bincode::Error> for ClassifierError {
    fn from(err: bincode::Error) -> Self {
        Self::Format(err.into())
    }
}

impl From<base64::DecodeError> for ClassifierError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Format(err.into())
    }
}

impl From<csv::Error> for ClassifierError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            Self::Io(err.into())
        } else {
            Self::Format(err.into())
        }
    }
}

/// A type alias for results using the top-level `ClassifierError`.
pub type Result<T> = std::result::Result<T, ClassifierError>;
