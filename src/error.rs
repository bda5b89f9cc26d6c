use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{source_name}: request failed: {error}")]
    Request {
        source_name: String,
        #[source]
        error: reqwest::Error,
    },
    #[error("{source_name}: server responded with {status}")]
    Status {
        source_name: String,
        status: reqwest::StatusCode,
    },
    #[error("{source_name}: failed to decode response: {message}")]
    Decode {
        source_name: String,
        message: String,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template has no {{{{rows}}}} placeholder")]
    MissingPlaceholder,
    #[error("template has more than one {{{{rows}}}} placeholder")]
    DuplicatePlaceholder,
}
