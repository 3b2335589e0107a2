use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Exit codes for the CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// The report was produced (possibly with partially empty metadata)
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (unreadable SBOM, malformed package record, output failure, ...)
    ApplicationError = 3,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Fatal errors that abort a run.
///
/// Only structural problems end up here: the SBOM cannot be read, a package record is missing a
/// required field, or the report cannot be written. Registry failures never do.
#[derive(Debug, Error)]
pub enum SbomError {
    #[error("SBOM file not found: {path}\n\n💡 Hint: {suggestion}")]
    SbomNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse SBOM file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file is a Syft JSON document (syft -o json)")]
    SbomParseError { path: PathBuf, details: String },

    #[error("Invalid package record #{index} in SBOM: {reason}")]
    InvalidPackage { index: usize, reason: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

/// Per-package registry failures.
///
/// These are logged and counted, and the package keeps zero-value metadata.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("could not decode response from {url}: {details}")]
    Decode { url: String, details: String },

    #[error("lookup timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("no registry lookup is possible for {0}")]
    UnsupportedSource(String),
}
