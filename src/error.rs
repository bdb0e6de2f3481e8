use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Please save this file before trying to beautify.")]
    NoFileAssociation,

    #[error("Not a valid Sass file: unsupported extension {0:?}")]
    UnsupportedFormat(String),

    #[error("Failed to launch {program}: {source}\n\nDoes {program} exist in PATH?")]
    LaunchFailure {
        program: String,
        source: std::io::Error,
    },

    #[error("There was an error beautifying your Sass ({status}):\n\n{stderr}")]
    ConversionFailure { status: ExitStatus, stderr: String },

    #[error("Converter output is not valid UTF-8: {0}")]
    InvalidOutput(#[from] std::string::FromUtf8Error),

    #[error("{program} did not finish within {after:?}")]
    Timeout { program: String, after: Duration },

    #[error("Invalid search path: {0}")]
    InvalidSearchPath(#[from] std::env::JoinPathsError),

    #[error("Configuration error: {0}")]
    Config(String),
}
