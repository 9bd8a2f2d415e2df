//! Error kinds surfaced by the probe.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    /// Settings file missing or unreadable. Fatal.
    #[error("Failed to read {}: {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Base URL or access key absent or empty. Fatal, raised before any request.
    #[error("Missing URL or KEY")]
    MissingCredentials,

    /// Anything that went wrong while talking to the REST interface.
    #[error("Request failed: {0}")]
    Query(#[from] QueryError),
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("{table} returned {status}: {body}")]
    Status {
        table: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("failed to parse {table} response: {source}")]
    Decode {
        table: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ProbeError {
    /// Process exit status for this error. Query failures are reported, not fatal.
    pub fn exit_code(&self) -> u8 {
        match self {
            ProbeError::Settings { .. } | ProbeError::MissingCredentials => 1,
            ProbeError::Query(_) => 0,
        }
    }
}
