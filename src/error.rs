use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Errors raised while creating a [`crate::http::context::TestContext`].
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("invalid base URL `{url}`: {reason}")]
    Configuration { url: String, reason: String },

    #[error("invalid default header `{name}`: {reason}")]
    Header { name: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Errors raised while loading a suite configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file `{}`: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file `{}`: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Why a single test case did not pass.
///
/// Every variant ends only the case that produced it; the rest of the suite
/// keeps running.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CaseFailure {
    #[error("{target}: expected {expected}, got {actual}")]
    Assertion {
        target: String,
        expected: String,
        actual: String,
    },

    #[error("request failed: {message}")]
    Infrastructure { message: String },

    #[error("response body is not valid JSON: {message}")]
    Parse { message: String },
}

impl CaseFailure {
    pub fn infrastructure(message: impl Into<String>) -> Self {
        CaseFailure::Infrastructure {
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        CaseFailure::Parse {
            message: message.into(),
        }
    }
}
