use thiserror::Error;

use crate::sir_model::InfectionState;

/// Errors of the epidemic core.
///
/// Extinction is not an error: stepping an extinct process is a no-op.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SirError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Only reachable through an engine bug
    #[error("Contract violation: node {node} is {found:?}, expected {expected:?}")]
    ContractViolation {
        node: usize,
        found: InfectionState,
        expected: InfectionState,
    },

    /// Only reachable through an engine bug
    #[error("No node carries a rate, although the total rate is {total}")]
    EmptyRateIndex {
        total: f64,
    },

    #[error("Network error: {0}")]
    Network(String),
}

impl SirError {
    pub fn invalid<S: Into<String>>(msg: S) -> Self
    {
        Self::InvalidConfiguration(msg.into())
    }
}

/// Errors of the command line layer
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("json parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Sir(#[from] SirError),
}

impl ConfigError {
    pub fn io<P: Into<String>>(path: P, source: std::io::Error) -> Self
    {
        Self::Io { path: path.into(), source }
    }
}
