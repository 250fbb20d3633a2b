use std::fmt::Display;

use thiserror::Error;

use crate::contracts::ContractName;

/// Failures reported by the chain capabilities
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// The RPC endpoint could not answer a query
    #[error("network error: {0}")]
    Network(String),
    /// No deployable artifact could be produced for a contract
    #[error("failed to resolve {name}: {reason}")]
    Resolution { name: ContractName, reason: String },
    /// The deployment transaction was not sent, reverted, or never confirmed
    #[error("failed to deploy {name}: {reason}")]
    Deployment { name: ContractName, reason: String },
}

impl ChainError {
    pub fn network(err: impl Display) -> Self {
        ChainError::Network(err.to_string())
    }

    pub fn resolution(name: ContractName, reason: impl Display) -> Self {
        ChainError::Resolution {
            name,
            reason: reason.to_string(),
        }
    }

    pub fn deployment(name: ContractName, reason: impl Display) -> Self {
        ChainError::Deployment {
            name,
            reason: reason.to_string(),
        }
    }
}
