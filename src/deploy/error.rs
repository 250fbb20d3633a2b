use alloy::primitives::Address;
use color_eyre::Section;
use thiserror::Error;

use crate::chain::ChainError;
use crate::contracts::DeploymentSummary;

/// Errors that abort a deployment run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FatalError {
    #[error("No accounts found")]
    NoSigner,
    /// Only raised when funds are required up front
    #[error("Account {address} has a balance of 0")]
    InsufficientFunds { address: Address },
    #[error(transparent)]
    Chain(#[from] ChainError),
}

impl FatalError {
    /// Operator hints shown alongside the error
    pub fn suggestions(&self) -> &'static [&'static str] {
        match self {
            FatalError::NoSigner => &[
                "Set PRIVATE_KEY in the .env file or configure a wallet",
                "Check that the network configuration is correct",
                "For a local network, start the node first",
            ],
            FatalError::InsufficientFunds { .. } => {
                &["Fund the account, or rerun without --require-funds"]
            }
            FatalError::Chain(ChainError::Network(_)) => {
                &["Check the RPC URL, or start the local node first"]
            }
            FatalError::Chain(ChainError::Resolution { .. }) => {
                &["Compile the contracts first (npx hardhat compile or forge build)"]
            }
            FatalError::Chain(ChainError::Deployment { .. }) => &[
                "Contracts confirmed before the failure remain deployed; rerun to deploy a fresh suite",
            ],
        }
    }
}

/// A run that stopped before every contract was confirmed
#[derive(Debug, Error)]
#[error("Deployment aborted after {} confirmed contract(s)", .deployed.len())]
pub struct RunFailure {
    #[source]
    pub error: FatalError,
    /// Records confirmed before the failure; these stay on chain
    pub deployed: DeploymentSummary,
}

impl RunFailure {
    pub fn new(error: impl Into<FatalError>, deployed: DeploymentSummary) -> Self {
        Self {
            error: error.into(),
            deployed,
        }
    }

    /// Turn the failure into a report carrying the operator hints of its error
    pub fn into_report(self) -> color_eyre::Report {
        let suggestions = self.error.suggestions();
        suggestions
            .iter()
            .fold(color_eyre::Report::new(self), |report, hint| {
                report.suggestion(*hint)
            })
    }
}
