use alloy::primitives::{Address, U256};
use thiserror::Error;

use crate::chain::NetworkDescriptor;
use crate::contracts::{ContractName, DeploymentRecord};

/// Best-effort check that failed or looked wrong; the run continues
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Advisory {
    #[error("Could not get network info: {0}")]
    NetworkUnavailable(String),
    #[error("Could not fetch balance: {0}")]
    BalanceUnavailable(String),
    #[error("Account balance is 0. Make sure you have funds to deploy!")]
    ZeroBalance,
    #[error("Node reports chain ID {actual} but the network is configured for {expected}")]
    ChainIdMismatch { expected: u64, actual: u64 },
}

/// Progress of a deployment run, in the order it happens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    SignerSelected(Address),
    Network(NetworkDescriptor),
    /// Signer balance in wei
    Balance(U256),
    Advisory(Advisory),
    Deploying(ContractName),
    Deployed(DeploymentRecord),
}

/// Receives run events as they happen
pub trait Reporter {
    fn report(&mut self, event: RunEvent);
}

impl Reporter for Vec<RunEvent> {
    fn report(&mut self, event: RunEvent) {
        self.push(event);
    }
}
