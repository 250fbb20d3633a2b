//! Capabilities the orchestrator needs from the chain, and the RPC-backed
//! implementation used by the binary.

mod error;
mod rpc;

pub use error::ChainError;
pub use rpc::RpcChain;

use std::fmt;
use std::future::Future;

use alloy::primitives::{Address, U256};

use crate::contracts::ContractName;

/// An identity able to authorize deployment transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signer {
    pub address: Address,
}

impl Signer {
    pub fn new(address: Address) -> Self {
        Self { address }
    }
}

/// Identity of the chain the node is connected to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkDescriptor {
    /// `None` when the chain id is not a well-known network
    pub name: Option<String>,
    pub chain_id: u64,
}

impl NetworkDescriptor {
    pub fn from_chain_id(chain_id: u64) -> Self {
        Self {
            name: network_name(chain_id).map(str::to_string),
            chain_id,
        }
    }
}

impl fmt::Display for NetworkDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Chain ID: {}",
            self.name.as_deref().unwrap_or("unknown"),
            self.chain_id
        )
    }
}

/// Resolves signing identities and their balances
pub trait SignerProvider {
    /// Available signers, in preference order. May be empty.
    fn list_signers(&self) -> impl Future<Output = Result<Vec<Signer>, ChainError>> + Send;

    /// Balance in wei
    fn get_balance(
        &self,
        address: Address,
    ) -> impl Future<Output = Result<U256, ChainError>> + Send;
}

pub trait NetworkInspector {
    fn get_network(&self) -> impl Future<Output = Result<NetworkDescriptor, ChainError>> + Send;
}

/// Produces deployable handles for contracts of the suite
pub trait ContractFactoryResolver {
    type Factory: FactoryHandle;

    /// Resolve the factory for `name`, bound to the signer that will deploy it
    fn get_factory(
        &self,
        name: ContractName,
        deployer: &Signer,
    ) -> impl Future<Output = Result<Self::Factory, ChainError>> + Send;
}

pub trait FactoryHandle {
    type Pending: PendingDeployment;

    /// Submit the deployment transaction
    fn deploy(&self) -> impl Future<Output = Result<Self::Pending, ChainError>> + Send;
}

pub trait PendingDeployment {
    /// Block until the deployment is confirmed and return the contract address
    fn wait_for_confirmation(self) -> impl Future<Output = Result<Address, ChainError>> + Send;
}

/// Well-known names for chain ids
fn network_name(chain_id: u64) -> Option<&'static str> {
    match chain_id {
        1 => Some("mainnet"),
        11155111 => Some("sepolia"),
        17000 => Some("holesky"),
        137 => Some("polygon"),
        42161 => Some("arbitrum"),
        10 => Some("optimism"),
        8453 => Some("base"),
        5042002 => Some("arc-testnet"),
        31337 => Some("anvil"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_descriptor_from_chain_id() {
        let sepolia = NetworkDescriptor::from_chain_id(11155111);
        assert_eq!(sepolia.name.as_deref(), Some("sepolia"));
        assert_eq!(sepolia.to_string(), "sepolia Chain ID: 11155111");

        let arc = NetworkDescriptor::from_chain_id(5042002);
        assert_eq!(arc.name.as_deref(), Some("arc-testnet"));

        let local = NetworkDescriptor::from_chain_id(1337);
        assert_eq!(local.name, None);
        assert_eq!(local.to_string(), "unknown Chain ID: 1337");
    }
}
