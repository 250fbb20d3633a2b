use std::time::Duration;

use alloy::{
    network::{EthereumWallet, ReceiptResponse, TransactionBuilder},
    primitives::{Address, Bytes, U256},
    providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder},
    rpc::{client::RpcClient, types::TransactionRequest},
    signers::local::PrivateKeySigner,
    transports::http::{Http, reqwest},
};
use eyre::{Result, WrapErr};
use zeroize::Zeroizing;

use super::{
    ChainError, ContractFactoryResolver, FactoryHandle, NetworkDescriptor, NetworkInspector,
    PendingDeployment, Signer, SignerProvider,
};
use crate::config::NetworkConfig;
use crate::contracts::{ArtifactStore, ContractName};

/// Chain capabilities backed by an alloy JSON-RPC provider
pub struct RpcChain {
    provider: DynProvider,
    artifacts: ArtifactStore,
    /// Address of the configured private key; the node's accounts are used otherwise
    local_signer: Option<Address>,
    timeout: Duration,
    confirmations: u64,
}

impl RpcChain {
    /// Build the provider for a network.
    ///
    /// With a private key, transactions are signed locally. Without one, the
    /// node is expected to sign for its own unlocked accounts.
    pub fn connect(
        network: &NetworkConfig,
        private_key: Option<Zeroizing<String>>,
        artifacts: ArtifactStore,
    ) -> Result<Self> {
        let url: reqwest::Url = network
            .rpc_url
            .parse()
            .wrap_err_with(|| format!("Invalid RPC URL: {}", network.rpc_url))?;

        let http_client = reqwest::Client::builder()
            .timeout(network.timeout())
            .build()
            .wrap_err("Failed to build HTTP client")?;
        let transport = Http::with_client(http_client, url);
        let is_local = transport.guess_local();
        let client = RpcClient::new(transport, is_local);

        let (provider, local_signer) = match private_key {
            Some(key) => {
                let signer = parse_signer(&key)?;
                let address = signer.address();
                let provider = ProviderBuilder::new()
                    .wallet(EthereumWallet::from(signer))
                    .connect_client(client)
                    .erased();
                (provider, Some(address))
            }
            None => (ProviderBuilder::new().connect_client(client).erased(), None),
        };

        tracing::debug!(
            rpc_url = %network.rpc_url,
            local_signer = local_signer.is_some(),
            "Connected RPC provider"
        );

        Ok(Self {
            provider,
            artifacts,
            local_signer,
            timeout: network.timeout(),
            confirmations: network.confirmations,
        })
    }
}

fn parse_signer(private_key: &Zeroizing<String>) -> Result<PrivateKeySigner> {
    let key_str = private_key.trim();
    let clean_key = key_str.strip_prefix("0x").unwrap_or(key_str);

    clean_key.parse().wrap_err("Failed to parse private key")
}

impl SignerProvider for RpcChain {
    async fn list_signers(&self) -> Result<Vec<Signer>, ChainError> {
        if let Some(address) = self.local_signer {
            return Ok(vec![Signer::new(address)]);
        }

        let accounts = self
            .provider
            .get_accounts()
            .await
            .map_err(ChainError::network)?;

        Ok(accounts.into_iter().map(Signer::new).collect())
    }

    async fn get_balance(&self, address: Address) -> Result<U256, ChainError> {
        self.provider
            .get_balance(address)
            .await
            .map_err(ChainError::network)
    }
}

impl NetworkInspector for RpcChain {
    async fn get_network(&self) -> Result<NetworkDescriptor, ChainError> {
        let chain_id = self
            .provider
            .get_chain_id()
            .await
            .map_err(ChainError::network)?;

        Ok(NetworkDescriptor::from_chain_id(chain_id))
    }
}

impl ContractFactoryResolver for RpcChain {
    type Factory = RpcFactory;

    async fn get_factory(
        &self,
        name: ContractName,
        deployer: &Signer,
    ) -> Result<RpcFactory, ChainError> {
        let artifact = self
            .artifacts
            .load(name)
            .map_err(|e| ChainError::resolution(name, format!("{:#}", e)))?;

        tracing::debug!(
            contract = %artifact.name,
            path = ?artifact.path,
            bytecode_len = artifact.bytecode.len(),
            "Resolved contract factory"
        );

        Ok(RpcFactory {
            provider: self.provider.clone(),
            name: artifact.name,
            bytecode: artifact.bytecode,
            from: deployer.address,
            timeout: self.timeout,
            confirmations: self.confirmations,
        })
    }
}

/// Deploys one contract's creation code from a fixed account
pub struct RpcFactory {
    provider: DynProvider,
    name: ContractName,
    bytecode: Bytes,
    from: Address,
    timeout: Duration,
    confirmations: u64,
}

impl FactoryHandle for RpcFactory {
    type Pending = RpcPendingDeployment;

    async fn deploy(&self) -> Result<RpcPendingDeployment, ChainError> {
        // Gas, nonce and chain id are filled by the provider
        let tx = TransactionRequest::default()
            .with_from(self.from)
            .with_deploy_code(self.bytecode.clone());

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| ChainError::deployment(self.name, format!("failed to send: {}", e)))?;

        tracing::info!(
            contract = %self.name,
            tx_hash = %pending.tx_hash(),
            "Deployment transaction sent"
        );

        Ok(RpcPendingDeployment {
            name: self.name,
            pending: pending
                .with_required_confirmations(self.confirmations)
                .with_timeout(Some(self.timeout)),
        })
    }
}

pub struct RpcPendingDeployment {
    name: ContractName,
    pending: PendingTransactionBuilder<alloy::network::Ethereum>,
}

impl PendingDeployment for RpcPendingDeployment {
    async fn wait_for_confirmation(self) -> Result<Address, ChainError> {
        let name = self.name;
        let receipt = self
            .pending
            .get_receipt()
            .await
            .map_err(|e| ChainError::deployment(name, format!("no receipt: {}", e)))?;

        let tx_hash = ReceiptResponse::transaction_hash(&receipt);
        if !ReceiptResponse::status(&receipt) {
            return Err(ChainError::deployment(
                name,
                format!("transaction {} reverted", tx_hash),
            ));
        }

        let address = ReceiptResponse::contract_address(&receipt).ok_or_else(|| {
            ChainError::deployment(
                name,
                format!("receipt of {} has no contract address", tx_hash),
            )
        })?;

        tracing::info!(contract = %name, %address, %tx_hash, "Deployment confirmed");
        Ok(address)
    }
}
