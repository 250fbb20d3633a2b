use alloy::primitives::Address;

use super::{Advisory, FatalError, Reporter, RunEvent, RunFailure};
use crate::chain::{
    ChainError, ContractFactoryResolver, FactoryHandle, NetworkInspector, PendingDeployment,
    Signer, SignerProvider,
};
use crate::contracts::{ContractName, DeploymentRecord, DeploymentSummary};

/// Knobs for a deployment run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Treat an observed zero balance as fatal instead of advisory
    pub require_funds: bool,
    /// Chain id the configured network is expected to report
    pub expected_chain_id: Option<u64>,
}

/// Deploy the contract suite with the first available signer.
///
/// Network and balance checks are best-effort and only produce advisories.
/// Contracts are deployed strictly one after another: each deployment is
/// confirmed before the next contract is even resolved, and the first failure
/// ends the run. Records confirmed before a failure are returned with it.
pub async fn run<C, R>(
    chain: &C,
    reporter: &mut R,
    options: &RunOptions,
) -> Result<DeploymentSummary, RunFailure>
where
    C: SignerProvider + NetworkInspector + ContractFactoryResolver,
    R: Reporter,
{
    let deployer = select_signer(chain)
        .await
        .map_err(|e| RunFailure::new(e, DeploymentSummary::default()))?;
    reporter.report(RunEvent::SignerSelected(deployer.address));

    check_network(chain, reporter, options).await;

    check_balance(chain, reporter, options, deployer.address)
        .await
        .map_err(|e| RunFailure::new(e, DeploymentSummary::default()))?;

    let mut summary = DeploymentSummary::default();
    for name in ContractName::DEPLOY_ORDER {
        reporter.report(RunEvent::Deploying(name));

        let address = match deploy_contract(chain, name, &deployer).await {
            Ok(address) => address,
            Err(e) => {
                tracing::debug!(contract = %name, "Deployment failed: {}", e);
                return Err(RunFailure::new(e, summary));
            }
        };

        let record = DeploymentRecord { name, address };
        reporter.report(RunEvent::Deployed(record.clone()));
        summary.push(record);
    }

    Ok(summary)
}

async fn select_signer<C: SignerProvider>(chain: &C) -> Result<Signer, FatalError> {
    let signers = chain.list_signers().await?;
    tracing::debug!("Found {} signer(s)", signers.len());

    signers.into_iter().next().ok_or(FatalError::NoSigner)
}

async fn check_network<C, R>(chain: &C, reporter: &mut R, options: &RunOptions)
where
    C: NetworkInspector,
    R: Reporter,
{
    match chain.get_network().await {
        Ok(network) => {
            let actual = network.chain_id;
            reporter.report(RunEvent::Network(network));

            if let Some(expected) = options.expected_chain_id {
                if expected != actual {
                    reporter.report(RunEvent::Advisory(Advisory::ChainIdMismatch {
                        expected,
                        actual,
                    }));
                }
            }
        }
        Err(e) => {
            let reason = advisory_reason(e);
            reporter.report(RunEvent::Advisory(Advisory::NetworkUnavailable(reason)));
        }
    }
}

async fn check_balance<C, R>(
    chain: &C,
    reporter: &mut R,
    options: &RunOptions,
    address: Address,
) -> Result<(), FatalError>
where
    C: SignerProvider,
    R: Reporter,
{
    match chain.get_balance(address).await {
        Ok(balance) => {
            reporter.report(RunEvent::Balance(balance));

            if balance.is_zero() {
                if options.require_funds {
                    return Err(FatalError::InsufficientFunds { address });
                }
                reporter.report(RunEvent::Advisory(Advisory::ZeroBalance));
            }
        }
        Err(e) => {
            let reason = advisory_reason(e);
            reporter.report(RunEvent::Advisory(Advisory::BalanceUnavailable(reason)));
        }
    }

    Ok(())
}

/// The underlying cause, without the error category prefix
fn advisory_reason(err: ChainError) -> String {
    match err {
        ChainError::Network(reason) => reason,
        other => other.to_string(),
    }
}

async fn deploy_contract<C: ContractFactoryResolver>(
    chain: &C,
    name: ContractName,
    deployer: &Signer,
) -> Result<Address, ChainError> {
    let factory = chain.get_factory(name, deployer).await?;
    let pending = factory.deploy().await?;
    pending.wait_for_confirmation().await
}
