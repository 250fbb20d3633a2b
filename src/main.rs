use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::Result;
use eyre::WrapErr;

use gm_deployer::chain::RpcChain;
use gm_deployer::config::AppConfig;
use gm_deployer::contracts::ArtifactStore;
use gm_deployer::deploy::{self, ConsoleReporter, RunOptions};
use gm_deployer::project;

#[derive(Parser, Debug)]
#[command(name = "gm-deployer")]
#[command(about = "Deploy GMContract, ERC20TokenFactory and NFTFactory in order")]
#[command(version)]
struct Cli {
    /// Network to deploy to, as named in the configuration
    #[arg(long, env = "DEPLOY_NETWORK")]
    network: Option<String>,

    /// Path to the Hardhat or Foundry project holding the compiled artifacts
    #[arg(long, default_value = ".")]
    project: PathBuf,

    /// Configuration file (defaults to the user config directory)
    #[arg(long, env = "GM_DEPLOYER_CONFIG")]
    config: Option<PathBuf>,

    /// Abort before deploying when the deployer account holds no funds
    #[arg(long)]
    require_funds: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let project_path = cli.project.canonicalize().unwrap_or(cli.project);

    {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
            .init();
    }

    let project = project::detect(&project_path)?;
    tracing::info!(
        "Using {} project '{}' at {:?}",
        project.project_type,
        project.name,
        project.root
    );

    load_env_file(&project.root)?;
    // DEPLOY_NETWORK and GM_DEPLOYER_CONFIG may only be set in the .env
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    if let Some(path) = config.config_path() {
        tracing::info!("Loaded configuration from {:?}", path);
    }

    let (network_name, network) = config.get_network(cli.network.as_deref())?;
    tracing::info!("Deploying to network '{}' via {}", network_name, network.rpc_url);

    let private_key = config.resolve_default_wallet_key()?;
    let chain = RpcChain::connect(network, private_key, ArtifactStore::new(&project))?;

    let options = RunOptions {
        require_funds: cli.require_funds,
        expected_chain_id: network.chain_id,
    };

    let mut reporter = ConsoleReporter::stdio();
    match deploy::run(&chain, &mut reporter, &options).await {
        Ok(summary) => {
            print!("\n{}", summary);
            println!("\nSave these addresses for your frontend integration!");
            Ok(())
        }
        Err(failure) => Err(failure.into_report()),
    }
}


/// Load the project's .env, if any. Variables already set in the process
/// environment take precedence.
fn load_env_file(root: &Path) -> Result<()> {
    match dotenvy::from_path(root.join(".env")) {
        Ok(()) => tracing::debug!("Loaded .env from {:?}", root),
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e).wrap_err("Failed to load .env"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_file_feeds_flag_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".env"),
            "DEPLOY_NETWORK=arcTestnet\nGM_DEPLOYER_CONFIG=deploy.toml\n",
        )
        .unwrap();

        load_env_file(dir.path()).unwrap();
        let cli = Cli::try_parse_from(["gm-deployer"]).unwrap();
        assert_eq!(cli.network.as_deref(), Some("arcTestnet"));
        assert_eq!(cli.config, Some(PathBuf::from("deploy.toml")));

        let cli = Cli::try_parse_from(["gm-deployer", "--network", "sepolia"]).unwrap();
        assert_eq!(cli.network.as_deref(), Some("sepolia"));
    }

    #[test]
    fn test_missing_env_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_env_file(dir.path()).is_ok());
    }
}
