use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::keychain::{KeychainManager, validate_private_key};

const CONFIG_DIR: &str = "gm-deployer";
const CONFIG_FILE: &str = "config.toml";

/// Matches the 120 second request timeout of the Hardhat network configs.
pub const DEFAULT_TIMEOUT_MS: u64 = 120_000;
pub const DEFAULT_CONFIRMATIONS: u64 = 1;

const DEFAULT_NETWORK: &str = "localhost";
const DEFAULT_WALLET: &str = "deployer";
const PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";
const SEPOLIA_RPC_ENV: &str = "SEPOLIA_RPC_URL";

/// Deployer configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub networks: HashMap<String, NetworkConfig>,

    #[serde(default)]
    pub wallets: HashMap<String, WalletConfig>,

    #[serde(default)]
    pub defaults: Option<Defaults>,

    #[serde(skip)]
    config_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub rpc_url: String,
    /// Expected chain id; a different id reported by the node is flagged
    pub chain_id: Option<u64>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_confirmations")]
    pub confirmations: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Keychain entry holding the private key
    pub keychain: Option<String>,
    /// Environment variable containing private key
    pub env_var: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Defaults {
    pub network: Option<String>,
    pub wallet: Option<String>,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_confirmations() -> u64 {
    DEFAULT_CONFIRMATIONS
}

impl NetworkConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl AppConfig {
    /// Load configuration from an explicit path, the default location, or
    /// fall back to the built-in network table
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from(path);
        }

        match Self::default_config_path() {
            Ok(path) if path.exists() => Self::load_from(&path),
            _ => {
                tracing::debug!("No config file found, using built-in networks");
                Ok(create_default_config())
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file: {:?}", path))?;

        let mut config: AppConfig =
            toml::from_str(&content).wrap_err("Failed to parse config file")?;

        // A file declaring only networks still reads the key from PRIVATE_KEY
        for (name, wallet) in default_wallets() {
            config.wallets.entry(name).or_insert(wallet);
        }

        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Get the config file path this configuration was loaded from
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Get the default configuration file path
    fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| eyre::eyre!("Could not determine config directory"))?;

        Ok(config_dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Get a network by name, falling back to the configured default
    pub fn get_network(&self, name: Option<&str>) -> Result<(&String, &NetworkConfig)> {
        let name = name
            .or_else(|| self.defaults.as_ref().and_then(|d| d.network.as_deref()))
            .unwrap_or(DEFAULT_NETWORK);

        self.networks.get_key_value(name).ok_or_else(|| {
            let mut known: Vec<&str> = self.networks.keys().map(String::as_str).collect();
            known.sort_unstable();
            eyre::eyre!(
                "Unknown network '{}' (configured: {})",
                name,
                known.join(", ")
            )
        })
    }

    /// Resolve the private key of the default wallet, if any is available.
    ///
    /// `Ok(None)` means no credential is configured, in which case the node's
    /// own accounts are used.
    pub fn resolve_default_wallet_key(&self) -> Result<Option<Zeroizing<String>>> {
        let name = self
            .defaults
            .as_ref()
            .and_then(|d| d.wallet.as_deref())
            .unwrap_or(DEFAULT_WALLET);

        self.resolve_wallet_key(name)
    }

    /// Resolve a wallet private key
    pub fn resolve_wallet_key(&self, name: &str) -> Result<Option<Zeroizing<String>>> {
        let wallet = match self.wallets.get(name) {
            Some(w) => w,
            None => return Ok(None),
        };

        let key = if let Some(keychain_ref) = &wallet.keychain {
            KeychainManager::new().get_zeroizing(keychain_ref)?
        } else if let Some(env_var) = &wallet.env_var {
            std::env::var(env_var)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(Zeroizing::new)
        } else {
            None
        };

        if let Some(key) = &key {
            validate_private_key(key)
                .wrap_err_with(|| format!("Wallet '{}' holds an invalid private key", name))?;
        }

        Ok(key)
    }
}

/// Create a default configuration with the networks the contract suite targets
pub fn create_default_config() -> AppConfig {
    let mut networks = HashMap::new();

    networks.insert(
        "localhost".to_string(),
        NetworkConfig {
            rpc_url: "http://127.0.0.1:8545".to_string(),
            chain_id: Some(1337),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            confirmations: DEFAULT_CONFIRMATIONS,
        },
    );

    networks.insert(
        "arcTestnet".to_string(),
        NetworkConfig {
            rpc_url: "https://rpc.testnet.arc.network".to_string(),
            chain_id: Some(5042002),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            confirmations: DEFAULT_CONFIRMATIONS,
        },
    );

    networks.insert(
        "sepolia".to_string(),
        NetworkConfig {
            rpc_url: std::env::var(SEPOLIA_RPC_ENV)
                .unwrap_or_else(|_| "https://ethereum-sepolia-rpc.publicnode.com".to_string()),
            chain_id: Some(11155111),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            confirmations: DEFAULT_CONFIRMATIONS,
        },
    );

    AppConfig {
        networks,
        wallets: default_wallets(),
        defaults: Some(Defaults {
            network: Some(DEFAULT_NETWORK.to_string()),
            wallet: Some(DEFAULT_WALLET.to_string()),
        }),
        config_path: None,
    }
}

fn default_wallets() -> HashMap<String, WalletConfig> {
    let mut wallets = HashMap::new();
    wallets.insert(
        DEFAULT_WALLET.to_string(),
        WalletConfig {
            keychain: None,
            env_var: Some(PRIVATE_KEY_ENV.to_string()),
        },
    );
    wallets
}
