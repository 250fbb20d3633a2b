mod keychain;
mod settings;

pub use keychain::{KeychainManager, validate_private_key};
pub use settings::{AppConfig, Defaults, NetworkConfig, WalletConfig, create_default_config};
