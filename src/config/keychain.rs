use eyre::{Result, WrapErr};
use keyring::Entry;
use zeroize::Zeroizing;

const SERVICE_NAME: &str = "gm-deployer";

/// Read-only access to deployer credentials in the OS keychain
pub struct KeychainManager {
    service: String,
}

impl KeychainManager {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    /// Retrieve a secret from the keychain
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let entry = Entry::new(&self.service, key)
            .wrap_err_with(|| format!("Failed to access keychain entry for {}", key))?;

        match entry.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).wrap_err_with(|| format!("Failed to retrieve secret for {}", key)),
        }
    }

    /// Retrieve a secret with zeroization for sensitive data
    pub fn get_zeroizing(&self, key: &str) -> Result<Option<Zeroizing<String>>> {
        self.get(key).map(|opt| opt.map(Zeroizing::new))
    }
}

impl Default for KeychainManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Check that a private key is 32 bytes of hex, with or without 0x prefix
pub fn validate_private_key(key: &str) -> Result<()> {
    let trimmed = key.trim();
    let clean_key = trimmed.strip_prefix("0x").unwrap_or(trimmed);

    let bytes = Zeroizing::new(
        hex::decode(clean_key).map_err(|_| eyre::eyre!("Private key is not valid hex"))?,
    );
    if bytes.len() != 32 {
        return Err(eyre::eyre!(
            "Invalid private key format: expected 64 hex characters"
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_private_key() {
        let key = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
        assert!(validate_private_key(key).is_ok());
        assert!(validate_private_key(&format!("0x{}", key)).is_ok());
        assert!(validate_private_key(&format!(" 0x{}\n", key)).is_ok());

        assert!(validate_private_key("0x1234").is_err());
        assert!(validate_private_key(&key.replace('a', "z")).is_err());
    }

    // Requires keychain access and may prompt for permissions
    #[test]
    #[ignore]
    fn test_keychain_missing_entry() {
        let km = KeychainManager::new();
        let value = km.get("gm_deployer_missing_entry").unwrap();
        assert_eq!(value, None);
    }
}
