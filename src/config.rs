use crate::constants::env;
use crate::error::{CheckpointError, Result};
use crate::locator::BlockHash;
use crate::network::Network;
use serde::{Deserialize, Serialize};

/// Bitcoin mainnet genesis, the default fallback identifier.
const DEFAULT_GENESIS_HASH: &str =
    "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckpointConfig {
    pub network_name: String,
    /// Genesis block hash of the target network, hex encoded.
    pub genesis_hash: String,
    /// Object-store container the bootstrap resolves the store handle from.
    pub container: String,
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            network_name: "main".to_string(),
            genesis_hash: DEFAULT_GENESIS_HASH.to_string(),
            container: "checkpoints".to_string(),
        }
    }
}

impl CheckpointConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(network_name) = std::env::var(env::NETWORK) {
            config.network_name = network_name;
        }

        if let Ok(genesis_hash) = std::env::var(env::GENESIS_HASH) {
            genesis_hash.parse::<BlockHash>().map_err(|e| {
                CheckpointError::configuration(format!("Invalid {}: {e}", env::GENESIS_HASH))
            })?;
            config.genesis_hash = genesis_hash;
        }

        if let Ok(container) = std::env::var(env::CHECKPOINT_CONTAINER) {
            config.container = container;
        }

        Ok(config)
    }

    /// Resolve the configured network identity.
    pub fn network(&self) -> Result<Network> {
        let genesis = self.genesis_hash.parse::<BlockHash>().map_err(|e| {
            CheckpointError::configuration(format!("Invalid genesis_hash: {e}"))
        })?;
        Ok(Network::new(self.network_name.clone(), genesis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_overrides_and_validation() {
        // Single test covering env handling to avoid racing on process env.
        std::env::remove_var(env::NETWORK);
        std::env::remove_var(env::GENESIS_HASH);
        std::env::remove_var(env::CHECKPOINT_CONTAINER);

        let config = CheckpointConfig::from_env().unwrap();
        assert_eq!(config.network_name, "main");
        assert_eq!(config.container, "checkpoints");
        assert!(config.network().is_ok());

        std::env::set_var(env::NETWORK, "test");
        std::env::set_var(env::GENESIS_HASH, "00".repeat(32));
        std::env::set_var(env::CHECKPOINT_CONTAINER, "cp-test");
        let config = CheckpointConfig::from_env().unwrap();
        assert_eq!(config.network_name, "test");
        assert_eq!(config.container, "cp-test");
        let network = config.network().unwrap();
        assert_eq!(network.genesis(), BlockHash::new([0u8; 32]));

        std::env::set_var(env::GENESIS_HASH, "not-hex");
        let result = CheckpointConfig::from_env();
        assert!(matches!(
            result,
            Err(CheckpointError::Configuration { .. })
        ));

        std::env::remove_var(env::NETWORK);
        std::env::remove_var(env::GENESIS_HASH);
        std::env::remove_var(env::CHECKPOINT_CONTAINER);
    }
}
