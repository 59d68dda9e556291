use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use alloy_primitives::Address;
use serde::Deserialize;

use crate::bindings::L1_MESSENGER_ADDRESS;
use crate::infrastructure::ethereum::ProviderConfig;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EndpointConfig {
    pub name: Option<String>,
    pub rpc: Option<String>,
    pub ws: Option<String>,
    pub ipc: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractConfig {
    pub address: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoint: EndpointConfig,

    #[serde(default)]
    pub contract: Option<ContractConfig>,
}

impl ContractConfig {
    pub fn normalized_address(&self) -> String {
        normalize_address(&self.address)
    }
}

impl Config {
    /// Pick the transport: subscriptions preferred, then HTTP, then IPC.
    pub fn provider_config(&self) -> Option<ProviderConfig> {
        if let Some(ws) = &self.endpoint.ws {
            return Some(ProviderConfig::WebSocket(ws.clone()));
        }
        if let Some(rpc) = &self.endpoint.rpc {
            return Some(ProviderConfig::Http(rpc.clone()));
        }
        #[cfg(unix)]
        if let Some(ipc) = &self.endpoint.ipc {
            return Some(ProviderConfig::Ipc(PathBuf::from(ipc)));
        }
        None
    }

    /// Configured contract address, falling back to the system address.
    pub fn contract_address(&self) -> anyhow::Result<Address> {
        match &self.contract {
            Some(contract) => Address::from_str(&contract.normalized_address()).map_err(|err| {
                anyhow::anyhow!("invalid contract address `{}`: {}", contract.address, err)
            }),
            None => Ok(L1_MESSENGER_ADDRESS),
        }
    }
}

pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    toml::from_str::<Config>(&content).unwrap_or_default()
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("L1_MESSENGER_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("l1-messenger").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("l1-messenger").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "l1-messenger", "l1-messenger")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

fn normalize_address(address: &str) -> String {
    let trimmed = address.trim();
    let payload = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    format!("0x{}", payload.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_contract_address() {
        let config = Config::default();
        assert_eq!(config.contract_address().unwrap(), L1_MESSENGER_ADDRESS);
        assert!(config.provider_config().is_none());
    }

    #[test]
    fn test_transport_preference() {
        let config: Config = toml::from_str(
            r#"
            [endpoint]
            rpc = "http://localhost:8545"
            ws = "ws://localhost:8546"
            "#,
        )
        .unwrap();

        match config.provider_config() {
            Some(ProviderConfig::WebSocket(url)) => assert_eq!(url, "ws://localhost:8546"),
            other => panic!("expected websocket, got {:?}", other),
        }
    }

    #[test]
    fn test_address_normalization() {
        let config: Config = toml::from_str(
            r#"
            [contract]
            address = "0X0000000000000000000000000000000000008008"
            "#,
        )
        .unwrap();

        assert_eq!(config.contract_address().unwrap(), L1_MESSENGER_ADDRESS);
    }
}
