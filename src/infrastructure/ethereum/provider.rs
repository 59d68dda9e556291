//! Provider configuration and construction.

use std::path::PathBuf;

use alloy::providers::{
    fillers::FillProvider, utils::JoinedRecommendedFillers, ProviderBuilder, RootProvider,
    WsConnect,
};
use anyhow::{Context, Result};
use tracing::debug;

/// Provider with all recommended fillers (gas, blob gas, nonce, chain id).
pub type DefaultProvider = FillProvider<JoinedRecommendedFillers, RootProvider>;

/// Transport configuration for reaching a node.
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    /// HTTP JSON-RPC endpoint
    Http(String),
    /// WebSocket endpoint
    WebSocket(String),
    /// IPC socket path (Unix only)
    #[cfg(unix)]
    Ipc(PathBuf),
}

impl ProviderConfig {
    /// Get display name for this endpoint
    pub fn display(&self) -> String {
        match self {
            ProviderConfig::Http(url) => url.clone(),
            ProviderConfig::WebSocket(url) => url.clone(),
            #[cfg(unix)]
            ProviderConfig::Ipc(path) => path.display().to_string(),
        }
    }

    /// Whether the transport can serve `eth_subscribe` streams
    pub fn supports_subscriptions(&self) -> bool {
        match self {
            ProviderConfig::Http(_) => false,
            ProviderConfig::WebSocket(_) => true,
            #[cfg(unix)]
            ProviderConfig::Ipc(_) => true,
        }
    }

    /// Connect and build the provider for this transport.
    pub async fn connect(&self) -> Result<DefaultProvider> {
        debug!(endpoint = %self.display(), "connecting provider");
        match self {
            ProviderConfig::Http(url) => {
                let rpc_url = url.parse().context("Invalid HTTP URL")?;
                Ok(ProviderBuilder::new().connect_http(rpc_url))
            }
            ProviderConfig::WebSocket(url) => {
                let ws = WsConnect::new(url.clone());
                ProviderBuilder::new()
                    .connect_ws(ws)
                    .await
                    .context("Failed to create WebSocket provider")
            }
            #[cfg(unix)]
            ProviderConfig::Ipc(path) => {
                use alloy::providers::IpcConnect;
                let ipc = IpcConnect::new(path.to_string_lossy().to_string());
                ProviderBuilder::new()
                    .connect_ipc(ipc)
                    .await
                    .context("Failed to create IPC provider")
            }
        }
    }
}
