//! Backend Config

use clap::Args;

use crate::gateway::GatewayConfig;

/// Hosted backend settings.
#[derive(Debug, Args)]
pub struct BackendConfig {
    /// Backend project URL
    #[arg(long, env = "GATEWAY_URL")]
    pub gateway_url: String,

    /// Public (anon) API key
    #[arg(long, env = "GATEWAY_ANON_KEY", hide_env_values = true)]
    pub gateway_anon_key: String,
}

impl BackendConfig {
    /// Client configuration for the gateway.
    pub fn gateway(&self) -> GatewayConfig {
        GatewayConfig {
            url: self.gateway_url.clone(),
            anon_key: self.gateway_anon_key.clone(),
        }
    }
}
