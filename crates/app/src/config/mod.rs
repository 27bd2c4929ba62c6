//! Application configuration module

use clap::Args;
use thiserror::Error;

pub mod backend;
pub mod observability;
pub mod payments;
pub mod storage;

pub use backend::BackendConfig;
pub use observability::{LogFormat, LoggingConfig};
pub use payments::PaymentsConfig;
pub use storage::StorageConfig;

/// Errors in otherwise well-formed settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The currency code is not a known ISO 4217 code.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Settings shared by every command.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Hosted backend settings.
    #[command(flatten)]
    pub backend: BackendConfig,

    /// Payment provider and checkout settings.
    #[command(flatten)]
    pub payments: PaymentsConfig,

    /// Local cart persistence settings.
    #[command(flatten)]
    pub storage: StorageConfig,
}

/// Load a `.env` file into the process environment, if one exists.
pub fn load_dotenv() {
    // A missing .env is fine.
    _ = dotenvy::dotenv();
}
