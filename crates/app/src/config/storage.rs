//! Storage Config

use std::path::PathBuf;

use clap::Args;

/// Local cart persistence settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Directory holding the persisted cart
    #[arg(long, env = "CART_STORAGE_DIR", default_value = ".domicilios")]
    pub cart_storage_dir: PathBuf,
}
