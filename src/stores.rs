//! Stores

use serde::{Deserialize, Serialize};

use crate::ids::TypedUuid;

/// Store Id
pub type StoreId = TypedUuid<Store>;

/// A store selling through the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    /// Store id
    pub id: StoreId,

    /// Store name
    pub name: String,

    /// Store category
    #[serde(default)]
    pub category: Option<String>,

    /// Short description
    #[serde(default)]
    pub description: Option<String>,

    /// Logo image
    #[serde(default)]
    pub logo_url: Option<String>,
}
