//! Catalog errors.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::gateway::GatewayError;

/// Errors from catalog writes.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A required product field was left empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Discounts are percentages between 0 and 100.
    #[error("discount must be between 0 and 100, got {0}")]
    InvalidDiscount(Decimal),

    /// The backend call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
