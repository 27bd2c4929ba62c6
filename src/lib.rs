//! Domicilios
//!
//! Client-side cart state and checkout session types for the Domicilios
//! storefront.

pub mod cart;
pub mod checkout;
pub mod ids;
pub mod prelude;
pub mod prices;
pub mod products;
pub mod stores;
