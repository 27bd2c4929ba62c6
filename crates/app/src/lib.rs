//! Domicilios application services: backend gateway, payment provider,
//! checkout orchestration, catalog and configuration for the CLI.

pub mod auth;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod context;
pub mod gateway;
pub mod notifications;
pub mod observability;
pub mod payments;

#[cfg(test)]
mod test_helpers;
