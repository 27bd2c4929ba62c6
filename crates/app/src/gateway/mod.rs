//! Backend Gateway
//!
//! Thin HTTP access to the hosted backend: catalog tables, password auth and
//! the payment intent function.

mod client;
pub mod errors;
pub mod models;
pub mod service;

pub use client::{GatewayClient, GatewayConfig};
pub use errors::GatewayError;
pub use models::{NewProductRow, PaymentIntent, PaymentIntentRequest};
pub use service::*;
