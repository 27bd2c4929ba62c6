//! Domicilios prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartLine, CartStorage, CartStore, FileCartStorage, MemoryCartStorage},
    checkout::{ClientSecret, OrderSummary, PaymentSession, PaymentSessionError, PaymentStatus},
    prices::Price,
    products::{Product, ProductId},
    stores::{Store, StoreId},
};
