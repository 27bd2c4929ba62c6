//! Authentication

mod models;

pub use models::*;
