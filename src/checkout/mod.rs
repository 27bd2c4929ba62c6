//! Checkout state shared by every checkout front end.

mod session;
mod summary;

pub use session::{ClientSecret, PaymentSession, PaymentSessionError, PaymentStatus};
pub use summary::{DEFAULT_SHIPPING_FEE, OrderSummary};
