//! Checkout

pub mod errors;
pub mod models;
pub mod service;

pub use errors::CheckoutServiceError;
pub use models::{OrderConfirmation, OrderUuid};
pub use service::CheckoutService;
