//! Donations

pub mod errors;
pub mod service;

pub use errors::DonationServiceError;
pub use service::DonationService;
