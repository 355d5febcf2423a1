//! Listings

pub mod errors;
pub mod memory;
pub mod store;

pub use errors::ListingStoreError;
pub use memory::MemoryListingStore;
pub use store::{ListingStore, ListingSubscription, MockListingStore};
