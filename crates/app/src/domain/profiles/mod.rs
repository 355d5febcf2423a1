//! Profiles

pub mod errors;
pub mod memory;
pub mod service;
pub mod store;

pub use errors::{ProfileServiceError, ProfileStoreError};
pub use memory::MemoryProfileStore;
pub use service::ProfileService;
pub use store::{MockProfileStore, ProfileStore};
