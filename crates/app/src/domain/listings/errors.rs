//! Listing store errors.

use kindhope::listings::ListingId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ListingStoreError {
    #[error("listing {0} not found")]
    NotFound(ListingId),

    #[error("item store unavailable: {0}")]
    Transport(String),
}
