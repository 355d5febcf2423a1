//! Donation service errors.

use kindhope::forms::DonationError;
use thiserror::Error;

use crate::{domain::listings::ListingStoreError, storage::StorageError};

#[derive(Debug, Error)]
pub enum DonationServiceError {
    #[error(transparent)]
    Invalid(#[from] DonationError),

    #[error("image upload failed")]
    Storage(#[from] StorageError),

    #[error("failed to submit donation")]
    Listings(#[from] ListingStoreError),
}
