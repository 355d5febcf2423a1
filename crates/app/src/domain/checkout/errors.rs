//! Checkout service errors.

use kindhope::forms::PaymentError;
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutServiceError {
    #[error(transparent)]
    Invalid(#[from] PaymentError),

    #[error("failed to upload payment slip")]
    Storage(#[from] StorageError),
}
