//! Carts service errors.

use kindhope::cart::CartError;
use thiserror::Error;

use crate::{auth::AuthError, domain::carts::store::CartStoreError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartsServiceError {
    #[error("not signed in")]
    Unauthenticated,

    #[error("cart is not subscribed")]
    NotSubscribed,

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error("cart store error")]
    Store(#[source] CartStoreError),
}

impl From<AuthError> for CartsServiceError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::Unauthenticated => Self::Unauthenticated,
        }
    }
}

impl From<CartStoreError> for CartsServiceError {
    fn from(error: CartStoreError) -> Self {
        Self::Store(error)
    }
}
