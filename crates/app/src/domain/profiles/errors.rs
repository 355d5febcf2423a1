//! Profile errors.

use kindhope::forms::SignUpError;
use thiserror::Error;

use crate::auth::{AuthError, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProfileStoreError {
    #[error("no profile for user {0}")]
    NotFound(UserId),

    #[error("profile store unavailable: {0}")]
    Transport(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileServiceError {
    #[error("not signed in")]
    Unauthenticated,

    #[error(transparent)]
    Invalid(#[from] SignUpError),

    #[error("profile store error")]
    Store(#[from] ProfileStoreError),
}

impl From<AuthError> for ProfileServiceError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::Unauthenticated => Self::Unauthenticated,
        }
    }
}
