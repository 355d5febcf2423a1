//! Auth errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("you must be logged in")]
    Unauthenticated,
}
