//! Cart store capability.

use async_trait::async_trait;
use kindhope::lines::{CartLine, LineId};
use mockall::automock;
use thiserror::Error;

use crate::{auth::UserId, domain::subscription::Subscription};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartStoreError {
    #[error("cart store unavailable: {0}")]
    Transport(String),

    #[error("permission denied")]
    PermissionDenied,
}

/// Live view of one user's cart: a full snapshot, newest line first, every
/// time the cart changes.
pub type CartSubscription = Subscription<Vec<CartLine>>;

#[automock]
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Subscribe to the user's cart, ordered by add time, newest first.
    async fn subscribe(&self, user: &UserId) -> Result<CartSubscription, CartStoreError>;

    /// Delete a line from the user's cart.
    async fn delete(&self, user: &UserId, line: &LineId) -> Result<(), CartStoreError>;

    /// Create or overwrite a line. The store assigns `added_at`.
    async fn upsert(&self, user: &UserId, line: CartLine) -> Result<(), CartStoreError>;
}
