//! Profile store capability.

use async_trait::async_trait;
use kindhope::profiles::{ProfileUpdate, UserProfile};
use mockall::automock;

use crate::{auth::UserId, domain::profiles::errors::ProfileStoreError};

#[automock]
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Read a user's profile.
    async fn get(&self, user: &UserId) -> Result<UserProfile, ProfileStoreError>;

    /// Create or replace a user's profile.
    async fn set(&self, user: &UserId, profile: UserProfile) -> Result<(), ProfileStoreError>;

    /// Apply edits to an existing profile and return the result.
    async fn update(
        &self,
        user: &UserId,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, ProfileStoreError>;
}
