//! In-memory profile store.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use kindhope::profiles::{ProfileUpdate, UserProfile};
use rustc_hash::FxHashMap;

use crate::{
    auth::UserId,
    domain::profiles::{errors::ProfileStoreError, store::ProfileStore},
};

#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    profiles: Arc<Mutex<FxHashMap<UserId, UserProfile>>>,
}

impl MemoryProfileStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get(&self, user: &UserId) -> Result<UserProfile, ProfileStoreError> {
        self.profiles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user)
            .cloned()
            .ok_or_else(|| ProfileStoreError::NotFound(user.clone()))
    }

    async fn set(&self, user: &UserId, profile: UserProfile) -> Result<(), ProfileStoreError> {
        self.profiles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user.clone(), profile);

        Ok(())
    }

    async fn update(
        &self,
        user: &UserId,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, ProfileStoreError> {
        let mut profiles = self.profiles.lock().unwrap_or_else(PoisonError::into_inner);

        let profile = profiles
            .get_mut(user)
            .ok_or_else(|| ProfileStoreError::NotFound(user.clone()))?;

        update.apply_to(profile);

        Ok(profile.clone())
    }
}
