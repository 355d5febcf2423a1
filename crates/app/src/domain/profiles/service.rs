//! Profile service.

use std::sync::Arc;

use kindhope::{
    forms::SignUpForm,
    profiles::{ProfileUpdate, UserProfile},
};
use tracing::info;

use crate::{
    auth::{Identity, UserId},
    domain::profiles::{errors::ProfileServiceError, store::ProfileStore},
};

pub struct ProfileService {
    store: Arc<dyn ProfileStore>,
}

impl ProfileService {
    #[must_use]
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Validate a sign-up form and store the profile of the user the auth
    /// provider created for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the form is invalid or the store rejects the write.
    #[tracing::instrument(name = "profiles.register", skip(self, form), fields(user = %user))]
    pub async fn register(
        &self,
        user: &UserId,
        form: &SignUpForm,
    ) -> Result<UserProfile, ProfileServiceError> {
        let profile = form.validate()?;

        self.store.set(user, profile.clone()).await?;

        info!("stored new profile");

        Ok(profile)
    }

    /// The signed-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is anonymous or has no profile.
    pub async fn profile(&self, identity: &Identity) -> Result<UserProfile, ProfileServiceError> {
        let user = identity.require_user()?;

        Ok(self.store.get(user).await?)
    }

    /// Save edits from the profile screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is anonymous or has no profile.
    #[tracing::instrument(name = "profiles.update", skip(self, identity, update))]
    pub async fn update(
        &self,
        identity: &Identity,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, ProfileServiceError> {
        let user = identity.require_user()?;
        let profile = self.store.update(user, update).await?;

        info!(user = %user, "profile updated");

        Ok(profile)
    }
}
