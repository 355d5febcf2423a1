//! App Context

use std::sync::Arc;

use crate::{
    auth::Identity,
    domain::{
        carts::{CartSession, CartStore, MemoryCartStore, Notifier, TracingNotifier},
        checkout::CheckoutService,
        donations::DonationService,
        listings::{ListingStore, MemoryListingStore},
        profiles::{MemoryProfileStore, ProfileService, ProfileStore},
    },
    embeddings::EmbeddingClient,
    storage::{MemoryObjectStorage, ObjectStorage},
};

#[derive(Clone)]
pub struct AppContext {
    pub carts: Arc<dyn CartStore>,
    pub listings: Arc<dyn ListingStore>,
    pub storage: Arc<dyn ObjectStorage>,
    pub notifier: Arc<dyn Notifier>,
    pub donations: Arc<DonationService>,
    pub checkout: Arc<CheckoutService>,
    pub profiles: Arc<ProfileService>,
}

impl AppContext {
    /// Wire services over explicit backends.
    #[must_use]
    pub fn new(
        carts: Arc<dyn CartStore>,
        listings: Arc<dyn ListingStore>,
        profiles: Arc<dyn ProfileStore>,
        storage: Arc<dyn ObjectStorage>,
        embeddings: Arc<dyn EmbeddingClient>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            donations: Arc::new(DonationService::new(
                listings.clone(),
                embeddings,
                storage.clone(),
            )),
            checkout: Arc::new(CheckoutService::new(storage.clone())),
            profiles: Arc::new(ProfileService::new(profiles)),
            carts,
            listings,
            storage,
            notifier,
        }
    }

    /// Context backed by process memory, logging notices.
    #[must_use]
    pub fn in_memory(carts: MemoryCartStore, embeddings: Arc<dyn EmbeddingClient>) -> Self {
        Self::new(
            Arc::new(carts),
            Arc::new(MemoryListingStore::new()),
            Arc::new(MemoryProfileStore::new()),
            Arc::new(MemoryObjectStorage::new()),
            embeddings,
            Arc::new(TracingNotifier),
        )
    }

    /// Open a cart session for `identity`.
    #[must_use]
    pub fn cart_session(&self, identity: Identity) -> CartSession {
        CartSession::new(identity, self.carts.clone(), self.notifier.clone())
    }
}
