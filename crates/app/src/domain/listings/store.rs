//! Item store capability.

use async_trait::async_trait;
use kindhope::listings::{Category, Listing, ListingId, NewListing};
use mockall::automock;

use crate::domain::{listings::errors::ListingStoreError, subscription::Subscription};

/// Live view of one category: every listing in it, newest first, re-sent on
/// each change.
pub type ListingSubscription = Subscription<Vec<Listing>>;

#[automock]
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Store a new listing. The store assigns id and creation time.
    async fn create(&self, listing: NewListing) -> Result<Listing, ListingStoreError>;

    /// Retrieve a single listing.
    async fn get(&self, id: &ListingId) -> Result<Listing, ListingStoreError>;

    /// Delete a listing.
    async fn delete(&self, id: &ListingId) -> Result<(), ListingStoreError>;

    /// Listings in a category, newest first.
    async fn by_category(&self, category: Category) -> Result<Vec<Listing>, ListingStoreError>;

    /// Follow a category live, newest first.
    async fn subscribe_category(
        &self,
        category: Category,
    ) -> Result<ListingSubscription, ListingStoreError>;

    /// Every listing, newest first.
    async fn all(&self) -> Result<Vec<Listing>, ListingStoreError>;
}
