//! In-memory item store.

use async_trait::async_trait;
use jiff::Timestamp;
use kindhope::listings::{Category, Listing, ListingId, NewListing, in_category};
use tokio::sync::watch;
use uuid::Uuid;

use crate::domain::listings::{
    errors::ListingStoreError,
    store::{ListingStore, ListingSubscription},
};

/// Item store backed by process memory. The listings sit in a watch channel
/// so category subscriptions see every create and delete.
#[derive(Debug, Clone)]
pub struct MemoryListingStore {
    listings: watch::Sender<Vec<Listing>>,
}

impl Default for MemoryListingStore {
    fn default() -> Self {
        Self {
            listings: watch::channel(Vec::new()).0,
        }
    }
}

impl MemoryListingStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListingStore for MemoryListingStore {
    async fn create(&self, listing: NewListing) -> Result<Listing, ListingStoreError> {
        let listing = Listing {
            id: ListingId::new(Uuid::now_v7().simple().to_string()),
            created_at: Timestamp::now(),
            details: listing,
        };

        self.listings
            .send_modify(|listings| listings.insert(0, listing.clone()));

        Ok(listing)
    }

    async fn get(&self, id: &ListingId) -> Result<Listing, ListingStoreError> {
        self.listings
            .borrow()
            .iter()
            .find(|listing| &listing.id == id)
            .cloned()
            .ok_or_else(|| ListingStoreError::NotFound(id.clone()))
    }

    async fn delete(&self, id: &ListingId) -> Result<(), ListingStoreError> {
        let removed = self.listings.send_if_modified(|listings| {
            let before = listings.len();
            listings.retain(|listing| &listing.id != id);
            listings.len() != before
        });

        if !removed {
            return Err(ListingStoreError::NotFound(id.clone()));
        }

        Ok(())
    }

    async fn by_category(&self, category: Category) -> Result<Vec<Listing>, ListingStoreError> {
        Ok(in_category(&self.listings.borrow(), category))
    }

    async fn subscribe_category(
        &self,
        category: Category,
    ) -> Result<ListingSubscription, ListingStoreError> {
        let changes = self.listings.subscribe();

        Ok(ListingSubscription::follow(
            changes,
            "listings",
            move |listings: &Vec<Listing>| in_category(listings, category),
        ))
    }

    async fn all(&self) -> Result<Vec<Listing>, ListingStoreError> {
        let mut all = self.listings.borrow().clone();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use kindhope::{lines::ImageUrls, listings::Condition};
    use testresult::TestResult;
    use tokio::time::timeout;

    use super::*;

    fn new_listing(description: &str, category: Category) -> NewListing {
        NewListing {
            name: None,
            description: description.to_string(),
            category,
            condition: Condition::New,
            price: "100".to_string(),
            contact_number: "0771234567".to_string(),
            email: "d@x.lk".to_string(),
            images: ImageUrls::new(),
            embedding: None,
        }
    }

    #[tokio::test]
    async fn create_then_get() -> TestResult {
        let store = MemoryListingStore::new();

        let created = store
            .create(new_listing("chair", Category::Furniture))
            .await?;

        assert_eq!(store.get(&created.id).await?, created);

        Ok(())
    }

    #[tokio::test]
    async fn by_category_filters_newest_first() -> TestResult {
        let store = MemoryListingStore::new();

        let first = store.create(new_listing("chair", Category::Furniture)).await?;
        store.create(new_listing("shirt", Category::Clothes)).await?;
        let second = store.create(new_listing("table", Category::Furniture)).await?;

        let found = store.by_category(Category::Furniture).await?;
        let ids: Vec<&ListingId> = found.iter().map(|listing| &listing.id).collect();

        assert_eq!(ids, vec![&second.id, &first.id]);

        Ok(())
    }

    #[tokio::test]
    async fn delete_unknown_is_not_found() -> TestResult {
        let store = MemoryListingStore::new();
        let created = store.create(new_listing("pen", Category::Stationary)).await?;

        store.delete(&created.id).await?;

        assert_eq!(
            store.get(&created.id).await,
            Err(ListingStoreError::NotFound(created.id.clone()))
        );
        assert_eq!(
            store.delete(&created.id).await,
            Err(ListingStoreError::NotFound(created.id))
        );

        Ok(())
    }

    const WAIT: Duration = Duration::from_secs(1);

    fn ids(listings: &[Listing]) -> Vec<&ListingId> {
        listings.iter().map(|listing| &listing.id).collect()
    }

    #[tokio::test]
    async fn category_subscription_follows_creates_and_deletes() -> TestResult {
        let store = MemoryListingStore::new();
        let chair = store.create(new_listing("chair", Category::Furniture)).await?;

        let mut subscription = store.subscribe_category(Category::Furniture).await?;
        let first = timeout(WAIT, subscription.next()).await?.unwrap_or_default();

        assert_eq!(ids(&first), vec![&chair.id]);

        let table = store.create(new_listing("table", Category::Furniture)).await?;
        let second = timeout(WAIT, subscription.next()).await?.unwrap_or_default();

        assert_eq!(ids(&second), vec![&table.id, &chair.id]);

        store.delete(&chair.id).await?;
        let third = timeout(WAIT, subscription.next()).await?.unwrap_or_default();

        assert_eq!(ids(&third), vec![&table.id]);

        Ok(())
    }

    #[tokio::test]
    async fn category_subscription_ignores_other_categories() -> TestResult {
        let store = MemoryListingStore::new();
        let mut subscription = store.subscribe_category(Category::Clothes).await?;

        assert_eq!(timeout(WAIT, subscription.next()).await?, Some(Vec::new()));

        store.create(new_listing("pen", Category::Stationary)).await?;

        assert_eq!(timeout(WAIT, subscription.next()).await?, Some(Vec::new()));

        subscription.stop();

        assert_eq!(subscription.next().await, None);

        Ok(())
    }
}
