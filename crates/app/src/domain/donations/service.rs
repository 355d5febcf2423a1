//! Donation service.

use std::sync::Arc;

use jiff::Timestamp;
use kindhope::{
    forms::{DonationForm, embedding_text},
    listings::Listing,
};
use tracing::{Span, info, warn};

use crate::{
    domain::{donations::errors::DonationServiceError, listings::ListingStore},
    embeddings::EmbeddingClient,
    storage::{ObjectStorage, file_name},
};

const IMAGE_PREFIX: &str = "donationImages";

pub struct DonationService {
    listings: Arc<dyn ListingStore>,
    embeddings: Arc<dyn EmbeddingClient>,
    storage: Arc<dyn ObjectStorage>,
}

impl DonationService {
    #[must_use]
    pub fn new(
        listings: Arc<dyn ListingStore>,
        embeddings: Arc<dyn EmbeddingClient>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self {
            listings,
            embeddings,
            storage,
        }
    }

    /// Upload a donation photo and return its download URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload fails.
    #[tracing::instrument(name = "donations.upload_image", skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload_image(
        &self,
        source_uri: &str,
        bytes: Vec<u8>,
    ) -> Result<String, DonationServiceError> {
        let path = format!(
            "{IMAGE_PREFIX}/{}-{}",
            Timestamp::now().as_millisecond(),
            file_name(source_uri)
        );

        Ok(self.storage.put(&path, bytes).await?)
    }

    /// Validate a donation, embed its text and store it as a listing.
    ///
    /// A failed embedding does not block the donation; the listing is stored
    /// without a vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the form is invalid or the item store rejects it.
    #[tracing::instrument(
        name = "donations.donate",
        skip(self, form),
        fields(
            category = %form.category,
            listing_id = tracing::field::Empty,
            embedded = tracing::field::Empty
        )
    )]
    pub async fn donate(&self, form: &DonationForm) -> Result<Listing, DonationServiceError> {
        let mut listing = form.validate()?;
        let span = Span::current();

        match self.embeddings.embed(&embedding_text(&listing)).await {
            Ok(vector) => listing.embedding = Some(vector),
            Err(error) => warn!(error = %error, "failed to generate embedding"),
        }

        span.record("embedded", listing.embedding.is_some());

        let created = self.listings.create(listing).await?;

        span.record("listing_id", tracing::field::display(&created.id));
        info!(listing_id = %created.id, "created listing");

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use kindhope::{forms::DonationError, listings::Category};
    use testresult::TestResult;

    use crate::{
        domain::listings::{MemoryListingStore, MockListingStore},
        embeddings::{EmbeddingError, MockEmbeddingClient},
        storage::{MemoryObjectStorage, MockObjectStorage},
    };

    use super::*;

    fn form() -> DonationForm {
        DonationForm {
            name: Some("Desk".to_string()),
            description: "Small desk".to_string(),
            category: "Furniture".to_string(),
            condition: "New".to_string(),
            price: "3,000".to_string(),
            contact_number: "0771234567".to_string(),
            email: "d@x.lk".to_string(),
            images: [
                Some("memory://donationImages/1".to_string()),
                Some("memory://donationImages/2".to_string()),
            ],
        }
    }

    #[tokio::test]
    async fn donation_is_stored_with_embedding() -> TestResult {
        let listings = Arc::new(MemoryListingStore::new());
        let mut embeddings = MockEmbeddingClient::new();

        embeddings
            .expect_embed()
            .once()
            .withf(|text| text == "Small desk Furniture New")
            .returning(|_| Ok(vec![0.1, 0.2]));

        let service = DonationService::new(
            listings.clone(),
            Arc::new(embeddings),
            Arc::new(MemoryObjectStorage::new()),
        );

        let listing = service.donate(&form()).await?;

        assert_eq!(listing.details.embedding, Some(vec![0.1, 0.2]));
        assert_eq!(listings.by_category(Category::Furniture).await?, vec![listing]);

        Ok(())
    }

    #[tokio::test]
    async fn embedding_failure_still_stores_listing() -> TestResult {
        let mut embeddings = MockEmbeddingClient::new();

        embeddings
            .expect_embed()
            .once()
            .returning(|_| Err(EmbeddingError::EmptyResponse));

        let service = DonationService::new(
            Arc::new(MemoryListingStore::new()),
            Arc::new(embeddings),
            Arc::new(MemoryObjectStorage::new()),
        );

        let listing = service.donate(&form()).await?;

        assert!(listing.details.embedding.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_stores() {
        let mut listings = MockListingStore::new();
        let mut embeddings = MockEmbeddingClient::new();

        listings.expect_create().never();
        embeddings.expect_embed().never();

        let service = DonationService::new(
            Arc::new(listings),
            Arc::new(embeddings),
            Arc::new(MockObjectStorage::new()),
        );

        let mut form = form();
        form.images[0] = None;

        assert!(matches!(
            service.donate(&form).await,
            Err(DonationServiceError::Invalid(DonationError::MissingFields))
        ));
    }

    #[tokio::test]
    async fn images_are_uploaded_under_donation_prefix() -> TestResult {
        let mut storage = MockObjectStorage::new();

        storage
            .expect_put()
            .once()
            .withf(|path, bytes| {
                path.starts_with("donationImages/") && path.ends_with("-photo.jpg") && *bytes == [7]
            })
            .returning(|path, _| Ok(format!("memory://{path}")));

        let service = DonationService::new(
            Arc::new(MockListingStore::new()),
            Arc::new(MockEmbeddingClient::new()),
            Arc::new(storage),
        );

        let url = service
            .upload_image("file:///cache/photo.jpg", vec![7])
            .await?;

        assert!(url.starts_with("memory://donationImages/"));

        Ok(())
    }
}
