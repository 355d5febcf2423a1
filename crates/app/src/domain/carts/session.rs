//! Cart session.
//!
//! Drives a [`Cart`] for one signed-in user: applies snapshots from the live
//! subscription, forwards removals and additions to the store and reports the
//! outcome through a [`Notifier`].

use std::sync::Arc;

use jiff::Timestamp;
use kindhope::{
    cart::{Cart, CartSummary, CheckoutTicket, RemovalOutcome},
    lines::{CartLine, LineId},
    listings::Listing,
    pricing::format_amount,
};
use tracing::{debug, info, warn};

use crate::{
    auth::{Identity, UserId},
    domain::carts::{
        errors::CartsServiceError,
        notices::{Notice, Notifier},
        store::{CartStore, CartSubscription},
    },
};

pub struct CartSession {
    identity: Identity,
    store: Arc<dyn CartStore>,
    notifier: Arc<dyn Notifier>,
    cart: Cart,
    subscription: Option<CartSubscription>,
}

impl CartSession {
    #[must_use]
    pub fn new(identity: Identity, store: Arc<dyn CartStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            identity,
            store,
            notifier,
            cart: Cart::new(),
            subscription: None,
        }
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Subscribes to the user's cart. Does nothing if already listening.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is anonymous or the store refuses the
    /// subscription.
    #[tracing::instrument(name = "cart.start", skip(self))]
    pub async fn start(&mut self) -> Result<(), CartsServiceError> {
        if self.is_listening() {
            return Ok(());
        }

        let user = self.identity.require_user()?;
        let subscription = self.store.subscribe(user).await?;

        info!(user = %user, "subscribed to cart");

        self.subscription = Some(subscription);

        Ok(())
    }

    /// Releases the subscription. Snapshots sent afterwards are never applied.
    pub fn stop(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.stop();
            debug!("cart subscription stopped");
        }
    }

    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(CartSubscription::is_active)
    }

    /// Waits for the next snapshot and applies it.
    ///
    /// Returns `false` once the store has closed the feed.
    ///
    /// # Errors
    ///
    /// Returns [`CartsServiceError::NotSubscribed`] if the session is not
    /// listening.
    pub async fn next_snapshot(&mut self) -> Result<bool, CartsServiceError> {
        let subscription = self
            .subscription
            .as_mut()
            .ok_or(CartsServiceError::NotSubscribed)?;

        if let Some(lines) = subscription.next().await {
            self.apply_snapshot(lines);
            Ok(true)
        } else {
            self.subscription = None;
            Ok(false)
        }
    }

    /// Applies a snapshot of the user's cart.
    pub fn apply_snapshot(&mut self, lines: Vec<CartLine>) {
        self.cart.on_snapshot_received(lines);

        debug!(
            lines = self.cart.len(),
            selected = self.cart.selected_count(),
            subtotal = %format_amount(self.cart.subtotal()),
            "applied cart snapshot"
        );
    }

    /// Flips the selection of a line.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is not in the cart.
    pub fn toggle_select(&mut self, id: &LineId) -> Result<bool, CartsServiceError> {
        Ok(self.cart.toggle_select(id)?)
    }

    pub fn toggle_select_all(&mut self) {
        self.cart.toggle_select_all();
    }

    /// Removes a line from the user's cart.
    ///
    /// On success the line leaves the local cart at once. On failure the cart
    /// is left as it was and a single [`Notice::RemoveFailed`] is raised.
    ///
    /// # Errors
    ///
    /// - [`CartsServiceError::Unauthenticated`]: no store call is made.
    /// - [`CartsServiceError::Cart`]: unknown line or removal already running.
    /// - [`CartsServiceError::Store`]: the store rejected the delete.
    #[tracing::instrument(name = "cart.remove", skip(self), fields(line = %id))]
    pub async fn remove(&mut self, id: &LineId) -> Result<(), CartsServiceError> {
        let user = self.signed_in_user()?;

        self.cart.begin_removal(id)?;

        match self.store.delete(&user, id).await {
            Ok(()) => {
                self.cart.complete_removal(id, RemovalOutcome::Deleted);
                info!("removed line from cart");
                self.notifier.notify(Notice::Removed(id.clone()));

                Ok(())
            }
            Err(error) => {
                self.cart.complete_removal(id, RemovalOutcome::Failed);
                warn!(error = %error, "failed to remove line from cart");
                self.notifier.notify(Notice::RemoveFailed(id.clone()));

                Err(error.into())
            }
        }
    }

    /// Adds a listing to the user's cart. Adding the same listing again
    /// overwrites the earlier line.
    ///
    /// # Errors
    ///
    /// - [`CartsServiceError::Unauthenticated`]: no store call is made.
    /// - [`CartsServiceError::Store`]: the store rejected the write.
    #[tracing::instrument(name = "cart.add_listing", skip(self, listing), fields(listing = %listing.id))]
    pub async fn add_listing(&self, listing: &Listing) -> Result<LineId, CartsServiceError> {
        let user = self.signed_in_user()?;
        let line = listing.to_cart_line(Timestamp::now());
        let id = line.id.clone();

        match self.store.upsert(&user, line).await {
            Ok(()) => {
                info!("added listing to cart");
                self.notifier.notify(Notice::Added(id.clone()));

                Ok(id)
            }
            Err(error) => {
                warn!(error = %error, "failed to add listing to cart");
                self.notifier.notify(Notice::AddFailed(id));

                Err(error.into())
            }
        }
    }

    /// Leaves the cart for the payment flow.
    ///
    /// # Errors
    ///
    /// Returns an error when checkout is blocked.
    pub fn proceed_to_checkout(&self) -> Result<CheckoutTicket, CartsServiceError> {
        let ticket = self.cart.proceed_to_checkout()?;

        info!(
            lines = ticket.lines.len(),
            subtotal = %format_amount(ticket.subtotal),
            "proceeding to checkout"
        );

        Ok(ticket)
    }

    #[must_use]
    pub fn summary(&self) -> CartSummary {
        self.cart.summary()
    }

    fn signed_in_user(&self) -> Result<UserId, CartsServiceError> {
        match self.identity.require_user() {
            Ok(user) => Ok(user.clone()),
            Err(error) => {
                self.notifier.notify(Notice::SignInRequired);

                Err(error.into())
            }
        }
    }
}

impl Drop for CartSession {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use kindhope::{
        cart::{CartError, CartPhase, CheckoutBlock},
        listings::{Category, Condition, ListingId, NewListing},
    };
    use rust_decimal::Decimal;
    use testresult::TestResult;
    use tokio::{
        sync::{mpsc, oneshot},
        time::timeout,
    };

    use crate::domain::carts::{
        memory::MemoryCartStore,
        notices::MockNotifier,
        store::{CartStoreError, MockCartStore},
    };

    use super::*;

    const WAIT: Duration = Duration::from_secs(1);

    fn user() -> Identity {
        Identity::User(UserId::from("uid-1"))
    }

    fn line(id: &str, price: &str) -> CartLine {
        CartLine::new(id, price, Timestamp::UNIX_EPOCH)
    }

    fn session(store: MockCartStore, notifier: MockNotifier, identity: Identity) -> CartSession {
        CartSession::new(identity, Arc::new(store), Arc::new(notifier))
    }

    fn listing(id: &str, price: &str) -> Listing {
        Listing {
            id: ListingId::from(id),
            created_at: Timestamp::UNIX_EPOCH,
            details: NewListing {
                name: Some(format!("Item {id}")),
                description: "donated".to_string(),
                category: Category::Other,
                condition: Condition::New,
                price: price.to_string(),
                contact_number: "0771234567".to_string(),
                email: "d@x.lk".to_string(),
                images: Default::default(),
                embedding: None,
            },
        }
    }

    #[tokio::test]
    async fn failed_remove_leaves_cart_unchanged_and_notifies_once() -> TestResult {
        let mut store = MockCartStore::new();
        let mut notifier = MockNotifier::new();

        store
            .expect_delete()
            .once()
            .withf(|user, line| user.as_str() == "uid-1" && line.as_str() == "a")
            .returning(|_, _| Err(CartStoreError::Transport("offline".to_string())));

        notifier
            .expect_notify()
            .once()
            .withf(|notice| *notice == Notice::RemoveFailed("a".into()))
            .return_const(());

        let mut session = session(store, notifier, user());
        session.apply_snapshot(vec![line("a", "$10.00"), line("b", "$5.00")]);
        let before = session.cart().clone();

        let result = session.remove(&"a".into()).await;

        assert_eq!(
            result,
            Err(CartsServiceError::Store(CartStoreError::Transport(
                "offline".to_string()
            )))
        );
        assert_eq!(session.cart().lines(), before.lines());
        assert_eq!(session.cart().selection(), before.selection());
        assert!(!session.cart().is_removing(&"a".into()));

        Ok(())
    }

    #[tokio::test]
    async fn session_stays_usable_after_failed_remove() -> TestResult {
        let mut store = MockCartStore::new();
        let mut notifier = MockNotifier::new();
        let mut attempts = 0;

        store.expect_delete().times(2).returning(move |_, _| {
            attempts += 1;

            if attempts == 1 {
                Err(CartStoreError::PermissionDenied)
            } else {
                Ok(())
            }
        });

        notifier.expect_notify().times(2).return_const(());

        let mut session = session(store, notifier, user());
        session.apply_snapshot(vec![line("a", "$10.00")]);

        assert!(session.remove(&"a".into()).await.is_err());
        session.remove(&"a".into()).await?;

        assert_eq!(session.cart().phase(), CartPhase::Empty);

        Ok(())
    }

    #[tokio::test]
    async fn successful_remove_updates_cart_before_next_snapshot() -> TestResult {
        let mut store = MockCartStore::new();
        let mut notifier = MockNotifier::new();

        store.expect_delete().once().returning(|_, _| Ok(()));
        notifier
            .expect_notify()
            .once()
            .withf(|notice| *notice == Notice::Removed("b".into()))
            .return_const(());

        let mut session = session(store, notifier, user());
        session.apply_snapshot(vec![line("a", "$10.00"), line("b", "$5.00")]);
        session.toggle_select(&"a".into())?;

        session.remove(&"b".into()).await?;

        assert_eq!(session.cart().subtotal(), Decimal::ZERO);
        assert_eq!(session.cart().len(), 1);
        assert!(!session.cart().selection().contains(&"b".into()));

        Ok(())
    }

    #[tokio::test]
    async fn anonymous_remove_never_reaches_store() {
        let mut store = MockCartStore::new();
        let mut notifier = MockNotifier::new();

        store.expect_delete().never();
        notifier
            .expect_notify()
            .once()
            .withf(|notice| *notice == Notice::SignInRequired)
            .return_const(());

        let mut session = session(store, notifier, Identity::Anonymous);
        session.apply_snapshot(vec![line("a", "$1")]);

        let result = session.remove(&"a".into()).await;

        assert_eq!(result, Err(CartsServiceError::Unauthenticated));
        assert_eq!(session.cart().len(), 1);
    }

    #[tokio::test]
    async fn removing_unknown_line_is_an_error_without_store_call() {
        let mut store = MockCartStore::new();
        let mut notifier = MockNotifier::new();

        store.expect_delete().never();
        notifier.expect_notify().never();

        let mut session = session(store, notifier, user());

        let result = session.remove(&"ghost".into()).await;

        assert_eq!(
            result,
            Err(CartsServiceError::Cart(CartError::LineNotFound(
                "ghost".into()
            )))
        );
    }

    #[tokio::test]
    async fn anonymous_start_never_subscribes() {
        let mut store = MockCartStore::new();
        store.expect_subscribe().never();

        let mut session = session(store, MockNotifier::new(), Identity::Anonymous);

        assert_eq!(
            session.start().await,
            Err(CartsServiceError::Unauthenticated)
        );
        assert!(!session.is_listening());
    }

    #[tokio::test]
    async fn start_twice_keeps_one_subscription() -> TestResult {
        let mut store = MockCartStore::new();
        let (tx, rx) = mpsc::channel(4);
        let (stop_tx, stop_rx) = oneshot::channel();

        store
            .expect_subscribe()
            .once()
            .return_once(move |_| Ok(CartSubscription::new(rx, stop_tx)));

        let mut session = session(store, MockNotifier::new(), user());

        session.start().await?;
        session.start().await?;

        tx.send(vec![line("a", "$2"), line("b", "$3")]).await?;
        assert!(session.next_snapshot().await?);
        assert_eq!(session.cart().subtotal(), Decimal::new(5, 0));

        session.stop();

        assert!(stop_rx.await.is_ok());
        assert!(!session.is_listening());
        assert_eq!(
            session.next_snapshot().await,
            Err(CartsServiceError::NotSubscribed)
        );

        Ok(())
    }

    #[tokio::test]
    async fn closed_feed_ends_the_subscription() -> TestResult {
        let mut store = MockCartStore::new();
        let (tx, rx) = mpsc::channel(1);
        let (stop_tx, _stop_rx) = oneshot::channel();

        store
            .expect_subscribe()
            .once()
            .return_once(move |_| Ok(CartSubscription::new(rx, stop_tx)));

        let mut session = session(store, MockNotifier::new(), user());
        session.start().await?;

        drop(tx);

        assert!(!session.next_snapshot().await?);
        assert_eq!(
            session.next_snapshot().await,
            Err(CartsServiceError::NotSubscribed)
        );

        Ok(())
    }

    #[tokio::test]
    async fn checkout_is_blocked_until_something_priced_is_selected() -> TestResult {
        let mut session = session(MockCartStore::new(), MockNotifier::new(), user());

        assert_eq!(
            session.proceed_to_checkout(),
            Err(CartsServiceError::Cart(CartError::CheckoutBlocked(
                CheckoutBlock::EmptyCart
            )))
        );

        session.apply_snapshot(vec![line("a", "N/A"), line("b", "$5")]);
        session.toggle_select_all();

        assert_eq!(
            session.proceed_to_checkout(),
            Err(CartsServiceError::Cart(CartError::CheckoutBlocked(
                CheckoutBlock::NothingSelected
            )))
        );

        session.toggle_select(&"b".into())?;

        assert_eq!(session.proceed_to_checkout()?.subtotal, Decimal::new(5, 0));

        Ok(())
    }

    #[tokio::test]
    async fn end_to_end_with_memory_store() -> TestResult {
        let store = Arc::new(MemoryCartStore::new());
        let mut notifier = MockNotifier::new();

        notifier.expect_notify().times(3).return_const(());

        let mut session = CartSession::new(user(), store.clone(), Arc::new(notifier));
        session.start().await?;

        timeout(WAIT, session.next_snapshot()).await??;
        assert_eq!(session.cart().phase(), CartPhase::Empty);

        session.add_listing(&listing("a", "$10.00")).await?;
        timeout(WAIT, session.next_snapshot()).await??;

        session.add_listing(&listing("b", "$5.00")).await?;
        timeout(WAIT, session.next_snapshot()).await??;

        assert_eq!(session.cart().subtotal(), Decimal::new(1500, 2));

        session.toggle_select(&"a".into())?;
        session.remove(&"b".into()).await?;

        assert_eq!(session.cart().subtotal(), Decimal::ZERO);

        timeout(WAIT, session.next_snapshot()).await??;

        assert_eq!(session.cart().len(), 1);
        assert!(!session.cart().is_selected(&"a".into()));

        Ok(())
    }

    #[tokio::test]
    async fn adding_same_listing_twice_keeps_one_line() -> TestResult {
        let store = Arc::new(MemoryCartStore::new());
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(2).return_const(());

        let session = CartSession::new(user(), store.clone(), Arc::new(notifier));

        session.add_listing(&listing("a", "$1")).await?;
        session.add_listing(&listing("a", "$1")).await?;

        assert_eq!(store.lines(&UserId::from("uid-1")).len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn failed_add_notifies() {
        let mut store = MockCartStore::new();
        let mut notifier = MockNotifier::new();

        store
            .expect_upsert()
            .once()
            .returning(|_, _| Err(CartStoreError::PermissionDenied));
        notifier
            .expect_notify()
            .once()
            .withf(|notice| *notice == Notice::AddFailed("a".into()))
            .return_const(());

        let session = session(store, notifier, user());

        assert_eq!(
            session.add_listing(&listing("a", "$1")).await,
            Err(CartsServiceError::Store(CartStoreError::PermissionDenied))
        );
    }
}
