//! In-memory cart store.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use jiff::Timestamp;
use kindhope::lines::{CartLine, LineId};
use rustc_hash::FxHashMap;
use tokio::sync::watch;

use crate::{
    auth::UserId,
    domain::carts::store::{CartStore, CartStoreError, CartSubscription},
};

/// Cart store backed by process memory. Each user's cart is a watch channel
/// holding the current snapshot; subscribers get a fresh snapshot on every
/// change.
#[derive(Debug, Clone, Default)]
pub struct MemoryCartStore {
    carts: Arc<Mutex<FxHashMap<UserId, watch::Sender<Vec<CartLine>>>>>,
}

impl MemoryCartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn cart(&self, user: &UserId) -> watch::Sender<Vec<CartLine>> {
        let mut carts = self.carts.lock().unwrap_or_else(PoisonError::into_inner);

        carts
            .entry(user.clone())
            .or_insert_with(|| watch::channel(Vec::new()).0)
            .clone()
    }

    /// Current lines of a user's cart, newest first.
    #[must_use]
    pub fn lines(&self, user: &UserId) -> Vec<CartLine> {
        self.cart(user).borrow().clone()
    }

    /// Replace a user's cart wholesale, keeping the given order and times.
    pub fn seed(&self, user: &UserId, lines: Vec<CartLine>) {
        self.cart(user).send_replace(lines);
    }
}

#[async_trait]
impl CartStore for MemoryCartStore {
    async fn subscribe(&self, user: &UserId) -> Result<CartSubscription, CartStoreError> {
        let changes = self.cart(user).subscribe();

        Ok(CartSubscription::follow(changes, "cart", Vec::clone))
    }

    async fn delete(&self, user: &UserId, line: &LineId) -> Result<(), CartStoreError> {
        self.cart(user)
            .send_modify(|lines| lines.retain(|existing| &existing.id != line));

        Ok(())
    }

    async fn upsert(&self, user: &UserId, mut line: CartLine) -> Result<(), CartStoreError> {
        line.added_at = Timestamp::now();

        self.cart(user).send_modify(|lines| {
            lines.retain(|existing| existing.id != line.id);
            lines.insert(0, line);
            lines.sort_by(|a, b| b.added_at.cmp(&a.added_at));
        });

        Ok(())
    }
}
