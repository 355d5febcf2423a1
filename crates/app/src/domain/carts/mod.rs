//! Carts

pub mod errors;
pub mod memory;
pub mod notices;
pub mod session;
pub mod store;

pub use errors::CartsServiceError;
pub use memory::MemoryCartStore;
pub use notices::{MockNotifier, Notice, Notifier, TracingNotifier};
pub use session::CartSession;
pub use store::{CartStore, CartStoreError, CartSubscription, MockCartStore};
