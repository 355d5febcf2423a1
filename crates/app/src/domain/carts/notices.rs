//! User-facing notices raised by cart operations.

use std::fmt::{Display, Formatter, Result as FmtResult};

use kindhope::lines::LineId;
use mockall::automock;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Added(LineId),
    AddFailed(LineId),
    Removed(LineId),
    RemoveFailed(LineId),
    SignInRequired,
}

impl Notice {
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::AddFailed(_) | Self::RemoveFailed(_) | Self::SignInRequired
        )
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Added(_) => f.write_str("Item added to cart."),
            Self::AddFailed(_) => f.write_str("Failed to add item to cart."),
            Self::Removed(_) => f.write_str("Item removed from cart."),
            Self::RemoveFailed(_) => f.write_str("Failed to delete item."),
            Self::SignInRequired => f.write_str("You must be logged in to change your cart."),
        }
    }
}

/// Shows notices to the user.
#[automock]
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Notifier that writes notices to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        if notice.is_error() {
            warn!(notice = ?notice, "{notice}");
        } else {
            info!(notice = ?notice, "{notice}");
        }
    }
}
