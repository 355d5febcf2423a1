//! Cart
//!
//! Client-side view of a user's cart: the lines from the latest snapshot, the
//! user's selection over them and the removals still waiting on the store.
//! Every transition takes `&mut self`, so lines, selection and the derived
//! subtotal can never be observed out of step with each other.

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::{
    lines::{CartLine, LineId},
    pricing::compute_subtotal,
    selection::SelectionState,
};

/// Errors from cart transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The line is not in the cart.
    #[error("line {0} is not in the cart")]
    LineNotFound(LineId),

    /// A removal of this line is already waiting on the store.
    #[error("line {0} is already being removed")]
    RemovalInFlight(LineId),

    /// Checkout is not available.
    #[error("checkout is blocked: {0}")]
    CheckoutBlocked(CheckoutBlock),
}

/// Shape of the cart, derived from lines and selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CartPhase {
    /// No lines.
    Empty,

    /// Some lines, not all of them selected.
    PartialSelection,

    /// Some lines, all selected.
    AllSelected,
}

/// Why checkout is unavailable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CheckoutBlock {
    /// The cart has no lines.
    #[error("the cart is empty")]
    EmptyCart,

    /// No line is selected.
    #[error("no items are selected")]
    NothingSelected,

    /// The selected lines add up to nothing.
    #[error("the subtotal is zero")]
    ZeroSubtotal,
}

/// Whether the checkout action is enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckoutGate {
    /// Checkout may proceed.
    Eligible {
        /// Subtotal of the selected lines.
        subtotal: Decimal,
    },

    /// Checkout is shown but disabled.
    Blocked(CheckoutBlock),
}

impl CheckoutGate {
    /// Whether checkout may proceed.
    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible { .. })
    }
}

/// Result of a store delete, fed back into the cart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The store deleted the line.
    Deleted,

    /// The store rejected the delete.
    Failed,
}

/// Handed to the payment flow when the user proceeds to checkout.
///
/// The payment flow does not consume the cart; the ids are informational.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutTicket {
    /// Subtotal of the selected lines at the time of checkout.
    pub subtotal: Decimal,

    /// Selected line ids, in cart order.
    pub lines: Vec<LineId>,
}

/// Figures shown under the cart list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CartSummary {
    /// Number of lines.
    pub line_count: usize,

    /// Number of selected lines.
    pub selected_count: usize,

    /// Sum of the selected prices.
    pub subtotal: Decimal,

    /// Shipping is free.
    pub shipping: Decimal,

    /// Subtotal plus shipping.
    pub total: Decimal,
}

/// Cart
#[derive(Clone, Debug, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
    selection: SelectionState,
    removing: FxHashSet<LineId>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cart from an initial snapshot.
    #[must_use]
    pub fn with_lines(lines: impl Into<Vec<CartLine>>) -> Self {
        let mut cart = Self::new();
        cart.on_snapshot_received(lines);
        cart
    }

    /// Replaces the known lines with a snapshot from the store.
    ///
    /// New lines start selected and selection entries for vanished lines are
    /// dropped. Applying the same snapshot twice changes nothing.
    pub fn on_snapshot_received(&mut self, lines: impl Into<Vec<CartLine>>) {
        let mut lines = lines.into();

        // Ids are unique per cart; keep the first (newest-first order) copy if a
        // snapshot repeats one.
        let mut seen = FxHashSet::default();
        lines.retain(|line| seen.insert(line.id.clone()));

        self.selection.reconcile(&lines);
        self.removing.retain(|id| seen.contains(id));
        self.lines = lines;
    }

    /// Flips the selection of a line, returning the new flag.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the line is not in the cart.
    pub fn toggle_select(&mut self, id: &LineId) -> Result<bool, CartError> {
        self.selection
            .toggle(id)
            .ok_or_else(|| CartError::LineNotFound(id.clone()))
    }

    /// Deselects everything if every line is selected, otherwise selects
    /// everything. Does nothing on an empty cart.
    pub fn toggle_select_all(&mut self) {
        if self.lines.is_empty() {
            return;
        }

        let select = !self.all_selected();
        self.selection.set_all(select);
    }

    /// Marks a line as being removed.
    ///
    /// # Errors
    ///
    /// - [`CartError::LineNotFound`]: the line is not in the cart.
    /// - [`CartError::RemovalInFlight`]: the line is already being removed.
    pub fn begin_removal(&mut self, id: &LineId) -> Result<(), CartError> {
        if self.get_line(id).is_none() {
            return Err(CartError::LineNotFound(id.clone()));
        }

        if !self.removing.insert(id.clone()) {
            return Err(CartError::RemovalInFlight(id.clone()));
        }

        Ok(())
    }

    /// Applies the store's answer to a removal started with
    /// [`Cart::begin_removal`].
    ///
    /// A deleted line leaves the cart straight away rather than waiting for
    /// the next snapshot. A failed delete leaves lines and selection as they
    /// were.
    pub fn complete_removal(&mut self, id: &LineId, outcome: RemovalOutcome) {
        self.removing.remove(id);

        if outcome == RemovalOutcome::Deleted {
            self.lines.retain(|line| &line.id != id);
            self.selection.remove(id);
        }
    }

    /// Whether a removal of the line is waiting on the store.
    pub fn is_removing(&self, id: &LineId) -> bool {
        self.removing.contains(id)
    }

    /// Subtotal of the selected lines.
    pub fn subtotal(&self) -> Decimal {
        compute_subtotal(&self.lines, &self.selection)
    }

    /// Current phase.
    pub fn phase(&self) -> CartPhase {
        if self.lines.is_empty() {
            CartPhase::Empty
        } else if self.all_selected() {
            CartPhase::AllSelected
        } else {
            CartPhase::PartialSelection
        }
    }

    /// Whether checkout is enabled, and if not, why.
    pub fn checkout_gate(&self) -> CheckoutGate {
        if self.lines.is_empty() {
            return CheckoutGate::Blocked(CheckoutBlock::EmptyCart);
        }

        if self.selected_count() == 0 {
            return CheckoutGate::Blocked(CheckoutBlock::NothingSelected);
        }

        let subtotal = self.subtotal();

        if subtotal > Decimal::ZERO {
            CheckoutGate::Eligible { subtotal }
        } else {
            CheckoutGate::Blocked(CheckoutBlock::ZeroSubtotal)
        }
    }

    /// Leaves the cart for the payment flow.
    ///
    /// The cart itself is untouched, so calling this again is fine.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CheckoutBlocked`] when the gate is closed.
    pub fn proceed_to_checkout(&self) -> Result<CheckoutTicket, CartError> {
        match self.checkout_gate() {
            CheckoutGate::Eligible { subtotal } => Ok(CheckoutTicket {
                subtotal,
                lines: self.selected_lines().map(|line| line.id.clone()).collect(),
            }),
            CheckoutGate::Blocked(block) => Err(CartError::CheckoutBlocked(block)),
        }
    }

    /// Figures for the summary rows.
    pub fn summary(&self) -> CartSummary {
        let subtotal = self.subtotal();

        CartSummary {
            line_count: self.len(),
            selected_count: self.selected_count(),
            subtotal,
            shipping: Decimal::ZERO,
            total: subtotal,
        }
    }

    /// Get a line by id.
    pub fn get_line(&self, id: &LineId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    /// Lines in snapshot order (newest first).
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Selected lines in snapshot order.
    pub fn selected_lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines
            .iter()
            .filter(|line| self.selection.is_selected(&line.id))
    }

    /// The selection over the current lines.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Whether a line is selected.
    pub fn is_selected(&self, id: &LineId) -> bool {
        self.selection.is_selected(id)
    }

    /// Number of selected lines.
    pub fn selected_count(&self) -> usize {
        self.selected_lines().count()
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn all_selected(&self) -> bool {
        self.lines
            .iter()
            .all(|line| self.selection.is_selected(&line.id))
    }
}
