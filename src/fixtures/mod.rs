//! Fixtures
//!
//! YAML descriptions of a cart: the lines of one snapshot plus the ids the
//! user has deselected.

use std::{fs, path::Path};

use rustc_hash::FxHashSet;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    lines::{CartLine, LineId},
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A deselected id does not name a line
    #[error("Deselected line not found: {0}")]
    LineNotFound(LineId),

    /// Applying the selection failed
    #[error("Failed to apply selection: {0}")]
    Cart(#[from] CartError),
}

/// Cart fixture
#[derive(Debug, Clone, Deserialize)]
pub struct CartFixture {
    /// Lines of the snapshot, newest first.
    pub lines: Vec<CartLine>,

    /// Lines the user has deselected.
    #[serde(default)]
    pub deselected: Vec<LineId>,
}

impl CartFixture {
    /// Parse a fixture from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Yaml`] if the text is not a valid fixture.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Load a fixture file.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Ids from `deselected` that are still selected in `cart`, after checking
    /// that every deselected id names one of its lines.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::LineNotFound`] if a deselected id is not in the cart.
    pub fn pending_deselections<'a>(&'a self, cart: &Cart) -> Result<Vec<&'a LineId>, FixtureError> {
        if let Some(missing) = self.deselected.iter().find(|id| cart.get_line(id).is_none()) {
            return Err(FixtureError::LineNotFound(missing.clone()));
        }

        let mut seen = FxHashSet::default();

        Ok(self
            .deselected
            .iter()
            .filter(|id| cart.is_selected(id) && seen.insert(*id))
            .collect())
    }

    /// Applies the deselections to a cart that already holds the fixture's lines.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::LineNotFound`] if a deselected id is not in the cart.
    pub fn apply_selection(&self, cart: &mut Cart) -> Result<(), FixtureError> {
        for id in self.pending_deselections(cart)? {
            cart.toggle_select(id)?;
        }

        Ok(())
    }

    /// Build a cart holding the fixture's lines and selection.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::LineNotFound`] if a deselected id is not in the cart.
    pub fn cart(&self) -> Result<Cart, FixtureError> {
        let mut cart = Cart::with_lines(self.lines.clone());

        self.apply_selection(&mut cart)?;

        Ok(cart)
    }
}
