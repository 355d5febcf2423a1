//! Cart Lines

use std::{
    borrow::Borrow,
    fmt::{Display, Formatter, Result as FmtResult},
};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Image URLs attached to a line or listing. Donations carry two.
pub type ImageUrls = SmallVec<[String; 2]>;

/// Identifier of a line within one user's cart.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(String);

impl LineId {
    /// Creates a line identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for LineId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for LineId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LineId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LineId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One donated item held in a user's cart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Line identifier, unique within the cart.
    pub id: LineId,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Free-text description.
    #[serde(default)]
    pub description: String,

    /// Price as entered by the donor. Not guaranteed to be numeric.
    #[serde(default)]
    pub price: String,

    /// Condition label, e.g. "Used - Like New".
    #[serde(default)]
    pub condition: String,

    /// Ordered image URLs.
    #[serde(default)]
    pub images: ImageUrls,

    /// Time the line was added, assigned by the store.
    pub added_at: Timestamp,
}

impl CartLine {
    /// Creates a line with the given id, price and add time and no other details.
    pub fn new(id: impl Into<LineId>, price: impl Into<String>, added_at: Timestamp) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            description: String::new(),
            price: price.into(),
            condition: String::new(),
            images: ImageUrls::new(),
            added_at,
        }
    }

    /// Returns the first image, used as the line's thumbnail.
    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
