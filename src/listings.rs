//! Listings
//!
//! Donated items offered in the shop.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lines::{CartLine, ImageUrls, LineId};

/// Errors parsing category or condition labels.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LabelError {
    /// Not one of the shop's categories.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// Not one of the accepted conditions.
    #[error("unknown condition: {0}")]
    UnknownCondition(String),
}

/// Identifier of a listing in the item store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(String);

impl ListingId {
    /// Creates a listing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ListingId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for ListingId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Shop category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Clothes
    Clothes,

    /// Stationery. The stored label keeps the shop's historical spelling.
    #[serde(rename = "Stationary")]
    Stationary,

    /// Furniture
    Furniture,

    /// Anything else
    Other,
}

impl Category {
    /// Every category, in the order the donation form lists them.
    pub const ALL: [Self; 4] = [Self::Clothes, Self::Stationary, Self::Furniture, Self::Other];

    /// Stored label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Clothes => "Clothes",
            Self::Stationary => "Stationary",
            Self::Furniture => "Furniture",
            Self::Other => "Other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LabelError::UnknownCategory(s.to_string()))
    }
}

/// Item condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    /// New
    #[serde(rename = "New")]
    New,

    /// Used - Like New
    #[serde(rename = "Used - Like New")]
    LikeNew,

    /// Used - Acceptable
    #[serde(rename = "Used - Acceptable")]
    Acceptable,
}

impl Condition {
    /// Every condition, in form order.
    pub const ALL: [Self; 3] = [Self::New, Self::LikeNew, Self::Acceptable];

    /// Stored label.
    pub fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::LikeNew => "Used - Like New",
            Self::Acceptable => "Used - Acceptable",
        }
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.label())
    }
}

impl FromStr for Condition {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|condition| condition.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LabelError::UnknownCondition(s.to_string()))
    }
}

/// A listing ready to be stored. The store assigns id and creation time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewListing {
    /// Optional display name.
    pub name: Option<String>,

    /// Free-text description.
    pub description: String,

    /// Shop category.
    pub category: Category,

    /// Condition.
    pub condition: Condition,

    /// Price as entered.
    pub price: String,

    /// Donor phone number.
    pub contact_number: String,

    /// Donor email.
    pub email: String,

    /// Uploaded image URLs.
    pub images: ImageUrls,

    /// Text embedding, when one could be generated.
    pub embedding: Option<Vec<f32>>,
}

/// A stored listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Store identifier.
    pub id: ListingId,

    /// Creation time assigned by the store.
    pub created_at: Timestamp,

    /// Listing details.
    #[serde(flatten)]
    pub details: NewListing,
}

impl Listing {
    /// Name shown in lists, falling back to the category.
    pub fn display_name(&self) -> &str {
        self.details
            .name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| self.details.category.label())
    }

    /// Whether the name or description contains `term`, ignoring case.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();

        self.details
            .name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(&term))
            || self.details.description.to_lowercase().contains(&term)
    }

    /// Builds the cart line for this listing. The line reuses the listing id,
    /// so adding the same listing twice overwrites the earlier line.
    pub fn to_cart_line(&self, added_at: Timestamp) -> CartLine {
        CartLine {
            id: LineId::new(self.id.as_str()),
            name: self.display_name().to_string(),
            description: self.details.description.clone(),
            price: self.details.price.clone(),
            condition: self.details.condition.label().to_string(),
            images: self.details.images.clone(),
            added_at,
        }
    }
}

/// Filters listings by a search term. A blank term matches everything.
pub fn search<'a>(listings: &'a [Listing], term: &str) -> Vec<&'a Listing> {
    let term = term.trim();

    if term.is_empty() {
        return listings.iter().collect();
    }

    listings
        .iter()
        .filter(|listing| listing.matches(term))
        .collect()
}

/// Listings in one category, newest first.
pub fn in_category(listings: &[Listing], category: Category) -> Vec<Listing> {
    let mut found: Vec<Listing> = listings
        .iter()
        .filter(|listing| listing.details.category == category)
        .cloned()
        .collect();

    found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    found
}
