//! KindHope
//!
//! Cart, checkout and listing logic for the KindHope donation storefront.
//! Everything here is synchronous; the stores it talks to live in
//! `kindhope-app`.

pub mod cart;
pub mod fixtures;
pub mod forms;
pub mod lines;
pub mod listings;
pub mod prelude;
pub mod pricing;
pub mod profiles;
pub mod report;
pub mod selection;
