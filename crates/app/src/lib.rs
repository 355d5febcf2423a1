//! Shared application services and stores for the KindHope storefront.

pub mod auth;
pub mod config;
pub mod context;
pub mod domain;
pub mod embeddings;
pub mod observability;
pub mod storage;

mod uuids;
