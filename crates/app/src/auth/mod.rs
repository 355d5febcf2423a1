//! Authentication
//!
//! Sign-in itself is handled by the hosted auth provider. Everything here
//! works with the identity it hands back, passed explicitly to each call.

mod errors;
mod models;

pub use errors::*;
pub use models::*;
