//! Application configuration

pub mod embeddings;
pub mod observability;

pub use embeddings::EmbeddingsConfig;
pub use observability::{LogFormat, LoggingConfig};
