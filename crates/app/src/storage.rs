//! Object storage for donation photos and payment slips.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("invalid object path: {0:?}")]
    InvalidPath(String),

    #[error("upload failed: {0}")]
    Upload(String),
}

#[automock]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload an object and return its download URL.
    async fn put(&self, path: &str, bytes: Vec<u8>) -> Result<String, StorageError>;
}

/// Last path segment of a local file URI, e.g. `file:///a/b/slip.jpg` → `slip.jpg`.
#[must_use]
pub fn file_name(uri: &str) -> &str {
    uri.rsplit('/').next().unwrap_or(uri)
}

#[derive(Debug, Clone, Default)]
pub struct MemoryObjectStorage {
    objects: Arc<Mutex<FxHashMap<String, Vec<u8>>>>,
}

impl MemoryObjectStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }
}

#[async_trait]
impl ObjectStorage for MemoryObjectStorage {
    async fn put(&self, path: &str, bytes: Vec<u8>) -> Result<String, StorageError> {
        let path = path.trim_start_matches('/');

        if path.is_empty() || path.ends_with('/') {
            return Err(StorageError::InvalidPath(path.to_string()));
        }

        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_string(), bytes);

        Ok(format!("memory://{path}"))
    }
}
