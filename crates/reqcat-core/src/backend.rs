//! The persistence collaborator.
//!
//! Transport, authentication storage, and retries live behind this trait.
//! The core only distinguishes success from [`NetworkError`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::NetworkError;

/// Backend access used for catalog loads, relation loads, and submissions.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Fetch a JSON document.
    async fn get(&self, endpoint: &str, token: &str) -> Result<Value, NetworkError>;

    /// Create a resource.
    async fn post(&self, endpoint: &str, body: &Value, token: &str) -> Result<Value, NetworkError>;

    /// Replace a resource.
    async fn put(&self, endpoint: &str, body: &Value, token: &str) -> Result<Value, NetworkError>;
}

#[async_trait]
impl<B: Backend + ?Sized> Backend for Arc<B> {
    async fn get(&self, endpoint: &str, token: &str) -> Result<Value, NetworkError> {
        (**self).get(endpoint, token).await
    }

    async fn post(&self, endpoint: &str, body: &Value, token: &str) -> Result<Value, NetworkError> {
        (**self).post(endpoint, body, token).await
    }

    async fn put(&self, endpoint: &str, body: &Value, token: &str) -> Result<Value, NetworkError> {
        (**self).put(endpoint, body, token).await
    }
}
