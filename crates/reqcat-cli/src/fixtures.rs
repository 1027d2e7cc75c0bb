//! A backend that serves JSON files from a directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;
use reqcat_core::{Backend, NetworkError};
use serde_json::{json, Value};
use tracing::debug;

/// A write the fixture backend accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct SentRequest {
    pub method: &'static str,
    pub endpoint: String,
    pub body: Value,
}

/// Reads `<root>/<endpoint>.json` for every GET and records writes.
///
/// Missing files answer 404 and unparsable files 502, so catalog loads
/// exercise the same failure paths as a live backend.
pub struct DirectoryBackend {
    root: PathBuf,
    sent: Mutex<Vec<SentRequest>>,
}

impl DirectoryBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes accepted so far, oldest first.
    pub fn sent(&self) -> Vec<SentRequest> {
        self.sent.lock().clone()
    }

    fn path_for(&self, endpoint: &str) -> PathBuf {
        self.root.join(format!("{}.json", endpoint.trim_matches('/')))
    }

    fn record(&self, method: &'static str, endpoint: &str, body: &Value) -> Value {
        self.sent.lock().push(SentRequest {
            method,
            endpoint: endpoint.to_string(),
            body: body.clone(),
        });
        json!({ "ok": true, "endpoint": endpoint })
    }
}

#[async_trait]
impl Backend for DirectoryBackend {
    async fn get(&self, endpoint: &str, _token: &str) -> Result<Value, NetworkError> {
        let path = self.path_for(endpoint);
        debug!(endpoint, path = %path.display(), "Reading fixture");

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(NetworkError::with_status(format!("{} not found", endpoint), 404));
            }
            Err(e) => return Err(NetworkError::new(format!("{}: {}", path.display(), e))),
        };

        serde_json::from_str(&content).map_err(|e| {
            NetworkError::with_status(format!("invalid JSON from {}: {}", endpoint, e), 502)
        })
    }

    async fn post(
        &self,
        endpoint: &str,
        body: &Value,
        _token: &str,
    ) -> Result<Value, NetworkError> {
        Ok(self.record("POST", endpoint, body))
    }

    async fn put(&self, endpoint: &str, body: &Value, _token: &str) -> Result<Value, NetworkError> {
        Ok(self.record("PUT", endpoint, body))
    }
}
