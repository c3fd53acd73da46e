use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::error::TransportError;
use crate::food::models::UploadedImage;

/// Transport to the food backend. One attempt per call, no caching.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Issues a JSON request against `path` (relative to the backend base URL,
    /// query string included) and returns the parsed body.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, TransportError>;

    /// Posts the image as the multipart form field `file`.
    async fn upload(&self, path: &str, image: &UploadedImage) -> Result<Value, TransportError>;
}
