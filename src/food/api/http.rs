use async_trait::async_trait;
use log::debug;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, Response};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use url::Url;

use super::traits::Gateway;
use crate::config::ScannerConfig;
use crate::error::TransportError;
use crate::food::models::UploadedImage;

#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(config: &ScannerConfig) -> Result<Self, TransportError> {
        Url::parse(&config.api_url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // Plain concatenation keeps any path prefix on the base URL.
    fn url(&self, path: &str) -> Result<Url, TransportError> {
        Ok(Url::parse(&format!("{}{}", self.base_url, path))?)
    }

    async fn read_json(response: Response) -> Result<Value, TransportError> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, TransportError> {
        let url = self.url(path)?;
        debug!("{} {}", method, url);

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        Self::read_json(response).await
    }

    async fn upload(&self, path: &str, image: &UploadedImage) -> Result<Value, TransportError> {
        let url = self.url(path)?;
        debug!("POST {} (multipart, {})", url, image.file_name);

        let bytes = tokio::fs::read(&image.path)
            .await
            .map_err(|source| TransportError::File {
                path: image.path.clone(),
                source,
            })?;

        let part = Part::bytes(bytes)
            .file_name(image.file_name.clone())
            .mime_str(mime_for(&image.path))?;
        let form = Form::new().part("file", part);

        let response = self.client.post(url).multipart(form).send().await?;
        Self::read_json(response).await
    }
}

fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("tif") | Some("tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}
