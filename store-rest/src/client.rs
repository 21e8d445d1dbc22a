//! HTTP implementation of [`ImageStore`] against the shop backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use store_traits::{ImageId, ImageRecord, ImageStore, NewImage, ProductId, StoreError};

use crate::error::{RestStoreError, Result};
use crate::types::{DeleteResponseDto, ImageDto};

/// Configuration for [`RestImageStore`]
#[derive(Debug, Clone)]
pub struct RestStoreConfig {
    /// API root, e.g. `https://shop.example.com/api`
    pub base_url: String,
    /// Per-request timeout enforced by the HTTP client
    pub request_timeout_secs: u64,
    /// Attempts per request before giving up on 429/5xx or transport errors
    pub max_retries: u32,
}

impl RestStoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            request_timeout_secs: 30,
            max_retries: 3,
        }
    }
}

/// [`ImageStore`] backed by the backend's REST image endpoints
pub struct RestImageStore {
    client: reqwest::Client,
    config: RestStoreConfig,
}

impl RestImageStore {
    pub fn new(config: RestStoreConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .build()
            .expect("Failed to build HTTP client");

        Self { client, config }
    }

    fn image_url(&self, id: ImageId) -> String {
        format!("{}/producto-imagenes/{}", self.config.base_url, id)
    }

    fn product_images_url(&self, product_id: ProductId) -> String {
        format!(
            "{}/producto-imagenes/producto/{}",
            self.config.base_url, product_id
        )
    }

    /// Send a request, retrying on 429/5xx and transport errors
    ///
    /// `make_request` is re-invoked per attempt because multipart bodies are
    /// not cloneable; every attempt rebuilds the request from scratch.
    async fn execute_with_retry<F>(&self, make_request: F) -> Result<reqwest::Response>
    where
        F: Fn() -> Result<reqwest::RequestBuilder>,
    {
        let mut attempt = 0u32;
        loop {
            match make_request()?.send().await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    if status != 429 && !(500..600).contains(&status) {
                        return Ok(response);
                    }
                    attempt += 1;
                    if attempt >= self.config.max_retries {
                        return Err(RestStoreError::Api {
                            status_code: status,
                            message: format!("request failed after {attempt} attempts"),
                        });
                    }
                    let backoff_ms = 100u64 * 2u64.pow(attempt);
                    warn!(status, attempt, backoff_ms, "retryable status, backing off");
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                }
                Err(err) => {
                    attempt += 1;
                    if attempt >= self.config.max_retries {
                        return Err(RestStoreError::Network(err.to_string()));
                    }
                    let backoff_ms = 100u64 * 2u64.pow(attempt);
                    warn!(error = %err, attempt, backoff_ms, "transport error, backing off");
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                }
            }
        }
    }

    /// Read a 2xx JSON body, mapping 404 to `NotFound` when an id is known
    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
        not_found_id: Option<i64>,
    ) -> Result<T> {
        let status = response.status().as_u16();
        if status == 404 {
            if let Some(image_id) = not_found_id {
                return Err(RestStoreError::NotFound { image_id });
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RestStoreError::Network(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(RestStoreError::Api {
                status_code: status,
                message: String::from_utf8_lossy(&body).to_string(),
            });
        }

        serde_json::from_slice(&body).map_err(|e| RestStoreError::Parse(e.to_string()))
    }
}

fn build_upload_form(image: &NewImage) -> Result<multipart::Form> {
    let part = multipart::Part::bytes(image.bytes.to_vec())
        .file_name(image.file_name.clone())
        .mime_str(&image.content_type)
        .map_err(|e| {
            RestStoreError::InvalidUpload(format!(
                "content type {:?} is not a valid MIME type: {e}",
                image.content_type
            ))
        })?;

    Ok(multipart::Form::new().part("file", part))
}

#[async_trait]
impl ImageStore for RestImageStore {
    #[instrument(skip(self, image), fields(product_id = %product_id, file = %image.file_name))]
    async fn create_image(
        &self,
        product_id: ProductId,
        image: NewImage,
    ) -> store_traits::Result<ImageRecord> {
        let url = self.product_images_url(product_id);
        debug!(size = image.bytes.len(), "uploading image");

        let response = self
            .execute_with_retry(|| {
                let form = build_upload_form(&image)?;
                Ok(self.client.post(&url).multipart(form))
            })
            .await
            .map_err(StoreError::from)?;

        let dto: ImageDto = Self::read_json(response, None)
            .await
            .map_err(StoreError::from)?;

        info!(image_id = dto.id, position = dto.orden, "image uploaded");
        Ok(dto.into_record())
    }

    #[instrument(skip(self), fields(image_id = %id))]
    async fn delete_image(&self, id: ImageId) -> store_traits::Result<()> {
        let url = self.image_url(id);

        let response = self
            .execute_with_retry(|| Ok(self.client.delete(&url)))
            .await
            .map_err(StoreError::from)?;

        let dto: DeleteResponseDto = Self::read_json(response, Some(id.raw()))
            .await
            .map_err(StoreError::from)?;

        if !dto.success {
            return Err(StoreError::Api {
                status_code: 200,
                message: dto.message,
            });
        }

        debug!(message = %dto.message, "image deleted");
        Ok(())
    }

    #[instrument(skip(self), fields(image_id = %id, position))]
    async fn update_position(
        &self,
        id: ImageId,
        position: u32,
    ) -> store_traits::Result<ImageRecord> {
        // Position travels in the query string; the PATCH carries no body
        let url = format!("{}/orden?nuevoOrden={}", self.image_url(id), position);

        let response = self
            .execute_with_retry(|| Ok(self.client.patch(&url)))
            .await
            .map_err(StoreError::from)?;

        let dto: ImageDto = Self::read_json(response, Some(id.raw()))
            .await
            .map_err(StoreError::from)?;

        Ok(dto.into_record())
    }

    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn list_images(&self, product_id: ProductId) -> store_traits::Result<Vec<ImageRecord>> {
        let url = self.product_images_url(product_id);

        let response = self
            .execute_with_retry(|| Ok(self.client.get(&url)))
            .await
            .map_err(StoreError::from)?;

        let dtos: Vec<ImageDto> = Self::read_json(response, None)
            .await
            .map_err(StoreError::from)?;

        info!(count = dtos.len(), "listed product images");
        Ok(dtos.into_iter().map(ImageDto::into_record).collect())
    }
}

/// Resolve a stored image path against the server root
///
/// The backend persists relative paths (`/uploads/...`); already-absolute
/// URLs pass through untouched.
pub fn resolve_image_url(server_url: &str, path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        server_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_config_defaults() {
        let config = RestStoreConfig::new("https://shop.example.com/api/");
        assert_eq!(config.base_url, "https://shop.example.com/api");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_endpoint_urls() {
        let store = RestImageStore::new(RestStoreConfig::new("https://shop.example.com/api"));

        assert_eq!(
            store.product_images_url(ProductId::new(42)),
            "https://shop.example.com/api/producto-imagenes/producto/42"
        );
        assert_eq!(
            store.image_url(ImageId::new(7)),
            "https://shop.example.com/api/producto-imagenes/7"
        );
    }

    #[test]
    fn test_resolve_image_url() {
        assert_eq!(
            resolve_image_url("https://shop.example.com", "/uploads/p/1.webp"),
            "https://shop.example.com/uploads/p/1.webp"
        );
        assert_eq!(
            resolve_image_url("https://shop.example.com/", "uploads/p/1.webp"),
            "https://shop.example.com/uploads/p/1.webp"
        );
        assert_eq!(
            resolve_image_url("https://shop.example.com", "https://cdn.example.com/1.webp"),
            "https://cdn.example.com/1.webp"
        );
        assert_eq!(resolve_image_url("https://shop.example.com", ""), "");
    }

    #[test]
    fn test_upload_form_rejects_garbage_mime() {
        let image = NewImage {
            file_name: "a.png".to_string(),
            content_type: "not a mime".to_string(),
            bytes: Bytes::from_static(b"png"),
            position: 1,
        };
        assert!(matches!(
            build_upload_form(&image),
            Err(RestStoreError::InvalidUpload(_))
        ));
    }

    #[test]
    fn test_upload_form_accepts_image_types() {
        let image = NewImage {
            file_name: "a.webp".to_string(),
            content_type: "image/webp".to_string(),
            bytes: Bytes::from_static(b"webp"),
            position: 1,
        };
        assert!(build_upload_form(&image).is_ok());
    }
}
