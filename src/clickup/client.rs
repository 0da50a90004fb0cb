use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::env;

use crate::clickup::error::{ClickUpError, ClickUpResult};
use crate::credentials::Credentials;

/// Production ClickUp API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.clickup.com/api/v2";

/// HTTP client for the ClickUp REST API (v2).
///
/// Holds no credentials of its own: every request builder takes the
/// per-call `Credentials`, so a single client instance serves all
/// sessions.
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// Priority for base URL:
    /// 1. Explicit `api_url` parameter
    /// 2. CLICKUP_API_URL environment variable
    /// 3. Default: https://api.clickup.com/api/v2
    pub fn new(api_url: Option<String>) -> Self {
        let _ = rustls::crypto::ring::default_provider().install_default();

        let base_url = api_url
            .or_else(|| env::var("CLICKUP_API_URL").ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            base_url,
            client: Client::new(),
        }
    }

    /// Get the base URL being used
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a GET request builder with the API key applied
    pub fn get(&self, credentials: &Credentials, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, &credentials.api_key)
    }

    /// Create a POST request builder with the API key applied
    pub fn post(&self, credentials: &Credentials, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, &credentials.api_key)
    }

    /// Create a PUT request builder with the API key applied
    pub fn put(&self, credentials: &Credentials, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .put(&url)
            .header(reqwest::header::AUTHORIZATION, &credentials.api_key)
    }

    /// Create a DELETE request builder with the API key applied
    pub fn delete(&self, credentials: &Credentials, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .delete(&url)
            .header(reqwest::header::AUTHORIZATION, &credentials.api_key)
    }

    /// Download a file from an arbitrary http(s) URL, outside the ClickUp
    /// API. Used to fetch attachment payloads before re-upload.
    pub async fn download(&self, url: reqwest::Url) -> ClickUpResult<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClickUpError::Api { status, message });
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// Handle API responses whose success body is empty (tag endpoints).
    ///
    /// Checks the status code only; the body is read for the error
    /// message on failure.
    pub async fn handle_empty_response(response: Response) -> ClickUpResult<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(ClickUpError::Api { status, message })
        }
    }

    /// Handle API response with standardized error handling
    ///
    /// Returns the deserialized response body on success,
    /// or a ClickUpError::Api on non-success status codes.
    pub async fn handle_response<T: DeserializeOwned>(response: Response) -> ClickUpResult<T> {
        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| ClickUpError::InvalidResponse {
                    message: e.to_string(),
                })
        } else {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(ClickUpError::Api { status, message })
        }
    }
}
