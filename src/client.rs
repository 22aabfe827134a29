use std::future::Future;

use reqwest::{Response, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;

use crate::{bridge::form::ProductPayload, config::ClientConfig, models::Product};

/// Errors surfaced by a [`ProductApi`] implementation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service answered with a non-success status.
    #[error("product API error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        /// `message` field of the error body, when the body had one.
        message: Option<String>,
    },

    #[error("product API transport error: {0}")]
    Transport(String),

    #[error("product API parse error: {0}")]
    Parse(String),
}

impl ClientError {
    /// Text shown to the user for this failure: the server's own message when
    /// there is one.
    pub fn flash_text(&self) -> String {
        match self {
            ClientError::Api {
                message: Some(message),
                ..
            } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Parse(value.to_string())
        } else {
            Self::Transport(value.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value.to_string())
    }
}

/// The remote product resource as seen by the form bridge.
///
/// Identifiers are passed through as typed into the form; the service decides
/// whether they are valid.
pub trait ProductApi {
    /// `POST /products`
    fn create_product(
        &self,
        payload: &ProductPayload,
    ) -> impl Future<Output = Result<Product, ClientError>> + Send;

    /// `PUT /products/{id}`
    fn update_product(
        &self,
        id: &str,
        payload: &ProductPayload,
    ) -> impl Future<Output = Result<Product, ClientError>> + Send;

    /// `GET /products/{id}`
    fn get_product(&self, id: &str) -> impl Future<Output = Result<Product, ClientError>> + Send;

    /// `DELETE /products/{id}`
    fn delete_product(&self, id: &str) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// `GET /products?{query}`
    fn search_products(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Product>, ClientError>> + Send;
}

#[derive(Deserialize)]
struct ErrorMessage {
    message: Option<String>,
}

/// [`ProductApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct ProductClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProductClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl ProductApi for ProductClient {
    async fn create_product(&self, payload: &ProductPayload) -> Result<Product, ClientError> {
        let url = self.url("/products");
        tracing::debug!(%url, "POST");
        let response = self.http.post(&url).json(payload).send().await?;
        decode(response).await
    }

    async fn update_product(
        &self,
        id: &str,
        payload: &ProductPayload,
    ) -> Result<Product, ClientError> {
        let url = self.url(&format!("/products/{id}"));
        tracing::debug!(%url, "PUT");
        let response = self.http.put(&url).json(payload).send().await?;
        decode(response).await
    }

    async fn get_product(&self, id: &str) -> Result<Product, ClientError> {
        let url = self.url(&format!("/products/{id}"));
        tracing::debug!(%url, "GET");
        let response = self.http.get(&url).send().await?;
        decode(response).await
    }

    async fn delete_product(&self, id: &str) -> Result<(), ClientError> {
        let url = self.url(&format!("/products/{id}"));
        tracing::debug!(%url, "DELETE");
        let response = self.http.delete(&url).send().await?;
        if response.status().is_success() {
            return Ok(());
        }
        Err(api_error(response).await)
    }

    async fn search_products(&self, query: &str) -> Result<Vec<Product>, ClientError> {
        let url = self.url(&format!("/products?{query}"));
        tracing::debug!(%url, "GET");
        let response = self.http.get(&url).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

async fn api_error(response: Response) -> ClientError {
    let status = response.status();
    let message = match response.bytes().await {
        Ok(body) => error_message(status, &body),
        Err(err) => {
            tracing::warn!(error = %err, "failed to read error body");
            None
        }
    };
    tracing::warn!(status = %status, message = ?message, "product API request failed");
    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}

fn error_message(status: StatusCode, body: &[u8]) -> Option<String> {
    match serde_json::from_slice::<ErrorMessage>(body) {
        Ok(parsed) => parsed.message,
        Err(_) => {
            tracing::debug!(status = %status, "error body is not JSON");
            None
        }
    }
}
