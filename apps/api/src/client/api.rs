use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::models::contact::{ContactPage, ContactUpdate};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Contact {0} is not in any loaded page")]
    NotLoaded(i32),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }
}

/// The two calls the client view makes. `ApiClient` talks HTTP; tests
/// script their own backend.
#[async_trait]
pub trait ContactsBackend: Send + Sync {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<ContactPage, ClientError>;

    async fn update(&self, update: &ContactUpdate) -> Result<(), ClientError>;
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ContactsBackend for ApiClient {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<ContactPage, ClientError> {
        let response = self
            .client
            .get(format!("{}/contacts", self.base_url))
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await?;
        let response = Self::check(response).await?;
        let text = response.text().await?;
        let page: ContactPage = serde_json::from_str(&text)?;
        debug!(
            "Fetched page {} ({} contacts)",
            page.pagination.page,
            page.contacts.len()
        );
        Ok(page)
    }

    async fn update(&self, update: &ContactUpdate) -> Result<(), ClientError> {
        let response = self
            .client
            .post(format!("{}/contacts/update", self.base_url))
            .json(&json!({
                "id": update.id,
                "field": update.field,
                "value": update.value,
            }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8080/");
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_not_found_detection() {
        let err = ClientError::Api {
            status: 404,
            message: "Contact 3 not found".into(),
        };
        assert!(err.is_not_found());
        assert!(!ClientError::Api {
            status: 500,
            message: String::new()
        }
        .is_not_found());
    }
}
