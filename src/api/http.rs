//! Reqwest-backed adapter for the user directory.
//!
//! Owns transport details only: URL building, JSON encoding and decoding,
//! and mapping of transport and status failures into `ApiError`.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::{User, UserApi, UserId};
use crate::error::ApiError;

/// Collection endpoint used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com/users";

const PREVIEW_CHAR_LIMIT: usize = 160;

/// `UserApi` over HTTP against one collection URL, e.g. `https://host/users`.
pub struct HttpUserApi {
    client: Client,
    base: Url,
}

impl HttpUserApi {
    /// Build an adapter for the collection resource at `base`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBaseUrl` when `base` does not parse or cannot have
    /// item segments appended (e.g. `mailto:` URLs).
    pub fn new(base: &str) -> Result<Self, ApiError> {
        let parsed = Url::parse(base).map_err(|e| ApiError::InvalidBaseUrl(format!("{base}: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base.to_string()));
        }
        Ok(Self { client: Client::new(), base: parsed })
    }

    /// The collection URL requests are built from.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Collection URL when `id` is `None`, otherwise the item URL below it.
    pub fn resource_url(&self, id: Option<&UserId>) -> Result<Url, ApiError> {
        let Some(id) = id else {
            return Ok(self.base.clone());
        };
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, id: Option<&UserId>) -> Result<T, ApiError> {
        let url = self.resource_url(id)?;
        tracing::debug!(%url, "GET");
        let body = send(self.client.get(url)).await?;
        decode(&body)
    }
}

#[async_trait]
impl UserApi for HttpUserApi {
    async fn list(&self) -> Result<Vec<User>, ApiError> {
        self.fetch(None).await
    }

    async fn get(&self, id: &UserId) -> Result<User, ApiError> {
        self.fetch(Some(id)).await
    }

    async fn create(&self, user: &User) -> Result<User, ApiError> {
        let url = self.resource_url(None)?;
        tracing::debug!(%url, "POST");
        let body = send(self.client.post(url).json(user)).await?;
        decode(&body)
    }

    async fn update(&self, user: &User) -> Result<User, ApiError> {
        let id = user.id.as_ref().ok_or(ApiError::MissingId)?;
        let url = self.resource_url(Some(id))?;
        tracing::debug!(%url, "PUT");
        let body = send(self.client.put(url).json(user)).await?;
        decode(&body)
    }

    async fn delete(&self, id: &UserId) -> Result<(), ApiError> {
        let url = self.resource_url(Some(id))?;
        tracing::debug!(%url, "DELETE");
        send(self.client.delete(url)).await?;
        Ok(())
    }
}

/// Send a request and return the raw body of a 2xx response.
async fn send(request: RequestBuilder) -> Result<Vec<u8>, ApiError> {
    let response = request
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await?;
    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        return Err(status_error(status, &body));
    }
    Ok(body.to_vec())
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn status_error(status: StatusCode, body: &[u8]) -> ApiError {
    ApiError::Status { status: status.as_u16(), body: body_preview(body) }
}

fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
