//! Fetch adapter: every backend call goes through here so JSON decoding
//! and non-2xx handling share a single error path.

use reqwest::{Client, Method};
use serde::{de::DeserializeOwned, Serialize};
use shared::error::{ApiMessage, ErrorCode};
use tokio::sync::RwLock;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::error::ClientError;

#[derive(Debug)]
pub struct Http {
    base: Url,
    bearer: RwLock<Option<String>>,
    client: Client,
}

impl Http {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base = Url::parse(base_url.trim_end_matches('/')).map_err(|err| {
            ClientError::validation(format!("invalid api base url '{base_url}': {err}"))
        })?;
        Ok(Self {
            base,
            bearer: RwLock::new(None),
            client: Client::new(),
        })
    }

    pub async fn set_bearer(&self, token: impl Into<String>) {
        *self.bearer.write().await = Some(token.into());
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.request::<()>(Method::GET, path, None).await?;
        Self::decode(response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.request(Method::POST, path, Some(body)).await?;
        Self::decode(response).await
    }

    /// Relation-only create: no request body beyond the path.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.request::<()>(Method::POST, path, None).await?;
        Self::decode(response).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.request(Method::PUT, path, Some(body)).await?;
        Self::decode(response).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.request::<()>(Method::DELETE, path, None).await?;
        Self::decode(response).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        let raw = format!(
            "{}/{}",
            self.base.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&raw)
            .map_err(|err| ClientError::validation(format!("invalid request path '{path}': {err}")))
    }

    async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, ClientError> {
        let url = self.endpoint(path)?;
        let request_id = Uuid::new_v4();
        debug!(%method, path, %request_id, "issuing api request");

        let mut builder = self.client.request(method, url);
        if let Some(token) = self.bearer.read().await.as_ref() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        if response.status().is_success() {
            return Ok(response);
        }
        Err(Self::api_error(response).await)
    }

    /// Non-2xx bodies carry a `message` field; anything else falls back to
    /// the status line.
    async fn api_error(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let fallback = status
            .canonical_reason()
            .unwrap_or("request rejected")
            .to_string();
        let message = match response.json::<ApiMessage>().await {
            Ok(body) => body.message,
            Err(_) => fallback,
        };
        ClientError::Api {
            code: ErrorCode::from_status(status.as_u16()),
            status: status.as_u16(),
            message,
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        response
            .json::<T>()
            .await
            .map_err(|err| ClientError::UnexpectedBody(err.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/http_tests.rs"]
mod tests;
