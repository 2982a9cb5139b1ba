//! HTTP client for the listing API

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::ApiResponse;
use std::sync::Arc;
use tokio::sync::RwLock;

/// HTTP client for making requests to the listing API
///
/// Cheap to clone; clones share the connection pool and the token.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(config.token.clone())),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replace the bearer token
    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    /// Get the current token
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token.read().await.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorize(self.client.get(self.url(path))).await;
        self.execute(request).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self
            .authorize(self.client.post(self.url(path)).json(body))
            .await;
        self.execute(request).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self
            .authorize(self.client.put(self.url(path)).json(body))
            .await;
        self.execute(request).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorize(self.client.delete(self.url(path))).await;
        self.execute(request).await
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(self.handle_error(status, text).await);
        }

        // An empty body reads as JSON null so acknowledgement-only endpoints
        // can be decoded as `()` or `Value`.
        let body = if text.trim().is_empty() { "null" } else { &text };
        Ok(serde_json::from_str(body)?)
    }

    async fn handle_error(&self, status: StatusCode, text: String) -> ClientError {
        // Prefer the envelope's error message when the server sent one
        let message = serde_json::from_str::<ApiResponse<Value>>(&text)
            .ok()
            .and_then(|resp| resp.error)
            .unwrap_or(text);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                // The stored token is no longer accepted; drop it so the
                // caller has to re-authenticate.
                tracing::warn!(status = %status, "Clearing rejected API token");
                self.set_token(None).await;
                if status == StatusCode::UNAUTHORIZED {
                    ClientError::Unauthorized
                } else {
                    ClientError::Forbidden(message)
                }
            }
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(message)
            }
            _ => ClientError::Internal(message),
        }
    }
}

/// Treat `{ "success": false, ... }` bodies as failures even on 2xx
pub(crate) fn ensure_acknowledged(body: &Value) -> ClientResult<()> {
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("request rejected")
            .to_string();
        return Err(ClientError::InvalidResponse(message));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_url_join() {
        let client = HttpClient::new(&ClientConfig::new("http://api.test/api/")).unwrap();
        assert_eq!(client.base_url(), "http://api.test/api");
        assert_eq!(client.url("/cars"), "http://api.test/api/cars");
        assert_eq!(client.url("cars/reorder"), "http://api.test/api/cars/reorder");
    }

    #[tokio::test]
    async fn test_token_from_config() {
        let client =
            HttpClient::new(&ClientConfig::new("http://api.test").with_token("t0k")).unwrap();
        assert_eq!(client.token().await.as_deref(), Some("t0k"));

        client.set_token(None).await;
        assert!(client.token().await.is_none());
    }

    #[test]
    fn test_acknowledgement() {
        assert!(ensure_acknowledged(&json!({ "success": true })).is_ok());
        assert!(ensure_acknowledged(&Value::Null).is_ok());
        assert!(ensure_acknowledged(&json!({ "message": "ok" })).is_ok());

        let err = ensure_acknowledged(&json!({ "success": false, "error": "locked" })).unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(msg) if msg == "locked"));
    }
}
