//! JSON REST client for the backend.

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// REST client bound to a fixed base URL.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let base_url = Url::parse(&config.api_url)
            .map_err(|e| ClientError::Config(format!("api url {:?}: {e}", config.api_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "api url {:?} cannot be used as a base",
                config.api_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    /// `GET` a list endpoint.
    ///
    /// The backend wraps lists as `{"result": [...]}`; a missing or null
    /// `result` reads as an empty list.
    pub async fn list<T: DeserializeOwned>(&self, segments: &[&str]) -> ClientResult<Vec<T>> {
        let body = self.request::<()>(Method::GET, segments, None).await?;
        match body.get("result") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(result) => Ok(serde_json::from_value(result.clone())?),
        }
    }

    pub async fn post<B: Serialize>(&self, segments: &[&str], body: &B) -> ClientResult<Value> {
        self.request(Method::POST, segments, Some(body)).await
    }

    pub async fn put<B: Serialize>(&self, segments: &[&str], body: &B) -> ClientResult<Value> {
        self.request(Method::PUT, segments, Some(body)).await
    }

    pub async fn delete(&self, segments: &[&str]) -> ClientResult<Value> {
        self.request::<()>(Method::DELETE, segments, None).await
    }

    /// Send one request and return the decoded response body.
    ///
    /// Failures are passed through as-is; no retries.
    async fn request<B: Serialize>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> ClientResult<Value> {
        let url = self.url(segments)?;
        tracing::debug!(%method, %url, "sending request");

        let mut req = self.http.request(method.clone(), url.clone());
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(|e| {
            tracing::warn!(%method, %url, "request failed: {e}");
            ClientError::from(e)
        })?;

        read_body(resp).await
    }

    fn url(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Config("api url cannot be used as a base".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn read_body(resp: Response) -> ClientResult<Value> {
    let status = resp.status();
    let text = resp.text().await?;

    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), "backend returned an error");
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: server_message(&text),
        });
    }

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text)?)
}

/// The `message` field of an error body, when the body is JSON and has one.
fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
