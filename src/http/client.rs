use std::collections::HashMap;
use std::time::{Duration, Instant};

use reqwest::{Client, Url};

use crate::config::SuiteConfig;
use crate::error::{Error, Result};

use super::request::{ApiRequest, Auth};
use super::response::ApiResponse;

/// Sends [`ApiRequest`]s to one API base URL.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    /// Creates a client with a per-request timeout.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into();
        Url::parse(&base_url).map_err(|e| Error::InvalidUrl(format!("{base_url}: {e}")))?;

        let http = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// Creates a client from suite configuration.
    pub fn from_config(config: &SuiteConfig) -> Result<Self> {
        Self::new(&config.base_url, &config.api_token, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves a request path and query against the base URL.
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url> {
        let raw = format!("{}/{}", self.base_url, request.path.trim_start_matches('/'));
        let mut url = Url::parse(&raw).map_err(|e| Error::InvalidUrl(format!("{raw}: {e}")))?;

        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Sends a request and collects the full response.
    ///
    /// Transport errors and timeouts are always errors. Non-2xx statuses are
    /// errors only when `request.fail_on_status` is set.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.url_for(&request)?;
        let mut builder = self.http.request(request.method.clone(), url.clone());

        if request.auth == Auth::Bearer {
            builder = builder.bearer_auth(&self.token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let started = Instant::now();
        let response = builder.send().await?;
        let status = response.status().as_u16();

        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            headers.insert(
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            );
        }
        let text = response.text().await?;

        tracing::debug!(
            method = %request.method,
            url = %url,
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request completed"
        );

        let response = ApiResponse::from_parts(status, headers, text);
        if request.fail_on_status && !response.is_success() {
            return Err(Error::UnexpectedStatus {
                method: request.method.to_string(),
                url: url.to_string(),
                status,
                body: response.text,
            });
        }

        Ok(response)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, "secret-token", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn url_joins_base_path_and_query() {
        let client = client("https://gorest.co.in/public/v2/");
        let request = ApiRequest::get("/users").query("gender", "female");

        let url = client.url_for(&request).unwrap();
        assert_eq!(
            url.as_str(),
            "https://gorest.co.in/public/v2/users?gender=female"
        );
    }

    #[test]
    fn url_encodes_query_values() {
        let client = client("http://localhost:8080");
        let request = ApiRequest::get("users").query("name", "Kree tika");

        let url = client.url_for(&request).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/users?name=Kree+tika");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = ApiClient::new("not a url", "", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn debug_output_hides_token() {
        let rendered = format!("{:?}", client("http://localhost"));
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
