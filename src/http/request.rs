use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// Whether a request carries the configured bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Auth {
    #[default]
    Bearer,
    Anonymous,
}

/// A single request against the API.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base URL, e.g. `/users/42`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub auth: Auth,
    pub body: Option<Value>,
    /// Turn non-2xx responses into [`crate::Error::UnexpectedStatus`].
    pub fail_on_status: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            auth: Auth::Bearer,
            body: None,
            fail_on_status: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Appends a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Serializes `body` as the JSON request body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Uses an already-built JSON value as the body.
    pub fn json_value(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sends the request without the bearer token.
    pub fn anonymous(mut self) -> Self {
        self.auth = Auth::Anonymous;
        self
    }

    /// Returns 4xx/5xx responses instead of failing.
    pub fn allow_failure(mut self) -> Self {
        self.fail_on_status = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_defaults_to_bearer_and_fail_on_status() {
        let request = ApiRequest::get("/users");
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.auth, Auth::Bearer);
        assert!(request.fail_on_status);
        assert!(request.body.is_none());
    }

    #[test]
    fn builder_collects_query_and_body() {
        let request = ApiRequest::post("/comments")
            .query("post_id", 17)
            .json(&json!({"name": "Test"}))
            .unwrap()
            .anonymous()
            .allow_failure();

        assert_eq!(request.query, vec![("post_id".to_string(), "17".to_string())]);
        assert_eq!(request.body, Some(json!({"name": "Test"})));
        assert_eq!(request.auth, Auth::Anonymous);
        assert!(!request.fail_on_status);
    }
}
