use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;

/// A response as seen by assertions.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    /// Parsed JSON body; `Null` when the body is empty, a JSON string when it
    /// is not valid JSON.
    pub body: Value,
    /// Raw body text.
    pub text: String,
}

impl ApiResponse {
    /// Builds a response from its raw parts, parsing the body as JSON.
    pub fn from_parts(status: u16, headers: HashMap<String, String>, text: String) -> Self {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text.clone()))
        };

        Self {
            status,
            headers,
            body,
            text,
        }
    }

    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.body.clone())?)
    }

    /// Looks up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_body_parses_to_null() {
        let response = ApiResponse::from_parts(204, HashMap::new(), String::new());
        assert_eq!(response.body, Value::Null);
        assert!(response.is_success());
    }

    #[test]
    fn non_json_body_is_kept_as_string() {
        let response = ApiResponse::from_parts(502, HashMap::new(), "Bad Gateway".to_string());
        assert_eq!(response.body, json!("Bad Gateway"));
        assert!(!response.is_success());
    }

    #[test]
    fn json_decodes_typed_body() {
        let response = ApiResponse::from_parts(
            404,
            HashMap::new(),
            r#"{"message":"Resource not found"}"#.to_string(),
        );
        let message: crate::model::ApiMessage = response.json().unwrap();
        assert_eq!(message.message, "Resource not found");
    }
}
