//! Response entities returned by the API.
//!
//! Decoding into these types doubles as the "required fields with the right
//! types" check: a missing field or a string where a number belongs fails
//! deserialization.

use serde::{Deserialize, Serialize};

use crate::fixture::{Gender, TodoStatus, UserStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub status: UserStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub post_id: u64,
    pub name: String,
    pub email: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub status: TodoStatus,
    /// Optional due date as sent by the API (ISO-8601 with offset).
    #[serde(default)]
    pub due_on: Option<String>,
}

/// One entry of a 422 response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// `{ "message": ... }` body used by 401 and 404 responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

/// Message of a 404 response.
pub const RESOURCE_NOT_FOUND: &str = "Resource not found";

/// Message of a 401 response.
pub const AUTHENTICATION_FAILED: &str = "Authentication failed";

/// Violation message for a duplicate unique field.
pub const ALREADY_TAKEN: &str = "has already been taken";

/// Violation message for a missing required field.
pub const CANT_BE_BLANK: &str = "can't be blank";

/// Violation message for a missing user gender. The typo is the API's own.
pub const GENDER_CANT_BE_BLANK: &str = "can't be blank, can be male of female";

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_decodes_from_api_body() {
        let body = json!({
            "id": 8009583,
            "name": "Kreetika Bhetuwal",
            "email": "kreetika@example.com",
            "gender": "female",
            "status": "active"
        });

        let user: User = serde_json::from_value(body).unwrap();
        assert_eq!(user.id, 8009583);
        assert_eq!(user.gender, Gender::Female);
        assert_eq!(user.status, UserStatus::Active);
    }

    #[test]
    fn post_rejects_string_user_id() {
        let body = json!({"id": 1, "user_id": "abc", "title": "t", "body": "b"});
        assert!(serde_json::from_value::<Post>(body).is_err());
    }

    #[test]
    fn todo_due_on_is_optional() {
        let body = json!({"id": 5, "user_id": 7, "title": "New Todo", "status": "pending"});
        let todo: Todo = serde_json::from_value(body).unwrap();
        assert_eq!(todo.status, TodoStatus::Pending);
        assert!(todo.due_on.is_none());

        let body = json!({
            "id": 5, "user_id": 7, "title": "New Todo", "status": "completed",
            "due_on": "2026-10-16T00:00:00.000+05:30"
        });
        let todo: Todo = serde_json::from_value(body).unwrap();
        assert_eq!(todo.due_on.as_deref(), Some("2026-10-16T00:00:00.000+05:30"));
    }

    #[test]
    fn violations_decode_as_list() {
        let body = json!([{"field": "email", "message": "has already been taken"}]);
        let violations: Vec<Violation> = serde_json::from_value(body).unwrap();
        assert_eq!(violations, vec![Violation::new("email", ALREADY_TAKEN)]);
    }
}
