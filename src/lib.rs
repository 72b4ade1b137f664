//! GoRest contract suite
//!
//! Black-box end-to-end checks for a GoRest-style REST API exposing users,
//! posts, comments and todos. The library provides random fixture generation,
//! an authenticated HTTP client, JSON assertion helpers and a sequential
//! scenario runner; the binary wires them together from configuration.

pub mod config;
pub mod error;
pub mod expect;
pub mod fixture;
pub mod http;
pub mod model;
pub mod report;
pub mod resource;
pub mod scenario;
pub mod suites;

pub use error::{Error, Result, StepExt};
pub use expect::{AssertionError, JsonKind};
pub use http::{ApiClient, ApiRequest, ApiResponse, Auth};

pub use config::{ReportConfig, SuiteConfig, Validate, ValidationResult};
pub use fixture::{
    generate_comment_fixture, generate_post_fixture, generate_todo_fixture, generate_user_fixture,
    CommentFixture, Faker, Gender, PostFixture, TodoFixture, TodoStatus, UserFixture, UserStatus,
};
pub use model::{Comment, Post, Todo, User, Violation};
pub use report::{JsonReport, LogHooks, RunDetails, RunHooks};
pub use resource::{Created, Entity, Resource};
pub use scenario::{
    Outcome, RunReport, Runner, ScenarioCase, ScenarioResult, Suite, SuiteContext, SuiteResult,
};
pub use suites::SuiteKind;
