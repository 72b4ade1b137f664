//! Thin request client over `reqwest`.
//!
//! Scenarios describe a request with [`ApiRequest`], send it through
//! [`ApiClient`], and inspect the [`ApiResponse`]. The client knows the base
//! URL and bearer token; requests only carry a path.

mod client;
mod request;
mod response;

pub use client::ApiClient;
pub use request::{ApiRequest, Auth};
pub use response::ApiResponse;
