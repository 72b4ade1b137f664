//! Error types for the contract suite.

use thiserror::Error;

use crate::expect::AssertionError;

/// Top-level error type for suite operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Suite configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A request URL could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Transport-level failure, including client timeouts.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response while the request was marked to fail on status.
    #[error("{method} {url} returned unexpected status {status}: {body}")]
    UnexpectedStatus {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    /// Response body did not decode to the expected shape.
    #[error("failed to decode response body: {0}")]
    Json(#[from] serde_json::Error),

    /// An expectation on a response did not hold.
    #[error("assertion failed: {0}")]
    Assertion(#[from] AssertionError),

    /// A labelled step of a chained scenario failed.
    #[error("step `{step}` failed: {source}")]
    Step {
        step: &'static str,
        #[source]
        source: Box<Error>,
    },

    /// A suite precondition is missing.
    #[error("suite setup failed: {0}")]
    Setup(String),

    /// IO error while writing reports or reading config.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for suite operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Labels the step of a request chain that produced an error.
pub trait StepExt<T> {
    /// Wraps any error in [`Error::Step`] with the given label.
    fn step(self, step: &'static str) -> Result<T>;
}

impl<T, E> StepExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn step(self, step: &'static str) -> Result<T> {
        self.map_err(|e| Error::Step {
            step,
            source: Box::new(e.into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_wraps_error_with_label() {
        let result: std::result::Result<(), Error> = Err(Error::Setup("no user".to_string()));
        let err = result.step("create post").unwrap_err();

        assert_eq!(
            err.to_string(),
            "step `create post` failed: suite setup failed: no user"
        );
    }

    #[test]
    fn step_converts_assertion_errors() {
        let result: std::result::Result<(), AssertionError> = Err(AssertionError::EmptyList);
        let err = result.step("list users").unwrap_err();

        match err {
            Error::Step { step, source } => {
                assert_eq!(step, "list users");
                assert!(matches!(*source, Error::Assertion(AssertionError::EmptyList)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
