//! Scenario framework.
//!
//! A [`Suite`] groups the scenarios of one resource. Its cases are a plain
//! enum implementing [`ScenarioCase`]; the [`Runner`] walks them in order,
//! each against the same [`SuiteContext`].

mod result;
mod runner;

pub use result::{Outcome, RunReport, ScenarioResult, SuiteResult};
pub use runner::Runner;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::http::ApiClient;

/// One scenario of a suite.
pub trait ScenarioCase: Copy + Send + Sync + 'static {
    /// Every case, in execution order.
    const ALL: &'static [Self];

    /// Stable identifier such as `TC01`.
    fn id(&self) -> &'static str;

    /// Human-readable title.
    fn title(&self) -> &'static str;
}

/// A named group of scenarios sharing setup.
#[async_trait]
pub trait Suite: Send + Sync {
    type Case: ScenarioCase;

    /// Suite name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Creates prerequisite resources. An error here skips every case.
    async fn setup(&self, _ctx: &mut SuiteContext) -> Result<()> {
        Ok(())
    }

    /// Runs one case to completion.
    async fn run_case(&self, case: Self::Case, ctx: &SuiteContext) -> Result<()>;
}

/// Per-suite state: the client plus ids created during setup.
///
/// Ids are written once by [`Suite::setup`] and only read by cases.
#[derive(Debug, Clone)]
pub struct SuiteContext {
    pub client: ApiClient,
    pub user_id: Option<u64>,
    pub post_id: Option<u64>,
}

impl SuiteContext {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            user_id: None,
            post_id: None,
        }
    }

    /// Id of the user created during setup.
    pub fn user_id(&self) -> Result<u64> {
        self.user_id
            .ok_or_else(|| Error::Setup("no prerequisite user was created".to_string()))
    }

    /// Id of the post created during setup.
    pub fn post_id(&self) -> Result<u64> {
        self.post_id
            .ok_or_else(|| Error::Setup("no prerequisite post was created".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn context_ids_require_setup() {
        let client = ApiClient::new("http://localhost", "", Duration::from_secs(1)).unwrap();
        let mut ctx = SuiteContext::new(client);

        assert!(matches!(ctx.user_id(), Err(Error::Setup(_))));
        ctx.user_id = Some(3);
        assert_eq!(ctx.user_id().unwrap(), 3);
        assert!(ctx.post_id().is_err());
    }
}
