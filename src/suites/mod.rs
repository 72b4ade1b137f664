//! Scenario suites, one per API resource.

mod comments;
mod posts;
mod todos;
mod users;

pub use comments::{CommentCase, CommentsSuite};
pub use posts::{PostCase, PostsSuite};
pub use todos::{TodoCase, TodosSuite};
pub use users::{UserCase, UsersSuite};

use crate::error::Result;
use crate::expect;
use crate::http::{ApiClient, ApiRequest, ApiResponse};
use crate::scenario::{Runner, ScenarioCase, SuiteResult};

/// Id the API never assigns, used for not-found scenarios.
pub const MISSING_ID: u64 = 1;

/// Sends a request the API should refuse and checks the refusal status.
pub(crate) async fn send_refused(
    client: &ApiClient,
    request: ApiRequest,
    status: u16,
) -> Result<ApiResponse> {
    let response = client.send(request.allow_failure()).await?;
    expect::status(&response, status)?;
    Ok(response)
}

/// Selectable suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SuiteKind {
    Users,
    Posts,
    Comments,
    Todos,
}

impl SuiteKind {
    pub const ALL: [SuiteKind; 4] = [
        SuiteKind::Users,
        SuiteKind::Posts,
        SuiteKind::Comments,
        SuiteKind::Todos,
    ];

    /// Lowercase resource name, as accepted by `--suite`.
    pub fn name(&self) -> &'static str {
        match self {
            SuiteKind::Users => "users",
            SuiteKind::Posts => "posts",
            SuiteKind::Comments => "comments",
            SuiteKind::Todos => "todos",
        }
    }

    /// `(id, title)` of every case in the suite.
    pub fn cases(&self) -> Vec<(&'static str, &'static str)> {
        fn list<C: ScenarioCase>() -> Vec<(&'static str, &'static str)> {
            C::ALL.iter().map(|c| (c.id(), c.title())).collect()
        }

        match self {
            SuiteKind::Users => list::<UserCase>(),
            SuiteKind::Posts => list::<PostCase>(),
            SuiteKind::Comments => list::<CommentCase>(),
            SuiteKind::Todos => list::<TodoCase>(),
        }
    }

    /// Runs this suite through `runner`.
    pub async fn run(&self, runner: &Runner) -> SuiteResult {
        match self {
            SuiteKind::Users => runner.run_suite(&UsersSuite).await,
            SuiteKind::Posts => runner.run_suite(&PostsSuite).await,
            SuiteKind::Comments => runner.run_suite(&CommentsSuite).await,
            SuiteKind::Todos => runner.run_suite(&TodosSuite).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn case_ids_are_unique_and_sequential() {
        for kind in SuiteKind::ALL {
            let cases = kind.cases();
            let ids: HashSet<_> = cases.iter().map(|(id, _)| *id).collect();
            assert_eq!(ids.len(), cases.len(), "duplicate ids in {}", kind.name());

            for (index, (id, title)) in cases.iter().enumerate() {
                assert_eq!(*id, format!("TC{:02}", index + 1), "{} out of order", kind.name());
                assert!(!title.is_empty());
            }
        }
    }

    #[test]
    fn suite_sizes() {
        assert_eq!(SuiteKind::Users.cases().len(), 14);
        assert_eq!(SuiteKind::Posts.cases().len(), 10);
        assert_eq!(SuiteKind::Comments.cases().len(), 14);
        assert_eq!(SuiteKind::Todos.cases().len(), 10);
    }
}
