//! Sequential suite runner.

use std::time::Instant;

use chrono::Utc;

use crate::error::Result;
use crate::http::ApiClient;
use crate::report::{RunDetails, RunHooks};
use crate::suites::SuiteKind;

use super::result::{Outcome, RunReport, ScenarioResult, SuiteResult};
use super::{ScenarioCase, Suite, SuiteContext};

/// Runs suites one after another, and each suite's cases one after another.
///
/// A failing case fails only itself. A failing setup skips every case of that
/// suite. Nothing is retried.
pub struct Runner {
    client: ApiClient,
    hooks: Vec<Box<dyn RunHooks>>,
}

impl Runner {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            hooks: Vec::new(),
        }
    }

    /// Registers a hook called before and after [`Runner::run`].
    pub fn with_hook(mut self, hook: impl RunHooks + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Runs the selected suites and returns the full report.
    ///
    /// Errors only come from hooks; scenario failures are recorded in the
    /// report.
    pub async fn run(&self, suites: &[SuiteKind]) -> Result<RunReport> {
        let details = RunDetails {
            base_url: self.client.base_url().to_string(),
            suites: suites.iter().map(|s| s.name()).collect(),
            started_at: Utc::now(),
        };

        for hook in &self.hooks {
            hook.before_run(&details).await?;
        }

        let mut results = Vec::with_capacity(suites.len());
        for kind in suites {
            results.push(kind.run(self).await);
        }

        let report = RunReport {
            base_url: details.base_url,
            started_at: details.started_at,
            finished_at: Utc::now(),
            suites: results,
        };

        for hook in &self.hooks {
            hook.after_run(&report).await?;
        }

        Ok(report)
    }

    /// Runs every case of one suite against a fresh context.
    pub async fn run_suite<S: Suite>(&self, suite: &S) -> SuiteResult {
        let started = Instant::now();
        let name = suite.name();
        let mut ctx = SuiteContext::new(self.client.clone());

        tracing::info!(suite = name, cases = S::Case::ALL.len(), "starting suite");

        let setup_error = match suite.setup(&mut ctx).await {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(suite = name, error = %e, "suite setup failed, skipping cases");
                Some(e.to_string())
            }
        };

        let mut scenarios = Vec::with_capacity(S::Case::ALL.len());
        for case in S::Case::ALL.iter().copied() {
            let result = match &setup_error {
                Some(error) => ScenarioResult {
                    id: case.id().to_string(),
                    title: case.title().to_string(),
                    outcome: Outcome::Skipped {
                        reason: format!("suite setup failed: {error}"),
                    },
                    duration_ms: 0,
                },
                None => self.run_case(suite, case, &ctx).await,
            };
            scenarios.push(result);
        }

        let result = SuiteResult {
            name: name.to_string(),
            setup_error,
            scenarios,
            duration_ms: started.elapsed().as_millis() as u64,
        };

        tracing::info!(
            suite = name,
            passed = result.passed_count(),
            failed = result.failed_count(),
            skipped = result.skipped_count(),
            "suite finished"
        );

        result
    }

    async fn run_case<S: Suite>(&self, suite: &S, case: S::Case, ctx: &SuiteContext) -> ScenarioResult {
        let started = Instant::now();
        let outcome = match suite.run_case(case, ctx).await {
            Ok(()) => {
                tracing::info!(suite = suite.name(), case = case.id(), title = case.title(), "passed");
                Outcome::Passed
            }
            Err(e) => {
                tracing::warn!(
                    suite = suite.name(),
                    case = case.id(),
                    title = case.title(),
                    error = %e,
                    "failed"
                );
                Outcome::Failed {
                    error: e.to_string(),
                }
            }
        };

        ScenarioResult {
            id: case.id().to_string(),
            title: case.title().to_string(),
            outcome,
            duration_ms: started.elapsed().as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::error::Error;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Case {
        First,
        Broken,
        Last,
    }

    impl ScenarioCase for Case {
        const ALL: &'static [Self] = &[Case::First, Case::Broken, Case::Last];

        fn id(&self) -> &'static str {
            match self {
                Case::First => "TC01",
                Case::Broken => "TC02",
                Case::Last => "TC03",
            }
        }

        fn title(&self) -> &'static str {
            match self {
                Case::First => "first",
                Case::Broken => "broken",
                Case::Last => "last",
            }
        }
    }

    struct RecordingSuite {
        fail_setup: bool,
        seen: Mutex<Vec<(Case, Option<u64>)>>,
    }

    impl RecordingSuite {
        fn new(fail_setup: bool) -> Self {
            Self {
                fail_setup,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Suite for RecordingSuite {
        type Case = Case;

        fn name(&self) -> &'static str {
            "recording"
        }

        async fn setup(&self, ctx: &mut SuiteContext) -> Result<()> {
            if self.fail_setup {
                return Err(Error::Setup("user creation refused".to_string()));
            }
            ctx.user_id = Some(99);
            Ok(())
        }

        async fn run_case(&self, case: Case, ctx: &SuiteContext) -> Result<()> {
            self.seen.lock().unwrap().push((case, ctx.user_id));
            match case {
                Case::Broken => Err(Error::Setup("broken on purpose".to_string())),
                _ => Ok(()),
            }
        }
    }

    fn runner() -> Runner {
        let client = ApiClient::new("http://127.0.0.1:9", "", Duration::from_secs(1)).unwrap();
        Runner::new(client)
    }

    #[tokio::test]
    async fn failing_case_does_not_stop_later_cases() {
        let suite = RecordingSuite::new(false);
        let result = runner().run_suite(&suite).await;

        let seen = suite.seen.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec![
                (Case::First, Some(99)),
                (Case::Broken, Some(99)),
                (Case::Last, Some(99))
            ]
        );
        assert_eq!(result.passed_count(), 2);
        assert_eq!(result.failed_count(), 1);
        assert_eq!(
            result.scenarios[1].outcome,
            Outcome::Failed {
                error: "suite setup failed: broken on purpose".to_string()
            }
        );
    }

    #[tokio::test]
    async fn setup_failure_skips_every_case() {
        let suite = RecordingSuite::new(true);
        let result = runner().run_suite(&suite).await;

        assert!(suite.seen.lock().unwrap().is_empty());
        assert_eq!(result.skipped_count(), 3);
        assert_eq!(
            result.setup_error.as_deref(),
            Some("suite setup failed: user creation refused")
        );
        assert!(!result.success());
    }

    struct CountingHooks {
        before: Arc<AtomicUsize>,
        after: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl RunHooks for CountingHooks {
        async fn before_run(&self, details: &RunDetails) -> Result<()> {
            assert!(details.suites.is_empty());
            self.before.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn after_run(&self, report: &RunReport) -> Result<()> {
            assert_eq!(report.total(), 0);
            self.after.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn hooks_wrap_the_run() {
        let before = Arc::new(AtomicUsize::new(0));
        let after = Arc::new(AtomicUsize::new(0));
        let runner = runner().with_hook(CountingHooks {
            before: before.clone(),
            after: after.clone(),
        });

        let report = runner.run(&[]).await.unwrap();

        assert!(report.success());
        assert_eq!(before.load(Ordering::SeqCst), 1);
        assert_eq!(after.load(Ordering::SeqCst), 1);
    }
}
