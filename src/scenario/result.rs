//! Result types for suite runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a single scenario ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Outcome {
    Passed,
    Failed { error: String },
    /// Not run because suite setup failed.
    Skipped { reason: String },
}

/// Result of one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub id: String,
    pub title: String,
    pub outcome: Outcome,
    pub duration_ms: u64,
}

impl ScenarioResult {
    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Passed
    }
}

/// Result of one suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    pub name: String,
    /// Error from suite setup, if it failed.
    pub setup_error: Option<String>,
    pub scenarios: Vec<ScenarioResult>,
    pub duration_ms: u64,
}

impl SuiteResult {
    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.scenarios.iter().filter(|s| pred(&s.outcome)).count()
    }

    pub fn passed_count(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Passed))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed { .. }))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped { .. }))
    }

    /// True when setup succeeded and every scenario passed.
    pub fn success(&self) -> bool {
        self.setup_error.is_none() && self.scenarios.iter().all(ScenarioResult::passed)
    }
}

/// Result of a full run across suites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub base_url: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub suites: Vec<SuiteResult>,
}

impl RunReport {
    pub fn total(&self) -> usize {
        self.suites.iter().map(|s| s.scenarios.len()).sum()
    }

    pub fn passed(&self) -> usize {
        self.suites.iter().map(SuiteResult::passed_count).sum()
    }

    pub fn failed(&self) -> usize {
        self.suites.iter().map(SuiteResult::failed_count).sum()
    }

    pub fn skipped(&self) -> usize {
        self.suites.iter().map(SuiteResult::skipped_count).sum()
    }

    pub fn success(&self) -> bool {
        self.suites.iter().all(SuiteResult::success)
    }

    /// Failed scenarios as `(suite, scenario)` pairs.
    pub fn failures(&self) -> impl Iterator<Item = (&SuiteResult, &ScenarioResult)> {
        self.suites.iter().flat_map(|suite| {
            suite
                .scenarios
                .iter()
                .filter(|s| matches!(s.outcome, Outcome::Failed { .. }))
                .map(move |s| (suite, s))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(id: &str, outcome: Outcome) -> ScenarioResult {
        ScenarioResult {
            id: id.to_string(),
            title: format!("{id} title"),
            outcome,
            duration_ms: 5,
        }
    }

    fn report() -> RunReport {
        RunReport {
            base_url: "http://localhost".to_string(),
            started_at: Utc::now(),
            finished_at: Utc::now(),
            suites: vec![
                SuiteResult {
                    name: "users".to_string(),
                    setup_error: None,
                    scenarios: vec![
                        scenario("TC01", Outcome::Passed),
                        scenario(
                            "TC02",
                            Outcome::Failed {
                                error: "boom".to_string(),
                            },
                        ),
                    ],
                    duration_ms: 10,
                },
                SuiteResult {
                    name: "posts".to_string(),
                    setup_error: Some("no user".to_string()),
                    scenarios: vec![scenario(
                        "TC01",
                        Outcome::Skipped {
                            reason: "setup failed".to_string(),
                        },
                    )],
                    duration_ms: 1,
                },
            ],
        }
    }

    #[test]
    fn report_counts_outcomes() {
        let report = report();
        assert_eq!(report.total(), 3);
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.skipped(), 1);
        assert!(!report.success());
    }

    #[test]
    fn failures_name_their_suite() {
        let report = report();
        let failures: Vec<_> = report
            .failures()
            .map(|(suite, s)| (suite.name.as_str(), s.id.as_str()))
            .collect();
        assert_eq!(failures, vec![("users", "TC02")]);
    }

    #[test]
    fn setup_error_fails_suite_without_failed_scenarios() {
        let report = report();
        assert!(!report.suites[1].success());
        assert_eq!(report.suites[1].failed_count(), 0);
    }

    #[test]
    fn outcome_serializes_with_state_tag() {
        let value = serde_json::to_value(Outcome::Failed {
            error: "expected status 201, got 422".to_string(),
        })
        .unwrap();
        assert_eq!(
            value,
            serde_json::json!({"state": "failed", "error": "expected status 201, got 422"})
        );
    }
}
