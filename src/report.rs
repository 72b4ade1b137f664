//! Run hooks and the JSON run summary.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::config::ReportConfig;
use crate::error::Result;
use crate::scenario::RunReport;

/// What is about to run.
#[derive(Debug, Clone)]
pub struct RunDetails {
    pub base_url: String,
    pub suites: Vec<&'static str>,
    pub started_at: DateTime<Utc>,
}

/// Hook points around a full run.
#[async_trait]
pub trait RunHooks: Send + Sync {
    async fn before_run(&self, _details: &RunDetails) -> Result<()> {
        Ok(())
    }

    async fn after_run(&self, _report: &RunReport) -> Result<()> {
        Ok(())
    }
}

/// Logs run start and totals through `tracing`.
pub struct LogHooks;

#[async_trait]
impl RunHooks for LogHooks {
    async fn before_run(&self, details: &RunDetails) -> Result<()> {
        tracing::info!(
            base_url = %details.base_url,
            suites = ?details.suites,
            "starting run"
        );
        Ok(())
    }

    async fn after_run(&self, report: &RunReport) -> Result<()> {
        tracing::info!(
            total = report.total(),
            passed = report.passed(),
            failed = report.failed(),
            skipped = report.skipped(),
            "run finished"
        );
        Ok(())
    }
}

/// Writes the [`RunReport`] as pretty JSON into the report directory.
pub struct JsonReport {
    config: ReportConfig,
}

impl JsonReport {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Target file for a run that started at `started_at`.
    ///
    /// With `overwrite` every run writes `report.json`; otherwise the file name
    /// carries the start time (`report_mmddyyyy_HHMMSS.json`).
    pub fn path_for(&self, started_at: DateTime<Utc>) -> PathBuf {
        let file = if self.config.overwrite {
            "report.json".to_string()
        } else {
            format!("report_{}.json", started_at.format("%m%d%Y_%H%M%S"))
        };
        self.config.dir.join(file)
    }
}

#[async_trait]
impl RunHooks for JsonReport {
    async fn after_run(&self, report: &RunReport) -> Result<()> {
        tokio::fs::create_dir_all(&self.config.dir).await?;

        let path = self.path_for(report.started_at);
        let json = serde_json::to_string_pretty(report)?;
        tokio::fs::write(&path, json).await?;

        tracing::info!(path = %path.display(), "wrote run report");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    use crate::scenario::{Outcome, ScenarioResult, SuiteResult};

    fn started() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 5, 7).unwrap()
    }

    fn report() -> RunReport {
        RunReport {
            base_url: "http://localhost".to_string(),
            started_at: started(),
            finished_at: started(),
            suites: vec![SuiteResult {
                name: "todos".to_string(),
                setup_error: None,
                scenarios: vec![ScenarioResult {
                    id: "TC01".to_string(),
                    title: "Create valid todo".to_string(),
                    outcome: Outcome::Passed,
                    duration_ms: 12,
                }],
                duration_ms: 12,
            }],
        }
    }

    #[test]
    fn timestamped_file_name() {
        let hooks = JsonReport::new(ReportConfig {
            enabled: true,
            dir: PathBuf::from("reports"),
            overwrite: false,
        });
        assert_eq!(
            hooks.path_for(started()),
            PathBuf::from("reports/report_10162026_090507.json")
        );
    }

    #[tokio::test]
    async fn writes_report_json() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested");
        let hooks = JsonReport::new(ReportConfig {
            enabled: true,
            dir: dir.clone(),
            overwrite: true,
        });

        hooks.after_run(&report()).await.unwrap();

        let written = std::fs::read_to_string(dir.join("report.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["suites"][0]["name"], "todos");
        assert_eq!(value["suites"][0]["scenarios"][0]["outcome"]["state"], "passed");
    }
}
