//! GoRest contract suite CLI
//!
//! Runs the selected resource suites against the configured API and exits
//! non-zero when any scenario fails.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use contract_suite::{
    ApiClient, JsonReport, LogHooks, RunReport, Runner, SuiteConfig, SuiteKind, Validate,
};

#[derive(Debug, Parser)]
#[command(name = "gorest-contract-suite", version, about)]
struct Cli {
    /// TOML config file. BASE_URL, API_TOKEN and friends override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Suite to run; repeat to select several. Defaults to all.
    #[arg(short, long = "suite", value_enum)]
    suites: Vec<SuiteKind>,

    /// Print the scenario inventory and exit.
    #[arg(long)]
    list: bool,

    /// Skip writing the JSON report.
    #[arg(long)]
    no_report: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let suites = if cli.suites.is_empty() {
        SuiteKind::ALL.to_vec()
    } else {
        cli.suites.clone()
    };

    if cli.list {
        print_inventory(&suites);
        return ExitCode::SUCCESS;
    }

    match run(&cli, &suites).await {
        Ok(report) => {
            print_summary(&report);
            if report.success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Run failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, suites: &[SuiteKind]) -> contract_suite::Result<RunReport> {
    let config = SuiteConfig::load(cli.config.as_deref())?;
    for warning in config.validate().into_result()? {
        tracing::warn!("{}", warning);
    }
    tracing::debug!(?config, "loaded config");

    let client = ApiClient::from_config(&config)?;
    let mut runner = Runner::new(client).with_hook(LogHooks);
    if config.report.enabled && !cli.no_report {
        runner = runner.with_hook(JsonReport::new(config.report.clone()));
    }

    runner.run(suites).await
}

fn print_inventory(suites: &[SuiteKind]) {
    for kind in suites {
        println!("{}", kind.name());
        for (id, title) in kind.cases() {
            println!("  {}  {}", id, title);
        }
    }
}

fn print_summary(report: &RunReport) {
    println!("\n{}", "=".repeat(60));
    println!("Contract Run: {}", report.base_url);
    println!("{}", "=".repeat(60));
    println!();

    for suite in &report.suites {
        println!(
            "{:<10} passed {:>2}  failed {:>2}  skipped {:>2}  ({} ms)",
            suite.name,
            suite.passed_count(),
            suite.failed_count(),
            suite.skipped_count(),
            suite.duration_ms
        );
        if let Some(error) = &suite.setup_error {
            println!("  setup failed: {}", error);
        }
    }

    let failures: Vec<_> = report.failures().collect();
    if !failures.is_empty() {
        println!();
        println!("Failures:");
        for (suite, scenario) in failures {
            if let contract_suite::Outcome::Failed { error } = &scenario.outcome {
                println!("  {}/{} {}: {}", suite.name, scenario.id, scenario.title, error);
            }
        }
    }

    println!();
    println!(
        "Total: {}  Passed: {}  Failed: {}  Skipped: {}",
        report.total(),
        report.passed(),
        report.failed(),
        report.skipped()
    );
}
