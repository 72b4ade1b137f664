//! Live contract tests.
//!
//! These run the suites against a real API and are ignored by default.
//! They require:
//! - `BASE_URL` pointing at the API root, e.g. `https://gorest.co.in/public/v2`
//! - `API_TOKEN` with write access
//!
//! Run with: `cargo test --test live_suites -- --ignored`
//! Run specific: `cargo test --test live_suites users -- --ignored`

use contract_suite::{
    ApiClient, ApiRequest, Gender, Outcome, Resource, Runner, StepExt, SuiteConfig, SuiteKind,
    SuiteResult, User, UserFixture, UserStatus, Validate,
};

fn live_client() -> ApiClient {
    let config = SuiteConfig::load(None).unwrap();
    config
        .validate()
        .into_result()
        .expect("BASE_URL must be set for live tests");
    ApiClient::from_config(&config).unwrap()
}

fn print_result(result: &SuiteResult) {
    println!("\n=== Suite Result ===");
    println!("Suite: {}", result.name);
    println!("Passed: {}", result.passed_count());
    println!("Failed: {}", result.failed_count());
    println!("Skipped: {}", result.skipped_count());
    println!("Duration: {} ms", result.duration_ms);

    if let Some(error) = &result.setup_error {
        println!("Setup error: {}", error);
    }

    for scenario in &result.scenarios {
        if let Outcome::Failed { error } = &scenario.outcome {
            println!("  - {} {}: {}", scenario.id, scenario.title, error);
        }
    }
}

async fn run_live(kind: SuiteKind) {
    let runner = Runner::new(live_client());
    let result = kind.run(&runner).await;
    print_result(&result);
    assert!(result.success(), "{} suite had failures", kind.name());
}

#[tokio::test]
#[ignore]
async fn users() {
    run_live(SuiteKind::Users).await;
}

#[tokio::test]
#[ignore]
async fn posts() {
    run_live(SuiteKind::Posts).await;
}

#[tokio::test]
#[ignore]
async fn comments() {
    run_live(SuiteKind::Comments).await;
}

#[tokio::test]
#[ignore]
async fn todos() {
    run_live(SuiteKind::Todos).await;
}

fn timestamped_user() -> UserFixture {
    UserFixture {
        name: "Kreetika Bhetuwal".to_string(),
        gender: Gender::Female,
        email: format!("kreetika{}@gmail.com", chrono::Utc::now().timestamp_millis()),
        status: UserStatus::Active,
    }
}

#[tokio::test]
#[ignore]
async fn users_update_name_keeps_other_fields() {
    let client = live_client();
    let user = timestamped_user();

    let created = client
        .create::<User, _>(&user)
        .await
        .step("create user")
        .unwrap();
    let response = client
        .update(
            Resource::Users,
            created.id,
            &serde_json::json!({"name": "KreetikaUpdated"}),
        )
        .await
        .unwrap();

    let updated: User = response.json().unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "KreetikaUpdated");
    assert_eq!(updated.email, user.email);
    assert_eq!(updated.gender, user.gender);
    assert_eq!(updated.status, user.status);
}

#[tokio::test]
#[ignore]
async fn users_duplicate_email_is_refused() {
    let client = live_client();
    let user = timestamped_user();

    client.create::<User, _>(&user).await.unwrap();
    let response = client
        .send(
            ApiRequest::post(Resource::Users.path())
                .json(&user)
                .unwrap()
                .allow_failure(),
        )
        .await
        .unwrap();

    assert_eq!(response.status, 422);
    assert_eq!(response.body[0]["field"], "email");
    assert_eq!(response.body[0]["message"], "has already been taken");
}
