//! Users resource: create, read, update, delete, filters, auth.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use crate::error::{Result, StepExt};
use crate::expect;
use crate::fixture::{generate_user_fixture, Gender, UserFixture, UserStatus};
use crate::http::{ApiClient, ApiRequest};
use crate::model::{
    User, Violation, ALREADY_TAKEN, AUTHENTICATION_FAILED, CANT_BE_BLANK, GENDER_CANT_BE_BLANK,
    RESOURCE_NOT_FOUND,
};
use crate::resource::Resource;
use crate::scenario::{ScenarioCase, Suite, SuiteContext};

use super::{send_refused, MISSING_ID};

const USER_FIELDS: &[&str] = &["id", "name", "email", "gender", "status"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCase {
    CreateValid,
    CreateMissingFields,
    ListAll,
    GetByValidId,
    GetByInvalidId,
    UpdateName,
    Delete,
    DuplicateEmail,
    FilterByGender,
    FilterByStatus,
    FilterWithoutMatches,
    CreateWithoutToken,
    UpdateInvalidEmail,
    DeleteInvalidId,
}

impl ScenarioCase for UserCase {
    const ALL: &'static [Self] = &[
        UserCase::CreateValid,
        UserCase::CreateMissingFields,
        UserCase::ListAll,
        UserCase::GetByValidId,
        UserCase::GetByInvalidId,
        UserCase::UpdateName,
        UserCase::Delete,
        UserCase::DuplicateEmail,
        UserCase::FilterByGender,
        UserCase::FilterByStatus,
        UserCase::FilterWithoutMatches,
        UserCase::CreateWithoutToken,
        UserCase::UpdateInvalidEmail,
        UserCase::DeleteInvalidId,
    ];

    fn id(&self) -> &'static str {
        match self {
            UserCase::CreateValid => "TC01",
            UserCase::CreateMissingFields => "TC02",
            UserCase::ListAll => "TC03",
            UserCase::GetByValidId => "TC04",
            UserCase::GetByInvalidId => "TC05",
            UserCase::UpdateName => "TC06",
            UserCase::Delete => "TC07",
            UserCase::DuplicateEmail => "TC08",
            UserCase::FilterByGender => "TC09",
            UserCase::FilterByStatus => "TC10",
            UserCase::FilterWithoutMatches => "TC11",
            UserCase::CreateWithoutToken => "TC12",
            UserCase::UpdateInvalidEmail => "TC13",
            UserCase::DeleteInvalidId => "TC14",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            UserCase::CreateValid => "Create user with valid data",
            UserCase::CreateMissingFields => "Create user with missing fields",
            UserCase::ListAll => "Get all users",
            UserCase::GetByValidId => "Get user by valid id",
            UserCase::GetByInvalidId => "Get user by invalid id",
            UserCase::UpdateName => "Update user name only",
            UserCase::Delete => "Delete user by id",
            UserCase::DuplicateEmail => "Create user with duplicate email",
            UserCase::FilterByGender => "Filter users by gender",
            UserCase::FilterByStatus => "Filter users by status",
            UserCase::FilterWithoutMatches => "Filter users by unknown status",
            UserCase::CreateWithoutToken => "Create user without token",
            UserCase::UpdateInvalidEmail => "Update user with malformed email",
            UserCase::DeleteInvalidId => "Delete user by invalid id",
        }
    }
}

/// Users suite. Needs no shared setup.
pub struct UsersSuite;

#[async_trait]
impl Suite for UsersSuite {
    type Case = UserCase;

    fn name(&self) -> &'static str {
        "users"
    }

    async fn run_case(&self, case: UserCase, ctx: &SuiteContext) -> Result<()> {
        let client = &ctx.client;
        match case {
            UserCase::CreateValid => create_valid(client).await,
            UserCase::CreateMissingFields => create_missing_fields(client).await,
            UserCase::ListAll => list_all(client).await,
            UserCase::GetByValidId => get_by_valid_id(client).await,
            UserCase::GetByInvalidId => get_by_invalid_id(client).await,
            UserCase::UpdateName => update_name(client).await,
            UserCase::Delete => delete(client).await,
            UserCase::DuplicateEmail => duplicate_email(client).await,
            UserCase::FilterByGender => filter_by_gender(client).await,
            UserCase::FilterByStatus => filter_by_status(client).await,
            UserCase::FilterWithoutMatches => filter_without_matches(client).await,
            UserCase::CreateWithoutToken => create_without_token(client).await,
            UserCase::UpdateInvalidEmail => update_invalid_email(client).await,
            UserCase::DeleteInvalidId => delete_invalid_id(client).await,
        }
    }
}

/// Fixed user from the documented example, with a timestamped e-mail.
fn kreetika() -> UserFixture {
    UserFixture {
        name: "Kreetika Bhetuwal".to_string(),
        gender: Gender::Female,
        email: format!("kreetika{}@gmail.com", Utc::now().timestamp_millis()),
        status: UserStatus::Active,
    }
}

async fn create_valid(client: &ApiClient) -> Result<()> {
    let fixture = generate_user_fixture();
    let response = client
        .send(ApiRequest::post(Resource::Users.path()).json(&fixture)?)
        .await?;

    expect::status(&response, 201)?;
    expect::includes(&response.body, &serde_json::to_value(&fixture)?)?;
    Ok(())
}

async fn create_missing_fields(client: &ApiClient) -> Result<()> {
    let request = ApiRequest::post(Resource::Users.path()).json_value(json!({}));
    let response = send_refused(client, request, 422).await?;

    expect::violations_include(
        &response.body,
        &[
            Violation::new("email", CANT_BE_BLANK),
            Violation::new("name", CANT_BE_BLANK),
            Violation::new("gender", GENDER_CANT_BE_BLANK),
            Violation::new("status", CANT_BE_BLANK),
        ],
    )?;
    Ok(())
}

async fn list_all(client: &ApiClient) -> Result<()> {
    let response = client.list(Resource::Users, &[]).await?;
    let users = expect::array(&response.body)?;

    expect::non_empty(users)?;
    expect::each(users, |user| expect::has_fields(user, USER_FIELDS))?;
    response.json::<Vec<User>>()?;
    Ok(())
}

async fn get_by_valid_id(client: &ApiClient) -> Result<()> {
    let created = client
        .create::<User, _>(&generate_user_fixture())
        .await
        .step("create user")?;

    let response = client
        .read(Resource::Users, created.id)
        .await
        .step("read user")?;

    expect::field_eq(&response.body, "id", created.id)?;
    expect::includes(&response.body, &created.response.body)?;
    Ok(())
}

async fn get_by_invalid_id(client: &ApiClient) -> Result<()> {
    let response = client.probe(Resource::Users, MISSING_ID).await?;
    expect::status(&response, 404)?;
    expect::message(&response.body, RESOURCE_NOT_FOUND)?;
    Ok(())
}

async fn update_name(client: &ApiClient) -> Result<()> {
    let initial = kreetika();
    let created = client
        .create::<User, _>(&initial)
        .await
        .step("create user")?;

    let response = client
        .update(Resource::Users, created.id, &json!({"name": "KreetikaUpdated"}))
        .await
        .step("update name")?;

    expect::field_eq(&response.body, "id", created.id)?;
    expect::field_eq(&response.body, "name", "KreetikaUpdated")?;
    // partial update leaves the other fields alone
    expect::field_eq(&response.body, "gender", initial.gender.as_str())?;
    expect::field_eq(&response.body, "status", initial.status.as_str())?;
    Ok(())
}

async fn delete(client: &ApiClient) -> Result<()> {
    let created = client
        .create::<User, _>(&generate_user_fixture())
        .await
        .step("create user")?;

    client
        .remove(Resource::Users, created.id)
        .await
        .step("delete user")?;

    // gone for good
    let response = client
        .probe(Resource::Users, created.id)
        .await
        .step("read deleted user")?;
    expect::status(&response, 404)?;
    expect::message(&response.body, RESOURCE_NOT_FOUND)?;
    Ok(())
}

async fn duplicate_email(client: &ApiClient) -> Result<()> {
    let user = kreetika();
    client
        .create::<User, _>(&user)
        .await
        .step("create first user")?;

    // same payload again, e-mail included

    let request = ApiRequest::post(Resource::Users.path()).json(&user)?;
    let response = send_refused(client, request, 422)
        .await
        .step("create duplicate")?;

    expect::first_violation_message(&response.body, ALREADY_TAKEN)?;
    Ok(())
}

async fn filter_by_gender(client: &ApiClient) -> Result<()> {
    let fixture = UserFixture {
        gender: Gender::Female,
        ..generate_user_fixture()
    };
    client
        .create::<User, _>(&fixture)
        .await
        .step("create female user")?;

    // every returned user must match, not just one

    let gender = Gender::Female.as_str();
    let response = client
        .list(Resource::Users, &[("gender", gender)])
        .await
        .step("filter by gender")?;
    let users = expect::array(&response.body)?;

    expect::non_empty(users)?;
    expect::each(users, |user| expect::field_eq(user, "gender", gender))?;
    Ok(())
}

async fn filter_by_status(client: &ApiClient) -> Result<()> {
    let fixture = UserFixture {
        status: UserStatus::Active,
        ..generate_user_fixture()
    };
    client
        .create::<User, _>(&fixture)
        .await
        .step("create active user")?;

    let status = UserStatus::Active.as_str();
    let response = client
        .list(Resource::Users, &[("status", status)])
        .await
        .step("filter by status")?;
    let users = expect::array(&response.body)?;

    expect::non_empty(users)?;
    expect::each(users, |user| expect::field_eq(user, "status", status))?;
    Ok(())
}

async fn filter_without_matches(client: &ApiClient) -> Result<()> {
    let response = client.list(Resource::Users, &[("status", "alive")]).await?;
    expect::empty(expect::array(&response.body)?)?;
    Ok(())
}

async fn create_without_token(client: &ApiClient) -> Result<()> {
    let request = ApiRequest::post(Resource::Users.path())
        .json(&generate_user_fixture())?
        .anonymous();
    let response = send_refused(client, request, 401).await?;

    expect::message(&response.body, AUTHENTICATION_FAILED)?;
    Ok(())
}

async fn update_invalid_email(client: &ApiClient) -> Result<()> {
    let created = client
        .create::<User, _>(&generate_user_fixture())
        .await
        .step("create user")?;

    let request = ApiRequest::put(Resource::Users.item_path(created.id))
        .json_value(json!({"email": "invalid email"}));
    send_refused(client, request, 422)
        .await
        .step("update email")?;
    Ok(())
}

async fn delete_invalid_id(client: &ApiClient) -> Result<()> {
    let request = ApiRequest::delete(Resource::Users.item_path(MISSING_ID));
    let response = send_refused(client, request, 404).await?;

    expect::message(&response.body, RESOURCE_NOT_FOUND)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_user_matches_documented_payload() {
        let user = serde_json::to_value(kreetika()).unwrap();

        assert_eq!(user["name"], "Kreetika Bhetuwal");
        assert_eq!(user["gender"], "female");
        assert_eq!(user["status"], "active");
        let email = user["email"].as_str().unwrap();
        assert!(email.starts_with("kreetika") && email.ends_with("@gmail.com"));
    }

    #[test]
    fn titles_are_distinct() {
        let titles: std::collections::HashSet<_> =
            UserCase::ALL.iter().map(|c| c.title()).collect();
        assert_eq!(titles.len(), UserCase::ALL.len());
    }
}
