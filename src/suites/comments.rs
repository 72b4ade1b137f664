//! Comments resource. Setup creates a user and a post to comment on.

use async_trait::async_trait;
use serde_json::json;

use crate::error::{Result, StepExt};
use crate::expect;
use crate::fixture::{
    generate_comment_fixture, generate_post_fixture, generate_user_fixture, CommentFixture,
};
use crate::http::{ApiClient, ApiRequest};
use crate::model::{Comment, Post, User, RESOURCE_NOT_FOUND};
use crate::resource::{Created, Resource};
use crate::scenario::{ScenarioCase, Suite, SuiteContext};

use super::{send_refused, MISSING_ID};

const COMMENT_FIELDS: &[&str] = &["id", "post_id", "name", "email", "body"];

/// Longest accepted comment name is 255 characters.
const OVERSIZED_NAME_LEN: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentCase {
    CreateValid,
    CreateInvalidEmail,
    ListAll,
    GetByInvalidId,
    GetByValidId,
    CreateMissingFields,
    CreateInvalidPostId,
    CreateLongName,
    CreateLongBody,
    FilterByPostId,
    UpdateBody,
    UpdateInvalidEmail,
    Delete,
    DeleteInvalidId,
}

impl ScenarioCase for CommentCase {
    const ALL: &'static [Self] = &[
        CommentCase::CreateValid,
        CommentCase::CreateInvalidEmail,
        CommentCase::ListAll,
        CommentCase::GetByInvalidId,
        CommentCase::GetByValidId,
        CommentCase::CreateMissingFields,
        CommentCase::CreateInvalidPostId,
        CommentCase::CreateLongName,
        CommentCase::CreateLongBody,
        CommentCase::FilterByPostId,
        CommentCase::UpdateBody,
        CommentCase::UpdateInvalidEmail,
        CommentCase::Delete,
        CommentCase::DeleteInvalidId,
    ];

    fn id(&self) -> &'static str {
        match self {
            CommentCase::CreateValid => "TC01",
            CommentCase::CreateInvalidEmail => "TC02",
            CommentCase::ListAll => "TC03",
            CommentCase::GetByInvalidId => "TC04",
            CommentCase::GetByValidId => "TC05",
            CommentCase::CreateMissingFields => "TC06",
            CommentCase::CreateInvalidPostId => "TC07",
            CommentCase::CreateLongName => "TC08",
            CommentCase::CreateLongBody => "TC09",
            CommentCase::FilterByPostId => "TC10",
            CommentCase::UpdateBody => "TC11",
            CommentCase::UpdateInvalidEmail => "TC12",
            CommentCase::Delete => "TC13",
            CommentCase::DeleteInvalidId => "TC14",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            CommentCase::CreateValid => "Create comment with valid data",
            CommentCase::CreateInvalidEmail => "Create comment with invalid email",
            CommentCase::ListAll => "Get all comments",
            CommentCase::GetByInvalidId => "Get comment by invalid id",
            CommentCase::GetByValidId => "Get comment by valid id",
            CommentCase::CreateMissingFields => "Create comment with missing required fields",
            CommentCase::CreateInvalidPostId => "Create comment with non-numeric post id",
            CommentCase::CreateLongName => "Create comment with very long name",
            CommentCase::CreateLongBody => "Create comment with very long body",
            CommentCase::FilterByPostId => "Get comments filtered by post id",
            CommentCase::UpdateBody => "Update comment body",
            CommentCase::UpdateInvalidEmail => "Update comment with invalid email",
            CommentCase::Delete => "Delete comment with valid id",
            CommentCase::DeleteInvalidId => "Delete comment with invalid id",
        }
    }
}

pub struct CommentsSuite;

#[async_trait]
impl Suite for CommentsSuite {
    type Case = CommentCase;

    fn name(&self) -> &'static str {
        "comments"
    }

    async fn setup(&self, ctx: &mut SuiteContext) -> Result<()> {
        let user = ctx
            .client
            .create::<User, _>(&generate_user_fixture())
            .await
            .step("create post owner")?;
        let post = ctx
            .client
            .create::<Post, _>(&generate_post_fixture().for_user(user.id))
            .await
            .step("create post")?;

        ctx.user_id = Some(user.id);
        ctx.post_id = Some(post.id);
        Ok(())
    }

    async fn run_case(&self, case: CommentCase, ctx: &SuiteContext) -> Result<()> {
        let client = &ctx.client;
        let post_id = ctx.post_id()?;
        match case {
            CommentCase::CreateValid => create_valid(client, post_id).await,
            CommentCase::CreateInvalidEmail => create_invalid_email(client, post_id).await,
            CommentCase::ListAll => list_all(client).await,
            CommentCase::GetByInvalidId => get_by_invalid_id(client).await,
            CommentCase::GetByValidId => get_by_valid_id(client, post_id).await,
            CommentCase::CreateMissingFields => create_missing_fields(client, post_id).await,
            CommentCase::CreateInvalidPostId => create_invalid_post_id(client).await,
            CommentCase::CreateLongName => create_long_name(client, post_id).await,
            CommentCase::CreateLongBody => create_long_body(client, post_id).await,
            CommentCase::FilterByPostId => filter_by_post_id(client, post_id).await,
            CommentCase::UpdateBody => update_body(client, post_id).await,
            CommentCase::UpdateInvalidEmail => update_invalid_email(client, post_id).await,
            CommentCase::Delete => delete(client, post_id).await,
            CommentCase::DeleteInvalidId => delete_invalid_id(client).await,
        }
    }
}

async fn create_comment(client: &ApiClient, post_id: u64) -> Result<Created<Comment>> {
    client
        .create::<Comment, _>(&generate_comment_fixture().for_post(post_id))
        .await
        .step("create comment")
}

async fn create_refused(client: &ApiClient, body: serde_json::Value) -> Result<()> {
    let request = ApiRequest::post(Resource::Comments.path()).json_value(body);
    send_refused(client, request, 422).await?;
    Ok(())
}

async fn create_valid(client: &ApiClient, post_id: u64) -> Result<()> {
    let payload = generate_comment_fixture().for_post(post_id);
    let created = client.create::<Comment, _>(&payload).await?;

    expect::has_fields(&created.response.body, &["id"])?;
    expect::includes(&created.response.body, &serde_json::to_value(&payload)?)?;
    Ok(())
}

async fn create_invalid_email(client: &ApiClient, post_id: u64) -> Result<()> {
    let comment = CommentFixture {
        email: "invalidemail".to_string(),
        ..generate_comment_fixture()
    };
    create_refused(client, serde_json::to_value(comment.for_post(post_id))?).await
}

async fn list_all(client: &ApiClient) -> Result<()> {
    let response = client.list(Resource::Comments, &[]).await?;
    let comments = expect::array(&response.body)?;

    expect::each(comments, |comment| expect::has_fields(comment, COMMENT_FIELDS))?;
    response.json::<Vec<Comment>>()?;
    Ok(())
}

async fn get_by_invalid_id(client: &ApiClient) -> Result<()> {
    let response = client.probe(Resource::Comments, MISSING_ID).await?;
    expect::status(&response, 404)?;
    expect::message(&response.body, RESOURCE_NOT_FOUND)?;
    Ok(())
}

async fn get_by_valid_id(client: &ApiClient, post_id: u64) -> Result<()> {
    let payload = generate_comment_fixture().for_post(post_id);
    let expected = serde_json::to_value(&payload)?;
    let created = client
        .create::<Comment, _>(&payload)
        .await
        .step("create comment")?;
    expect::includes(&created.response.body, &expected)?;

    let response = client
        .read(Resource::Comments, created.id)
        .await
        .step("read comment")?;

    expect::field_eq(&response.body, "id", created.id)?;
    expect::includes(&response.body, &expected)?;
    Ok(())
}

async fn create_missing_fields(client: &ApiClient, post_id: u64) -> Result<()> {
    create_refused(client, json!({"post_id": post_id})).await
}

async fn create_invalid_post_id(client: &ApiClient) -> Result<()> {
    let comment = generate_comment_fixture();
    create_refused(
        client,
        json!({
            "post_id": "abc",
            "name": comment.name,
            "email": comment.email,
            "body": comment.body,
        }),
    )
    .await
}

async fn create_long_name(client: &ApiClient, post_id: u64) -> Result<()> {
    let comment = CommentFixture {
        name: "A".repeat(OVERSIZED_NAME_LEN),
        ..generate_comment_fixture()
    };
    create_refused(client, serde_json::to_value(comment.for_post(post_id))?).await
}

async fn create_long_body(client: &ApiClient, post_id: u64) -> Result<()> {
    let comment = CommentFixture {
        body: "BC".repeat(5000),
        ..generate_comment_fixture()
    };
    create_refused(client, serde_json::to_value(comment.for_post(post_id))?).await
}

async fn filter_by_post_id(client: &ApiClient, post_id: u64) -> Result<()> {
    // guarantees at least one match
    create_comment(client, post_id).await?;

    let post_filter = post_id.to_string();
    let response = client
        .list(Resource::Comments, &[("post_id", post_filter.as_str())])
        .await
        .step("filter by post id")?;
    let comments = expect::array(&response.body)?;

    expect::non_empty(comments)?;
    expect::each(comments, |comment| {
        expect::has_fields(comment, &["name", "email", "body"])?;
        expect::field_eq(comment, "post_id", post_id)
    })?;
    Ok(())
}

async fn update_body(client: &ApiClient, post_id: u64) -> Result<()> {
    let created = create_comment(client, post_id).await?;

    let response = client
        .update(Resource::Comments, created.id, &json!({"body": "Updated comment text"}))
        .await
        .step("update body")?;

    // only the body changes
    let original = &created.entity;
    expect::field_eq(&response.body, "id", created.id)?;
    expect::field_eq(&response.body, "post_id", post_id)?;
    expect::field_eq(&response.body, "name", original.name.as_str())?;
    expect::field_eq(&response.body, "email", original.email.as_str())?;
    expect::field_eq(&response.body, "body", "Updated comment text")?;
    Ok(())
}

async fn update_invalid_email(client: &ApiClient, post_id: u64) -> Result<()> {
    let created = create_comment(client, post_id).await?;

    let request = ApiRequest::put(Resource::Comments.item_path(created.id))
        .json_value(json!({"email": "invalid email"}));
    send_refused(client, request, 422)
        .await
        .step("update email")?;
    Ok(())
}

async fn delete(client: &ApiClient, post_id: u64) -> Result<()> {
    let created = create_comment(client, post_id).await?;

    client
        .remove(Resource::Comments, created.id)
        .await
        .step("delete comment")?;

    let response = client
        .probe(Resource::Comments, created.id)
        .await
        .step("read deleted comment")?;
    expect::status(&response, 404)?;
    expect::message(&response.body, RESOURCE_NOT_FOUND)?;
    Ok(())
}

async fn delete_invalid_id(client: &ApiClient) -> Result<()> {
    let request = ApiRequest::delete(Resource::Comments.item_path(MISSING_ID));
    send_refused(client, request, 404).await?;
    Ok(())
}
