//! Posts resource. Setup creates the owning user.

use async_trait::async_trait;
use serde_json::json;

use crate::error::{Result, StepExt};
use crate::expect::{self, JsonKind};
use crate::fixture::{generate_post_fixture, generate_user_fixture};
use crate::http::{ApiClient, ApiRequest};
use crate::model::{Post, User, RESOURCE_NOT_FOUND};
use crate::resource::{Created, Resource};
use crate::scenario::{ScenarioCase, Suite, SuiteContext};

use super::{send_refused, MISSING_ID};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostCase {
    CreateValid,
    CreateBlankFields,
    ListAll,
    GetByValidId,
    GetByInvalidId,
    UpdateValid,
    UpdateInvalidId,
    Delete,
    DeleteInvalidId,
    CreateWithExtraField,
}

impl ScenarioCase for PostCase {
    const ALL: &'static [Self] = &[
        PostCase::CreateValid,
        PostCase::CreateBlankFields,
        PostCase::ListAll,
        PostCase::GetByValidId,
        PostCase::GetByInvalidId,
        PostCase::UpdateValid,
        PostCase::UpdateInvalidId,
        PostCase::Delete,
        PostCase::DeleteInvalidId,
        PostCase::CreateWithExtraField,
    ];

    fn id(&self) -> &'static str {
        match self {
            PostCase::CreateValid => "TC01",
            PostCase::CreateBlankFields => "TC02",
            PostCase::ListAll => "TC03",
            PostCase::GetByValidId => "TC04",
            PostCase::GetByInvalidId => "TC05",
            PostCase::UpdateValid => "TC06",
            PostCase::UpdateInvalidId => "TC07",
            PostCase::Delete => "TC08",
            PostCase::DeleteInvalidId => "TC09",
            PostCase::CreateWithExtraField => "TC10",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            PostCase::CreateValid => "Create post with valid data",
            PostCase::CreateBlankFields => "Create post with blank title and body",
            PostCase::ListAll => "Get all posts",
            PostCase::GetByValidId => "Get post by valid id",
            PostCase::GetByInvalidId => "Get post by invalid id",
            PostCase::UpdateValid => "Update post with valid id",
            PostCase::UpdateInvalidId => "Update post with invalid id",
            PostCase::Delete => "Delete post with valid id",
            PostCase::DeleteInvalidId => "Delete post with invalid id",
            PostCase::CreateWithExtraField => "Create post with extra field",
        }
    }
}

pub struct PostsSuite;

#[async_trait]
impl Suite for PostsSuite {
    type Case = PostCase;

    fn name(&self) -> &'static str {
        "posts"
    }

    async fn setup(&self, ctx: &mut SuiteContext) -> Result<()> {
        let user = ctx
            .client
            .create::<User, _>(&generate_user_fixture())
            .await
            .step("create post owner")?;
        ctx.user_id = Some(user.id);
        Ok(())
    }

    async fn run_case(&self, case: PostCase, ctx: &SuiteContext) -> Result<()> {
        let client = &ctx.client;
        let user_id = ctx.user_id()?;
        match case {
            PostCase::CreateValid => create_valid(client, user_id).await,
            PostCase::CreateBlankFields => create_blank_fields(client, user_id).await,
            PostCase::ListAll => list_all(client).await,
            PostCase::GetByValidId => get_by_valid_id(client, user_id).await,
            PostCase::GetByInvalidId => get_by_invalid_id(client).await,
            PostCase::UpdateValid => update_valid(client, user_id).await,
            PostCase::UpdateInvalidId => update_invalid_id(client, user_id).await,
            PostCase::Delete => delete(client, user_id).await,
            PostCase::DeleteInvalidId => delete_invalid_id(client).await,
            PostCase::CreateWithExtraField => create_with_extra_field(client, user_id).await,
        }
    }
}

async fn create_post(client: &ApiClient, user_id: u64) -> Result<Created<Post>> {
    client
        .create::<Post, _>(&generate_post_fixture().for_user(user_id))
        .await
        .step("create post")
}

async fn create_valid(client: &ApiClient, user_id: u64) -> Result<()> {
    let payload = generate_post_fixture().for_user(user_id);
    let created = client.create::<Post, _>(&payload).await?;

    expect::field_eq(&created.response.body, "user_id", user_id)?;
    expect::includes(&created.response.body, &serde_json::to_value(&payload)?)?;
    Ok(())
}

async fn create_blank_fields(client: &ApiClient, user_id: u64) -> Result<()> {
    let request = ApiRequest::post(Resource::Posts.path())
        .json_value(json!({"user_id": user_id, "title": "", "body": ""}));
    send_refused(client, request, 422).await?;
    Ok(())
}

async fn list_all(client: &ApiClient) -> Result<()> {
    let response = client.list(Resource::Posts, &[]).await?;
    let posts = expect::array(&response.body)?;

    expect::each(posts, |post| {
        expect::field_kind(post, "id", JsonKind::Number)?;
        expect::field_kind(post, "user_id", JsonKind::Number)?;
        expect::field_kind(post, "title", JsonKind::String)?;
        expect::field_kind(post, "body", JsonKind::String)
    })?;
    response.json::<Vec<Post>>()?;
    Ok(())
}

async fn get_by_valid_id(client: &ApiClient, user_id: u64) -> Result<()> {
    let payload = generate_post_fixture().for_user(user_id);
    let created = client
        .create::<Post, _>(&payload)
        .await
        .step("create post")?;

    let response = client
        .read(Resource::Posts, created.id)
        .await
        .step("read post")?;

    expect::field_eq(&response.body, "id", created.id)?;
    expect::includes(&response.body, &serde_json::to_value(&payload)?)?;
    Ok(())
}

async fn get_by_invalid_id(client: &ApiClient) -> Result<()> {
    let response = client.probe(Resource::Posts, MISSING_ID).await?;
    expect::status(&response, 404)?;
    expect::message(&response.body, RESOURCE_NOT_FOUND)?;
    Ok(())
}

async fn update_valid(client: &ApiClient, user_id: u64) -> Result<()> {
    let created = create_post(client, user_id).await?;
    let changes = json!({
        "user_id": user_id,
        "title": "Updated Title",
        "body": "Updated Content",
    });

    let response = client
        .update(Resource::Posts, created.id, &changes)
        .await
        .step("update post")?;

    expect::field_eq(&response.body, "id", created.id)?;
    expect::includes(&response.body, &changes)?;
    Ok(())
}

async fn update_invalid_id(client: &ApiClient, user_id: u64) -> Result<()> {
    let request = ApiRequest::put(Resource::Posts.item_path(MISSING_ID))
        .json(&generate_post_fixture().for_user(user_id))?;
    send_refused(client, request, 404).await?;
    Ok(())
}

async fn delete(client: &ApiClient, user_id: u64) -> Result<()> {
    let created = create_post(client, user_id).await?;

    client
        .remove(Resource::Posts, created.id)
        .await
        .step("delete post")?;

    let response = client
        .probe(Resource::Posts, created.id)
        .await
        .step("read deleted post")?;
    expect::status(&response, 404)?;
    expect::message(&response.body, RESOURCE_NOT_FOUND)?;
    Ok(())
}

async fn delete_invalid_id(client: &ApiClient) -> Result<()> {
    let request = ApiRequest::delete(Resource::Posts.item_path(MISSING_ID));
    send_refused(client, request, 404).await?;
    Ok(())
}

async fn create_with_extra_field(client: &ApiClient, user_id: u64) -> Result<()> {
    let post = generate_post_fixture();
    let mut body = serde_json::to_value(post.clone().for_user(user_id))?;
    // unknown to the API, expected to be ignored
    body["role"] = json!("Admin");

    let created = client.create::<Post, _>(&body).await?;

    expect::field_eq(&created.response.body, "user_id", user_id)?;
    expect::field_eq(&created.response.body, "title", post.title.as_str())?;
    expect::field_eq(&created.response.body, "body", post.body.as_str())?;
    Ok(())
}
