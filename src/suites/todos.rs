//! Todos resource. Setup creates the owning user.

use async_trait::async_trait;
use serde_json::json;

use crate::error::{Result, StepExt};
use crate::expect::{self, JsonKind};
use crate::fixture::{generate_todo_fixture, generate_user_fixture, TodoFixture, TodoStatus};
use crate::http::{ApiClient, ApiRequest};
use crate::model::{Todo, User, RESOURCE_NOT_FOUND};
use crate::resource::{Created, Resource};
use crate::scenario::{ScenarioCase, Suite, SuiteContext};

use super::{send_refused, MISSING_ID};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoCase {
    CreateValid,
    CreateBlankFields,
    CreateInvalidStatus,
    ListAll,
    GetByValidId,
    GetByInvalidId,
    UpdateValid,
    UpdateInvalidId,
    Delete,
    DeleteInvalidId,
}

impl ScenarioCase for TodoCase {
    const ALL: &'static [Self] = &[
        TodoCase::CreateValid,
        TodoCase::CreateBlankFields,
        TodoCase::CreateInvalidStatus,
        TodoCase::ListAll,
        TodoCase::GetByValidId,
        TodoCase::GetByInvalidId,
        TodoCase::UpdateValid,
        TodoCase::UpdateInvalidId,
        TodoCase::Delete,
        TodoCase::DeleteInvalidId,
    ];

    fn id(&self) -> &'static str {
        match self {
            TodoCase::CreateValid => "TC01",
            TodoCase::CreateBlankFields => "TC02",
            TodoCase::CreateInvalidStatus => "TC03",
            TodoCase::ListAll => "TC04",
            TodoCase::GetByValidId => "TC05",
            TodoCase::GetByInvalidId => "TC06",
            TodoCase::UpdateValid => "TC07",
            TodoCase::UpdateInvalidId => "TC08",
            TodoCase::Delete => "TC09",
            TodoCase::DeleteInvalidId => "TC10",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            TodoCase::CreateValid => "Create valid todo",
            TodoCase::CreateBlankFields => "Create todo with missing fields",
            TodoCase::CreateInvalidStatus => "Create todo with invalid status",
            TodoCase::ListAll => "Get all todos",
            TodoCase::GetByValidId => "Get todo by valid id",
            TodoCase::GetByInvalidId => "Get todo by invalid id",
            TodoCase::UpdateValid => "Update todo with valid data",
            TodoCase::UpdateInvalidId => "Update todo with invalid id",
            TodoCase::Delete => "Delete todo with valid id",
            TodoCase::DeleteInvalidId => "Delete todo with invalid id",
        }
    }
}

pub struct TodosSuite;

#[async_trait]
impl Suite for TodosSuite {
    type Case = TodoCase;

    fn name(&self) -> &'static str {
        "todos"
    }

    async fn setup(&self, ctx: &mut SuiteContext) -> Result<()> {
        let user = ctx
            .client
            .create::<User, _>(&generate_user_fixture())
            .await
            .step("create todo owner")?;
        ctx.user_id = Some(user.id);
        Ok(())
    }

    async fn run_case(&self, case: TodoCase, ctx: &SuiteContext) -> Result<()> {
        let client = &ctx.client;
        let user_id = ctx.user_id()?;
        match case {
            TodoCase::CreateValid => create_valid(client, user_id).await,
            TodoCase::CreateBlankFields => create_blank_fields(client, user_id).await,
            TodoCase::CreateInvalidStatus => create_invalid_status(client, user_id).await,
            TodoCase::ListAll => list_all(client).await,
            TodoCase::GetByValidId => get_by_valid_id(client, user_id).await,
            TodoCase::GetByInvalidId => get_by_invalid_id(client).await,
            TodoCase::UpdateValid => update_valid(client, user_id).await,
            TodoCase::UpdateInvalidId => update_invalid_id(client).await,
            TodoCase::Delete => delete(client, user_id).await,
            TodoCase::DeleteInvalidId => delete_invalid_id(client).await,
        }
    }
}

fn pending_todo() -> TodoFixture {
    TodoFixture {
        status: TodoStatus::Pending,
        ..generate_todo_fixture()
    }
}

async fn create_todo(client: &ApiClient, user_id: u64) -> Result<Created<Todo>> {
    client
        .create::<Todo, _>(&pending_todo().for_user(user_id))
        .await
        .step("create todo")
}

async fn create_valid(client: &ApiClient, user_id: u64) -> Result<()> {
    let payload = pending_todo().for_user(user_id);
    let created = client.create::<Todo, _>(&payload).await?;

    expect::has_fields(&created.response.body, &["id"])?;
    expect::includes(&created.response.body, &serde_json::to_value(&payload)?)?;
    expect::field_eq(&created.response.body, "status", "pending")?;
    Ok(())
}

async fn create_blank_fields(client: &ApiClient, user_id: u64) -> Result<()> {
    let request = ApiRequest::post(Resource::Todos.path())
        .json_value(json!({"user_id": user_id, "title": "", "status": ""}));
    send_refused(client, request, 422).await?;
    Ok(())
}

async fn create_invalid_status(client: &ApiClient, user_id: u64) -> Result<()> {
    let request = ApiRequest::post(Resource::Todos.path()).json_value(json!({
        "user_id": user_id,
        "title": "Invalid Status Todo",
        "status": "Invalid",
    }));
    send_refused(client, request, 422).await?;
    Ok(())
}

async fn list_all(client: &ApiClient) -> Result<()> {
    let response = client.list(Resource::Todos, &[]).await?;
    let todos = expect::array(&response.body)?;

    expect::each(todos, |todo| {
        expect::field_kind(todo, "user_id", JsonKind::Number)?;
        expect::field_kind(todo, "title", JsonKind::String)?;
        expect::field_kind(todo, "status", JsonKind::String)
    })?;
    response.json::<Vec<Todo>>()?;
    Ok(())
}

async fn get_by_valid_id(client: &ApiClient, user_id: u64) -> Result<()> {
    let payload = pending_todo().for_user(user_id);
    let created = client
        .create::<Todo, _>(&payload)
        .await
        .step("create todo")?;

    let response = client
        .read(Resource::Todos, created.id)
        .await
        .step("read todo")?;

    expect::field_eq(&response.body, "id", created.id)?;
    expect::includes(&response.body, &serde_json::to_value(&payload)?)?;
    Ok(())
}

async fn get_by_invalid_id(client: &ApiClient) -> Result<()> {
    let response = client.probe(Resource::Todos, MISSING_ID).await?;
    expect::status(&response, 404)?;
    expect::message(&response.body, RESOURCE_NOT_FOUND)?;
    Ok(())
}

async fn update_valid(client: &ApiClient, user_id: u64) -> Result<()> {
    let created = create_todo(client, user_id).await?;
    let changes = json!({
        "user_id": user_id,
        "title": "ToDo after put",
        "status": "completed",
    });

    let response = client
        .update(Resource::Todos, created.id, &changes)
        .await
        .step("update todo")?;

    expect::field_eq(&response.body, "id", created.id)?;
    expect::includes(&response.body, &changes)?;
    Ok(())
}

async fn update_invalid_id(client: &ApiClient) -> Result<()> {
    let request = ApiRequest::put(Resource::Todos.item_path(MISSING_ID))
        .json_value(json!({"title": "Updated Todo", "status": "completed"}));
    let response = send_refused(client, request, 404).await?;

    expect::message(&response.body, RESOURCE_NOT_FOUND)?;
    Ok(())
}

async fn delete(client: &ApiClient, user_id: u64) -> Result<()> {
    let created = create_todo(client, user_id).await?;

    // remove() already requires 204 with an empty body
    client
        .remove(Resource::Todos, created.id)
        .await
        .step("delete todo")?;

    let response = client
        .probe(Resource::Todos, created.id)
        .await
        .step("read deleted todo")?;
    expect::status(&response, 404)?;
    expect::message(&response.body, RESOURCE_NOT_FOUND)?;
    Ok(())
}

async fn delete_invalid_id(client: &ApiClient) -> Result<()> {
    let request = ApiRequest::delete(Resource::Todos.item_path(MISSING_ID));
    let response = send_refused(client, request, 404).await?;

    expect::message(&response.body, RESOURCE_NOT_FOUND)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_todo_serializes_owner_and_status() {
        let value = serde_json::to_value(pending_todo().for_user(5)).unwrap();
        assert_eq!(value["user_id"], 5);
        assert_eq!(value["status"], "pending");
        assert!(!value["title"].as_str().unwrap().is_empty());
    }
}
