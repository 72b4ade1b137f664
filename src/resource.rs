//! Typed operations on the four API resources.
//!
//! These are the building blocks of chained scenarios: a create step returns a
//! [`Created`] carrying the server-assigned id, which later steps take as
//! input instead of re-reading it from raw JSON.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::expect;
use crate::http::{ApiClient, ApiRequest, ApiResponse};
use crate::model::{Comment, Post, Todo, User};

const JSON: &str = "application/json";

/// REST collections exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Users,
    Posts,
    Comments,
    Todos,
}

impl Resource {
    /// Collection path, e.g. `/users`.
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Users => "/users",
            Resource::Posts => "/posts",
            Resource::Comments => "/comments",
            Resource::Todos => "/todos",
        }
    }

    /// Member path, e.g. `/users/42`.
    pub fn item_path(&self, id: u64) -> String {
        format!("{}/{}", self.path(), id)
    }
}

/// A decoded entity that lives in one resource collection.
pub trait Entity: DeserializeOwned + Send {
    const RESOURCE: Resource;

    fn id(&self) -> u64;
}

impl Entity for User {
    const RESOURCE: Resource = Resource::Users;

    fn id(&self) -> u64 {
        self.id
    }
}

impl Entity for Post {
    const RESOURCE: Resource = Resource::Posts;

    fn id(&self) -> u64 {
        self.id
    }
}

impl Entity for Comment {
    const RESOURCE: Resource = Resource::Comments;

    fn id(&self) -> u64 {
        self.id
    }
}

impl Entity for Todo {
    const RESOURCE: Resource = Resource::Todos;

    fn id(&self) -> u64 {
        self.id
    }
}

/// Result of a successful create step.
#[derive(Debug, Clone)]
pub struct Created<T> {
    pub id: u64,
    pub entity: T,
    pub response: ApiResponse,
}

impl ApiClient {
    /// `POST` to `T`'s collection, expecting 201 and a decodable body.
    pub async fn create<T, B>(&self, body: &B) -> Result<Created<T>>
    where
        T: Entity,
        B: Serialize + ?Sized,
    {
        let response = self
            .send(ApiRequest::post(T::RESOURCE.path()).json(body)?)
            .await?;
        expect::status(&response, 201)?;
        expect::content_type(&response, JSON)?;

        let entity: T = response.json()?;
        tracing::debug!(resource = T::RESOURCE.path(), id = entity.id(), "created");

        Ok(Created {
            id: entity.id(),
            entity,
            response,
        })
    }

    /// `GET` a member, expecting 200.
    pub async fn read(&self, resource: Resource, id: u64) -> Result<ApiResponse> {
        let response = self.send(ApiRequest::get(resource.item_path(id))).await?;
        expect::status(&response, 200)?;
        Ok(response)
    }

    /// `GET` a member without failing on status, for not-found checks.
    pub async fn probe(&self, resource: Resource, id: u64) -> Result<ApiResponse> {
        self.send(ApiRequest::get(resource.item_path(id)).allow_failure())
            .await
    }

    /// `PUT` a (possibly partial) update to a member, expecting 200.
    pub async fn update<B>(&self, resource: Resource, id: u64, body: &B) -> Result<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        let response = self
            .send(ApiRequest::put(resource.item_path(id)).json(body)?)
            .await?;
        expect::status(&response, 200)?;
        Ok(response)
    }

    /// `DELETE` a member, expecting 204 with an empty body.
    pub async fn remove(&self, resource: Resource, id: u64) -> Result<ApiResponse> {
        let response = self.send(ApiRequest::delete(resource.item_path(id))).await?;
        expect::status(&response, 204)?;
        expect::empty_body(&response)?;
        Ok(response)
    }

    /// `GET` a collection with optional filters, expecting 200 and a list.
    pub async fn list(&self, resource: Resource, filters: &[(&str, &str)]) -> Result<ApiResponse> {
        let mut request = ApiRequest::get(resource.path());
        for (key, value) in filters {
            request = request.query(*key, value);
        }

        let response = self.send(request).await?;
        expect::status(&response, 200)?;
        expect::content_type(&response, JSON)?;
        expect::array(&response.body)?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_paths() {
        assert_eq!(Resource::Users.path(), "/users");
        assert_eq!(Resource::Comments.item_path(17), "/comments/17");
        assert_eq!(<Todo as Entity>::RESOURCE, Resource::Todos);
    }
}
