//! `/api/admin/users*`

use serde::Serialize;
use shared::models::User;

use super::{into_ack, into_data, segment};
use crate::client::HttpClient;
use crate::{ApiResponse, ClientResult};

pub struct UserApi<'a, H> {
    http: &'a H,
}

impl<'a, H: HttpClient> UserApi<'a, H> {
    pub(crate) fn new(http: &'a H) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<User>> {
        let resp: ApiResponse<Vec<User>> = self.http.get("/api/admin/users").await?;
        into_data(resp, "user list")
    }

    pub async fn get(&self, id: &str) -> ClientResult<User> {
        let resp: ApiResponse<User> = self
            .http
            .get(&format!("/api/admin/users/{}", segment(id)))
            .await?;
        into_data(resp, "user")
    }

    /// The users endpoint uses PUT, but the body still carries only changed fields.
    pub async fn update<B: Serialize + Sync>(&self, id: &str, changes: &B) -> ClientResult<()> {
        let resp = self
            .http
            .put(&format!("/api/admin/users/{}", segment(id)), changes)
            .await?;
        into_ack(resp, "user update")
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        let resp = self
            .http
            .delete(&format!("/api/admin/users/{}", segment(id)))
            .await?;
        into_ack(resp, "user delete")
    }
}
