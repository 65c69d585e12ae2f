//! User administration: list, edit and delete accounts
//!
//! Accounts are created through registration, so there is no create form.

use async_trait::async_trait;
use ims_client::{ClientResult, HttpClient, ImsClient};
use shared::models::{User, UserForm};

use super::crud::{Collection, CrudPage, Editable};
use crate::forms::Patch;
use crate::notify::Notifier;

/// `/api/admin/users`
#[derive(Debug, Clone)]
pub struct UserCollection<H> {
    client: ImsClient<H>,
}

impl<H> UserCollection<H> {
    pub fn new(client: ImsClient<H>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<H: HttpClient> Collection for UserCollection<H> {
    type Record = User;

    fn name(&self) -> &'static str {
        "User"
    }

    fn record_id(record: &User) -> &str {
        &record.id
    }

    async fn fetch_all(&self) -> ClientResult<Vec<User>> {
        self.client.users().list().await
    }

    async fn fetch_one(&self, id: &str) -> ClientResult<User> {
        self.client.users().get(id).await
    }
}

#[async_trait]
impl<H: HttpClient> Editable for UserCollection<H> {
    type Form = UserForm;

    fn normalize_form(mut form: UserForm) -> UserForm {
        form.username = form.username.trim().to_string();
        form.email = form.email.trim().to_string();
        form
    }

    async fn update(&self, id: &str, patch: &Patch) -> ClientResult<()> {
        self.client.users().update(id, patch).await
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        self.client.users().delete(id).await
    }
}

pub type UsersPage<H> = CrudPage<UserCollection<H>>;

pub fn users_page<H: HttpClient>(client: ImsClient<H>, notifier: Notifier) -> UsersPage<H> {
    CrudPage::new(UserCollection::new(client), notifier)
}
