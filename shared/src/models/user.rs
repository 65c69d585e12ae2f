//! User Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Role;
use crate::util::opaque_id;

/// User account as listed by the admin API (password never included)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
}

/// Editable user fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct UserForm {
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    pub username: String,
    #[validate(email(message = "Email address is invalid"))]
    pub email: String,
    pub role: Role,
}

impl From<&User> for UserForm {
    fn from(u: &User) -> Self {
        Self {
            username: u.username.clone(),
            email: u.email.clone(),
            role: u.role,
        }
    }
}
