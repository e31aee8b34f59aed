use serde::Serialize;

use crate::users::repo_types::User;

/// Identifying fields returned by create, update and delete.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: i32,
    pub name: String,
}

/// Body of `GET /users/{id}`.
#[derive(Debug, Serialize)]
pub struct UserDetails {
    pub id: i32,
    pub name: String,
    pub creation_time: i64, // unix seconds
}

impl From<User> for UserSummary {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
        }
    }
}

impl From<User> for UserDetails {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            creation_time: u.creation_time.unix_timestamp(),
        }
    }
}
