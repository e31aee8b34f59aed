use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub password: String, // Argon2 hash
    pub email: Option<String>,
    pub creation_time: OffsetDateTime,
}

/// Columns supplied by the caller on insert. Id and creation time are
/// assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub password_hash: String,
    pub email: Option<String>,
}

/// Writable user columns for a partial update. `None` leaves the column
/// untouched; `email: Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub password_hash: Option<String>,
    pub email: Option<Option<String>>,
}

impl UserPatch {
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(hash) = self.password_hash {
            user.password = hash;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
    }
}
