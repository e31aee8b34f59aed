//! Entity store.
//!
//! Every request works through exactly one [`Session`], which wraps one
//! database transaction. Nothing a session writes is visible to other
//! requests until [`Session::commit`] succeeds; a session dropped without a
//! commit is rolled back.

use async_trait::async_trait;
use thiserror::Error;

use crate::adverts::repo_types::{Advertisement, AdvertisementPatch, NewAdvertisement};
use crate::users::repo_types::{NewUser, User, UserPatch};

#[cfg(test)]
pub mod memory;
pub mod postgres;
pub mod schema;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("row not found")]
    NotFound,
    #[error("unique constraint violated")]
    Conflict,
    #[error("referenced row does not exist")]
    MissingReference,
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        let code = match &err {
            sqlx::Error::RowNotFound => return StoreError::NotFound,
            sqlx::Error::Database(db_err) => db_err.code().map(|c| c.into_owned()),
            _ => None,
        };
        // https://www.postgresql.org/docs/current/errcodes-appendix.html
        match code.as_deref() {
            Some("23505") => StoreError::Conflict,
            Some("23503") => StoreError::MissingReference,
            _ => StoreError::Database(err),
        }
    }
}

/// Source of request-scoped sessions.
#[async_trait]
pub trait Database: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn Session>, StoreError>;
}

/// One open transaction.
#[async_trait]
pub trait Session: Send {
    async fn get_user(&mut self, id: i32) -> Result<User, StoreError>;
    async fn insert_user(&mut self, new: NewUser) -> Result<User, StoreError>;
    async fn update_user(&mut self, id: i32, patch: UserPatch) -> Result<User, StoreError>;
    async fn delete_user(&mut self, id: i32) -> Result<User, StoreError>;

    async fn get_advertisement(&mut self, id: i32) -> Result<Advertisement, StoreError>;
    async fn insert_advertisement(
        &mut self,
        new: NewAdvertisement,
    ) -> Result<Advertisement, StoreError>;
    async fn update_advertisement(
        &mut self,
        id: i32,
        patch: AdvertisementPatch,
    ) -> Result<Advertisement, StoreError>;
    async fn delete_advertisement(&mut self, id: i32) -> Result<Advertisement, StoreError>;

    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}
