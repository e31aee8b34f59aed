use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;

use super::{Database, Session, StoreError};
use crate::adverts::repo_types::{Advertisement, AdvertisementPatch, NewAdvertisement};
use crate::users::repo_types::{NewUser, User, UserPatch};

#[derive(Clone)]
pub struct PgDatabase {
    pool: PgPool,
}

impl PgDatabase {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Database for PgDatabase {
    async fn begin(&self) -> Result<Box<dyn Session>, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgSession { tx }))
    }
}

pub struct PgSession {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl Session for PgSession {
    async fn get_user(&mut self, id: i32) -> Result<User, StoreError> {
        User::find(&mut *self.tx, id).await?.ok_or(StoreError::NotFound)
    }

    async fn insert_user(&mut self, new: NewUser) -> Result<User, StoreError> {
        Ok(User::create(&mut *self.tx, &new).await?)
    }

    async fn update_user(&mut self, id: i32, patch: UserPatch) -> Result<User, StoreError> {
        let mut user = User::find_for_update(&mut *self.tx, id)
            .await?
            .ok_or(StoreError::NotFound)?;
        patch.apply(&mut user);
        Ok(user.save(&mut *self.tx).await?)
    }

    async fn delete_user(&mut self, id: i32) -> Result<User, StoreError> {
        User::delete(&mut *self.tx, id)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn get_advertisement(&mut self, id: i32) -> Result<Advertisement, StoreError> {
        Advertisement::find(&mut *self.tx, id)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn insert_advertisement(
        &mut self,
        new: NewAdvertisement,
    ) -> Result<Advertisement, StoreError> {
        Ok(Advertisement::create(&mut *self.tx, &new).await?)
    }

    async fn update_advertisement(
        &mut self,
        id: i32,
        patch: AdvertisementPatch,
    ) -> Result<Advertisement, StoreError> {
        let mut adv = Advertisement::find_for_update(&mut *self.tx, id)
            .await?
            .ok_or(StoreError::NotFound)?;
        patch.apply(&mut adv);
        Ok(adv.save(&mut *self.tx).await?)
    }

    async fn delete_advertisement(&mut self, id: i32) -> Result<Advertisement, StoreError> {
        Advertisement::delete(&mut *self.tx, id)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let PgSession { tx } = *self;
        tx.commit().await?;
        debug!("transaction committed");
        Ok(())
    }
}
