//! In-process store used by handler tests.
//!
//! A session holds the table lock for its whole lifetime, so sessions run
//! one after another. Writes go to a private copy that is published on
//! commit; a dropped session leaves the tables as they were.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use async_trait::async_trait;
use time::OffsetDateTime;

use super::{Database, Session, StoreError};
use crate::adverts::repo_types::{Advertisement, AdvertisementPatch, NewAdvertisement};
use crate::users::repo_types::{NewUser, User, UserPatch};

#[derive(Debug, Clone, Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    adverts: BTreeMap<i32, Advertisement>,
    user_seq: i32,
    advert_seq: i32,
}

impl Tables {
    fn name_taken(&self, name: &str, except: Option<i32>) -> bool {
        self.users
            .values()
            .any(|u| u.name == name && Some(u.id) != except)
    }

    fn owner_exists(&self, user_id: Option<i32>) -> bool {
        user_id.map_or(true, |id| self.users.contains_key(&id))
    }
}

#[derive(Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<Mutex<Tables>>,
}

// Inspection helpers panic if a session is still open.
impl MemoryDatabase {
    fn committed(&self) -> tokio::sync::MutexGuard<'_, Tables> {
        self.tables
            .try_lock()
            .expect("inspected while a session is open")
    }

    pub fn user(&self, id: i32) -> Option<User> {
        self.committed().users.get(&id).cloned()
    }

    pub fn advertisement(&self, id: i32) -> Option<Advertisement> {
        self.committed().adverts.get(&id).cloned()
    }

    pub fn user_count(&self) -> usize {
        self.committed().users.len()
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    async fn begin(&self) -> Result<Box<dyn Session>, StoreError> {
        let guard = Arc::clone(&self.tables).lock_owned().await;
        let work = guard.clone();
        Ok(Box::new(MemorySession { guard, work }))
    }
}

struct MemorySession {
    guard: OwnedMutexGuard<Tables>,
    work: Tables,
}

#[async_trait]
impl Session for MemorySession {
    async fn get_user(&mut self, id: i32) -> Result<User, StoreError> {
        self.work.users.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn insert_user(&mut self, new: NewUser) -> Result<User, StoreError> {
        if self.work.name_taken(&new.name, None) {
            return Err(StoreError::Conflict);
        }
        self.work.user_seq += 1;
        let user = User {
            id: self.work.user_seq,
            name: new.name,
            password: new.password_hash,
            email: new.email,
            creation_time: OffsetDateTime::now_utc(),
        };
        self.work.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user(&mut self, id: i32, patch: UserPatch) -> Result<User, StoreError> {
        let mut user = self.work.users.get(&id).cloned().ok_or(StoreError::NotFound)?;
        patch.apply(&mut user);
        if self.work.name_taken(&user.name, Some(id)) {
            return Err(StoreError::Conflict);
        }
        self.work.users.insert(id, user.clone());
        Ok(user)
    }

    async fn delete_user(&mut self, id: i32) -> Result<User, StoreError> {
        let user = self.work.users.remove(&id).ok_or(StoreError::NotFound)?;
        for adv in self.work.adverts.values_mut() {
            if adv.user_id == Some(id) {
                adv.user_id = None;
            }
        }
        Ok(user)
    }

    async fn get_advertisement(&mut self, id: i32) -> Result<Advertisement, StoreError> {
        self.work.adverts.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn insert_advertisement(
        &mut self,
        new: NewAdvertisement,
    ) -> Result<Advertisement, StoreError> {
        if !self.work.owner_exists(new.user_id) {
            return Err(StoreError::MissingReference);
        }
        self.work.advert_seq += 1;
        let adv = Advertisement {
            id: self.work.advert_seq,
            title: new.title,
            descriptions: new.descriptions,
            creations_date: OffsetDateTime::now_utc(),
            user_id: new.user_id,
        };
        self.work.adverts.insert(adv.id, adv.clone());
        Ok(adv)
    }

    async fn update_advertisement(
        &mut self,
        id: i32,
        patch: AdvertisementPatch,
    ) -> Result<Advertisement, StoreError> {
        let mut adv = self.work.adverts.get(&id).cloned().ok_or(StoreError::NotFound)?;
        patch.apply(&mut adv);
        if !self.work.owner_exists(adv.user_id) {
            return Err(StoreError::MissingReference);
        }
        self.work.adverts.insert(id, adv.clone());
        Ok(adv)
    }

    async fn delete_advertisement(&mut self, id: i32) -> Result<Advertisement, StoreError> {
        self.work.adverts.remove(&id).ok_or(StoreError::NotFound)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let MemorySession { mut guard, work } = *self;
        *guard = work;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str) -> NewUser {
        NewUser {
            name: name.into(),
            password_hash: "hash".into(),
            email: None,
        }
    }

    #[tokio::test]
    async fn uncommitted_session_is_invisible() {
        let db = MemoryDatabase::default();
        let mut s = db.begin().await.unwrap();
        s.insert_user(new_user("alice")).await.unwrap();
        drop(s);
        assert_eq!(db.user_count(), 0);
    }

    #[tokio::test]
    async fn duplicate_name_conflicts() {
        let db = MemoryDatabase::default();
        let mut s = db.begin().await.unwrap();
        s.insert_user(new_user("alice")).await.unwrap();
        s.commit().await.unwrap();

        let mut s = db.begin().await.unwrap();
        let err = s.insert_user(new_user("alice")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict));
    }

    #[tokio::test]
    async fn overlapping_inserts_of_same_name_conflict() {
        let db = MemoryDatabase::default();
        let mut first = db.begin().await.unwrap();
        first.insert_user(new_user("alice")).await.unwrap();

        let other = db.clone();
        let second = tokio::spawn(async move {
            let mut s = other.begin().await?;
            s.insert_user(new_user("alice")).await?;
            s.commit().await
        });

        first.commit().await.unwrap();
        let res = second.await.unwrap();
        assert!(matches!(res, Err(StoreError::Conflict)));
        assert_eq!(db.user_count(), 1);
        assert_eq!(db.user(1).unwrap().name, "alice");
    }

    #[tokio::test]
    async fn later_session_sees_earlier_commit() {
        let db = MemoryDatabase::default();
        let mut a = db.begin().await.unwrap();
        a.insert_user(new_user("alice")).await.unwrap();
        a.commit().await.unwrap();

        let mut b = db.begin().await.unwrap();
        b.insert_user(new_user("bob")).await.unwrap();
        b.commit().await.unwrap();

        assert_eq!(db.user_count(), 2);
        assert_eq!(db.user(1).unwrap().name, "alice");
        assert_eq!(db.user(2).unwrap().name, "bob");
    }
}
