use serde::{Deserialize, Deserializer, Serialize};

use crate::adverts::repo_types::{Advertisement, AdvertisementPatch, NewAdvertisement};

/// Request body for `POST /adv/`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateAdvertisementRequest {
    pub title: String,
    pub descriptions: String,
    #[serde(default)]
    pub user_id: Option<i32>,
}

/// Request body for `PATCH /adv/{id}`. Only these fields are writable.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateAdvertisementRequest {
    pub title: Option<String>,
    pub descriptions: Option<String>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub user_id: Option<Option<i32>>, // absent → keep, null → detach
}

/// Full advertisement as returned by get, create and update.
#[derive(Debug, Serialize)]
pub struct AdvertisementView {
    pub id: i32,
    pub title: String,
    pub descriptions: String,
    pub user: Option<i32>,
}

/// Identifying fields returned by delete.
#[derive(Debug, Serialize)]
pub struct AdvertisementSummary {
    pub id: i32,
    pub title: String,
}

fn present_or_null<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

impl From<CreateAdvertisementRequest> for NewAdvertisement {
    fn from(r: CreateAdvertisementRequest) -> Self {
        Self {
            title: r.title,
            descriptions: r.descriptions,
            user_id: r.user_id,
        }
    }
}

impl From<UpdateAdvertisementRequest> for AdvertisementPatch {
    fn from(r: UpdateAdvertisementRequest) -> Self {
        Self {
            title: r.title,
            descriptions: r.descriptions,
            user_id: r.user_id,
        }
    }
}

impl From<Advertisement> for AdvertisementView {
    fn from(a: Advertisement) -> Self {
        Self {
            id: a.id,
            title: a.title,
            descriptions: a.descriptions,
            user: a.user_id,
        }
    }
}

impl From<Advertisement> for AdvertisementSummary {
    fn from(a: Advertisement) -> Self {
        Self {
            id: a.id,
            title: a.title,
        }
    }
}
