use sqlx::FromRow;
use time::OffsetDateTime;

/// Advertisement record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Advertisement {
    pub id: i32,
    pub title: String,
    pub descriptions: String,
    pub creations_date: OffsetDateTime,
    pub user_id: Option<i32>, // owner, null once the owner is deleted
}

#[derive(Debug, Clone)]
pub struct NewAdvertisement {
    pub title: String,
    pub descriptions: String,
    pub user_id: Option<i32>,
}

/// Writable advertisement columns for a partial update.
#[derive(Debug, Clone, Default)]
pub struct AdvertisementPatch {
    pub title: Option<String>,
    pub descriptions: Option<String>,
    pub user_id: Option<Option<i32>>,
}

impl AdvertisementPatch {
    pub fn apply(self, adv: &mut Advertisement) {
        if let Some(title) = self.title {
            adv.title = title;
        }
        if let Some(descriptions) = self.descriptions {
            adv.descriptions = descriptions;
        }
        if let Some(user_id) = self.user_id {
            adv.user_id = user_id;
        }
    }
}
