use sqlx::PgConnection;

use crate::adverts::repo_types::{Advertisement, NewAdvertisement};

impl Advertisement {
    pub async fn find(conn: &mut PgConnection, id: i32) -> sqlx::Result<Option<Advertisement>> {
        sqlx::query_as::<_, Advertisement>(
            r#"
            SELECT id, title, descriptions, creations_date, user_id
            FROM advertisements
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await
    }

    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: i32,
    ) -> sqlx::Result<Option<Advertisement>> {
        sqlx::query_as::<_, Advertisement>(
            r#"
            SELECT id, title, descriptions, creations_date, user_id
            FROM advertisements
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await
    }

    pub async fn create(
        conn: &mut PgConnection,
        new: &NewAdvertisement,
    ) -> sqlx::Result<Advertisement> {
        sqlx::query_as::<_, Advertisement>(
            r#"
            INSERT INTO advertisements (title, descriptions, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, descriptions, creations_date, user_id
            "#,
        )
        .bind(&new.title)
        .bind(&new.descriptions)
        .bind(new.user_id) // Option<i32> → NULL allowed
        .fetch_one(conn)
        .await
    }

    pub async fn save(&self, conn: &mut PgConnection) -> sqlx::Result<Advertisement> {
        sqlx::query_as::<_, Advertisement>(
            r#"
            UPDATE advertisements
            SET title = $2, descriptions = $3, user_id = $4
            WHERE id = $1
            RETURNING id, title, descriptions, creations_date, user_id
            "#,
        )
        .bind(self.id)
        .bind(&self.title)
        .bind(&self.descriptions)
        .bind(self.user_id)
        .fetch_one(conn)
        .await
    }

    pub async fn delete(conn: &mut PgConnection, id: i32) -> sqlx::Result<Option<Advertisement>> {
        sqlx::query_as::<_, Advertisement>(
            r#"
            DELETE FROM advertisements
            WHERE id = $1
            RETURNING id, title, descriptions, creations_date, user_id
            "#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await
    }
}
