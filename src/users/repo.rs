use sqlx::PgConnection;

use crate::users::repo_types::{NewUser, User};

impl User {
    /// Find a user by id.
    pub async fn find(conn: &mut PgConnection, id: i32) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, password, email, creation_time
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await
    }

    /// Find a user by id and lock the row until the transaction ends.
    pub async fn find_for_update(conn: &mut PgConnection, id: i32) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, password, email, creation_time
            FROM users
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await
    }

    /// Insert a user whose password is already hashed.
    pub async fn create(conn: &mut PgConnection, new: &NewUser) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, password, email)
            VALUES ($1, $2, $3)
            RETURNING id, name, password, email, creation_time
            "#,
        )
        .bind(&new.name)
        .bind(&new.password_hash)
        .bind(&new.email)
        .fetch_one(conn)
        .await
    }

    /// Write every writable column of `self` back to its row.
    pub async fn save(&self, conn: &mut PgConnection) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $2, password = $3, email = $4
            WHERE id = $1
            RETURNING id, name, password, email, creation_time
            "#,
        )
        .bind(self.id)
        .bind(&self.name)
        .bind(&self.password)
        .bind(&self.email)
        .fetch_one(conn)
        .await
    }

    /// Delete a user, returning the removed row if it existed.
    pub async fn delete(conn: &mut PgConnection, id: i32) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            DELETE FROM users
            WHERE id = $1
            RETURNING id, name, password, email, creation_time
            "#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await
    }
}
