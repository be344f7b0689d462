use sqlx::Row;

use crate::{ApiResult, Database, User};

impl Database {
    pub async fn create_user(&self, user: &User) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO users (id, name, email, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.created_at)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    pub async fn get_user_by_id(&self, id: &str) -> ApiResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, name, email, created_at
             FROM users
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        match row {
            Some(row) => Ok(Some(User {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                email: row.try_get("email")?,
                created_at: row.try_get("created_at")?,
            })),
            None => Ok(None),
        }
    }

    pub async fn user_exists(&self, id: &str) -> ApiResult<bool> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(self.pool())
            .await?;

        let count: i64 = row.try_get("count")?;
        Ok(count > 0)
    }
}
