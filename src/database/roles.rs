use sqlx::Row;

use crate::{ApiError, ApiResult, Database, Role};

impl Database {
    pub async fn create_role(&self, role: &Role) -> ApiResult<()> {
        sqlx::query("INSERT INTO roles (id, name) VALUES (?, ?)")
            .bind(&role.id)
            .bind(&role.name)
            .execute(self.pool())
            .await?;

        Ok(())
    }

    pub async fn role_exists(&self, name: &str) -> ApiResult<bool> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM roles WHERE name = ?")
            .bind(name)
            .fetch_one(self.pool())
            .await?;

        let count: i64 = row.try_get("count")?;
        Ok(count > 0)
    }

    pub async fn get_user_roles(&self, user_id: &str) -> ApiResult<Vec<Role>> {
        let rows = sqlx::query(
            "SELECT r.id, r.name
             FROM roles r
             JOIN user_roles ur ON ur.role_id = r.id
             WHERE ur.user_id = ?
             ORDER BY r.name",
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;

        let mut roles = Vec::with_capacity(rows.len());
        for row in rows {
            roles.push(Role {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
            });
        }

        Ok(roles)
    }

    /// Replace the user's role set with the named roles. An empty list
    /// clears all roles. Runs in a transaction so the prior set survives
    /// any failure, including a role name that no longer exists.
    pub async fn sync_user_roles(&self, user_id: &str, role_names: &[String]) -> ApiResult<()> {
        let mut tx = self.pool().begin().await?;

        sqlx::query("DELETE FROM user_roles WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        for name in role_names {
            let result = sqlx::query(
                "INSERT INTO user_roles (user_id, role_id)
                 SELECT ?, id FROM roles WHERE name = ?",
            )
            .bind(user_id)
            .bind(name)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(ApiError::BadRequest(format!("Unknown role: {}", name)));
            }
        }

        tx.commit().await?;

        Ok(())
    }
}
