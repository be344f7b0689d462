use sqlx::Row;

use crate::{ApiError, ApiResult, Database, PaymentMethod};

fn row_to_payment_method(row: &sqlx::any::AnyRow) -> ApiResult<PaymentMethod> {
    let is_active: i32 = row.try_get("is_active")?;

    Ok(PaymentMethod {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        slug: row.try_get("slug")?,
        description: row.try_get("description").ok(),
        is_active: is_active != 0,
        sort_order: row.try_get("sort_order")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

impl Database {
    pub async fn create_payment_method(&self, method: &PaymentMethod) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO payment_methods (id, name, slug, description, is_active, sort_order, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&method.id)
        .bind(&method.name)
        .bind(&method.slug)
        .bind(&method.description)
        .bind(if method.is_active { 1 } else { 0 })
        .bind(method.sort_order)
        .bind(&method.created_at)
        .bind(&method.updated_at)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    pub async fn get_payment_method_by_id(&self, id: &str) -> ApiResult<Option<PaymentMethod>> {
        let row = sqlx::query(
            "SELECT id, name, slug, description, is_active, sort_order, created_at, updated_at
             FROM payment_methods
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        match row {
            Some(row) => Ok(Some(row_to_payment_method(&row)?)),
            None => Ok(None),
        }
    }

    /// Uniqueness check that excludes the record being updated
    pub async fn payment_method_name_exists_excluding(
        &self,
        name: &str,
        excluded_id: &str,
    ) -> ApiResult<bool> {
        let row = sqlx::query(
            "SELECT COUNT(*) as count
             FROM payment_methods
             WHERE name = ? AND id != ?",
        )
        .bind(name)
        .bind(excluded_id)
        .fetch_one(self.pool())
        .await?;

        let count: i64 = row.try_get("count")?;
        Ok(count > 0)
    }

    /// Uniqueness check that excludes the record being updated
    pub async fn payment_method_slug_exists_excluding(
        &self,
        slug: &str,
        excluded_id: &str,
    ) -> ApiResult<bool> {
        let row = sqlx::query(
            "SELECT COUNT(*) as count
             FROM payment_methods
             WHERE slug = ? AND id != ?",
        )
        .bind(slug)
        .bind(excluded_id)
        .fetch_one(self.pool())
        .await?;

        let count: i64 = row.try_get("count")?;
        Ok(count > 0)
    }

    pub async fn update_payment_method(&self, method: &PaymentMethod) -> ApiResult<()> {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .map_err(|e| ApiError::Internal(format!("Failed to format timestamp: {}", e)))?;

        sqlx::query(
            "UPDATE payment_methods
             SET name = ?, slug = ?, description = ?, is_active = ?, sort_order = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&method.name)
        .bind(&method.slug)
        .bind(&method.description)
        .bind(if method.is_active { 1 } else { 0 })
        .bind(method.sort_order)
        .bind(&now)
        .bind(&method.id)
        .execute(self.pool())
        .await?;

        Ok(())
    }
}
