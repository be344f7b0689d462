use sqlx::Row;

use crate::models::HasAddress;
use crate::{Address, ApiResult, Database};

fn row_to_address(row: &sqlx::any::AnyRow) -> ApiResult<Address> {
    Ok(Address {
        id: row.try_get("id")?,
        owner_type: row.try_get("owner_type")?,
        owner_id: row.try_get("owner_id")?,
        line1: row.try_get("line1")?,
        line2: row.try_get("line2").ok(),
        city: row.try_get("city")?,
        state: row.try_get("state").ok(),
        postal_code: row.try_get("postal_code").ok(),
        country: row.try_get("country")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

impl Database {
    /// Insert or replace the one address owned by (owner_type, owner_id)
    pub async fn upsert_address(&self, address: &Address) -> ApiResult<Address> {
        let existing = self
            .get_address(&address.owner_type, &address.owner_id)
            .await?;

        match existing {
            Some(current) => {
                sqlx::query(
                    "UPDATE addresses
                     SET line1 = ?, line2 = ?, city = ?, state = ?, postal_code = ?, country = ?, updated_at = ?
                     WHERE owner_type = ? AND owner_id = ?",
                )
                .bind(&address.line1)
                .bind(&address.line2)
                .bind(&address.city)
                .bind(&address.state)
                .bind(&address.postal_code)
                .bind(&address.country)
                .bind(&address.updated_at)
                .bind(&address.owner_type)
                .bind(&address.owner_id)
                .execute(self.pool())
                .await?;

                Ok(Address {
                    id: current.id,
                    created_at: current.created_at,
                    ..address.clone()
                })
            }
            None => {
                sqlx::query(
                    "INSERT INTO addresses (id, owner_type, owner_id, line1, line2, city, state, postal_code, country, created_at, updated_at)
                     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                )
                .bind(&address.id)
                .bind(&address.owner_type)
                .bind(&address.owner_id)
                .bind(&address.line1)
                .bind(&address.line2)
                .bind(&address.city)
                .bind(&address.state)
                .bind(&address.postal_code)
                .bind(&address.country)
                .bind(&address.created_at)
                .bind(&address.updated_at)
                .execute(self.pool())
                .await?;

                Ok(address.clone())
            }
        }
    }

    pub async fn get_address(
        &self,
        owner_type: &str,
        owner_id: &str,
    ) -> ApiResult<Option<Address>> {
        let row = sqlx::query(
            "SELECT id, owner_type, owner_id, line1, line2, city, state, postal_code, country, created_at, updated_at
             FROM addresses
             WHERE owner_type = ? AND owner_id = ?",
        )
        .bind(owner_type)
        .bind(owner_id)
        .fetch_optional(self.pool())
        .await?;

        match row {
            Some(row) => Ok(Some(row_to_address(&row)?)),
            None => Ok(None),
        }
    }

    /// Typed lookup for any entity implementing HasAddress
    pub async fn address_for<T: HasAddress>(&self, owner: &T) -> ApiResult<Option<Address>> {
        self.get_address(T::owner_type(), owner.owner_id()).await
    }
}
