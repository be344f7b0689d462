use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Capability trait for entities that can own an address.
///
/// Owners are addressed by the (`owner_type`, `owner_id`) key; each owner
/// holds at most one address, replaced in place on update.
pub trait HasAddress {
    fn owner_type() -> &'static str
    where
        Self: Sized;

    fn owner_id(&self) -> &str;
}

/// Address value associated to an owning entity by (owner_type, owner_id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub id: String,
    pub owner_type: String,
    pub owner_id: String,
    pub line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub country: String,
    pub created_at: String, // ISO 8601 timestamp
    pub updated_at: String, // ISO 8601 timestamp
}

impl Address {
    pub fn new(
        owner_type: impl Into<String>,
        owner_id: impl Into<String>,
        line1: String,
        city: String,
        country: String,
    ) -> Self {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        Self {
            id: Uuid::new_v4().to_string(),
            owner_type: owner_type.into(),
            owner_id: owner_id.into(),
            line1,
            line2: None,
            city,
            state: None,
            postal_code: None,
            country,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Build an address keyed to a typed owner
    pub fn for_owner<T: HasAddress>(owner: &T, line1: String, city: String, country: String) -> Self {
        Self::new(T::owner_type(), owner.owner_id(), line1, city, country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::User;

    #[test]
    fn test_for_owner_uses_owner_key() {
        let user = User::new("Ada".to_string(), "ada@example.com".to_string());
        let address = Address::for_owner(
            &user,
            "1 Main St".to_string(),
            "Springfield".to_string(),
            "US".to_string(),
        );

        assert_eq!(address.owner_type, "user");
        assert_eq!(address.owner_id, user.id);
    }

    #[test]
    fn test_optional_fields_omitted_in_json() {
        let address = Address::new("user", "u1", "1 Main St".into(), "Springfield".into(), "US".into());

        let value = serde_json::to_value(&address).unwrap();
        assert!(value.get("line2").is_none());
        assert!(value.get("state").is_none());
        assert!(value.get("postal_code").is_none());
    }
}
