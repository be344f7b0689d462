use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::address::HasAddress;

/// User entity - recipients of conversations and notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String, // ISO 8601 timestamp
}

impl User {
    pub fn new(name: String, email: String) -> Self {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            created_at: now,
        }
    }
}

impl HasAddress for User {
    fn owner_type() -> &'static str {
        "user"
    }

    fn owner_id(&self) -> &str {
        &self.id
    }
}
