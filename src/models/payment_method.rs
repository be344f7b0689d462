use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::address::HasAddress;

/// PaymentMethod entity - admin-managed payment options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
    pub sort_order: i64,
    pub created_at: String, // ISO 8601 timestamp
    pub updated_at: String, // ISO 8601 timestamp
}

impl PaymentMethod {
    pub fn new(name: String, slug: String) -> Self {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        Self {
            id: Uuid::new_v4().to_string(),
            name,
            slug,
            description: None,
            is_active: true,
            sort_order: 0,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl HasAddress for PaymentMethod {
    fn owner_type() -> &'static str {
        "payment_method"
    }

    fn owner_id(&self) -> &str {
        &self.id
    }
}
