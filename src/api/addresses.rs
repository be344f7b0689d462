use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    api::middleware::{ApiError, ApiResult, AppState, Json},
    models::Address,
    shared::validation::Validator,
};

const MAX_FIELD_CHARS: usize = 255;

/// Owner kinds that can hold an address, matching the HasAddress impls
const ADDRESS_OWNER_TYPES: &[&str] = &["user", "payment_method"];

#[derive(Debug, Deserialize)]
pub struct UpsertAddressRequest {
    pub line1: Option<String>,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

async fn ensure_owner_exists(
    state: &AppState,
    owner_type: &str,
    owner_id: &str,
) -> ApiResult<()> {
    let exists = match owner_type {
        "user" => state.db.user_exists(owner_id).await?,
        "payment_method" => state
            .db
            .get_payment_method_by_id(owner_id)
            .await?
            .is_some(),
        other => {
            return Err(ApiError::BadRequest(format!(
                "Unknown address owner type: {}",
                other
            )))
        }
    };

    if !exists {
        return Err(ApiError::NotFound(format!(
            "{} {} not found",
            owner_type, owner_id
        )));
    }

    Ok(())
}

/// Create or replace the one address owned by (owner_type, owner_id)
pub async fn upsert_address(
    State(state): State<AppState>,
    Path((owner_type, owner_id)): Path<(String, String)>,
    Json(request): Json<UpsertAddressRequest>,
) -> ApiResult<impl IntoResponse> {
    if !ADDRESS_OWNER_TYPES.contains(&owner_type.as_str()) {
        return Err(ApiError::BadRequest(format!(
            "Unknown address owner type: {}",
            owner_type
        )));
    }
    ensure_owner_exists(&state, &owner_type, &owner_id).await?;

    let mut v = Validator::new();

    for (field, value) in [
        ("line1", &request.line1),
        ("city", &request.city),
        ("country", &request.country),
    ] {
        match value.as_deref() {
            None => v.add_error(field, &format!("The {} field is required.", field)),
            Some(s) if s.trim().is_empty() => {
                v.add_error(field, &format!("The {} field is required.", field))
            }
            Some(s) => v.max_len(
                field,
                s,
                MAX_FIELD_CHARS,
                &format!("The {} may not be greater than 255 characters.", field),
            ),
        }
    }

    v.finish("The given data was invalid.")?;

    let mut address = Address::new(
        owner_type,
        owner_id,
        request.line1.unwrap_or_default(),
        request.city.unwrap_or_default(),
        request.country.unwrap_or_default(),
    );
    address.line2 = request.line2;
    address.state = request.state;
    address.postal_code = request.postal_code;

    let stored = state.db.upsert_address(&address).await?;

    Ok(Json(stored))
}

/// Fetch the address owned by (owner_type, owner_id)
pub async fn get_address(
    State(state): State<AppState>,
    Path((owner_type, owner_id)): Path<(String, String)>,
) -> ApiResult<impl IntoResponse> {
    let address = state
        .db
        .get_address(&owner_type, &owner_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Address not found".to_string()))?;

    Ok(Json(address))
}
