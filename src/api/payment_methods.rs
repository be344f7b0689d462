use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    api::middleware::{ApiError, ApiResult, AppState, Json},
    shared::validation::Validator,
};

const MAX_NAME_CHARS: usize = 255;

#[derive(Debug, Deserialize)]
pub struct UpdatePaymentMethodRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i64>,
}

/// Update a payment method. Name and slug must stay unique, excluding the
/// record being updated.
pub async fn update_payment_method(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdatePaymentMethodRequest>,
) -> ApiResult<impl IntoResponse> {
    let mut method = state
        .db
        .get_payment_method_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Payment method not found".to_string()))?;

    let mut v = Validator::new();

    if let Some(name) = &request.name {
        v.max_len(
            "name",
            name,
            MAX_NAME_CHARS,
            "The name may not be greater than 255 characters.",
        );
        if !v.is_failed("name")
            && state
                .db
                .payment_method_name_exists_excluding(name, &id)
                .await?
        {
            v.add_error("name", "The name has already been taken.");
        }
    }

    if let Some(slug) = &request.slug {
        v.max_len(
            "slug",
            slug,
            MAX_NAME_CHARS,
            "The slug may not be greater than 255 characters.",
        );
        if !v.is_failed("slug")
            && state
                .db
                .payment_method_slug_exists_excluding(slug, &id)
                .await?
        {
            v.add_error("slug", "The slug has already been taken.");
        }
    }

    if let Some(sort_order) = request.sort_order {
        v.min_int(
            "sort_order",
            sort_order,
            0,
            "The sort_order must be at least 0.",
        );
    }

    v.finish("The given data was invalid.")?;

    if let Some(name) = request.name {
        method.name = name;
    }
    if let Some(slug) = request.slug {
        method.slug = slug;
    }
    if let Some(description) = request.description {
        method.description = Some(description);
    }
    if let Some(is_active) = request.is_active {
        method.is_active = is_active;
    }
    if let Some(sort_order) = request.sort_order {
        method.sort_order = sort_order;
    }

    state.db.update_payment_method(&method).await?;

    let updated = state
        .db
        .get_payment_method_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Payment method not found".to_string()))?;

    Ok(Json(updated))
}
