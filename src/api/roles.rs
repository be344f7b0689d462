use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::{
    api::middleware::{ApiError, ApiResult, AppState, Json},
    models::Role,
    shared::validation::Validator,
};

#[derive(Debug, Deserialize)]
pub struct SyncRolesRequest {
    pub roles: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct SyncRolesResponse {
    pub message: String,
    pub roles: Vec<Role>,
}

/// Replace a user's role set.
///
/// The `roles` field is required but an empty list is accepted and clears
/// every role; rejecting `[]` would leave no way to remove the last one.
pub async fn sync_roles(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<SyncRolesRequest>,
) -> ApiResult<impl IntoResponse> {
    if !state.db.user_exists(&user_id).await? {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    let mut v = Validator::new();

    match &request.roles {
        None => v.add_error("roles", "The roles field is required."),
        Some(roles) => {
            for (index, name) in roles.iter().enumerate() {
                if !state.db.role_exists(name).await? {
                    v.add_error(
                        &format!("roles.{}", index),
                        &format!("The selected role {} is invalid.", name),
                    );
                }
            }
        }
    }

    v.finish("The given data was invalid.")?;

    let role_names = request.roles.unwrap_or_default();
    state.db.sync_user_roles(&user_id, &role_names).await?;

    let roles = state.db.get_user_roles(&user_id).await?;

    Ok(Json(SyncRolesResponse {
        message: "Roles synchronized".to_string(),
        roles,
    }))
}
