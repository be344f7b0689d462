use axum::{extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};

use crate::{
    api::middleware::{ApiError, ApiResult, AppState, Json},
    shared::validation::Validator,
};

#[derive(Debug, Deserialize)]
pub struct SendOtpMailRequest {
    pub email: Option<String>,
    pub user_name: Option<String>,
    pub otp: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SendOtpMailResponse {
    pub message: String,
}

/// Trigger the OTP mail for a recipient
pub async fn send_otp_mail(
    State(state): State<AppState>,
    Json(request): Json<SendOtpMailRequest>,
) -> ApiResult<impl IntoResponse> {
    let mut v = Validator::new();

    let email = request.email.as_deref().unwrap_or("").trim();
    v.required("email", !email.is_empty(), "The email field is required.");
    if !v.is_failed("email") {
        v.check("email", email.contains('@'), "The email must be a valid email address.");
    }

    let user_name = request.user_name.as_deref().unwrap_or("").trim();
    v.required(
        "user_name",
        !user_name.is_empty(),
        "The user_name field is required.",
    );

    let otp = request.otp.as_deref().unwrap_or("").trim();
    v.required("otp", !otp.is_empty(), "The otp field is required.");

    v.finish("The given data was invalid.")?;

    state
        .mail_service
        .send_otp(email, user_name, otp)
        .await
        .map_err(|e| {
            tracing::error!("OTP mail delivery failed: {}", e);
            ApiError::Internal("Failed to send mail".to_string())
        })?;

    Ok(Json(SendOtpMailResponse {
        message: "OTP mail sent".to_string(),
    }))
}
