use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;

use crate::api::format::user_to_api_value;
use crate::auth::password::hash_password;
use crate::error::ApiError;
use crate::handlers::validation::is_valid_email;
use crate::AppState;

/// Every field is optional at the deserialization layer so that a missing
/// field lands in `field_errors` alongside any other failures instead of
/// being rejected on its own.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub secret: Option<String>,
}

/// POST /users - create a user record (public)
pub async fn users_post(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut field_errors = HashMap::new();

    let name = payload.name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        field_errors.insert("name".to_string(), "Name must not be empty".to_string());
    }

    let email = payload.email.as_deref().map(str::trim).unwrap_or_default();
    if !is_valid_email(email) {
        field_errors.insert("email".to_string(), "Invalid email address".to_string());
    }

    let secret = payload.secret.as_deref().unwrap_or_default();
    let min_length = state.config.security.password_min_length;
    if secret.chars().count() < min_length {
        field_errors.insert(
            "secret".to_string(),
            format!("Secret must be at least {} characters", min_length),
        );
    }

    if !field_errors.is_empty() {
        return Err(ApiError::validation_error(
            "Invalid user payload",
            Some(field_errors),
        ));
    }

    let password_hash = hash_password(secret).map_err(|e| {
        tracing::error!("password hashing failed: {}", e);
        ApiError::internal_server_error("Failed to process credentials")
    })?;

    let user = state.store.create(name, email, &password_hash).await?;
    tracing::info!(user_id = user.id, "created user");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": user_to_api_value(&user) })),
    ))
}
