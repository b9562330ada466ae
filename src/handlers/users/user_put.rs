use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;

use crate::api::format::user_to_api_value;
use crate::error::ApiError;
use crate::handlers::validation::is_valid_email;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// PUT /users/:id - partial update (protected). Absent fields are left
/// untouched; an email change re-checks uniqueness at the storage layer.
pub async fn user_put(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut field_errors = HashMap::new();

    let name = payload.name.as_deref().map(str::trim);
    if let Some(name) = name {
        if name.is_empty() {
            field_errors.insert("name".to_string(), "Name must not be empty".to_string());
        }
    }

    let email = payload.email.as_deref().map(str::trim);
    if let Some(email) = email {
        if !is_valid_email(email) {
            field_errors.insert("email".to_string(), "Invalid email address".to_string());
        }
    }

    if !field_errors.is_empty() {
        return Err(ApiError::validation_error(
            "Invalid update payload",
            Some(field_errors),
        ));
    }

    let user = state.store.update(id, name, email).await?;
    tracing::info!(user_id = user.id, "updated user");

    Ok(Json(json!({ "success": true, "data": user_to_api_value(&user) })))
}
