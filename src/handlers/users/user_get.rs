use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::api::format::user_to_api_value;
use crate::error::ApiError;
use crate::AppState;

/// GET /users/:id - show a single record (protected)
pub async fn user_get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.store.get(id).await?;

    Ok(Json(json!({ "success": true, "data": user_to_api_value(&user) })))
}
