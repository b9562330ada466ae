use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::api::format::user_to_api_value;
use crate::error::ApiError;
use crate::AppState;

/// DELETE /users/:id - destroy a record and return it (protected). A second
/// delete of the same id is a 404, never a silent success.
pub async fn user_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.store.delete(id).await?;
    tracing::info!(user_id = user.id, "deleted user");

    Ok(Json(json!({ "success": true, "data": user_to_api_value(&user) })))
}
