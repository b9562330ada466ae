use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::format::users_to_api_values;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /users?offset=&limit= - list records in insertion order (protected).
/// The limit is clamped to the configured page-size ceiling regardless of
/// what the client asks for.
pub async fn users_get(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let api = &state.config.api;
    let offset = query.offset.unwrap_or(0).max(0);
    let limit = query
        .limit
        .unwrap_or(api.default_page_size)
        .clamp(1, api.max_page_size);

    let users = state.store.list(offset, limit).await?;

    Ok(Json(json!({
        "success": true,
        "data": users_to_api_values(&users),
        "meta": { "offset": offset, "limit": limit, "count": users.len() }
    })))
}
