use axum::{response::IntoResponse, Extension, Json};
use serde_json::json;

use crate::middleware::AuthUser;

/// GET /auth/whoami - identify the caller from their bearer token (protected)
pub async fn whoami(Extension(user): Extension<AuthUser>) -> impl IntoResponse {
    Json(json!({
        "success": true,
        "data": {
            "id": user.id,
            "name": user.name,
            "email": user.email
        }
    }))
}
