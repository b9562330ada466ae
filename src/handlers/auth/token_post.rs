use axum::{extract::State, response::IntoResponse, Json};
use chrono::Duration;
use serde::Deserialize;
use serde_json::json;

use crate::auth::{issue_token, password::verify_password};
use crate::error::ApiError;
use crate::AppState;

/// One message for every verification failure. Wrong secret and unknown
/// identity must be indistinguishable, or the endpoint becomes an oracle
/// for which emails are registered.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub identity: Option<String>,
    pub secret: Option<String>,
}

/// POST /auth/token - verify credentials and issue a bearer token (public)
pub async fn token_post(
    State(state): State<AppState>,
    Json(payload): Json<TokenRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let identity = payload.identity.as_deref().map(str::trim).unwrap_or_default();
    let secret = payload.secret.as_deref().unwrap_or_default();

    if identity.is_empty() || secret.is_empty() {
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    let user = state.store.get_by_email(identity).await?;

    let verified = user
        .as_ref()
        .map(|u| verify_password(secret, &u.password_hash))
        .unwrap_or(false);

    if !verified {
        tracing::debug!("rejected token request for {}", identity);
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    let ttl_secs = state.config.security.token_ttl_secs;
    let token = issue_token(
        &state.config.security,
        identity,
        Duration::seconds(ttl_secs as i64),
    )
    .map_err(|e| {
        tracing::error!("token issuance failed: {}", e);
        ApiError::internal_server_error("Failed to issue token")
    })?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "token": token,
            "token_kind": "bearer",
            "expires_in": ttl_secs
        }
    })))
}
