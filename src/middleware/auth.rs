use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{decode_token, TokenError};
use crate::database::models::User;
use crate::error::ApiError;
use crate::AppState;

/// Authenticated user context resolved from a bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Authentication middleware for protected routes: validates the bearer
/// token and resolves the asserted identity to a live record.
///
/// Every failure is the same 401. In particular a valid token whose user has
/// since been deleted is Unauthorized, not NotFound, so callers cannot
/// distinguish "bad token" from "token for a deleted user".
pub async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_from_headers(&headers).map_err(ApiError::unauthorized)?;

    let claims = decode_token(&state.config.security, &token).map_err(|e| match e {
        TokenError::MissingSecret => {
            tracing::error!("token validation attempted without a signing secret");
            ApiError::internal_server_error("Authentication is not configured")
        }
        _ => ApiError::unauthorized("Invalid or expired token"),
    })?;

    let user = state
        .store
        .get_by_email(&claims.sub)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::unauthorized("Invalid or expired token"))?;

    request.extensions_mut().insert(AuthUser::from(user));

    Ok(next.run(request).await)
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty bearer token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
