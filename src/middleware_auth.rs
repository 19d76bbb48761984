use std::sync::Arc;

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use crate::{AppState, auth::token_user_id, errors::AppError, models::User};

/// Authentication middleware resolving the bearer token to a [`User`].
///
/// Every failure mode (missing header, bad signature, expired token,
/// non-numeric subject, unknown user) collapses to the same `Unauthorized`
/// response so callers cannot probe which step rejected them.
///
/// # Errors
/// Returns `Unauthorized` if identity resolution fails at any step.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::Unauthorized)?;
    let user_id = token_user_id(token, &state.config)?;

    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, created_at FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::Unauthorized)?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
