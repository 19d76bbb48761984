use std::sync::Arc;

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::{
    AppState,
    auth::{create_access_token, hash_password, verify_password},
    errors::{AppError, AppResult},
    models::{LoginRequest, RegisterRequest, TokenResponse, User, UserResponse},
};

/// Register a new user.
///
/// # Errors
/// Returns validation errors, a conflict for a duplicate email, or database
/// errors.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let password_hash = hash_password(&payload.password)?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (email, password_hash) VALUES ($1, $2)
         RETURNING id, email, password_hash, created_at",
    )
    .bind(&payload.email)
    .bind(&password_hash)
    .fetch_one(&state.db)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict("user with this email already exists".into())
        }
        _ => AppError::Database(e),
    })?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Authenticate a user and return a bearer token.
///
/// Unknown email and wrong password produce the same response.
///
/// # Errors
/// Returns validation, invalid credentials, or database errors.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, created_at FROM users WHERE email = $1",
    )
    .bind(&payload.email)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(&payload.password, &user.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    let access_token = create_access_token(user.id, &state.config)?;
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".into(),
    }))
}

/// Return the authenticated user's own record.
#[allow(clippy::unused_async)]
pub async fn me(Extension(user): Extension<User>) -> AppResult<Json<UserResponse>> {
    Ok(Json(user.into()))
}
