use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::{
    AppState, store,
    errors::{AppError, AppResult},
    models::{BookResponse, CreateBookRequest, PageParams, UpdateBookRequest, User},
};

/// Create a book owned by the authenticated user.
///
/// # Errors
/// Returns validation or database errors.
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Json(payload): Json<CreateBookRequest>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let book = store::insert_book(&state.db, user.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(book.into())))
}

/// List the authenticated user's books with skip/limit pagination.
///
/// # Errors
/// Returns database errors.
pub async fn list_books(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Vec<BookResponse>>> {
    let books = store::list_books(&state.db, user.id, params.skip, params.limit).await?;
    Ok(Json(books.into_iter().map(Into::into).collect()))
}

/// Get one of the authenticated user's books.
///
/// # Errors
/// Returns not found or database errors.
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(book_id): Path<i64>,
) -> AppResult<Json<BookResponse>> {
    let book = store::get_owned_book(&state.db, user.id, book_id).await?;
    Ok(Json(book.into()))
}

/// Partially update one of the authenticated user's books.
///
/// # Errors
/// Returns validation, not found, or database errors.
pub async fn update_book(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(book_id): Path<i64>,
    Json(payload): Json<UpdateBookRequest>,
) -> AppResult<Json<BookResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let book = store::get_owned_book(&state.db, user.id, book_id).await?;
    let book = store::update_book(&state.db, book, &payload).await?;
    Ok(Json(book.into()))
}

/// Delete one of the authenticated user's books along with its reading logs.
///
/// # Errors
/// Returns not found or database errors.
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(book_id): Path<i64>,
) -> AppResult<StatusCode> {
    store::delete_book(&state.db, user.id, book_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
