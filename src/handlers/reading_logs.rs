use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    AppState, store,
    errors::{AppError, AppResult},
    models::{
        CreateReadingLogRequest, ReadingLogListParams, ReadingLogResponse, SummaryParams,
        SummaryResponse, UpdateReadingLogRequest, User,
    },
};

/// Create a reading log against one of the authenticated user's books.
///
/// The target book is ownership-checked before anything is inserted; a book
/// owned by someone else reads as not found.
///
/// # Errors
/// Returns validation, not found, or database errors.
pub async fn create_log(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Json(payload): Json<CreateReadingLogRequest>,
) -> AppResult<(StatusCode, Json<ReadingLogResponse>)> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    store::get_owned_book(&state.db, user.id, payload.book_id).await?;

    let date = payload.date.unwrap_or_else(|| Utc::now().date_naive());
    let log = store::insert_log(&state.db, user.id, &payload, date).await?;
    Ok((StatusCode::CREATED, Json(log.into())))
}

/// List the authenticated user's reading logs, most recent date first.
///
/// # Errors
/// Returns database errors.
pub async fn list_logs(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Query(params): Query<ReadingLogListParams>,
) -> AppResult<Json<Vec<ReadingLogResponse>>> {
    let logs = store::list_logs(
        &state.db,
        user.id,
        params.book_id,
        params.date_from,
        params.date_to,
        params.skip,
        params.limit,
    )
    .await?;
    Ok(Json(logs.into_iter().map(Into::into).collect()))
}

/// Total pages read over the authenticated user's logs, with optional book
/// and date-range filters.
///
/// # Errors
/// Returns database errors.
pub async fn summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Query(params): Query<SummaryParams>,
) -> AppResult<Json<SummaryResponse>> {
    let total_pages_read = store::sum_pages(
        &state.db,
        user.id,
        params.book_id,
        params.date_from,
        params.date_to,
    )
    .await?;
    Ok(Json(SummaryResponse { total_pages_read }))
}

/// Get one of the authenticated user's reading logs.
///
/// # Errors
/// Returns not found or database errors.
pub async fn get_log(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(log_id): Path<i64>,
) -> AppResult<Json<ReadingLogResponse>> {
    let log = store::get_owned_log(&state.db, user.id, log_id).await?;
    Ok(Json(log.into()))
}

/// Partially update one of the authenticated user's reading logs. A changed
/// `book_id` is ownership-checked again before it is applied.
///
/// # Errors
/// Returns validation, not found, or database errors.
pub async fn update_log(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(log_id): Path<i64>,
    Json(payload): Json<UpdateReadingLogRequest>,
) -> AppResult<Json<ReadingLogResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let log = store::get_owned_log(&state.db, user.id, log_id).await?;

    if let Some(book_id) = payload.book_id {
        store::get_owned_book(&state.db, user.id, book_id).await?;
    }

    let log = store::update_log(&state.db, log, &payload).await?;
    Ok(Json(log.into()))
}

/// Delete one of the authenticated user's reading logs.
///
/// # Errors
/// Returns not found or database errors.
pub async fn delete_log(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(log_id): Path<i64>,
) -> AppResult<StatusCode> {
    store::delete_log(&state.db, user.id, log_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
