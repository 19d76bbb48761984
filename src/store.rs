//! Ownership-scoped persistence. Every lookup filters by both the row id and
//! the owning user id in a single query, so a row owned by someone else is
//! indistinguishable from a row that does not exist.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::{
    errors::{AppError, AppResult},
    models::{
        Book, CreateBookRequest, CreateReadingLogRequest, ReadingLog, UpdateBookRequest,
        UpdateReadingLogRequest,
    },
};

pub const DEFAULT_PAGE_LIMIT: i64 = 100;

/// Fetch a book only if it belongs to `user_id`, else `NotFound`.
///
/// # Errors
/// Returns `NotFound` if no matching owned row exists, or database errors.
pub async fn get_owned_book(db: &PgPool, user_id: i64, book_id: i64) -> AppResult<Book> {
    sqlx::query_as::<_, Book>(
        "SELECT id, user_id, title, author, total_pages, created_at
         FROM books WHERE id = $1 AND user_id = $2",
    )
    .bind(book_id)
    .bind(user_id)
    .fetch_optional(db)
    .await?
    .ok_or(AppError::NotFound)
}

/// Fetch a reading log only if it belongs to `user_id`, else `NotFound`.
///
/// # Errors
/// Returns `NotFound` if no matching owned row exists, or database errors.
pub async fn get_owned_log(db: &PgPool, user_id: i64, log_id: i64) -> AppResult<ReadingLog> {
    sqlx::query_as::<_, ReadingLog>(
        "SELECT id, user_id, book_id, pages_read, date, note, created_at
         FROM reading_logs WHERE id = $1 AND user_id = $2",
    )
    .bind(log_id)
    .bind(user_id)
    .fetch_optional(db)
    .await?
    .ok_or(AppError::NotFound)
}

/// Insert a book owned by `user_id`.
///
/// # Errors
/// Returns database errors.
pub async fn insert_book(db: &PgPool, user_id: i64, req: &CreateBookRequest) -> AppResult<Book> {
    let book = sqlx::query_as::<_, Book>(
        "INSERT INTO books (user_id, title, author, total_pages)
         VALUES ($1, $2, $3, $4)
         RETURNING id, user_id, title, author, total_pages, created_at",
    )
    .bind(user_id)
    .bind(&req.title)
    .bind(&req.author)
    .bind(req.total_pages)
    .fetch_one(db)
    .await?;
    Ok(book)
}

/// List a user's books with skip/limit pagination, ordered by id for stable
/// pages. Out-of-range skip yields an empty list.
///
/// # Errors
/// Returns database errors.
pub async fn list_books(
    db: &PgPool,
    user_id: i64,
    skip: Option<i64>,
    limit: Option<i64>,
) -> AppResult<Vec<Book>> {
    let books = sqlx::query_as::<_, Book>(
        "SELECT id, user_id, title, author, total_pages, created_at
         FROM books WHERE user_id = $1
         ORDER BY id
         OFFSET $2 LIMIT $3",
    )
    .bind(user_id)
    .bind(skip.unwrap_or(0).max(0))
    .bind(limit.unwrap_or(DEFAULT_PAGE_LIMIT).max(0))
    .fetch_all(db)
    .await?;
    Ok(books)
}

/// Apply a partial update to an already ownership-checked book. Omitted
/// fields keep their prior value.
///
/// # Errors
/// Returns `NotFound` if the row vanished between guard and update, or
/// database errors.
pub async fn update_book(db: &PgPool, book: Book, req: &UpdateBookRequest) -> AppResult<Book> {
    let title = req.title.as_deref().unwrap_or(&book.title);
    let author = req.author.as_deref().or(book.author.as_deref());
    let total_pages = req.total_pages.or(book.total_pages);

    sqlx::query_as::<_, Book>(
        "UPDATE books SET title = $1, author = $2, total_pages = $3
         WHERE id = $4 AND user_id = $5
         RETURNING id, user_id, title, author, total_pages, created_at",
    )
    .bind(title)
    .bind(author)
    .bind(total_pages)
    .bind(book.id)
    .bind(book.user_id)
    .fetch_optional(db)
    .await?
    .ok_or(AppError::NotFound)
}

/// Delete a user's book; its reading logs cascade at the database level.
///
/// # Errors
/// Returns `NotFound` if no matching owned row exists, or database errors.
pub async fn delete_book(db: &PgPool, user_id: i64, book_id: i64) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM books WHERE id = $1 AND user_id = $2")
        .bind(book_id)
        .bind(user_id)
        .execute(db)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// Insert a reading log for `user_id`. The caller must already have guarded
/// `req.book_id` through [`get_owned_book`].
///
/// # Errors
/// Returns database errors.
pub async fn insert_log(
    db: &PgPool,
    user_id: i64,
    req: &CreateReadingLogRequest,
    date: NaiveDate,
) -> AppResult<ReadingLog> {
    let log = sqlx::query_as::<_, ReadingLog>(
        "INSERT INTO reading_logs (user_id, book_id, pages_read, date, note)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id, user_id, book_id, pages_read, date, note, created_at",
    )
    .bind(user_id)
    .bind(req.book_id)
    .bind(req.pages_read)
    .bind(date)
    .bind(&req.note)
    .fetch_one(db)
    .await?;
    Ok(log)
}

/// List a user's reading logs, newest date first with insertion order breaking
/// ties. Optional filters compose with AND semantics.
///
/// # Errors
/// Returns database errors.
#[allow(clippy::too_many_arguments)]
pub async fn list_logs(
    db: &PgPool,
    user_id: i64,
    book_id: Option<i64>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    skip: Option<i64>,
    limit: Option<i64>,
) -> AppResult<Vec<ReadingLog>> {
    let logs = sqlx::query_as::<_, ReadingLog>(
        "SELECT id, user_id, book_id, pages_read, date, note, created_at
         FROM reading_logs
         WHERE user_id = $1
           AND ($2::BIGINT IS NULL OR book_id = $2)
           AND ($3::DATE IS NULL OR date >= $3)
           AND ($4::DATE IS NULL OR date <= $4)
         ORDER BY date DESC, id ASC
         OFFSET $5 LIMIT $6",
    )
    .bind(user_id)
    .bind(book_id)
    .bind(date_from)
    .bind(date_to)
    .bind(skip.unwrap_or(0).max(0))
    .bind(limit.unwrap_or(DEFAULT_PAGE_LIMIT).max(0))
    .fetch_all(db)
    .await?;
    Ok(logs)
}

/// Apply a partial update to an already ownership-checked reading log. The
/// caller must re-guard `req.book_id` through [`get_owned_book`] whenever it
/// is present.
///
/// # Errors
/// Returns `NotFound` if the row vanished between guard and update, or
/// database errors.
pub async fn update_log(
    db: &PgPool,
    log: ReadingLog,
    req: &UpdateReadingLogRequest,
) -> AppResult<ReadingLog> {
    let book_id = req.book_id.unwrap_or(log.book_id);
    let pages_read = req.pages_read.unwrap_or(log.pages_read);
    let date = req.date.unwrap_or(log.date);
    let note = req.note.as_deref().or(log.note.as_deref());

    sqlx::query_as::<_, ReadingLog>(
        "UPDATE reading_logs SET book_id = $1, pages_read = $2, date = $3, note = $4
         WHERE id = $5 AND user_id = $6
         RETURNING id, user_id, book_id, pages_read, date, note, created_at",
    )
    .bind(book_id)
    .bind(pages_read)
    .bind(date)
    .bind(note)
    .bind(log.id)
    .bind(log.user_id)
    .fetch_optional(db)
    .await?
    .ok_or(AppError::NotFound)
}

/// Delete a user's reading log.
///
/// # Errors
/// Returns `NotFound` if no matching owned row exists, or database errors.
pub async fn delete_log(db: &PgPool, user_id: i64, log_id: i64) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM reading_logs WHERE id = $1 AND user_id = $2")
        .bind(log_id)
        .bind(user_id)
        .execute(db)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// Sum pages read over a user's logs matching all provided filters. An empty
/// match set sums to 0.
///
/// # Errors
/// Returns database errors.
pub async fn sum_pages(
    db: &PgPool,
    user_id: i64,
    book_id: Option<i64>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
) -> AppResult<i64> {
    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(SUM(pages_read), 0)
         FROM reading_logs
         WHERE user_id = $1
           AND ($2::BIGINT IS NULL OR book_id = $2)
           AND ($3::DATE IS NULL OR date >= $3)
           AND ($4::DATE IS NULL OR date <= $4)",
    )
    .bind(user_id)
    .bind(book_id)
    .bind(date_from)
    .bind(date_to)
    .fetch_one(db)
    .await?;
    Ok(total)
}
