use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Book {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub author: Option<String>,
    pub total_pages: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct ReadingLog {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    pub pages_read: i32,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// JWT payload. `sub` carries the user id as a string; anything that does not
/// parse back to a numeric id is rejected as unauthorized.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

/// No length bound on the login password: a too-short password is just a
/// wrong password and answers 401 like any other credential failure.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(max = 255))]
    pub author: Option<String>,
    #[validate(range(min = 1, max = 10000))]
    pub total_pages: Option<i32>,
}

/// Partial update: omitted (or explicitly null) fields keep their prior value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBookRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(max = 255))]
    pub author: Option<String>,
    #[validate(range(min = 1, max = 10000))]
    pub total_pages: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub author: Option<String>,
    pub total_pages: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<Book> for BookResponse {
    fn from(b: Book) -> Self {
        Self {
            id: b.id,
            user_id: b.user_id,
            title: b.title,
            author: b.author,
            total_pages: b.total_pages,
            created_at: b.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReadingLogRequest {
    pub book_id: i64,
    #[validate(range(min = 1, max = 10000))]
    pub pages_read: i32,
    /// Defaults to the current UTC day when omitted.
    pub date: Option<NaiveDate>,
    #[validate(length(max = 1000))]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateReadingLogRequest {
    pub book_id: Option<i64>,
    #[validate(range(min = 1, max = 10000))]
    pub pages_read: Option<i32>,
    pub date: Option<NaiveDate>,
    #[validate(length(max = 1000))]
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReadingLogResponse {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    pub pages_read: i32,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ReadingLog> for ReadingLogResponse {
    fn from(l: ReadingLog) -> Self {
        Self {
            id: l.id,
            user_id: l.user_id,
            book_id: l.book_id,
            pages_read: l.pages_read,
            date: l.date,
            note: l.note,
            created_at: l.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ReadingLogListParams {
    pub book_id: Option<i64>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    pub book_id: Option<i64>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub total_pages_read: i64,
}
