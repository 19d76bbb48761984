use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::Claims,
};
use anyhow::anyhow;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

/// bcrypt only keys off the first 72 bytes of input; anything beyond that must
/// be cut off the same way on both the hash and verify paths.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Truncate a password to at most [`MAX_PASSWORD_BYTES`] bytes of UTF-8,
/// backing off to the previous char boundary so a multi-byte character is
/// dropped whole rather than split.
#[must_use]
pub fn truncate_password(password: &str) -> &str {
    if password.len() <= MAX_PASSWORD_BYTES {
        return password;
    }
    let mut end = MAX_PASSWORD_BYTES;
    while !password.is_char_boundary(end) {
        end -= 1;
    }
    &password[..end]
}

/// Hash a plaintext password with bcrypt (salted, adaptive cost).
///
/// # Errors
/// Returns an error if hashing fails.
pub fn hash_password(password: &str) -> AppResult<String> {
    let hash = bcrypt::hash(truncate_password(password), bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::Anyhow(anyhow!(e.to_string())))?;
    Ok(hash)
}

/// Verify a plaintext password against a stored bcrypt digest. The comparison
/// is delegated to bcrypt and runs in constant time.
///
/// # Errors
/// Returns an error if the stored digest is malformed.
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    bcrypt::verify(truncate_password(password), hash)
        .map_err(|e| AppError::Anyhow(anyhow!(e.to_string())))
}

/// Issue a signed access token for a user, expiring after the configured
/// access-token lifetime.
///
/// # Errors
/// Returns an error if token encoding fails.
pub fn create_access_token(user_id: i64, config: &Config) -> AppResult<String> {
    create_token(
        user_id,
        Duration::minutes(config.access_token_expire_minutes),
        config,
    )
}

/// Issue a signed token for a user with an explicit time-to-live.
///
/// # Errors
/// Returns an error if token encoding fails or time conversion fails.
pub fn create_token(user_id: i64, expires_in: Duration, config: &Config) -> AppResult<String> {
    let exp_ts = (Utc::now() + expires_in).timestamp();
    let exp = usize::try_from(exp_ts).map_err(|e| AppError::Anyhow(anyhow!(e.to_string())))?;

    let claims = Claims {
        sub: user_id.to_string(),
        exp,
    };

    let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    let token = encode(&Header::new(config.jwt_algorithm), &claims, &key)
        .map_err(|e| AppError::Anyhow(e.into()))?;
    Ok(token)
}

/// Decode and validate a token's signature and expiry.
///
/// # Errors
/// Returns `Unauthorized` for any decoding failure; callers cannot tell a
/// tampered token from an expired one.
pub fn decode_token(token: &str, config: &Config) -> AppResult<Claims> {
    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
    // No leeway: a token is invalid from its expiration instant onward.
    let mut validation = Validation::new(config.jwt_algorithm);
    validation.leeway = 0;
    let data = decode::<Claims>(token, &key, &validation).map_err(|_| AppError::Unauthorized)?;
    Ok(data.claims)
}

/// Validate a token and recover the numeric user id from its subject claim.
///
/// # Errors
/// Returns `Unauthorized` if the token is invalid or the subject is not a
/// numeric id.
pub fn token_user_id(token: &str, config: &Config) -> AppResult<i64> {
    let claims = decode_token(token, config)?;
    claims.sub.parse().map_err(|_| AppError::Unauthorized)
}
