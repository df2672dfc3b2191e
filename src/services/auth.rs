//! Password hashing and access-token handling.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    db::UserStore,
    error::{AppError, AppResult},
    models::{AccountStatus, UserLogin},
};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// JWT claims carried by access tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies HS256 access tokens
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, lifetime_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            lifetime: Duration::minutes(lifetime_minutes),
        }
    }

    pub fn issue(&self, username: &str) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to issue access token: {}", e)))
    }

    /// Decodes `token`, rejecting bad signatures and expired tokens
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected access token");
                AppError::Unauthorized("Invalid or expired token".to_string())
            })
    }
}

/// Hashes `password` into an Argon2 PHC string
///
/// Hashing is CPU bound, so it runs on the blocking pool.
pub async fn hash_password(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || hash_password_blocking(&password))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
}

fn hash_password_blocking(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Checks `password` against a stored PHC string
pub async fn verify_password(password: String, stored_hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&stored_hash)
            .map_err(|e| AppError::Internal(format!("Malformed password hash: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?
}

/// Exchanges credentials for an access token
pub async fn login(
    users: &dyn UserStore,
    tokens: &TokenIssuer,
    credentials: UserLogin,
) -> AppResult<String> {
    let user = users
        .find_by_username(&credentials.username)
        .await?
        .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    if !verify_password(credentials.password, user.password.clone()).await? {
        tracing::info!(username = %user.username, "Rejected login with wrong password");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let rejection = match user.status() {
        AccountStatus::Active => None,
        AccountStatus::Inactive => Some("User is inactive"),
        AccountStatus::Archived => Some("User is deleted or archived"),
    };
    if let Some(reason) = rejection {
        tracing::info!(username = %user.username, reason, "Rejected login for disabled account");
        return Err(AppError::Unauthorized(reason.to_string()));
    }

    tracing::info!(username = %user.username, "User logged in");
    tokens.issue(&user.username)
}

/// Creates the bootstrap account unless one with that name exists
///
/// Returns `true` when a new account was created.
pub async fn ensure_default_user(
    users: &dyn UserStore,
    username: &str,
    password: &str,
) -> AppResult<bool> {
    if users.find_by_username(username).await?.is_some() {
        return Ok(false);
    }

    let hash = hash_password(password.to_string()).await?;
    users.create_user(username, &hash).await?;
    tracing::info!(username = %username, "Seeded default user");
    Ok(true)
}
