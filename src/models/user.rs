use serde::Deserialize;

/// A stored account
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    /// Argon2 PHC string
    pub password: String,
    pub active: i32,
}

/// Account state derived from the stored `active` code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    Active,
    Inactive,
    Archived,
}

impl User {
    pub fn status(&self) -> AccountStatus {
        match self.active {
            0 => AccountStatus::Inactive,
            3 => AccountStatus::Archived,
            _ => AccountStatus::Active,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UserLogin {
    pub username: String,
    pub password: String,
}
