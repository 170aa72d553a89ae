use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a user in the system.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The user's login id.
    pub user_id: String,
    /// The user's full name.
    pub user_name: String,
    /// The user's mobile number.
    pub user_mobile: String,
    /// The user's Argon2 password hash.
    #[serde(skip)]
    pub password_hash: String,
    /// The timestamp when the user registered.
    pub user_added_date: DateTime<Utc>,
}

/// The request payload for user registration.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    pub user_password: String,
    #[serde(default)]
    pub user_mobile: String,
}

/// The request payload for user login.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_id: String,
    pub user_password: String,
}

/// A user about to be stored; the password is already hashed.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub user_id: String,
    pub user_name: String,
    pub user_mobile: String,
    pub password_hash: String,
}
