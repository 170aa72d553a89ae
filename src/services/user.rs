use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder,
};
use async_trait::async_trait;
use deadpool_postgres::Pool;
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroize;

use crate::{
    error::{AppError, Result},
    models::user::{NewUser, RegisterRequest, User},
    repositories::user as user_repo,
};

/// The memory cost for Argon2 in MB.
const ARGON2_MEMORY_MB: u32 = 19;
/// The number of iterations for Argon2.
const ARGON2_ITERATIONS: u32 = 2;
/// The parallelism factor for Argon2.
const ARGON2_PARALLELISM: u32 = 1;

/// Hashes a password using Argon2id.
///
/// # Arguments
///
/// * `password` - The password to hash.
///
/// # Returns
///
/// A `Result` containing the PHC-encoded hash.
pub fn hash_password(password: &str) -> Result<String> {
    let mut password_bytes = password.as_bytes().to_vec();

    let mut salt_bytes = [0u8; 16];
    OsRng.try_fill_bytes(&mut salt_bytes)
        .map_err(|e| AppError::Internal(format!("Failed to generate salt: {}", e)))?;

    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| AppError::Internal(format!("Salt encoding error: {}", e)))?;

    let argon2 = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        ParamsBuilder::new()
            .m_cost(ARGON2_MEMORY_MB * 1024)
            .t_cost(ARGON2_ITERATIONS)
            .p_cost(ARGON2_PARALLELISM)
            .build()
            .map_err(|e| AppError::Internal(format!("Argon2 params: {}", e)))?,
    );

    let password_hash = argon2
        .hash_password(&password_bytes, &salt)
        .map_err(|e| AppError::Internal(format!("Argon2 hash error: {}", e)))?
        .to_string();

    password_bytes.zeroize();
    tracing::debug!("Password hashed successfully with Argon2");
    Ok(password_hash)
}

/// Verifies a password against a PHC-encoded hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let mut password_bytes = password.as_bytes().to_vec();
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Hash parse error: {}", e)))?;
    let result = Argon2::default()
        .verify_password(&password_bytes, &parsed_hash)
        .is_ok();

    password_bytes.zeroize();
    Ok(result)
}

/// Hashes the password of a registration request.
pub fn new_user_from(request: RegisterRequest) -> Result<NewUser> {
    let RegisterRequest {
        user_id,
        user_name,
        mut user_password,
        user_mobile,
    } = request;
    let password_hash = hash_password(&user_password)?;
    user_password.zeroize();

    Ok(NewUser {
        user_id,
        user_name,
        user_mobile,
        password_hash,
    })
}

/// Account operations.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Registers a user. Returns `None` if the id is already taken.
    async fn register_user(&self, request: RegisterRequest) -> Result<Option<User>>;

    /// Looks a user up by id.
    async fn find_user(&self, user_id: &str) -> Result<Option<User>>;

    /// Returns the user if `password` matches, `None` otherwise.
    async fn validate_credentials(&self, user_id: &str, password: &str) -> Result<Option<User>> {
        let Some(user) = self.find_user(user_id).await? else {
            return Ok(None);
        };
        if verify_password(password, &user.password_hash)? {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }
}

/// PostgreSQL-backed `UserService`.
#[derive(Clone)]
pub struct PgUserService {
    db: Pool,
}

impl PgUserService {
    /// Creates a new `PgUserService`.
    pub fn new(db: Pool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserService for PgUserService {
    async fn register_user(&self, request: RegisterRequest) -> Result<Option<User>> {
        tracing::debug!("🔐 Creating user: {}", request.user_id);
        let new_user = new_user_from(request)?;
        let user = user_repo::create_user(&self.db, &new_user).await?;
        if let Some(user) = &user {
            tracing::info!("✅ User created with ID: {}", user.user_id);
        }
        Ok(user)
    }

    async fn find_user(&self, user_id: &str) -> Result<Option<User>> {
        user_repo::find_by_id(&self.db, user_id).await
    }
}
