use deadpool_postgres::Pool;
use tokio_postgres::Row;

use crate::{
    error::Result,
    repositories::column::get,
    models::user::{NewUser, User},
};

/// A helper function to map a `tokio_postgres::Row` to a `User`.
fn row_to_user(row: &Row) -> Result<User> {
    Ok(User {
        user_id: get(row, "user_id")?,
        user_name: get(row, "user_name")?,
        user_mobile: get(row, "user_mobile")?,
        password_hash: get(row, "password_hash")?,
        user_added_date: get(row, "user_added_date")?,
    })
}

/// Creates a new user in the database.
///
/// Returns `None` when the user id is already registered.
pub async fn create_user(pool: &Pool, user: &NewUser) -> Result<Option<User>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            r#"
            INSERT INTO users (user_id, user_name, user_mobile, password_hash)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO NOTHING
            RETURNING user_id, user_name, user_mobile, password_hash, user_added_date
            "#,
            &[
                &user.user_id,
                &user.user_name,
                &user.user_mobile,
                &user.password_hash,
            ],
        )
        .await?;
    row.map(|r| row_to_user(&r)).transpose()
}

/// Finds a user by their ID.
pub async fn find_by_id(pool: &Pool, user_id: &str) -> Result<Option<User>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            r#"
            SELECT user_id, user_name, user_mobile, password_hash, user_added_date
            FROM users
            WHERE user_id = $1
            "#,
            &[&user_id],
        )
        .await?;
    row.map(|r| row_to_user(&r)).transpose()
}
