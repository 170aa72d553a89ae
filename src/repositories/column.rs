use tokio_postgres::{types::FromSql, Row};

use crate::error::{AppError, Result};

/// Reads `name` from `row`, reporting a missing or mistyped column as `MissingData`.
pub fn get<'a, T: FromSql<'a>>(row: &'a Row, name: &str) -> Result<T> {
    row.try_get(name).map_err(|_| AppError::MissingData(name.to_string()))
}
