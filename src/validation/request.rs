use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    Json,
};

use crate::error::{AppError, Result};

/// Unwraps a JSON body, turning extractor rejections into `400`s.
///
/// Handlers take the extractor result instead of the body itself so the
/// session check runs before the payload is judged.
pub fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}

/// Unwraps an integer path id.
pub fn path_id(id: std::result::Result<Path<i32>, PathRejection>) -> Result<i32> {
    id.map(|Path(id)| id)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}
