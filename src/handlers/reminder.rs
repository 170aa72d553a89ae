use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::{AppError, Result},
    middleware_layer::auth::SessionContext,
    models::{message::MessageResponse, reminder::ReminderRequest},
    state::AppState,
    validation::request::{json_body, path_id},
};

/// Creates a reminder owned by the logged-in user.
#[axum::debug_handler]
pub async fn create_reminder(
    State(state): State<AppState>,
    session: SessionContext,
    payload: std::result::Result<Json<ReminderRequest>, JsonRejection>,
) -> Result<Response> {
    let user_id = session.require_user()?;
    let draft = json_body(payload)?.into_draft(user_id);

    let reminder = state
        .reminders
        .create_reminder(draft)
        .await?
        .ok_or(AppError::Conflict)?;

    tracing::info!("✅ Reminder {} created by {}", reminder.reminder_id, user_id);
    Ok((StatusCode::CREATED, Json(reminder)).into_response())
}

/// Deletes a reminder.
#[axum::debug_handler]
pub async fn delete_reminder(
    State(state): State<AppState>,
    session: SessionContext,
    id: std::result::Result<Path<i32>, PathRejection>,
) -> Result<Response> {
    let user_id = session.require_user()?;
    let reminder_id = path_id(id)?;

    if !state.reminders.delete_reminder(reminder_id).await? {
        return Err(AppError::NotFound);
    }

    tracing::info!("🗑️ Reminder {} deleted by {}", reminder_id, user_id);
    Ok((StatusCode::OK, Json(MessageResponse::ok("Reminder deleted successfully"))).into_response())
}

/// Replaces a reminder; the id comes from the path, the owner from the session.
#[axum::debug_handler]
pub async fn update_reminder(
    State(state): State<AppState>,
    session: SessionContext,
    id: std::result::Result<Path<i32>, PathRejection>,
    payload: std::result::Result<Json<ReminderRequest>, JsonRejection>,
) -> Result<Response> {
    let user_id = session.require_user()?;
    let reminder_id = path_id(id)?;
    let draft = json_body(payload)?.into_draft(user_id);

    let reminder = state
        .reminders
        .update_reminder(draft, reminder_id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok((StatusCode::OK, Json(reminder)).into_response())
}

/// Lists the logged-in user's reminders.
#[axum::debug_handler]
pub async fn get_reminders_by_user_id(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<Response> {
    let user_id = session.require_user()?;
    let reminders = state.reminders.get_all_reminder_by_user_id(user_id).await?;

    Ok((StatusCode::OK, Json(reminders)).into_response())
}

/// Fetches one reminder.
#[axum::debug_handler]
pub async fn get_reminder_by_id(
    State(state): State<AppState>,
    session: SessionContext,
    id: std::result::Result<Path<i32>, PathRejection>,
) -> Result<Response> {
    session.require_user()?;
    let reminder_id = path_id(id)?;

    let reminder = state
        .reminders
        .get_reminder_by_id(reminder_id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok((StatusCode::OK, Json(reminder)).into_response())
}
