use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tower_cookies::cookie::time::Duration;
use tower_cookies::{Cookie, Cookies};
use uuid::Uuid;

use crate::{
    config::SECONDS_PER_DAY,
    error::{AppError, Result},
    middleware_layer::auth::{SessionContext, SESSION_COOKIE},
    models::{
        message::MessageResponse,
        session::Session,
        user::{LoginRequest, RegisterRequest},
    },
    state::AppState,
    validation::{
        auth::{validate_password, validate_user_id},
        request::json_body,
    },
};

/// Creates the session cookie.
fn create_session_cookie(session_id: Uuid, max_age_days: i64, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, session_id.to_string());

    cookie.set_http_only(true);
    if secure {
        cookie.set_secure(true);
    }
    cookie.set_same_site(tower_cookies::cookie::SameSite::Lax);
    cookie.set_max_age(Duration::seconds(max_age_days.saturating_mul(SECONDS_PER_DAY)));
    cookie.set_path("/");

    cookie
}

/// Handles user registration.
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Response> {
    let payload = json_body(payload)?;
    tracing::info!("📝 Register attempt for: {}", payload.user_id);
    validate_user_id(&payload.user_id)?;
    validate_password(&payload.user_password)?;

    let user = state
        .users
        .register_user(payload)
        .await?
        .ok_or(AppError::Conflict)?;

    tracing::info!("✅ User registered: {}", user.user_id);
    Ok((StatusCode::CREATED, Json(user)).into_response())
}

/// Handles user login.
///
/// On success a server-side session is stored and its id is handed out in
/// the `session_id` cookie.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response> {
    let payload = json_body(payload)?;
    tracing::info!("🔐 Login attempt for: {}", payload.user_id);
    validate_user_id(&payload.user_id)?;

    let user = state
        .users
        .validate_credentials(&payload.user_id, &payload.user_password)
        .await?
        .ok_or_else(|| AppError::Authentication("Invalid user id or password".to_string()))?;

    let session_id = Uuid::new_v4();
    let session = Session::start(user.user_id.clone(), state.config.session_duration_days)?;
    state
        .sessions
        .save(session_id, &session, state.config.session_ttl_secs())
        .await?;

    cookies.add(create_session_cookie(
        session_id,
        state.config.session_duration_days,
        state.config.production,
    ));

    tracing::info!("✅ User logged in: {}", user.user_id);
    Ok((StatusCode::OK, Json(MessageResponse::ok("Login successful"))).into_response())
}

/// Handles user logout.
#[axum::debug_handler]
pub async fn logout(
    State(state): State<AppState>,
    session: SessionContext,
    cookies: Cookies,
) -> Result<Response> {
    let user_id = session.require_user()?;
    let session_id = session.session_id().ok_or(AppError::Unauthorized)?;

    state.sessions.remove(session_id).await?;

    let mut session_cookie = Cookie::new(SESSION_COOKIE, "");
    session_cookie.set_max_age(Duration::seconds(0));
    session_cookie.set_path("/");
    cookies.remove(session_cookie);

    tracing::info!("👋 User logged out: {}", user_id);
    Ok((StatusCode::OK, Json(MessageResponse::ok("Logout successful"))).into_response())
}
