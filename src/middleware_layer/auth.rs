use axum::{extract::FromRequestParts, http::request::Parts};
use tower_cookies::Cookies;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::session::Session,
    state::AppState,
};

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "session_id";

/// Read access to the user a request is authenticated as.
pub trait AuthenticatedUser {
    /// The logged-in user id, if any.
    fn logged_in_user_id(&self) -> Option<&str>;
}

/// Returns whether the session carries a logged-in user id.
pub fn validate_user<S: AuthenticatedUser + ?Sized>(session: &S) -> bool {
    session
        .logged_in_user_id()
        .is_some_and(|user_id| !user_id.is_empty())
}

/// The session a request arrived with, resolved from the `session_id` cookie.
///
/// Extraction never fails on a missing, unknown, or expired session; the
/// context is simply anonymous and handlers answer `401` themselves.
#[derive(Clone, Debug, Default)]
pub struct SessionContext {
    session_id: Option<Uuid>,
    session: Option<Session>,
}

impl SessionContext {
    /// A context with no session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A context for an established session.
    pub fn new(session_id: Uuid, session: Session) -> Self {
        Self {
            session_id: Some(session_id),
            session: Some(session),
        }
    }

    /// The id of the resolved session.
    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    /// Returns the logged-in user id or `AppError::Unauthorized`.
    pub fn require_user(&self) -> Result<&str> {
        if !validate_user(self) {
            return Err(AppError::Unauthorized);
        }
        self.logged_in_user_id().ok_or(AppError::Unauthorized)
    }
}

impl AuthenticatedUser for SessionContext {
    fn logged_in_user_id(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.user_id.as_str())
    }
}

/// Extracts the session token from the request cookies.
fn extract_session_token(cookies: &Cookies) -> Option<Uuid> {
    cookies
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

impl FromRequestParts<AppState> for SessionContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let cookies = Cookies::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Internal(msg.to_string()))?;

        let Some(session_id) = extract_session_token(&cookies) else {
            tracing::debug!("🔐 No session_id cookie found");
            return Ok(Self::anonymous());
        };

        let session = match state.sessions.load(session_id).await {
            Ok(Some(session)) => session,
            Ok(None) => {
                tracing::debug!("🔐 Unknown session: {}", session_id);
                return Ok(Self::anonymous());
            }
            Err(e) => {
                tracing::warn!("❌ Session lookup failed: {}", e);
                return Ok(Self::anonymous());
            }
        };

        if session.is_expired() {
            tracing::warn!("❌ Session expired for user: {}", session.user_id);
            if let Err(e) = state.sessions.remove(session_id).await {
                tracing::warn!("❌ Failed to drop expired session: {}", e);
            }
            return Ok(Self::anonymous());
        }

        tracing::debug!("✅ User authenticated: {}", session.user_id);
        Ok(Self::new(session_id, session))
    }
}
