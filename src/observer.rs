//! Invocation observer for resource handlers.
//!
//! Every routed request is reported to an [`InvocationObserver`] at four
//! points: before the handler runs, after it returns a response, after it
//! fails, and finally after either of those. Observers only watch; they are
//! handed copies of what they need and cannot reach the response.

use std::panic::{AssertUnwindSafe, catch_unwind};

use axum::http::{Method, StatusCode};

/// Description of a failed invocation, attached to 5xx responses by
/// [`crate::error::AppError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure(pub String);

/// What a handler returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub status: StatusCode,
}

/// Watches handler invocations.
///
/// Implementations must not block; they run inline on the request path.
pub trait InvocationObserver: Send + Sync {
    /// Called before the handler runs.
    fn before(&self, operation: &str);

    /// Called after the handler produced a successful response.
    fn after_returning(&self, operation: &str, outcome: &Outcome);

    /// Called after the handler failed.
    fn after_throwing(&self, operation: &str, status: StatusCode, failure: &Failure);

    /// Called last for every invocation.
    fn after(&self, operation: &str);
}

/// Writes one `tracing` event per hook.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl InvocationObserver for TracingObserver {
    fn before(&self, operation: &str) {
        tracing::info!(operation, "➡️ before REST call");
    }

    fn after_returning(&self, operation: &str, outcome: &Outcome) {
        tracing::info!(operation, status = outcome.status.as_u16(), "✅ returned");
    }

    fn after_throwing(&self, operation: &str, status: StatusCode, failure: &Failure) {
        tracing::warn!(operation, status = status.as_u16(), failure = %failure.0, "❌ failed");
    }

    fn after(&self, operation: &str) {
        tracing::debug!(operation, "⬅️ after REST call");
    }
}

/// Runs an observer hook, swallowing any panic it raises.
pub fn notify<F>(operation: &str, hook: F)
where
    F: FnOnce(),
{
    if catch_unwind(AssertUnwindSafe(hook)).is_err() {
        tracing::error!(operation, "💥 invocation observer panicked; ignoring");
    }
}

/// Names the handler that serves `method` on the matched route.
pub fn operation_name(method: &Method, matched_path: Option<&str>) -> String {
    let name = match (method.as_str(), matched_path) {
        ("POST", Some("/category")) => "create_category",
        ("GET", Some("/category")) => "get_category_by_user_id",
        ("PUT", Some("/category/{id}")) => "update_category",
        ("DELETE", Some("/category/{id}")) => "delete_category",
        ("POST", Some("/reminder")) => "create_reminder",
        ("GET", Some("/reminder")) => "get_reminders_by_user_id",
        ("GET", Some("/reminder/{id}")) => "get_reminder_by_id",
        ("PUT", Some("/reminder/{id}")) => "update_reminder",
        ("DELETE", Some("/reminder/{id}")) => "delete_reminder",
        ("POST", Some("/user/register")) => "register",
        ("POST", Some("/login")) => "login",
        ("POST", Some("/logout")) => "logout",
        (_, Some(path)) => return format!("{} {}", method, path),
        (_, None) => return format!("{} <unmatched>", method),
    };
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_known_routes_after_their_handlers() {
        assert_eq!(operation_name(&Method::POST, Some("/category")), "create_category");
        assert_eq!(operation_name(&Method::GET, Some("/reminder/{id}")), "get_reminder_by_id");
        assert_eq!(operation_name(&Method::PATCH, Some("/category/{id}")), "PATCH /category/{id}");
        assert_eq!(operation_name(&Method::GET, None), "GET <unmatched>");
    }

    #[test]
    fn notify_swallows_panics() {
        let mut ran_after = false;
        notify("op", || panic!("observer bug"));
        notify("op", || ran_after = true);
        assert!(ran_after);
    }
}
