use axum::{
    body::Body,
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use crate::{
    observer::{self, Failure, Outcome},
    state::AppState,
};

/// A middleware that reports every handler invocation to the configured
/// observer.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `req` - The incoming request.
/// * `next` - The next middleware in the chain.
///
/// # Returns
///
/// The handler's `Response`, unchanged.
pub async fn log_invocation(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let operation = observer::operation_name(
        req.method(),
        req.extensions().get::<MatchedPath>().map(MatchedPath::as_str),
    );
    let watcher = state.observer.clone();

    observer::notify(&operation, || watcher.before(&operation));

    let response = next.run(req).await;
    let status = response.status();

    match response.extensions().get::<Failure>() {
        Some(failure) => {
            observer::notify(&operation, || watcher.after_throwing(&operation, status, failure));
        }
        None if status.is_server_error() => {
            let failure = Failure(status.to_string());
            observer::notify(&operation, || watcher.after_throwing(&operation, status, &failure));
        }
        None => {
            let outcome = Outcome { status };
            observer::notify(&operation, || watcher.after_returning(&operation, &outcome));
        }
    }

    observer::notify(&operation, || watcher.after(&operation));

    response
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{http::StatusCode, middleware, response::Response, routing::post, Router};
    use serde_json::json;

    use super::log_invocation;
    use crate::error::{AppError, Result};
    use crate::routes::router;
    use crate::test_support::{login_as, send, test_state, PanickingObserver, RecordingObserver};

    #[tokio::test]
    async fn successful_call_is_reported_before_returning_after() {
        let observer = Arc::new(RecordingObserver::default());
        let state = test_state().with_observer(observer.clone());
        let cookie = login_as(&state, "u1").await;
        let app = router(state);

        let (status, _) = send(&app, "GET", "/category", Some(&cookie), None).await;
        assert_eq!(status, StatusCode::OK);

        assert_eq!(
            observer.events(),
            vec![
                "before:get_category_by_user_id",
                "returning:get_category_by_user_id:200",
                "after:get_category_by_user_id",
            ]
        );
    }

    #[tokio::test]
    async fn domain_statuses_are_ordinary_returns() {
        let observer = Arc::new(RecordingObserver::default());
        let state = test_state().with_observer(observer.clone());
        let cookie = login_as(&state, "u1").await;
        let app = router(state);

        let (status, _) = send(&app, "DELETE", "/reminder/3", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _) = send(&app, "DELETE", "/category/42", Some(&cookie), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        assert_eq!(
            observer.events(),
            vec![
                "before:delete_reminder",
                "returning:delete_reminder:401",
                "after:delete_reminder",
                "before:delete_category",
                "returning:delete_category:404",
                "after:delete_category",
            ]
        );
    }

    #[tokio::test]
    async fn infrastructure_error_is_reported_as_throwing() {
        async fn broken() -> Result<Response> {
            Err(AppError::Internal("pool exhausted".into()))
        }

        let observer = Arc::new(RecordingObserver::default());
        let state = test_state().with_observer(observer.clone());
        let app = Router::new()
            .route("/category", post(broken))
            .route_layer(middleware::from_fn_with_state(state.clone(), log_invocation))
            .with_state(state);

        let (status, body) = send(&app, "POST", "/category", None, None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");

        assert_eq!(
            observer.events(),
            vec![
                "before:create_category",
                "throwing:create_category:500",
                "after:create_category",
            ]
        );
    }

    #[tokio::test]
    async fn panicking_observer_cannot_change_the_response() {
        let state = test_state().with_observer(Arc::new(PanickingObserver));
        let cookie = login_as(&state, "u1").await;
        let app = router(state);
        let category = json!({ "categoryId": 1, "categoryName": "Work" });

        let (status, created) =
            send(&app, "POST", "/category", Some(&cookie), Some(category.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["categoryId"], 1);

        let (status, _) = send(&app, "POST", "/category", Some(&cookie), Some(category)).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }
}
