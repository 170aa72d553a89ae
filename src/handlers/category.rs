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
    models::{category::CategoryRequest, message::MessageResponse},
    state::AppState,
    validation::request::{json_body, path_id},
};

/// Creates a category owned by the logged-in user.
///
/// `201` with the stored category, `401` without a session, `409` if the id
/// is taken.
#[axum::debug_handler]
pub async fn create_category(
    State(state): State<AppState>,
    session: SessionContext,
    payload: std::result::Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<Response> {
    let user_id = session.require_user()?;
    let draft = json_body(payload)?.into_draft(user_id);

    let category = state
        .categories
        .create_category(draft)
        .await?
        .ok_or(AppError::Conflict)?;

    tracing::info!("✅ Category {} created by {}", category.category_id, user_id);
    Ok((StatusCode::CREATED, Json(category)).into_response())
}

/// Deletes a category.
#[axum::debug_handler]
pub async fn delete_category(
    State(state): State<AppState>,
    session: SessionContext,
    id: std::result::Result<Path<i32>, PathRejection>,
) -> Result<Response> {
    let user_id = session.require_user()?;
    let category_id = path_id(id)?;

    if !state.categories.delete_category(category_id).await? {
        return Err(AppError::NotFound);
    }

    tracing::info!("🗑️ Category {} deleted by {}", category_id, user_id);
    Ok((StatusCode::OK, Json(MessageResponse::ok("Category deleted successfully"))).into_response())
}

/// Replaces a category; the id comes from the path, the owner from the session.
#[axum::debug_handler]
pub async fn update_category(
    State(state): State<AppState>,
    session: SessionContext,
    id: std::result::Result<Path<i32>, PathRejection>,
    payload: std::result::Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<Response> {
    let user_id = session.require_user()?;
    let category_id = path_id(id)?;
    let draft = json_body(payload)?.into_draft(user_id);

    let category = state
        .categories
        .update_category(draft, category_id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok((StatusCode::OK, Json(category)).into_response())
}

/// Lists the logged-in user's categories.
#[axum::debug_handler]
pub async fn get_category_by_user_id(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<Response> {
    let user_id = session.require_user()?;
    let categories = state.categories.get_all_category_by_user_id(user_id).await?;

    tracing::debug!("📂 {} categories for {}", categories.len(), user_id);
    Ok((StatusCode::OK, Json(categories)).into_response())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::router;
    use crate::test_support::{counting_state, login_as, send, test_state};

    #[tokio::test]
    async fn every_category_route_rejects_anonymous_requests_without_calling_the_service() {
        let (state, categories, _) = counting_state();
        let app = router(state);
        let body = json!({ "categoryId": 1, "categoryName": "Work" });

        let requests = [
            ("POST", "/category", Some(body.clone())),
            ("GET", "/category", None),
            ("PUT", "/category/1", Some(body.clone())),
            ("DELETE", "/category/1", None),
        ];
        for (method, uri, payload) in requests {
            let (status, _) = send(&app, method, uri, None, payload).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        }

        // An unknown session id is just as anonymous.
        let forged = format!("session_id={}", uuid::Uuid::new_v4());
        let (status, _) = send(&app, "GET", "/category", Some(&forged), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        assert_eq!(categories.calls(), 0);
    }

    #[tokio::test]
    async fn anonymous_request_with_malformed_body_is_still_unauthorized() {
        let (state, categories, _) = counting_state();
        let app = router(state);

        let malformed = json!({ "nope": true });
        let (status, _) = send(&app, "POST", "/category", None, Some(malformed)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(categories.calls(), 0);
    }

    #[tokio::test]
    async fn duplicate_create_conflicts_and_keeps_the_first_record() {
        let state = test_state();
        let cookie = login_as(&state, "u1").await;
        let app = router(state);

        let work = json!({ "categoryId": 5, "categoryName": "Work" });
        let (status, _) = send(&app, "POST", "/category", Some(&cookie), Some(work)).await;
        assert_eq!(status, StatusCode::CREATED);

        let hijack = json!({ "categoryId": 5, "categoryName": "Hijack" });
        let (status, _) = send(&app, "POST", "/category", Some(&cookie), Some(hijack)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (_, list) = send(&app, "GET", "/category", Some(&cookie), None).await;
        assert_eq!(list.as_array().map(Vec::len), Some(1));
        assert_eq!(list[0]["categoryName"], "Work");
    }

    #[tokio::test]
    async fn owner_is_stamped_from_the_session() {
        let state = test_state();
        let cookie = login_as(&state, "u1").await;
        let app = router(state);

        let home = json!({
            "categoryId": 3,
            "categoryName": "Home",
            "categoryCreatedBy": "mallory",
        });
        let (status, created) = send(&app, "POST", "/category", Some(&cookie), Some(home)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["categoryCreatedBy"], "u1");

        let house = json!({ "categoryName": "House", "categoryCreatedBy": "mallory" });
        let (status, updated) = send(&app, "PUT", "/category/3", Some(&cookie), Some(house)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["categoryCreatedBy"], "u1");
        assert_eq!(updated["categoryName"], "House");
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_ids_are_not_found() {
        let state = test_state();
        let cookie = login_as(&state, "u1").await;
        let app = router(state);

        let ghost = json!({ "categoryName": "Ghost" });
        let (status, _) = send(&app, "PUT", "/category/42", Some(&cookie), Some(ghost)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "DELETE", "/category/42", Some(&cookie), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, list) = send(&app, "GET", "/category", Some(&cookie), None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn listing_only_returns_the_callers_categories() {
        let state = test_state();
        let alice = login_as(&state, "alice").await;
        let bob = login_as(&state, "bob").await;
        let app = router(state);

        let category = json!({ "categoryId": 1, "categoryName": "A" });
        send(&app, "POST", "/category", Some(&alice), Some(category)).await;

        let (status, list) = send(&app, "GET", "/category", Some(&bob), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn create_then_update_then_delete_round_trip() {
        let state = test_state();
        let cookie = login_as(&state, "u1").await;
        let app = router(state);

        let work = json!({ "categoryId": 5, "categoryName": "Work" });
        let (status, _) = send(&app, "POST", "/category", Some(&cookie), Some(work)).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, list) = send(&app, "GET", "/category", Some(&cookie), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list[0]["categoryId"], 5);

        let renamed = json!({ "categoryName": "Work2" });
        let (status, _) = send(&app, "PUT", "/category/5", Some(&cookie), Some(renamed)).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, "DELETE", "/category/5", Some(&cookie), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, list) = send(&app, "GET", "/category", Some(&cookie), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn non_numeric_id_is_a_bad_request_for_logged_in_users() {
        let state = test_state();
        let cookie = login_as(&state, "u1").await;
        let app = router(state);

        let (status, body) = send(&app, "DELETE", "/category/abc", Some(&cookie), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }
}
