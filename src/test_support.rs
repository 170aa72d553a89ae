//! Shared fixtures for in-crate tests.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use crate::{
    config::Config,
    error::Result,
    models::{
        category::{Category, CategoryDraft},
        reminder::{Reminder, ReminderDraft},
        session::Session,
    },
    observer::{Failure, InvocationObserver, Outcome},
    services::{
        category::CategoryService,
        memory::{MemoryCategoryService, MemoryReminderService},
        reminder::ReminderService,
    },
    state::AppState,
};

pub fn test_state() -> AppState {
    AppState::in_memory(Config::in_memory())
}

/// Stores a session for `user_id` and returns the matching `Cookie` header.
pub async fn login_as(state: &AppState, user_id: &str) -> String {
    let session_id = Uuid::new_v4();
    state
        .sessions
        .save(session_id, &Session::start(user_id, 1).expect("session"), 3600)
        .await
        .expect("store session");
    format!("session_id={}", session_id)
}

/// Sends one request through the router and decodes the JSON body, if any.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("valid request");

    let response = app.clone().oneshot(request).await.expect("infallible router");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("readable body")
        .to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

/// Counts every call that reaches the category service.
#[derive(Default)]
pub struct CountingCategoryService {
    inner: MemoryCategoryService,
    pub calls: AtomicUsize,
}

impl CountingCategoryService {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CategoryService for CountingCategoryService {
    async fn create_category(&self, draft: CategoryDraft) -> Result<Option<Category>> {
        self.tick();
        self.inner.create_category(draft).await
    }

    async fn delete_category(&self, category_id: i32) -> Result<bool> {
        self.tick();
        self.inner.delete_category(category_id).await
    }

    async fn update_category(
        &self,
        draft: CategoryDraft,
        category_id: i32,
    ) -> Result<Option<Category>> {
        self.tick();
        self.inner.update_category(draft, category_id).await
    }

    async fn get_all_category_by_user_id(&self, user_id: &str) -> Result<Vec<Category>> {
        self.tick();
        self.inner.get_all_category_by_user_id(user_id).await
    }
}

/// Counts every call that reaches the reminder service.
#[derive(Default)]
pub struct CountingReminderService {
    inner: MemoryReminderService,
    pub calls: AtomicUsize,
}

impl CountingReminderService {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ReminderService for CountingReminderService {
    async fn create_reminder(&self, draft: ReminderDraft) -> Result<Option<Reminder>> {
        self.tick();
        self.inner.create_reminder(draft).await
    }

    async fn delete_reminder(&self, reminder_id: i32) -> Result<bool> {
        self.tick();
        self.inner.delete_reminder(reminder_id).await
    }

    async fn update_reminder(
        &self,
        draft: ReminderDraft,
        reminder_id: i32,
    ) -> Result<Option<Reminder>> {
        self.tick();
        self.inner.update_reminder(draft, reminder_id).await
    }

    async fn get_reminder_by_id(&self, reminder_id: i32) -> Result<Option<Reminder>> {
        self.tick();
        self.inner.get_reminder_by_id(reminder_id).await
    }

    async fn get_all_reminder_by_user_id(&self, user_id: &str) -> Result<Vec<Reminder>> {
        self.tick();
        self.inner.get_all_reminder_by_user_id(user_id).await
    }
}

/// Records every hook as `"<hook>:<operation>[:<detail>]"`.
#[derive(Default)]
pub struct RecordingObserver {
    pub events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().expect("observer lock").clone()
    }

    fn push(&self, event: String) {
        self.events.lock().expect("observer lock").push(event);
    }
}

impl InvocationObserver for RecordingObserver {
    fn before(&self, operation: &str) {
        self.push(format!("before:{operation}"));
    }

    fn after_returning(&self, operation: &str, outcome: &Outcome) {
        self.push(format!("returning:{operation}:{}", outcome.status.as_u16()));
    }

    fn after_throwing(&self, operation: &str, status: StatusCode, _failure: &Failure) {
        self.push(format!("throwing:{operation}:{}", status.as_u16()));
    }

    fn after(&self, operation: &str) {
        self.push(format!("after:{operation}"));
    }
}

/// An observer whose every hook panics.
pub struct PanickingObserver;

impl InvocationObserver for PanickingObserver {
    fn before(&self, _operation: &str) {
        panic!("before hook failed");
    }

    fn after_returning(&self, _operation: &str, _outcome: &Outcome) {
        panic!("after_returning hook failed");
    }

    fn after_throwing(&self, _operation: &str, _status: StatusCode, _failure: &Failure) {
        panic!("after_throwing hook failed");
    }

    fn after(&self, _operation: &str) {
        panic!("after hook failed");
    }
}

/// A state whose category and reminder services count their calls.
pub fn counting_state() -> (AppState, Arc<CountingCategoryService>, Arc<CountingReminderService>) {
    let categories = Arc::new(CountingCategoryService::default());
    let reminders = Arc::new(CountingReminderService::default());
    let state = test_state()
        .with_categories(categories.clone())
        .with_reminders(reminders.clone());
    (state, categories, reminders)
}
