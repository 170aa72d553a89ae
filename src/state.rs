use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::observer::{InvocationObserver, TracingObserver};
use crate::services::{
    category::{CategoryService, PgCategoryService},
    memory::{MemoryCategoryService, MemoryReminderService, MemoryUserService},
    reminder::{PgReminderService, ReminderService},
    session::{MemorySessionStore, RedisSessionStore, SessionStore},
    user::{PgUserService, UserService},
};

/// The application's state.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Config,
    /// Category persistence.
    pub categories: Arc<dyn CategoryService>,
    /// Reminder persistence.
    pub reminders: Arc<dyn ReminderService>,
    /// User accounts.
    pub users: Arc<dyn UserService>,
    /// Server-side sessions.
    pub sessions: Arc<dyn SessionStore>,
    /// Watches every handler invocation.
    pub observer: Arc<dyn InvocationObserver>,
}

impl AppState {
    /// Creates a new `AppState`, connecting to whichever backends are configured.
    ///
    /// # Arguments
    ///
    /// * `config` - The application's configuration.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AppState`.
    pub async fn new(config: &Config) -> Result<Self> {
        let mut state = Self::in_memory(config.clone());

        match &config.database_url {
            Some(database_url) => {
                let db = crate::db::create_pool(database_url)?;
                crate::db::apply_schema(&db).await?;
                tracing::info!("✅ PostgreSQL Pool initialized with deadpool-postgres");

                state.categories = Arc::new(PgCategoryService::new(db.clone()));
                state.reminders = Arc::new(PgReminderService::new(db.clone()));
                state.users = Arc::new(PgUserService::new(db));
            }
            None => tracing::warn!("⚠️ DATABASE_URL not set; notes are kept in memory"),
        }

        match &config.redis_url {
            Some(redis_url) => {
                state.sessions = Arc::new(RedisSessionStore::connect(redis_url).await?);
            }
            None => tracing::warn!("⚠️ REDIS_URL not set; sessions are kept in memory"),
        }

        Ok(state)
    }

    /// Creates an `AppState` backed entirely by in-memory services.
    pub fn in_memory(config: Config) -> Self {
        Self {
            config,
            categories: Arc::new(MemoryCategoryService::new()),
            reminders: Arc::new(MemoryReminderService::new()),
            users: Arc::new(MemoryUserService::new()),
            sessions: Arc::new(MemorySessionStore::new()),
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replaces the category service.
    pub fn with_categories(mut self, categories: Arc<dyn CategoryService>) -> Self {
        self.categories = categories;
        self
    }

    /// Replaces the reminder service.
    pub fn with_reminders(mut self, reminders: Arc<dyn ReminderService>) -> Self {
        self.reminders = reminders;
        self
    }

    /// Replaces the invocation observer.
    pub fn with_observer(mut self, observer: Arc<dyn InvocationObserver>) -> Self {
        self.observer = observer;
        self
    }
}
