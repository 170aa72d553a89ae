use async_trait::async_trait;
use deadpool_postgres::Pool;

use crate::{
    error::Result,
    models::reminder::{Reminder, ReminderDraft},
    repositories::reminder as reminder_repo,
};

/// Business operations on reminders.
#[async_trait]
pub trait ReminderService: Send + Sync {
    /// Stores a new reminder. Returns `None` if its id is already taken.
    async fn create_reminder(&self, draft: ReminderDraft) -> Result<Option<Reminder>>;

    /// Deletes a reminder. Returns `false` if it did not exist.
    async fn delete_reminder(&self, reminder_id: i32) -> Result<bool>;

    /// Replaces the reminder stored under `reminder_id`.
    async fn update_reminder(
        &self,
        draft: ReminderDraft,
        reminder_id: i32,
    ) -> Result<Option<Reminder>>;

    /// Fetches a single reminder.
    async fn get_reminder_by_id(&self, reminder_id: i32) -> Result<Option<Reminder>>;

    /// Lists every reminder owned by `user_id`.
    async fn get_all_reminder_by_user_id(&self, user_id: &str) -> Result<Vec<Reminder>>;
}

/// PostgreSQL-backed `ReminderService`.
#[derive(Clone)]
pub struct PgReminderService {
    db: Pool,
}

impl PgReminderService {
    /// Creates a new `PgReminderService`.
    pub fn new(db: Pool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReminderService for PgReminderService {
    async fn create_reminder(&self, draft: ReminderDraft) -> Result<Option<Reminder>> {
        let created = reminder_repo::insert_reminder(&self.db, &draft).await?;
        if let Some(reminder) = &created {
            tracing::info!("✅ Reminder created with ID: {}", reminder.reminder_id);
        }
        Ok(created)
    }

    async fn delete_reminder(&self, reminder_id: i32) -> Result<bool> {
        reminder_repo::delete_reminder(&self.db, reminder_id).await
    }

    async fn update_reminder(
        &self,
        draft: ReminderDraft,
        reminder_id: i32,
    ) -> Result<Option<Reminder>> {
        reminder_repo::update_reminder(&self.db, reminder_id, &draft).await
    }

    async fn get_reminder_by_id(&self, reminder_id: i32) -> Result<Option<Reminder>> {
        reminder_repo::find_by_id(&self.db, reminder_id).await
    }

    async fn get_all_reminder_by_user_id(&self, user_id: &str) -> Result<Vec<Reminder>> {
        reminder_repo::list_by_owner(&self.db, user_id).await
    }
}
