//! In-process implementations of the services.
//!
//! Used when no database is configured and by the test suites. Every
//! operation takes the map's lock once, so create-if-absent is atomic.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    error::Result,
    models::{
        category::{Category, CategoryDraft},
        reminder::{Reminder, ReminderDraft},
        user::{RegisterRequest, User},
    },
    services::{
        category::CategoryService,
        reminder::ReminderService,
        user::{new_user_from, UserService},
    },
};

/// Picks the requested id, or one past the highest stored id.
fn assign_id<V>(requested: Option<i32>, map: &BTreeMap<i32, V>) -> i32 {
    requested.unwrap_or_else(|| map.keys().next_back().map_or(1, |last| last.saturating_add(1)))
}

#[derive(Clone, Default)]
pub struct MemoryCategoryService {
    categories: Arc<RwLock<BTreeMap<i32, Category>>>,
}

impl MemoryCategoryService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryService for MemoryCategoryService {
    async fn create_category(&self, draft: CategoryDraft) -> Result<Option<Category>> {
        let mut categories = self.categories.write().await;
        let category_id = assign_id(draft.category_id, &*categories);
        if categories.contains_key(&category_id) {
            return Ok(None);
        }

        let category = Category {
            category_id,
            category_name: draft.category_name,
            category_description: draft.category_description,
            category_created_by: draft.category_created_by,
            category_creation_date: Utc::now(),
        };
        categories.insert(category_id, category.clone());
        Ok(Some(category))
    }

    async fn delete_category(&self, category_id: i32) -> Result<bool> {
        Ok(self.categories.write().await.remove(&category_id).is_some())
    }

    async fn update_category(
        &self,
        draft: CategoryDraft,
        category_id: i32,
    ) -> Result<Option<Category>> {
        let mut categories = self.categories.write().await;
        let Some(existing) = categories.get_mut(&category_id) else {
            return Ok(None);
        };

        existing.category_name = draft.category_name;
        existing.category_description = draft.category_description;
        existing.category_created_by = draft.category_created_by;
        Ok(Some(existing.clone()))
    }

    async fn get_all_category_by_user_id(&self, user_id: &str) -> Result<Vec<Category>> {
        Ok(self
            .categories
            .read()
            .await
            .values()
            .filter(|category| category.category_created_by == user_id)
            .cloned()
            .collect())
    }
}

#[derive(Clone, Default)]
pub struct MemoryReminderService {
    reminders: Arc<RwLock<BTreeMap<i32, Reminder>>>,
}

impl MemoryReminderService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReminderService for MemoryReminderService {
    async fn create_reminder(&self, draft: ReminderDraft) -> Result<Option<Reminder>> {
        let mut reminders = self.reminders.write().await;
        let reminder_id = assign_id(draft.reminder_id, &*reminders);
        if reminders.contains_key(&reminder_id) {
            return Ok(None);
        }

        let reminder = Reminder {
            reminder_id,
            reminder_name: draft.reminder_name,
            reminder_description: draft.reminder_description,
            reminder_type: draft.reminder_type,
            reminder_created_by: draft.reminder_created_by,
            reminder_creation_date: Utc::now(),
        };
        reminders.insert(reminder_id, reminder.clone());
        Ok(Some(reminder))
    }

    async fn delete_reminder(&self, reminder_id: i32) -> Result<bool> {
        Ok(self.reminders.write().await.remove(&reminder_id).is_some())
    }

    async fn update_reminder(
        &self,
        draft: ReminderDraft,
        reminder_id: i32,
    ) -> Result<Option<Reminder>> {
        let mut reminders = self.reminders.write().await;
        let Some(existing) = reminders.get_mut(&reminder_id) else {
            return Ok(None);
        };

        existing.reminder_name = draft.reminder_name;
        existing.reminder_description = draft.reminder_description;
        existing.reminder_type = draft.reminder_type;
        existing.reminder_created_by = draft.reminder_created_by;
        Ok(Some(existing.clone()))
    }

    async fn get_reminder_by_id(&self, reminder_id: i32) -> Result<Option<Reminder>> {
        Ok(self.reminders.read().await.get(&reminder_id).cloned())
    }

    async fn get_all_reminder_by_user_id(&self, user_id: &str) -> Result<Vec<Reminder>> {
        Ok(self
            .reminders
            .read()
            .await
            .values()
            .filter(|reminder| reminder.reminder_created_by == user_id)
            .cloned()
            .collect())
    }
}

#[derive(Clone, Default)]
pub struct MemoryUserService {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl MemoryUserService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserService for MemoryUserService {
    async fn register_user(&self, request: RegisterRequest) -> Result<Option<User>> {
        if self.users.read().await.contains_key(&request.user_id) {
            return Ok(None);
        }

        // Hash outside the lock; the insert below re-checks the id.
        let new_user = new_user_from(request)?;
        let mut users = self.users.write().await;
        if users.contains_key(&new_user.user_id) {
            return Ok(None);
        }

        let user = User {
            user_id: new_user.user_id,
            user_name: new_user.user_name,
            user_mobile: new_user.user_mobile,
            password_hash: new_user.password_hash,
            user_added_date: Utc::now(),
        };
        users.insert(user.user_id.clone(), user.clone());
        Ok(Some(user))
    }

    async fn find_user(&self, user_id: &str) -> Result<Option<User>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }
}
