use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reminder attached to a user's notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    /// The unique identifier for the reminder.
    pub reminder_id: i32,
    /// The display name.
    pub reminder_name: String,
    /// A free-form description.
    pub reminder_description: String,
    /// The kind of reminder, e.g. "email" or "popup".
    pub reminder_type: String,
    /// The ID of the user who owns the reminder.
    pub reminder_created_by: String,
    /// The timestamp when the reminder was created.
    pub reminder_creation_date: DateTime<Utc>,
}

/// The request payload for creating or updating a reminder.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRequest {
    #[serde(default)]
    pub reminder_id: Option<i32>,
    pub reminder_name: String,
    #[serde(default)]
    pub reminder_description: String,
    #[serde(default)]
    pub reminder_type: String,
}

/// A reminder as handed to the service layer, owner already stamped.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderDraft {
    pub reminder_id: Option<i32>,
    pub reminder_name: String,
    pub reminder_description: String,
    pub reminder_type: String,
    pub reminder_created_by: String,
}

impl ReminderRequest {
    /// Builds a draft owned by `owner`.
    pub fn into_draft(self, owner: &str) -> ReminderDraft {
        ReminderDraft {
            reminder_id: self.reminder_id,
            reminder_name: self.reminder_name,
            reminder_description: self.reminder_description,
            reminder_type: self.reminder_type,
            reminder_created_by: owner.to_string(),
        }
    }
}
