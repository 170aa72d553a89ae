use deadpool_postgres::Pool;
use tokio_postgres::Row;

use crate::{
    error::Result,
    repositories::column::get,
    models::reminder::{Reminder, ReminderDraft},
};

const COLUMNS: &str = "reminder_id, reminder_name, reminder_description, reminder_type, \
                       reminder_created_by, reminder_creation_date";

fn row_to_reminder(row: &Row) -> Result<Reminder> {
    Ok(Reminder {
        reminder_id: get(row, "reminder_id")?,
        reminder_name: get(row, "reminder_name")?,
        reminder_description: get(row, "reminder_description")?,
        reminder_type: get(row, "reminder_type")?,
        reminder_created_by: get(row, "reminder_created_by")?,
        reminder_creation_date: get(row, "reminder_creation_date")?,
    })
}

/// Inserts a reminder unless its id is already taken.
pub async fn insert_reminder(pool: &Pool, draft: &ReminderDraft) -> Result<Option<Reminder>> {
    let client = pool.get().await?;
    let row = match draft.reminder_id {
        Some(id) => {
            client
                .query_opt(
                    &*format!(
                        "INSERT INTO reminder (reminder_id, reminder_name, reminder_description, reminder_type, reminder_created_by)
                         VALUES ($1, $2, $3, $4, $5)
                         ON CONFLICT (reminder_id) DO NOTHING
                         RETURNING {COLUMNS}"
                    ),
                    &[
                        &id,
                        &draft.reminder_name,
                        &draft.reminder_description,
                        &draft.reminder_type,
                        &draft.reminder_created_by,
                    ],
                )
                .await?
        }
        None => {
            client
                .query_opt(
                    &*format!(
                        "INSERT INTO reminder (reminder_name, reminder_description, reminder_type, reminder_created_by)
                         VALUES ($1, $2, $3, $4)
                         ON CONFLICT (reminder_id) DO NOTHING
                         RETURNING {COLUMNS}"
                    ),
                    &[
                        &draft.reminder_name,
                        &draft.reminder_description,
                        &draft.reminder_type,
                        &draft.reminder_created_by,
                    ],
                )
                .await?
        }
    };
    row.map(|r| row_to_reminder(&r)).transpose()
}

/// Deletes a reminder. Returns whether a row was removed.
pub async fn delete_reminder(pool: &Pool, id: i32) -> Result<bool> {
    let client = pool.get().await?;
    let removed = client
        .execute("DELETE FROM reminder WHERE reminder_id = $1", &[&id])
        .await?;
    Ok(removed > 0)
}

/// Overwrites a reminder's mutable fields, keeping its creation date.
pub async fn update_reminder(
    pool: &Pool,
    id: i32,
    draft: &ReminderDraft,
) -> Result<Option<Reminder>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            &*format!(
                "UPDATE reminder
                 SET reminder_name = $2, reminder_description = $3, reminder_type = $4, reminder_created_by = $5
                 WHERE reminder_id = $1
                 RETURNING {COLUMNS}"
            ),
            &[
                &id,
                &draft.reminder_name,
                &draft.reminder_description,
                &draft.reminder_type,
                &draft.reminder_created_by,
            ],
        )
        .await?;
    row.map(|r| row_to_reminder(&r)).transpose()
}

/// Finds a reminder by its ID.
pub async fn find_by_id(pool: &Pool, id: i32) -> Result<Option<Reminder>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            &*format!("SELECT {COLUMNS} FROM reminder WHERE reminder_id = $1"),
            &[&id],
        )
        .await?;
    row.map(|r| row_to_reminder(&r)).transpose()
}

/// Lists the reminders owned by a user.
pub async fn list_by_owner(pool: &Pool, user_id: &str) -> Result<Vec<Reminder>> {
    let client = pool.get().await?;
    let rows = client
        .query(
            &*format!(
                "SELECT {COLUMNS} FROM reminder WHERE reminder_created_by = $1 ORDER BY reminder_id"
            ),
            &[&user_id],
        )
        .await?;
    rows.iter().map(row_to_reminder).collect()
}
