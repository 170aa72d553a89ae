use deadpool_postgres::Pool;
use tokio_postgres::Row;

use crate::{
    error::Result,
    repositories::column::get,
    models::category::{Category, CategoryDraft},
};

const COLUMNS: &str =
    "category_id, category_name, category_description, category_created_by, category_creation_date";

/// Maps a `tokio_postgres::Row` to a `Category`.
fn row_to_category(row: &Row) -> Result<Category> {
    Ok(Category {
        category_id: get(row, "category_id")?,
        category_name: get(row, "category_name")?,
        category_description: get(row, "category_description")?,
        category_created_by: get(row, "category_created_by")?,
        category_creation_date: get(row, "category_creation_date")?,
    })
}

/// Inserts a category unless its id is already taken.
///
/// Returns `None` when a category with the requested id exists.
pub async fn insert_category(pool: &Pool, draft: &CategoryDraft) -> Result<Option<Category>> {
    let client = pool.get().await?;
    let row = match draft.category_id {
        Some(id) => {
            client
                .query_opt(
                    &*format!(
                        "INSERT INTO category (category_id, category_name, category_description, category_created_by)
                         VALUES ($1, $2, $3, $4)
                         ON CONFLICT (category_id) DO NOTHING
                         RETURNING {COLUMNS}"
                    ),
                    &[
                        &id,
                        &draft.category_name,
                        &draft.category_description,
                        &draft.category_created_by,
                    ],
                )
                .await?
        }
        None => {
            client
                .query_opt(
                    &*format!(
                        "INSERT INTO category (category_name, category_description, category_created_by)
                         VALUES ($1, $2, $3)
                         ON CONFLICT (category_id) DO NOTHING
                         RETURNING {COLUMNS}"
                    ),
                    &[
                        &draft.category_name,
                        &draft.category_description,
                        &draft.category_created_by,
                    ],
                )
                .await?
        }
    };
    row.map(|r| row_to_category(&r)).transpose()
}

/// Deletes a category. Returns whether a row was removed.
pub async fn delete_category(pool: &Pool, id: i32) -> Result<bool> {
    let client = pool.get().await?;
    let removed = client
        .execute("DELETE FROM category WHERE category_id = $1", &[&id])
        .await?;
    Ok(removed > 0)
}

/// Overwrites a category's mutable fields, keeping its creation date.
pub async fn update_category(
    pool: &Pool,
    id: i32,
    draft: &CategoryDraft,
) -> Result<Option<Category>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            &*format!(
                "UPDATE category
                 SET category_name = $2, category_description = $3, category_created_by = $4
                 WHERE category_id = $1
                 RETURNING {COLUMNS}"
            ),
            &[
                &id,
                &draft.category_name,
                &draft.category_description,
                &draft.category_created_by,
            ],
        )
        .await?;
    row.map(|r| row_to_category(&r)).transpose()
}

/// Lists the categories owned by a user, oldest id first.
pub async fn list_by_owner(pool: &Pool, user_id: &str) -> Result<Vec<Category>> {
    let client = pool.get().await?;
    let rows = client
        .query(
            &*format!(
                "SELECT {COLUMNS} FROM category WHERE category_created_by = $1 ORDER BY category_id"
            ),
            &[&user_id],
        )
        .await?;
    rows.iter().map(row_to_category).collect()
}
