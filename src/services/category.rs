use async_trait::async_trait;
use deadpool_postgres::Pool;

use crate::{
    error::Result,
    models::category::{Category, CategoryDraft},
    repositories::category as category_repo,
};

/// Business operations on categories.
///
/// Absent entities are reported through the return value (`None` / `false`);
/// an `Err` always means the backing store failed.
#[async_trait]
pub trait CategoryService: Send + Sync {
    /// Stores a new category. Returns `None` if its id is already taken.
    async fn create_category(&self, draft: CategoryDraft) -> Result<Option<Category>>;

    /// Deletes a category. Returns `false` if it did not exist.
    async fn delete_category(&self, category_id: i32) -> Result<bool>;

    /// Replaces the category stored under `category_id`.
    /// Returns `None` if it did not exist.
    async fn update_category(
        &self,
        draft: CategoryDraft,
        category_id: i32,
    ) -> Result<Option<Category>>;

    /// Lists every category owned by `user_id`.
    async fn get_all_category_by_user_id(&self, user_id: &str) -> Result<Vec<Category>>;
}

/// PostgreSQL-backed `CategoryService`.
#[derive(Clone)]
pub struct PgCategoryService {
    db: Pool,
}

impl PgCategoryService {
    /// Creates a new `PgCategoryService`.
    pub fn new(db: Pool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryService for PgCategoryService {
    async fn create_category(&self, draft: CategoryDraft) -> Result<Option<Category>> {
        let created = category_repo::insert_category(&self.db, &draft).await?;
        match &created {
            Some(category) => {
                tracing::info!("✅ Category created with ID: {}", category.category_id)
            }
            None => tracing::debug!("Category id already taken: {:?}", draft.category_id),
        }
        Ok(created)
    }

    async fn delete_category(&self, category_id: i32) -> Result<bool> {
        category_repo::delete_category(&self.db, category_id).await
    }

    async fn update_category(
        &self,
        draft: CategoryDraft,
        category_id: i32,
    ) -> Result<Option<Category>> {
        category_repo::update_category(&self.db, category_id, &draft).await
    }

    async fn get_all_category_by_user_id(&self, user_id: &str) -> Result<Vec<Category>> {
        category_repo::list_by_owner(&self.db, user_id).await
    }
}
