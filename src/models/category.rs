use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A category a user files notes under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// The unique identifier for the category.
    pub category_id: i32,
    /// The display name.
    pub category_name: String,
    /// A free-form description.
    pub category_description: String,
    /// The ID of the user who owns the category.
    pub category_created_by: String,
    /// The timestamp when the category was created.
    pub category_creation_date: DateTime<Utc>,
}

/// The request payload for creating or updating a category.
///
/// The owner is never read from the payload; any `categoryCreatedBy` sent by
/// the client is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    #[serde(default)]
    pub category_id: Option<i32>,
    pub category_name: String,
    #[serde(default)]
    pub category_description: String,
}

/// A category as handed to the service layer, owner already stamped.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDraft {
    /// The requested identifier; `None` lets the store assign one.
    pub category_id: Option<i32>,
    pub category_name: String,
    pub category_description: String,
    pub category_created_by: String,
}

impl CategoryRequest {
    /// Builds a draft owned by `owner`.
    pub fn into_draft(self, owner: &str) -> CategoryDraft {
        CategoryDraft {
            category_id: self.category_id,
            category_name: self.category_name,
            category_description: self.category_description,
            category_created_by: owner.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_supplied_owner_is_ignored() {
        let request: CategoryRequest = sonic_rs::from_str(
            r#"{"categoryId":5,"categoryName":"Work","categoryCreatedBy":"mallory"}"#,
        )
        .unwrap();

        let draft = request.into_draft("u1");
        assert_eq!(draft.category_id, Some(5));
        assert_eq!(draft.category_created_by, "u1");
        assert!(draft.category_description.is_empty());
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let category = Category {
            category_id: 1,
            category_name: "Work".into(),
            category_description: String::new(),
            category_created_by: "u1".into(),
            category_creation_date: Utc::now(),
        };

        let json = sonic_rs::to_string(&category).unwrap();
        assert!(json.contains(r#""categoryCreatedBy":"u1""#));
        assert!(json.contains(r#""categoryId":1"#));
    }
}
