use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Post entity - a titled, timestamped record.
///
/// The id and both timestamps are assigned by the store: the id on insert,
/// `updated_at` on every mutation. Ids are sequence-backed and never reused,
/// even after a delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating or retitling a post.
///
/// Construction is the validation boundary: an empty (or whitespace-only)
/// title never reaches a repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    title: String,
}

impl NewPost {
    pub fn new(title: impl Into<String>) -> Result<Self, DomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::Validation {
                field: "title",
                message: "The title field is required.",
            });
        }
        Ok(Self { title })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn into_title(self) -> String {
        self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_non_empty_title() {
        let draft = NewPost::new("El post de prueba").unwrap();
        assert_eq!(draft.title(), "El post de prueba");
    }

    #[test]
    fn rejects_empty_title() {
        let err = NewPost::new("").unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation { field: "title", .. }
        ));
    }

    #[test]
    fn rejects_whitespace_only_title() {
        assert!(NewPost::new("   \t").is_err());
    }
}
