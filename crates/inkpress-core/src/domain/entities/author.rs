//! Author entity.

use crate::AuthorId;
use serde::{Deserialize, Serialize};

/// An article author. Authors are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
}

/// An author that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub name: String,
}

impl NewAuthor {
    /// Creates a new author draft.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Turns the draft into an entity with the given identity.
    #[must_use]
    pub fn into_author(self, id: AuthorId) -> Author {
        Author { id, name: self.name }
    }
}
