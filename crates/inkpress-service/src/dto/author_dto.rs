//! Author-related DTOs.

use inkpress_core::AuthorId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a new author.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAuthorRequest {
    #[validate(length(min = 3, max = 100, message = "Name must be 3-100 characters"))]
    #[schema(example = "Jane Doe")]
    pub name: String,
}

impl CreateAuthorRequest {
    /// Strips surrounding whitespace from the name before validation.
    #[must_use]
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
        }
    }
}

/// Author response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthorResponse {
    pub id: AuthorId,
    pub name: String,
}
