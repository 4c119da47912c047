//! Game entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;
use refocus_core::error::CoreError;
use refocus_core::media::Screenshot;
use refocus_core::submission::{SubmissionDates, SubmissionStatus};
use refocus_core::types::{DbId, Timestamp};
use refocus_core::versioning::GameSnapshot;

/// A row from the `games` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Game {
    pub id: DbId,
    pub developer_id: DbId,
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub game_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub screenshots: Json<Vec<Screenshot>>,
    pub submission_status: String,
    pub is_locked: bool,
    pub reviewer_comments: Option<String>,
    pub submitted_for_review_at: Option<Timestamp>,
    pub last_reviewed_at: Option<Timestamp>,
    pub approved_at: Option<Timestamp>,
    pub approved_by: Option<DbId>,
    pub rejected_at: Option<Timestamp>,
    pub rejection_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Game {
    /// Parse the stored status. The table CHECK constraint makes an unknown
    /// value an internal error rather than bad input.
    pub fn status(&self) -> Result<SubmissionStatus, CoreError> {
        SubmissionStatus::from_str(&self.submission_status).ok_or_else(|| {
            CoreError::Internal(format!(
                "Game {} has unknown submission status '{}'",
                self.id, self.submission_status
            ))
        })
    }

    pub fn has_cover_image(&self) -> bool {
        self.cover_image_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }

    pub fn screenshot_count(&self) -> usize {
        self.screenshots.0.len()
    }

    /// Copy the reviewable fields into a version snapshot.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            title: self.title.clone(),
            version: self.version.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            difficulty: self.difficulty.clone(),
            game_url: self.game_url.clone(),
            cover_image_url: self.cover_image_url.clone(),
            screenshots: self.screenshots.0.clone(),
        }
    }

    pub fn dates(&self) -> SubmissionDates {
        SubmissionDates {
            created_at: Some(self.created_at),
            submitted_for_review_at: self.submitted_for_review_at,
            last_reviewed_at: self.last_reviewed_at,
            approved_at: self.approved_at,
            rejected_at: self.rejected_at,
        }
    }
}

/// DTO for creating a new game. The owner comes from the authenticated user.
///
/// `version` defaults to `1.0.0` when omitted.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGame {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    pub version: Option<String>,
    #[validate(length(max = 5000, message = "Description must not exceed 5000 characters"))]
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    #[validate(length(max = 2048, message = "Game URL must not exceed 2048 characters"))]
    pub game_url: Option<String>,
}

/// DTO for updating a game's metadata. All fields optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateGame {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,
    pub version: Option<String>,
    #[validate(length(max = 5000, message = "Description must not exceed 5000 characters"))]
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    #[validate(length(max = 2048, message = "Game URL must not exceed 2048 characters"))]
    pub game_url: Option<String>,
}
