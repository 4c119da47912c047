//! Game version entity model and DTOs.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use refocus_core::error::CoreError;
use refocus_core::submission::SubmissionStatus;
use refocus_core::types::{DbId, Timestamp};
use refocus_core::versioning::{ChangeLogEntry, GameSnapshot};

/// A row from the `game_versions` table. Append-only apart from the status
/// and approval columns and the current-version flag.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GameVersion {
    pub id: DbId,
    pub game_id: DbId,
    /// Position in the game's history, starting at 1.
    pub ordinal: i32,
    /// Developer-facing label, unique per game, e.g. `1.0.1`.
    pub version_number: String,
    pub version_tag: Option<String>,
    pub status: String,
    pub is_current_version: bool,
    pub is_approved: bool,
    pub approved_at: Option<Timestamp>,
    pub approved_by: Option<DbId>,
    pub snapshot: Json<GameSnapshot>,
    pub change_log: Option<String>,
    pub changes: Json<Vec<ChangeLogEntry>>,
    pub is_revert: bool,
    pub reverted_to: Option<DbId>,
    pub created_by: DbId,
    pub created_at: Timestamp,
}

impl GameVersion {
    pub fn status(&self) -> Result<SubmissionStatus, CoreError> {
        SubmissionStatus::from_str(&self.status).ok_or_else(|| {
            CoreError::Internal(format!(
                "Version {} has unknown status '{}'",
                self.id, self.status
            ))
        })
    }
}

/// DTO for inserting a version. Built by the workflow repositories, never
/// deserialized from a request.
#[derive(Debug, Clone)]
pub struct CreateGameVersion {
    pub game_id: DbId,
    pub version_tag: Option<String>,
    pub status: SubmissionStatus,
    pub snapshot: GameSnapshot,
    pub change_log: Option<String>,
    pub changes: Vec<ChangeLogEntry>,
    pub reverted_to: Option<DbId>,
    pub created_by: DbId,
}
