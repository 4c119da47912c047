//! Requested change entity model.

use serde::Serialize;
use sqlx::FromRow;
use refocus_core::changes::{ChangePriority, ChangeState};
use refocus_core::types::{DbId, Timestamp};

/// A row from the `requested_changes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RequestedChange {
    pub id: DbId,
    pub game_id: DbId,
    pub review_id: Option<DbId>,
    pub change: String,
    pub priority: String,
    pub category: String,
    pub must_fix: bool,
    pub resolved: bool,
    pub resolved_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl RequestedChange {
    /// Priority and resolution as seen by the ledger rules. An unknown
    /// priority is treated as `Critical` so it can never be skipped.
    pub fn state(&self) -> ChangeState {
        ChangeState {
            priority: ChangePriority::from_str(&self.priority).unwrap_or(ChangePriority::Critical),
            resolved: self.resolved,
        }
    }
}
