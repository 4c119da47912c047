//! Game review entity model.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use refocus_core::review::ReviewChecklist;
use refocus_core::types::{DbId, Timestamp};

/// A row from the `game_reviews` table.
///
/// Opened by `GameReviewRepo::start` with no decision; completed when the reviewer
/// decides. Any open review left behind when a decision lands is marked
/// abandoned.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GameReview {
    pub id: DbId,
    pub game_id: DbId,
    pub version_id: Option<DbId>,
    pub reviewer_id: DbId,
    pub started_at: Timestamp,
    pub decision: Option<String>,
    pub checklist: Json<ReviewChecklist>,
    pub overall_comments: Option<String>,
    pub completed_at: Option<Timestamp>,
    pub abandoned_at: Option<Timestamp>,
}
