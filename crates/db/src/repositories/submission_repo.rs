//! Transactional status transitions driven by the developer: entering
//! review (submit / resubmit) and reverting to an earlier version.
//!
//! Each transition is one conditional `UPDATE games ... WHERE <guard>`
//! followed by a version insert in the same transaction. If the guard
//! matches no row the transaction is dropped (rolled back) and `None` is
//! returned; the caller reports that as a conflict.

use sqlx::PgPool;
use refocus_core::submission::SubmissionStatus;
use refocus_core::types::DbId;
use refocus_core::versioning::{revert_change_log, ChangeLogEntry};

use crate::models::game::Game;
use crate::models::game_version::{CreateGameVersion, GameVersion};
use crate::repositories::game_repo::COLUMNS as GAME_COLUMNS;
use crate::repositories::GameVersionRepo;

/// How a game enters review. Determines the expected status guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewEntry {
    /// First submission from `Draft`.
    Submit,
    /// Resubmission after changes were requested. Also guards on there
    /// being no unresolved `Critical` change.
    Resubmit,
}

impl ReviewEntry {
    pub fn expected_status(&self) -> SubmissionStatus {
        match self {
            Self::Submit => SubmissionStatus::Draft,
            Self::Resubmit => SubmissionStatus::ChangesRequested,
        }
    }
}

/// Notes recorded on the version created when a game enters review.
#[derive(Debug, Clone, Default)]
pub struct EntryNotes {
    pub change_log: Option<String>,
    pub changes: Vec<ChangeLogEntry>,
    pub version_tag: Option<String>,
}

/// Developer-driven workflow transitions.
pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Move a game into review and snapshot it as the new current version.
    ///
    /// The guard re-checks everything the caller validated: expected status,
    /// cover image, screenshot count, a complete licence and, for a
    /// resubmission, no open critical change.
    pub async fn enter_review(
        pool: &PgPool,
        game_id: DbId,
        user_id: DbId,
        entry: ReviewEntry,
        notes: &EntryNotes,
    ) -> Result<Option<(Game, GameVersion)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE games g SET
                submission_status = $3,
                is_locked = true,
                submitted_for_review_at = NOW()
             WHERE g.id = $1
               AND g.submission_status = $2
               AND COALESCE(btrim(g.cover_image_url), '') <> ''
               AND jsonb_array_length(g.screenshots) BETWEEN 2 AND 5
               AND EXISTS (
                   SELECT 1 FROM licenses l
                   WHERE l.game_id = g.id
                     AND btrim(l.copyright_holder) <> ''
                     AND l.ownership_confirmed AND l.no_infringement
                     AND l.accurate_information AND l.agreement_accepted
               )
               AND (NOT $4 OR NOT EXISTS (
                   SELECT 1 FROM requested_changes rc
                   WHERE rc.game_id = g.id AND rc.priority = 'Critical' AND NOT rc.resolved
               ))
             RETURNING {GAME_COLUMNS}"
        );
        let game = sqlx::query_as::<_, Game>(&query)
            .bind(game_id)
            .bind(entry.expected_status().as_str())
            .bind(SubmissionStatus::InReview.as_str())
            .bind(entry == ReviewEntry::Resubmit)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(game) = game else {
            tracing::debug!(game_id, ?entry, "Review entry guard matched no row");
            return Ok(None);
        };

        let version = GameVersionRepo::insert_current(
            &mut tx,
            &CreateGameVersion {
                game_id,
                version_tag: notes.version_tag.clone(),
                status: SubmissionStatus::InReview,
                snapshot: game.snapshot(),
                change_log: notes.change_log.clone(),
                changes: notes.changes.clone(),
                reverted_to: None,
                created_by: user_id,
            },
        )
        .await?;

        tx.commit().await?;
        Ok(Some((game, version)))
    }

    /// Copy `target`'s snapshot (version string included) back onto the
    /// game, reset it to `Draft`, and record a revert version pointing at
    /// `target`. The revert version keeps the target's tag.
    ///
    /// Guards on the game being unlocked and still carrying
    /// `confirmed_title`, the title the developer typed to confirm.
    pub async fn revert_to_version(
        pool: &PgPool,
        game_id: DbId,
        user_id: DbId,
        target: &GameVersion,
        confirmed_title: &str,
    ) -> Result<Option<(Game, GameVersion)>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let snapshot = &target.snapshot.0;

        let query = format!(
            "UPDATE games SET
                title = $3,
                description = $4,
                category = $5,
                difficulty = $6,
                game_url = $7,
                cover_image_url = $8,
                screenshots = $9,
                submission_status = $10,
                version = $11,
                is_locked = false
             WHERE id = $1 AND NOT is_locked AND title = $2
             RETURNING {GAME_COLUMNS}"
        );
        let game = sqlx::query_as::<_, Game>(&query)
            .bind(game_id)
            .bind(confirmed_title)
            .bind(&snapshot.title)
            .bind(&snapshot.description)
            .bind(&snapshot.category)
            .bind(&snapshot.difficulty)
            .bind(&snapshot.game_url)
            .bind(&snapshot.cover_image_url)
            .bind(sqlx::types::Json(&snapshot.screenshots))
            .bind(SubmissionStatus::Draft.as_str())
            .bind(&snapshot.version)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(game) = game else {
            tracing::debug!(game_id, target_version_id = target.id, "Revert guard matched no row");
            return Ok(None);
        };

        let version = GameVersionRepo::insert_current(
            &mut tx,
            &CreateGameVersion {
                game_id,
                version_tag: target.version_tag.clone(),
                status: SubmissionStatus::Draft,
                snapshot: game.snapshot(),
                change_log: Some(revert_change_log(&target.version_number)),
                changes: Vec::new(),
                reverted_to: Some(target.id),
                created_by: user_id,
            },
        )
        .await?;

        tx.commit().await?;
        Ok(Some((game, version)))
    }
}
