//! Repository for the `game_reviews` table and the reviewer's decision
//! transition.

use sqlx::types::Json;
use sqlx::PgPool;
use refocus_core::review::{DecisionInput, ReviewDecision};
use refocus_core::submission::SubmissionStatus;
use refocus_core::types::DbId;

use crate::models::game::Game;
use crate::models::game_review::GameReview;
use crate::models::requested_change::RequestedChange;
use crate::repositories::game_repo::COLUMNS as GAME_COLUMNS;
use crate::repositories::RequestedChangeRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, game_id, version_id, reviewer_id, started_at, decision, checklist, \
    overall_comments, completed_at, abandoned_at";

/// Everything a committed decision produced.
#[derive(Debug, Clone)]
pub struct DecisionOutcome {
    pub game: Game,
    pub review: GameReview,
    pub requested_changes: Vec<RequestedChange>,
}

/// Review records and the decision transition.
pub struct GameReviewRepo;

impl GameReviewRepo {
    /// Open a review on the game's current version. Does not touch the game.
    pub async fn start(
        pool: &PgPool,
        game_id: DbId,
        reviewer_id: DbId,
    ) -> Result<GameReview, sqlx::Error> {
        let query = format!(
            "INSERT INTO game_reviews (game_id, version_id, reviewer_id)
             VALUES (
                $1,
                (SELECT id FROM game_versions WHERE game_id = $1 AND is_current_version),
                $2
             )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GameReview>(&query)
            .bind(game_id)
            .bind(reviewer_id)
            .fetch_one(pool)
            .await
    }

    /// Review history for a game, newest first.
    pub async fn list_by_game(
        pool: &PgPool,
        game_id: DbId,
    ) -> Result<Vec<GameReview>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM game_reviews WHERE game_id = $1 ORDER BY started_at DESC, id DESC"
        );
        sqlx::query_as::<_, GameReview>(&query)
            .bind(game_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a validated decision.
    ///
    /// In one transaction: move the game out of `In Review` (guarded on it
    /// still being there), mirror the outcome onto the current version,
    /// complete the reviewer's open review of the current version or record
    /// a completed one, abandon every other open review of the game, and
    /// append any requested changes linked to the completed review.
    ///
    /// Reviews opened on an earlier version are never completed here, so a
    /// decision always lands on a review of the version being decided.
    ///
    /// Returns `None` if the game was no longer in review.
    pub async fn record_decision(
        pool: &PgPool,
        game_id: DbId,
        reviewer_id: DbId,
        input: &DecisionInput,
    ) -> Result<Option<DecisionOutcome>, sqlx::Error> {
        let decision = input.status;
        let status = decision.resulting_status();
        let rejection_reason = match decision {
            ReviewDecision::Rejected => input.rejection_reason.as_deref().map(str::trim),
            _ => None,
        };

        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE games SET
                submission_status = $2,
                is_locked = false,
                reviewer_comments = $3,
                last_reviewed_at = NOW(),
                approved_at = CASE WHEN $2 = 'Approved' THEN NOW() ELSE approved_at END,
                approved_by = CASE WHEN $2 = 'Approved' THEN $4 ELSE approved_by END,
                rejected_at = CASE WHEN $2 = 'Rejected' THEN NOW() ELSE rejected_at END,
                rejection_reason = CASE WHEN $2 = 'Rejected' THEN $5 ELSE rejection_reason END
             WHERE id = $1 AND submission_status = $6
             RETURNING {GAME_COLUMNS}"
        );
        let game = sqlx::query_as::<_, Game>(&query)
            .bind(game_id)
            .bind(status.as_str())
            .bind(&input.overall_comments)
            .bind(reviewer_id)
            .bind(rejection_reason)
            .bind(SubmissionStatus::InReview.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(game) = game else {
            tracing::debug!(game_id, %decision, "Decision guard matched no row");
            return Ok(None);
        };

        sqlx::query(
            "UPDATE game_versions SET
                status = $2,
                is_approved = ($2 = 'Approved'),
                approved_at = CASE WHEN $2 = 'Approved' THEN NOW() ELSE NULL END,
                approved_by = CASE WHEN $2 = 'Approved' THEN $3 ELSE NULL END
             WHERE game_id = $1 AND is_current_version",
        )
        .bind(game_id)
        .bind(status.as_str())
        .bind(reviewer_id)
        .execute(&mut *tx)
        .await?;

        // Complete this reviewer's open review of the current version, if any.
        let complete_query = format!(
            "UPDATE game_reviews SET
                decision = $3,
                checklist = $4,
                overall_comments = $5,
                completed_at = NOW()
             WHERE id = (
                SELECT id FROM game_reviews
                WHERE game_id = $1
                  AND reviewer_id = $2
                  AND completed_at IS NULL
                  AND abandoned_at IS NULL
                  AND version_id = (
                      SELECT id FROM game_versions WHERE game_id = $1 AND is_current_version
                  )
                ORDER BY started_at DESC, id DESC
                LIMIT 1
             )
             RETURNING {COLUMNS}"
        );
        let completed = sqlx::query_as::<_, GameReview>(&complete_query)
            .bind(game_id)
            .bind(reviewer_id)
            .bind(decision.as_str())
            .bind(Json(&input.checklist))
            .bind(&input.overall_comments)
            .fetch_optional(&mut *tx)
            .await?;

        let review = match completed {
            Some(review) => review,
            None => {
                let insert_query = format!(
                    "INSERT INTO game_reviews
                        (game_id, version_id, reviewer_id, decision, checklist,
                         overall_comments, completed_at)
                     VALUES (
                        $1,
                        (SELECT id FROM game_versions WHERE game_id = $1 AND is_current_version),
                        $2, $3, $4, $5, NOW()
                     )
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, GameReview>(&insert_query)
                    .bind(game_id)
                    .bind(reviewer_id)
                    .bind(decision.as_str())
                    .bind(Json(&input.checklist))
                    .bind(&input.overall_comments)
                    .fetch_one(&mut *tx)
                    .await?
            }
        };

        // The round is decided: nothing else on this game stays open.
        let abandoned = sqlx::query(
            "UPDATE game_reviews SET abandoned_at = NOW()
             WHERE game_id = $1 AND completed_at IS NULL AND abandoned_at IS NULL",
        )
        .bind(game_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        if abandoned > 0 {
            tracing::debug!(game_id, abandoned, "Abandoned open reviews on decided game");
        }

        let requested_changes = match decision {
            ReviewDecision::ChangesRequested => {
                RequestedChangeRepo::insert_many(
                    &mut tx,
                    game_id,
                    review.id,
                    &input.requested_changes,
                )
                .await?
            }
            _ => Vec::new(),
        };

        tx.commit().await?;
        Ok(Some(DecisionOutcome {
            game,
            review,
            requested_changes,
        }))
    }
}
