//! Repository for the `requested_changes` ledger.

use sqlx::PgPool;
use refocus_core::review::RequestedChangeInput;
use refocus_core::types::DbId;

use crate::models::requested_change::RequestedChange;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, game_id, review_id, change, priority, category, must_fix, \
    resolved, resolved_at, created_at";

/// Ledger reads, appends and resolution.
pub struct RequestedChangeRepo;

impl RequestedChangeRepo {
    /// List every requested change for a game, oldest first.
    pub async fn list_by_game(
        pool: &PgPool,
        game_id: DbId,
    ) -> Result<Vec<RequestedChange>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM requested_changes WHERE game_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, RequestedChange>(&query)
            .bind(game_id)
            .fetch_all(pool)
            .await
    }

    /// Mark a change resolved. Resolving twice keeps the first `resolved_at`.
    ///
    /// Returns `None` if the change does not belong to the game.
    pub async fn resolve(
        pool: &PgPool,
        game_id: DbId,
        change_id: DbId,
    ) -> Result<Option<RequestedChange>, sqlx::Error> {
        let query = format!(
            "UPDATE requested_changes SET
                resolved = true,
                resolved_at = COALESCE(resolved_at, NOW())
             WHERE id = $1 AND game_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RequestedChange>(&query)
            .bind(change_id)
            .bind(game_id)
            .fetch_optional(pool)
            .await
    }

    /// Append ledger rows for a decision inside the caller's transaction.
    pub async fn insert_many(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        game_id: DbId,
        review_id: DbId,
        changes: &[RequestedChangeInput],
    ) -> Result<Vec<RequestedChange>, sqlx::Error> {
        let query = format!(
            "INSERT INTO requested_changes (game_id, review_id, change, priority, category, must_fix)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let mut created = Vec::with_capacity(changes.len());
        for change in changes {
            let row = sqlx::query_as::<_, RequestedChange>(&query)
                .bind(game_id)
                .bind(review_id)
                .bind(change.change.trim())
                .bind(change.priority.as_str())
                .bind(&change.category)
                .bind(change.must_fix)
                .fetch_one(&mut **tx)
                .await?;
            created.push(row);
        }
        Ok(created)
    }
}
