//! Repository for the `game_versions` table.

use sqlx::types::Json;
use sqlx::PgPool;
use refocus_core::types::DbId;
use refocus_core::versioning::version_label;

use crate::models::game_version::{CreateGameVersion, GameVersion};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, game_id, ordinal, version_number, version_tag, status, \
    is_current_version, is_approved, approved_at, approved_by, snapshot, change_log, changes, \
    is_revert, reverted_to, created_by, created_at";

/// Read access to version history plus the in-transaction insert used by
/// the workflow repositories.
pub struct GameVersionRepo;

impl GameVersionRepo {
    /// Find a version by ID, scoped to its game.
    pub async fn find_for_game(
        pool: &PgPool,
        game_id: DbId,
        version_id: DbId,
    ) -> Result<Option<GameVersion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM game_versions WHERE id = $1 AND game_id = $2");
        sqlx::query_as::<_, GameVersion>(&query)
            .bind(version_id)
            .bind(game_id)
            .fetch_optional(pool)
            .await
    }

    /// List all versions of a game, newest first.
    pub async fn list_by_game(
        pool: &PgPool,
        game_id: DbId,
    ) -> Result<Vec<GameVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM game_versions
             WHERE game_id = $1
             ORDER BY ordinal DESC"
        );
        sqlx::query_as::<_, GameVersion>(&query)
            .bind(game_id)
            .fetch_all(pool)
            .await
    }

    /// Find the current version of a game (if any version exists).
    pub async fn find_current(
        pool: &PgPool,
        game_id: DbId,
    ) -> Result<Option<GameVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM game_versions WHERE game_id = $1 AND is_current_version"
        );
        sqlx::query_as::<_, GameVersion>(&query)
            .bind(game_id)
            .fetch_optional(pool)
            .await
    }

    /// List approved versions, most recent approval first.
    pub async fn list_approved(
        pool: &PgPool,
        game_id: DbId,
    ) -> Result<Vec<GameVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM game_versions
             WHERE game_id = $1 AND is_approved
             ORDER BY approved_at DESC NULLS LAST, ordinal DESC"
        );
        sqlx::query_as::<_, GameVersion>(&query)
            .bind(game_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a version as the game's current version, demoting the previous
    /// current one. Must run inside the caller's transaction so the demotion,
    /// the insert and the game transition commit together.
    ///
    /// The label is the snapshot's version string, or that string plus the
    /// new ordinal when an earlier version already used it. The caller's
    /// guarded `UPDATE games` holds the game row lock, so two transitions on
    /// one game cannot compute the same ordinal.
    pub async fn insert_current(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        input: &CreateGameVersion,
    ) -> Result<GameVersion, sqlx::Error> {
        sqlx::query(
            "UPDATE game_versions SET is_current_version = false \
             WHERE game_id = $1 AND is_current_version",
        )
        .bind(input.game_id)
        .execute(&mut **tx)
        .await?;

        let (ordinal, label_taken): (i32, bool) = sqlx::query_as(
            "SELECT
                COALESCE(MAX(ordinal), 0) + 1,
                EXISTS (SELECT 1 FROM game_versions WHERE game_id = $1 AND version_number = $2)
             FROM game_versions WHERE game_id = $1",
        )
        .bind(input.game_id)
        .bind(&input.snapshot.version)
        .fetch_one(&mut **tx)
        .await?;
        let label = version_label(&input.snapshot.version, ordinal, label_taken);

        let query = format!(
            "INSERT INTO game_versions
                (game_id, ordinal, version_number, version_tag, status, is_current_version,
                 snapshot, change_log, changes, is_revert, reverted_to, created_by)
             VALUES ($1, $2, $3, $4, $5, true, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GameVersion>(&query)
            .bind(input.game_id)
            .bind(ordinal)
            .bind(&label)
            .bind(&input.version_tag)
            .bind(input.status.as_str())
            .bind(Json(&input.snapshot))
            .bind(&input.change_log)
            .bind(Json(&input.changes))
            .bind(input.reverted_to.is_some())
            .bind(input.reverted_to)
            .bind(input.created_by)
            .fetch_one(&mut **tx)
            .await
    }
}
