//! Repository for the `games` table.
//!
//! Developer edits are guarded with `NOT is_locked` in the UPDATE itself,
//! so an edit racing a submission cannot land on a game under review.

use sqlx::types::Json;
use sqlx::PgPool;
use refocus_core::game::DEFAULT_VERSION;
use refocus_core::media::Screenshot;
use refocus_core::submission::SubmissionStatus;
use refocus_core::types::DbId;

use crate::models::game::{CreateGame, Game, UpdateGame};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, developer_id, title, version, description, category, difficulty, \
    game_url, cover_image_url, screenshots, submission_status, is_locked, reviewer_comments, \
    submitted_for_review_at, last_reviewed_at, approved_at, approved_by, rejected_at, \
    rejection_reason, created_at, updated_at";

/// Provides CRUD and media operations for games.
pub struct GameRepo;

impl GameRepo {
    /// Insert a new game in `Draft` for the given developer.
    pub async fn create(
        pool: &PgPool,
        developer_id: DbId,
        input: &CreateGame,
    ) -> Result<Game, sqlx::Error> {
        let query = format!(
            "INSERT INTO games
                (developer_id, title, version, description, category, difficulty, game_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(developer_id)
            .bind(&input.title)
            .bind(input.version.as_deref().unwrap_or(DEFAULT_VERSION))
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.difficulty)
            .bind(&input.game_url)
            .fetch_one(pool)
            .await
    }

    /// Find a game by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games WHERE id = $1");
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a game only if it belongs to `developer_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        developer_id: DbId,
    ) -> Result<Option<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games WHERE id = $1 AND developer_id = $2");
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .bind(developer_id)
            .fetch_optional(pool)
            .await
    }

    /// List a developer's games, newest first, optionally filtered by status.
    pub async fn list_by_developer(
        pool: &PgPool,
        developer_id: DbId,
        status: Option<SubmissionStatus>,
    ) -> Result<Vec<Game>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM games
             WHERE developer_id = $1 AND ($2::TEXT IS NULL OR submission_status = $2)
             ORDER BY updated_at DESC, id DESC"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(developer_id)
            .bind(status.map(|s| s.as_str()))
            .fetch_all(pool)
            .await
    }

    /// List games waiting for review, oldest submission first.
    pub async fn list_in_review(pool: &PgPool) -> Result<Vec<Game>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM games
             WHERE submission_status = $1
             ORDER BY submitted_for_review_at ASC NULLS LAST, id ASC"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(SubmissionStatus::InReview.as_str())
            .fetch_all(pool)
            .await
    }

    /// Update metadata. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the game does not exist or is locked.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGame,
    ) -> Result<Option<Game>, sqlx::Error> {
        let query = format!(
            "UPDATE games SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                difficulty = COALESCE($5, difficulty),
                game_url = COALESCE($6, game_url),
                version = COALESCE($7, version)
             WHERE id = $1 AND NOT is_locked
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.difficulty)
            .bind(&input.game_url)
            .bind(&input.version)
            .fetch_optional(pool)
            .await
    }

    /// Register the cover image URL. Returns `None` if missing or locked.
    pub async fn set_cover_image(
        pool: &PgPool,
        id: DbId,
        url: &str,
    ) -> Result<Option<Game>, sqlx::Error> {
        let query = format!(
            "UPDATE games SET cover_image_url = $2
             WHERE id = $1 AND NOT is_locked
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .bind(url)
            .fetch_optional(pool)
            .await
    }

    /// Replace the screenshot list, provided the game still holds exactly
    /// `expected` and is not locked.
    ///
    /// Comparing the whole prior list turns any concurrent media edit
    /// between the caller's read and this write into a `None` the caller
    /// reports as a conflict, even one that left the count unchanged.
    pub async fn replace_screenshots(
        pool: &PgPool,
        id: DbId,
        expected: &[Screenshot],
        screenshots: &[Screenshot],
    ) -> Result<Option<Game>, sqlx::Error> {
        let query = format!(
            "UPDATE games SET screenshots = $3
             WHERE id = $1 AND NOT is_locked AND screenshots = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .bind(Json(expected))
            .bind(Json(screenshots))
            .fetch_optional(pool)
            .await
    }
}
