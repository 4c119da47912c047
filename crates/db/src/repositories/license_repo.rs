//! Repository for the `licenses` table.

use sqlx::PgPool;
use refocus_core::types::DbId;

use crate::models::license::{License, UpsertLicense};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, game_id, engine_name, engine_license_type, ownership_status, \
    copyright_holder, copyright_year, ownership_confirmed, no_infringement, \
    accurate_information, agreement_accepted, created_at, updated_at";

/// One licence declaration per game.
pub struct LicenseRepo;

impl LicenseRepo {
    /// Find the licence declaration for a game (if any).
    pub async fn find_by_game(
        pool: &PgPool,
        game_id: DbId,
    ) -> Result<Option<License>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM licenses WHERE game_id = $1");
        sqlx::query_as::<_, License>(&query)
            .bind(game_id)
            .fetch_optional(pool)
            .await
    }

    /// Create or replace a game's licence declaration.
    ///
    /// Refuses to write while the game is locked: the insert selects from
    /// `games` with `NOT is_locked`, so a locked game yields `None`.
    pub async fn upsert(
        pool: &PgPool,
        game_id: DbId,
        input: &UpsertLicense,
    ) -> Result<Option<License>, sqlx::Error> {
        let query = format!(
            "INSERT INTO licenses
                (game_id, engine_name, engine_license_type, ownership_status, copyright_holder,
                 copyright_year, ownership_confirmed, no_infringement, accurate_information,
                 agreement_accepted)
             SELECT g.id, $2, $3, $4, $5, $6, $7, $8, $9, $10
             FROM games g WHERE g.id = $1 AND NOT g.is_locked
             ON CONFLICT (game_id) DO UPDATE SET
                engine_name = EXCLUDED.engine_name,
                engine_license_type = EXCLUDED.engine_license_type,
                ownership_status = EXCLUDED.ownership_status,
                copyright_holder = EXCLUDED.copyright_holder,
                copyright_year = EXCLUDED.copyright_year,
                ownership_confirmed = EXCLUDED.ownership_confirmed,
                no_infringement = EXCLUDED.no_infringement,
                accurate_information = EXCLUDED.accurate_information,
                agreement_accepted = EXCLUDED.agreement_accepted
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, License>(&query)
            .bind(game_id)
            .bind(&input.engine_name)
            .bind(&input.engine_license_type)
            .bind(&input.ownership_status)
            .bind(input.copyright_holder.trim())
            .bind(input.copyright_year)
            .bind(input.declarations.ownership_confirmed)
            .bind(input.declarations.no_infringement)
            .bind(input.declarations.accurate_information)
            .bind(input.declarations.agreement_accepted)
            .fetch_optional(pool)
            .await
    }
}
