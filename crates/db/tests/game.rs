//! Integration tests for game CRUD, media and licence persistence.
//!
//! Exercises `GameRepo` and `LicenseRepo` against a real database:
//! - New games start in `Draft`, unlocked, with no screenshots
//! - Owner-scoped lookup hides other developers' games
//! - Screenshot replacement guards on the full expected array
//! - Licence upsert replaces the previous declaration
//! - The lock/status CHECK constraint rejects inconsistent rows

use sqlx::PgPool;
use refocus_core::license::LicenseDeclarations;
use refocus_core::media::Screenshot;
use refocus_core::submission::SubmissionStatus;
use refocus_db::models::game::{CreateGame, UpdateGame};
use refocus_db::models::license::UpsertLicense;
use refocus_db::repositories::{GameRepo, LicenseRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const DEVELOPER: i64 = 7;

fn new_game(title: &str) -> CreateGame {
    CreateGame {
        title: title.to_string(),
        version: None,
        description: Some("A memory game".to_string()),
        category: Some("memory".to_string()),
        difficulty: Some("medium".to_string()),
        game_url: Some("/games/memory/index.html".to_string()),
    }
}

fn shot(name: &str) -> Screenshot {
    Screenshot {
        url: format!("/uploads/{name}"),
        file_name: name.to_string(),
        file_size: 2048,
        width: Some(1920),
        height: Some(1080),
        aspect_ratio: Some("16:9".to_string()),
    }
}

fn full_license() -> UpsertLicense {
    UpsertLicense {
        engine_name: Some("Phaser".to_string()),
        engine_license_type: Some("MIT".to_string()),
        ownership_status: "Sole Owner".to_string(),
        copyright_holder: "Test Developer".to_string(),
        copyright_year: 2024,
        declarations: LicenseDeclarations {
            ownership_confirmed: true,
            no_infringement: true,
            accurate_information: true,
            agreement_accepted: true,
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_game_defaults(pool: PgPool) {
    let game = GameRepo::create(&pool, DEVELOPER, &new_game("Memory Match"))
        .await
        .unwrap();

    assert!(game.id > 0);
    assert_eq!(game.developer_id, DEVELOPER);
    assert_eq!(game.status().unwrap(), SubmissionStatus::Draft);
    assert!(!game.is_locked);
    assert_eq!(game.screenshot_count(), 0);
    assert!(!game.has_cover_image());
    assert_eq!(game.version, "1.0.0");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_owned_hides_other_developers(pool: PgPool) {
    let game = GameRepo::create(&pool, DEVELOPER, &new_game("Mine"))
        .await
        .unwrap();

    assert!(GameRepo::find_owned(&pool, game.id, DEVELOPER)
        .await
        .unwrap()
        .is_some());
    assert!(GameRepo::find_owned(&pool, game.id, DEVELOPER + 1)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_by_developer_filters_status(pool: PgPool) {
    GameRepo::create(&pool, DEVELOPER, &new_game("One")).await.unwrap();
    GameRepo::create(&pool, DEVELOPER, &new_game("Two")).await.unwrap();
    GameRepo::create(&pool, DEVELOPER + 1, &new_game("Other")).await.unwrap();

    let drafts = GameRepo::list_by_developer(&pool, DEVELOPER, Some(SubmissionStatus::Draft))
        .await
        .unwrap();
    assert_eq!(drafts.len(), 2);

    let approved =
        GameRepo::list_by_developer(&pool, DEVELOPER, Some(SubmissionStatus::Approved))
            .await
            .unwrap();
    assert!(approved.is_empty());

    let all = GameRepo::list_by_developer(&pool, DEVELOPER, None).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_applies_only_given_fields(pool: PgPool) {
    let game = GameRepo::create(&pool, DEVELOPER, &new_game("Before"))
        .await
        .unwrap();

    let update = UpdateGame {
        title: Some("After".to_string()),
        ..Default::default()
    };
    let updated = GameRepo::update(&pool, game.id, &update).await.unwrap().unwrap();
    assert_eq!(updated.title, "After");
    assert_eq!(updated.description, game.description);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replace_screenshots_guards_expected_array(pool: PgPool) {
    let game = GameRepo::create(&pool, DEVELOPER, &new_game("Shots"))
        .await
        .unwrap();

    let updated = GameRepo::replace_screenshots(&pool, game.id, &[], &[shot("a.png"), shot("b.png")])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.screenshot_count(), 2);
    assert_eq!(updated.screenshots.0[1].file_name, "b.png");

    // A writer that still believes the game has no screenshots loses.
    let stale = GameRepo::replace_screenshots(&pool, game.id, &[], &[shot("c.png")])
        .await
        .unwrap();
    assert!(stale.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replace_screenshots_rejects_same_length_stale_array(pool: PgPool) {
    let game = GameRepo::create(&pool, DEVELOPER, &new_game("Swap"))
        .await
        .unwrap();
    let original = [shot("a.png"), shot("b.png")];
    GameRepo::replace_screenshots(&pool, game.id, &[], &original)
        .await
        .unwrap()
        .unwrap();

    // Another writer swaps the second screenshot; the count is unchanged.
    GameRepo::replace_screenshots(&pool, game.id, &original, &[shot("a.png"), shot("x.png")])
        .await
        .unwrap()
        .unwrap();

    let stale = GameRepo::replace_screenshots(&pool, game.id, &original, &[shot("a.png")])
        .await
        .unwrap();
    assert!(stale.is_none());

    let reloaded = GameRepo::find_by_id(&pool, game.id).await.unwrap().unwrap();
    let names: Vec<_> = reloaded.screenshots.0.iter().map(|s| s.file_name.as_str()).collect();
    assert_eq!(names, ["a.png", "x.png"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_locked_game_rejects_edits(pool: PgPool) {
    let game = GameRepo::create(&pool, DEVELOPER, &new_game("Locked"))
        .await
        .unwrap();
    sqlx::query("UPDATE games SET submission_status = 'In Review', is_locked = true WHERE id = $1")
        .bind(game.id)
        .execute(&pool)
        .await
        .unwrap();

    let update = UpdateGame {
        title: Some("Sneaky".to_string()),
        ..Default::default()
    };
    assert!(GameRepo::update(&pool, game.id, &update).await.unwrap().is_none());
    assert!(GameRepo::set_cover_image(&pool, game.id, "/uploads/c.png")
        .await
        .unwrap()
        .is_none());
    assert!(LicenseRepo::upsert(&pool, game.id, &full_license())
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lock_must_match_status(pool: PgPool) {
    let game = GameRepo::create(&pool, DEVELOPER, &new_game("Constraint"))
        .await
        .unwrap();

    let result = sqlx::query("UPDATE games SET is_locked = true WHERE id = $1")
        .bind(game.id)
        .execute(&pool)
        .await;
    let err = result.unwrap_err();
    let db_err = err.as_database_error().unwrap();
    assert_eq!(db_err.code().as_deref(), Some("23514"));
    assert_eq!(db_err.constraint(), Some("ck_games_lock_matches_status"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_license_upsert_replaces(pool: PgPool) {
    let game = GameRepo::create(&pool, DEVELOPER, &new_game("Licensed"))
        .await
        .unwrap();

    let mut input = full_license();
    input.declarations.agreement_accepted = false;
    let first = LicenseRepo::upsert(&pool, game.id, &input).await.unwrap().unwrap();
    assert!(!first.is_complete());

    let second = LicenseRepo::upsert(&pool, game.id, &full_license())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.id, first.id);
    assert!(second.is_complete());

    let found = LicenseRepo::find_by_game(&pool, game.id).await.unwrap().unwrap();
    assert_eq!(found.copyright_holder, "Test Developer");
}
