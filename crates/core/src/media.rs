//! Media metadata rules for game submissions.
//!
//! The service never inspects image bytes. It only counts screenshots and
//! checks that a cover image URL has been registered, so every rule here is
//! about cardinality and presence.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Minimum number of screenshots a game needs before it can enter review.
pub const MIN_SCREENSHOTS: usize = 2;

/// Maximum number of screenshots a game may carry.
pub const MAX_SCREENSHOTS: usize = 5;

/// Maximum length of a stored media URL.
pub const MAX_MEDIA_URL_LENGTH: usize = 2_048;

/// Advertised upload limit per image, in bytes (5 MiB).
pub const MAX_IMAGE_FILE_SIZE_BYTES: i64 = 5 * 1024 * 1024;

/// Aspect ratios advertised to clients for cover and screenshots.
pub const ACCEPTABLE_ASPECT_RATIOS: &[&str] = &["16:9"];

/// Image formats advertised to clients.
pub const ACCEPTED_IMAGE_FORMATS: &[&str] = &["jpeg", "png", "webp"];

/// Message reported when no cover image has been registered.
pub const MSG_COVER_REQUIRED: &str = "Cover image is required";

/// Message reported when fewer than [`MIN_SCREENSHOTS`] are registered.
pub const MSG_SCREENSHOTS_REQUIRED: &str = "At least 2 screenshots are required";

/// Message reported when more than [`MAX_SCREENSHOTS`] are registered.
pub const MSG_TOO_MANY_SCREENSHOTS: &str = "No more than 5 screenshots are allowed";

/* --------------------------------------------------------------------------
Types
-------------------------------------------------------------------------- */

/// Metadata for one registered screenshot. Stored as JSONB on the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screenshot {
    pub url: String,
    pub file_name: String,
    #[serde(default)]
    pub file_size: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub aspect_ratio: Option<String>,
}

/// Cover image requirements advertised by `GET /media/requirements`.
#[derive(Debug, Clone, Serialize)]
pub struct CoverImageRequirements {
    pub required: bool,
    pub acceptable_aspect_ratios: &'static [&'static str],
    pub accepted_formats: &'static [&'static str],
    pub max_file_size_bytes: i64,
}

/// Screenshot requirements advertised by `GET /media/requirements`.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenshotRequirements {
    pub min_count: usize,
    pub max_count: usize,
    pub acceptable_aspect_ratios: &'static [&'static str],
    pub accepted_formats: &'static [&'static str],
    pub max_file_size_bytes: i64,
}

/// Full media requirement sheet.
#[derive(Debug, Clone, Serialize)]
pub struct MediaRequirements {
    pub cover_image: CoverImageRequirements,
    pub screenshots: ScreenshotRequirements,
}

/// Build the static media requirement sheet.
pub fn media_requirements() -> MediaRequirements {
    MediaRequirements {
        cover_image: CoverImageRequirements {
            required: true,
            acceptable_aspect_ratios: ACCEPTABLE_ASPECT_RATIOS,
            accepted_formats: ACCEPTED_IMAGE_FORMATS,
            max_file_size_bytes: MAX_IMAGE_FILE_SIZE_BYTES,
        },
        screenshots: ScreenshotRequirements {
            min_count: MIN_SCREENSHOTS,
            max_count: MAX_SCREENSHOTS,
            acceptable_aspect_ratios: ACCEPTABLE_ASPECT_RATIOS,
            accepted_formats: ACCEPTED_IMAGE_FORMATS,
            max_file_size_bytes: MAX_IMAGE_FILE_SIZE_BYTES,
        },
    }
}

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Collect media violations that block entry into review.
///
/// Returns every problem rather than stopping at the first one.
pub fn readiness_errors(has_cover_image: bool, screenshot_count: usize) -> Vec<String> {
    let mut errors = Vec::new();
    if !has_cover_image {
        errors.push(MSG_COVER_REQUIRED.to_string());
    }
    if screenshot_count < MIN_SCREENSHOTS {
        errors.push(MSG_SCREENSHOTS_REQUIRED.to_string());
    }
    if screenshot_count > MAX_SCREENSHOTS {
        errors.push(MSG_TOO_MANY_SCREENSHOTS.to_string());
    }
    errors
}

/// Validate a media URL (cover or screenshot).
pub fn validate_media_url(url: &str) -> Result<(), CoreError> {
    if url.trim().is_empty() {
        return Err(CoreError::Validation("Media URL must not be empty".to_string()));
    }
    if url.len() > MAX_MEDIA_URL_LENGTH {
        return Err(CoreError::Validation(format!(
            "Media URL exceeds maximum length of {MAX_MEDIA_URL_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a batch of screenshots about to be added to a game that
/// already has `existing` screenshots.
pub fn check_screenshot_addition(existing: usize, adding: &[Screenshot]) -> Result<(), CoreError> {
    if adding.is_empty() {
        return Err(CoreError::Validation("No screenshots provided".to_string()));
    }
    if existing + adding.len() > MAX_SCREENSHOTS {
        return Err(CoreError::Validation(format!(
            "Cannot add {} screenshots. Maximum is {MAX_SCREENSHOTS} total",
            adding.len()
        )));
    }

    let mut errors = Vec::new();
    for (i, shot) in adding.iter().enumerate() {
        let n = i + 1;
        if let Err(CoreError::Validation(msg)) = validate_media_url(&shot.url) {
            errors.push(format!("Screenshot {n}: {msg}"));
        }
        if shot.file_name.trim().is_empty() {
            errors.push(format!("Screenshot {n}: file name must not be empty"));
        }
        if shot.file_size < 0 || shot.file_size > MAX_IMAGE_FILE_SIZE_BYTES {
            errors.push(format!(
                "Screenshot {n}: file size must be between 0 and {MAX_IMAGE_FILE_SIZE_BYTES} bytes"
            ));
        }
    }
    crate::error::ensure_valid(errors)
}

/// Validate removal of the screenshot at `index` from a game holding
/// `existing` screenshots.
pub fn check_screenshot_removal(existing: usize, index: usize) -> Result<(), CoreError> {
    if index >= existing {
        return Err(CoreError::NotFound {
            entity: "Screenshot",
            id: index as DbId,
        });
    }
    if existing <= MIN_SCREENSHOTS {
        return Err(CoreError::Validation(format!(
            "Game must have at least {MIN_SCREENSHOTS} screenshots"
        )));
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
