//! Version snapshots, revert preconditions, and snapshot comparison.
//!
//! A version stores a [`GameSnapshot`]: a copy of the reviewable fields of a
//! game at the moment the version was created. Reverting copies a snapshot
//! back onto the game. Comparing two versions diffs their snapshots field by
//! field.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::media::Screenshot;
use crate::submission::SubmissionStatus;

/* --------------------------------------------------------------------------
Types
-------------------------------------------------------------------------- */

/// Reviewable fields of a game, frozen into a version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub title: String,
    /// The developer's `MAJOR.MINOR.PATCH` version at snapshot time.
    pub version: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub game_url: Option<String>,
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub screenshots: Vec<Screenshot>,
}

/// One itemised change supplied with a submission (`{"type", "description"}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

/// How a snapshot field differs between two versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStatus {
    /// Empty in the first version, set in the second.
    Added,
    /// Set in the first version, empty in the second.
    Removed,
    /// Set in both with different values.
    Changed,
}

impl DiffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Changed => "changed",
        }
    }
}

impl std::fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single differing snapshot field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDifference {
    pub field: &'static str,
    pub status: DiffStatus,
    pub old: serde_json::Value,
    pub new: serde_json::Value,
}

/// Structural diff between two snapshots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotDiff {
    pub differences: Vec<FieldDifference>,
    pub has_changes: bool,
}

/// Snapshot fields compared by [`diff_snapshots`], in report order.
pub const SNAPSHOT_FIELDS: &[&str] = &[
    "title",
    "version",
    "description",
    "category",
    "difficulty",
    "game_url",
    "cover_image_url",
    "screenshots",
];

/* --------------------------------------------------------------------------
Comparison
-------------------------------------------------------------------------- */

fn is_empty_value(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::String(s) => s.is_empty(),
        serde_json::Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

/// Diff two snapshots field by field. Unchanged fields are omitted.
pub fn diff_snapshots(old: &GameSnapshot, new: &GameSnapshot) -> SnapshotDiff {
    let old_json = serde_json::to_value(old).unwrap_or_default();
    let new_json = serde_json::to_value(new).unwrap_or_default();

    let differences: Vec<FieldDifference> = SNAPSHOT_FIELDS
        .iter()
        .filter_map(|&field| {
            let a = old_json.get(field).cloned().unwrap_or_default();
            let b = new_json.get(field).cloned().unwrap_or_default();
            if a == b {
                return None;
            }
            let status = match (is_empty_value(&a), is_empty_value(&b)) {
                (true, true) => return None,
                (true, false) => DiffStatus::Added,
                (false, true) => DiffStatus::Removed,
                (false, false) => DiffStatus::Changed,
            };
            Some(FieldDifference {
                field,
                status,
                old: a,
                new: b,
            })
        })
        .collect();

    SnapshotDiff {
        has_changes: !differences.is_empty(),
        differences,
    }
}

/* --------------------------------------------------------------------------
Revert
-------------------------------------------------------------------------- */

/// Check the request-level revert preconditions, in order: the game is not
/// locked, a confirmation was given, and it matches the current title
/// byte for byte.
pub fn check_revert_request(
    is_locked: bool,
    current_title: &str,
    confirmation: Option<&str>,
) -> Result<(), CoreError> {
    if is_locked {
        return Err(CoreError::Locked(
            "Game is locked during review and cannot be reverted".to_string(),
        ));
    }
    let confirmation = match confirmation {
        Some(c) if !c.is_empty() => c,
        _ => {
            return Err(CoreError::Validation(
                "Please confirm the revert by typing the game title".to_string(),
            ));
        }
    };
    if confirmation != current_title {
        return Err(CoreError::Validation(
            "Confirmation must match the exact game title".to_string(),
        ));
    }
    Ok(())
}

/// Check that a version may be restored.
pub fn check_revert_target(target_status: SubmissionStatus) -> Result<(), CoreError> {
    match target_status {
        SubmissionStatus::Rejected => Err(CoreError::Validation(
            "Rejected versions cannot be reverted to".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Whether the version list should offer a revert to this version.
///
/// Stricter than [`check_revert_target`]: the current version and a version
/// still under review are not offered.
pub fn can_revert_to(status: SubmissionStatus, is_current_version: bool) -> bool {
    !is_current_version
        && !matches!(
            status,
            SubmissionStatus::Rejected | SubmissionStatus::InReview
        )
}

/// Change log recorded on the version created by a revert.
pub fn revert_change_log(target_version_number: &str) -> String {
    format!("Reverted to version {target_version_number}")
}

/* --------------------------------------------------------------------------
Labels
-------------------------------------------------------------------------- */

/// Label recorded as a version's `version_number`.
///
/// Normally the game's own version string. A game that re-enters review
/// (or is reverted) without a version bump would repeat an existing label,
/// so the repeat carries the history ordinal as build metadata:
/// `1.0.0`, then `1.0.0+2`.
pub fn version_label(game_version: &str, ordinal: i32, label_taken: bool) -> String {
    if label_taken {
        format!("{game_version}+{ordinal}")
    } else {
        game_version.to_string()
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
