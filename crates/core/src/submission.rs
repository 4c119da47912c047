//! Submission workflow: status values, entry-into-review preconditions, and
//! the developer-facing status timeline.
//!
//! ```text
//! Draft --submit--> In Review --decide--> Approved | Changes Requested | Rejected
//! Changes Requested --resubmit--> In Review
//! any unlocked status --revert--> Draft
//! ```
//!
//! Functions here only decide. Persisting a transition is the DB layer's
//! job and must re-check the expected status in the same UPDATE.

use serde::{Deserialize, Serialize};

use crate::changes::{open_critical_count, ChangeState};
use crate::error::{ensure_valid, CoreError};
use crate::license::MSG_LICENSE_REQUIRED;
use crate::media::readiness_errors;
use crate::types::Timestamp;
use crate::versioning::ChangeLogEntry;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Turnaround quoted to developers when a game enters review.
pub const ESTIMATED_REVIEW_TIME: &str = "3-5 business days";

/// Maximum length of a submission change log.
pub const MAX_CHANGE_LOG_LENGTH: usize = 5_000;

/// Maximum number of itemised changes attached to one submission.
pub const MAX_CHANGE_ENTRIES: usize = 50;

/// Maximum length of a version tag such as `stable` or `beta`.
pub const MAX_VERSION_TAG_LENGTH: usize = 50;

/* --------------------------------------------------------------------------
Status
-------------------------------------------------------------------------- */

/// Lifecycle status of a game. Also mirrored onto each version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubmissionStatus {
    Draft,
    #[serde(rename = "In Review")]
    InReview,
    #[serde(rename = "Changes Requested")]
    ChangesRequested,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    /// Return the status name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::InReview => "In Review",
            Self::ChangesRequested => "Changes Requested",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    /// Parse a status string. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Draft" => Some(Self::Draft),
            "In Review" => Some(Self::InReview),
            "Changes Requested" => Some(Self::ChangesRequested),
            "Approved" => Some(Self::Approved),
            "Rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Parse a status string, failing with a validation error.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        Self::from_str(s).ok_or_else(|| {
            CoreError::Validation(format!(
                "Invalid submission status '{s}'. Must be one of: {}",
                Self::ALL.join(", ")
            ))
        })
    }

    /// Whether a game in this status is locked against developer edits.
    ///
    /// A game is locked exactly while it is under review.
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::InReview)
    }

    /// All valid status values.
    pub const ALL: &'static [&'static str] = &[
        "Draft",
        "In Review",
        "Changes Requested",
        "Approved",
        "Rejected",
    ];
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/* --------------------------------------------------------------------------
Preconditions
-------------------------------------------------------------------------- */

/// Facts about a game gathered before it may enter review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionReadiness {
    pub has_cover_image: bool,
    pub screenshot_count: usize,
    pub license_complete: bool,
}

/// Free-form notes a developer attaches to a (re)submission.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmissionNotes<'a> {
    pub change_log: Option<&'a str>,
    pub changes: &'a [ChangeLogEntry],
    pub version_tag: Option<&'a str>,
}

fn readiness_and_note_errors(
    readiness: &SubmissionReadiness,
    notes: &SubmissionNotes<'_>,
) -> Vec<String> {
    let mut errors = readiness_errors(readiness.has_cover_image, readiness.screenshot_count);
    if !readiness.license_complete {
        errors.push(MSG_LICENSE_REQUIRED.to_string());
    }
    if notes
        .change_log
        .is_some_and(|log| log.chars().count() > MAX_CHANGE_LOG_LENGTH)
    {
        errors.push(format!(
            "Change log must not exceed {MAX_CHANGE_LOG_LENGTH} characters"
        ));
    }
    if notes.changes.len() > MAX_CHANGE_ENTRIES {
        errors.push(format!(
            "No more than {MAX_CHANGE_ENTRIES} change entries may be attached"
        ));
    }
    for (i, entry) in notes.changes.iter().enumerate() {
        if entry.description.trim().is_empty() {
            errors.push(format!("Change entry {}: description must not be empty", i + 1));
        }
    }
    if let Some(tag) = notes.version_tag {
        if tag.trim().is_empty() || tag.chars().count() > MAX_VERSION_TAG_LENGTH {
            errors.push(format!(
                "Version tag must be between 1 and {MAX_VERSION_TAG_LENGTH} characters"
            ));
        }
    }
    errors
}

/// Decide whether a game may be submitted for review.
///
/// Status conflicts are reported on their own. Every other unmet
/// precondition is collected into a single [`CoreError::InvalidInput`].
pub fn check_submit(
    status: SubmissionStatus,
    readiness: &SubmissionReadiness,
    notes: &SubmissionNotes<'_>,
) -> Result<(), CoreError> {
    match status {
        SubmissionStatus::Draft => {}
        SubmissionStatus::InReview => {
            return Err(CoreError::Conflict("Game is already in review".to_string()));
        }
        _ => {
            return Err(CoreError::Conflict(format!(
                "Only draft games can be submitted (current status: {status}); \
                 use resubmit after changes are requested"
            )));
        }
    }

    ensure_valid(readiness_and_note_errors(readiness, notes))
}

/// Decide whether a game may be resubmitted after changes were requested.
///
/// Unresolved `Critical` changes block; lower priorities do not.
pub fn check_resubmit(
    status: SubmissionStatus,
    readiness: &SubmissionReadiness,
    ledger: &[ChangeState],
    notes: &SubmissionNotes<'_>,
) -> Result<(), CoreError> {
    if status != SubmissionStatus::ChangesRequested {
        return Err(CoreError::Conflict(
            "Game can only be resubmitted if changes were requested".to_string(),
        ));
    }

    let mut errors = Vec::new();
    let open_critical = open_critical_count(ledger);
    if open_critical > 0 {
        errors.push(format!(
            "All critical changes must be resolved before resubmitting ({open_critical} remaining)"
        ));
    }
    errors.extend(readiness_and_note_errors(readiness, notes));
    ensure_valid(errors)
}

/* --------------------------------------------------------------------------
Timeline
-------------------------------------------------------------------------- */

/// Whether a timeline step is behind the game or is where it sits now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineState {
    Completed,
    Current,
}

/// One step of the submission timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub status: SubmissionStatus,
    pub state: TimelineState,
    pub at: Option<Timestamp>,
}

/// Timestamps a game carries about its review history.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmissionDates {
    pub created_at: Option<Timestamp>,
    pub submitted_for_review_at: Option<Timestamp>,
    pub last_reviewed_at: Option<Timestamp>,
    pub approved_at: Option<Timestamp>,
    pub rejected_at: Option<Timestamp>,
}

/// Build the status timeline shown to developers.
///
/// Always starts with `Draft`. Adds `In Review` once the game has been
/// submitted, and the decision step once a reviewer has decided. A game
/// back in `Draft` (after a revert) shows only the current `Draft` step;
/// its earlier rounds live in the version history.
pub fn build_timeline(status: SubmissionStatus, dates: &SubmissionDates) -> Vec<TimelineEntry> {
    let state_for = |step: SubmissionStatus| {
        if step == status {
            TimelineState::Current
        } else {
            TimelineState::Completed
        }
    };

    let mut timeline = vec![TimelineEntry {
        status: SubmissionStatus::Draft,
        state: state_for(SubmissionStatus::Draft),
        at: dates.created_at,
    }];

    if status == SubmissionStatus::Draft {
        return timeline;
    }

    if dates.submitted_for_review_at.is_some() || status == SubmissionStatus::InReview {
        timeline.push(TimelineEntry {
            status: SubmissionStatus::InReview,
            state: state_for(SubmissionStatus::InReview),
            at: dates.submitted_for_review_at,
        });
    }

    let decided_at = match status {
        SubmissionStatus::Approved => Some(dates.approved_at.or(dates.last_reviewed_at)),
        SubmissionStatus::Rejected => Some(dates.rejected_at.or(dates.last_reviewed_at)),
        SubmissionStatus::ChangesRequested => Some(dates.last_reviewed_at),
        SubmissionStatus::Draft | SubmissionStatus::InReview => None,
    };
    if let Some(at) = decided_at {
        timeline.push(TimelineEntry {
            status,
            state: TimelineState::Current,
            at,
        });
    }

    timeline
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
