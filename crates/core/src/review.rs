//! Review decisions and the structured checklist an admin fills in.
//!
//! A decision is validated here as a whole: every problem with the payload
//! is reported at once, and the resulting game status is returned so the
//! DB layer can apply it under an expected-status guard.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::changes::{validate_change_category, ChangePriority};
use crate::error::{ensure_valid, validation_messages, CoreError};
use crate::submission::SubmissionStatus;

/// Maximum length of the overall reviewer comments.
pub const MAX_COMMENTS_LENGTH: usize = 5_000;

/// Maximum number of requested changes in a single decision.
pub const MAX_REQUESTED_CHANGES: usize = 50;

/* --------------------------------------------------------------------------
Decision
-------------------------------------------------------------------------- */

/// Outcome a reviewer may choose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewDecision {
    Approved,
    #[serde(rename = "Changes Requested")]
    ChangesRequested,
    Rejected,
}

impl ReviewDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::ChangesRequested => "Changes Requested",
            Self::Rejected => "Rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Approved" => Some(Self::Approved),
            "Changes Requested" => Some(Self::ChangesRequested),
            "Rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Game status after this decision is applied.
    pub fn resulting_status(&self) -> SubmissionStatus {
        match self {
            Self::Approved => SubmissionStatus::Approved,
            Self::ChangesRequested => SubmissionStatus::ChangesRequested,
            Self::Rejected => SubmissionStatus::Rejected,
        }
    }
}

impl std::fmt::Display for ReviewDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/* --------------------------------------------------------------------------
Checklist
-------------------------------------------------------------------------- */

/// A single issue or policy violation noted during a check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(default)]
    pub policy: Option<String>,
    pub description: String,
    #[serde(default)]
    pub severity: Option<ChangePriority>,
}

/// Result of one checklist item.
///
/// Functional checks report `passed`; the content review reports
/// `appropriate`. Either being `false` marks the item as failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckResult {
    pub passed: Option<bool>,
    pub appropriate: Option<bool>,
    pub issues: Vec<Finding>,
    pub violations: Vec<Finding>,
    pub notes: Option<String>,
}

impl CheckResult {
    pub fn failed(&self) -> bool {
        self.passed == Some(false) || self.appropriate == Some(false)
    }
}

/// Structured test results attached to a decision. Stored as JSONB on the
/// review record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewChecklist {
    pub functionality_test: Option<CheckResult>,
    pub policy_compliance: Option<CheckResult>,
    pub content_review: Option<CheckResult>,
    pub performance_test: Option<CheckResult>,
    pub uiux_evaluation: Option<CheckResult>,
}

impl ReviewChecklist {
    /// Names of checklist items that were filled in and failed.
    pub fn failed_checks(&self) -> Vec<&'static str> {
        [
            ("functionality_test", &self.functionality_test),
            ("policy_compliance", &self.policy_compliance),
            ("content_review", &self.content_review),
            ("performance_test", &self.performance_test),
            ("uiux_evaluation", &self.uiux_evaluation),
        ]
        .into_iter()
        .filter(|(_, check)| check.as_ref().is_some_and(CheckResult::failed))
        .map(|(name, _)| name)
        .collect()
    }
}

/* --------------------------------------------------------------------------
Input
-------------------------------------------------------------------------- */

fn default_priority() -> ChangePriority {
    ChangePriority::Medium
}

/// One fix requested by the reviewer.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RequestedChangeInput {
    #[validate(length(
        min = 1,
        max = 2000,
        message = "Change description must be between 1 and 2000 characters"
    ))]
    pub change: String,
    #[serde(default = "default_priority")]
    pub priority: ChangePriority,
    pub category: String,
    #[serde(default)]
    pub must_fix: bool,
}

/// Body of `POST /admin/reviews/games/{id}/decision`.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionInput {
    pub status: ReviewDecision,
    #[serde(default)]
    pub overall_comments: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub requested_changes: Vec<RequestedChangeInput>,
    #[serde(flatten)]
    pub checklist: ReviewChecklist,
}

/* --------------------------------------------------------------------------
Checks
-------------------------------------------------------------------------- */

/// A review can only be opened on a game that is waiting for one.
pub fn check_review_start(status: SubmissionStatus) -> Result<(), CoreError> {
    if status != SubmissionStatus::InReview {
        return Err(CoreError::Conflict("Game is not in review status".to_string()));
    }
    Ok(())
}

fn requested_change_errors(n: usize, input: &RequestedChangeInput) -> Vec<String> {
    let mut errors: Vec<String> = match input.validate() {
        Ok(()) => Vec::new(),
        Err(e) => validation_messages(&e),
    };
    if !input.change.is_empty() && input.change.trim().is_empty() {
        errors.push("Change description must not be blank".to_string());
    }
    if let Err(CoreError::Validation(msg)) = validate_change_category(&input.category) {
        errors.push(msg);
    }
    errors
        .into_iter()
        .map(|msg| format!("Requested change {n}: {msg}"))
        .collect()
}

/// Validate a decision against the game's current status.
///
/// Returns the status the game moves to.
pub fn validate_decision(
    current: SubmissionStatus,
    input: &DecisionInput,
) -> Result<SubmissionStatus, CoreError> {
    check_review_start(current)?;

    let mut errors = Vec::new();

    if input
        .overall_comments
        .as_deref()
        .is_some_and(|c| c.chars().count() > MAX_COMMENTS_LENGTH)
    {
        errors.push(format!(
            "Overall comments must not exceed {MAX_COMMENTS_LENGTH} characters"
        ));
    }

    match input.status {
        ReviewDecision::ChangesRequested => {
            if input.requested_changes.is_empty() {
                errors.push("At least one requested change is required".to_string());
            }
            if input.requested_changes.len() > MAX_REQUESTED_CHANGES {
                errors.push(format!(
                    "No more than {MAX_REQUESTED_CHANGES} changes may be requested at once"
                ));
            }
            for (i, change) in input.requested_changes.iter().enumerate() {
                errors.extend(requested_change_errors(i + 1, change));
            }
        }
        ReviewDecision::Rejected => {
            if input
                .rejection_reason
                .as_deref()
                .map_or(true, |r| r.trim().is_empty())
            {
                errors.push("A rejection reason is required".to_string());
            }
        }
        ReviewDecision::Approved => {
            let failed = input.checklist.failed_checks();
            if !failed.is_empty() {
                errors.push(format!(
                    "Cannot approve with failed checks: {}",
                    failed.join(", ")
                ));
            }
        }
    }

    if input.status != ReviewDecision::ChangesRequested && !input.requested_changes.is_empty() {
        errors.push(
            "Requested changes are only accepted with a Changes Requested decision".to_string(),
        );
    }

    ensure_valid(errors)?;
    Ok(input.status.resulting_status())
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
