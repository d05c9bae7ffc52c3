//! Issue requests and their validation rules.

use thiserror::Error;

/// JIRA rejects summaries longer than this.
pub const MAX_SUMMARY_CHARS: usize = 255;

/// Issue type used when a story record does not name one.
pub const DEFAULT_ISSUE_TYPE: &str = "Story";

/// A request to create a single issue.
///
/// Holds the fields as supplied by the caller; [`IssueRequest::validate`]
/// applies the trimming rules before anything reaches the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRequest {
    /// The issue summary/title.
    pub summary: String,
    /// The issue description body.
    pub description: String,
    /// The issue type name (e.g. "Story", "Bug", "Task").
    pub issue_type: String,
}

impl IssueRequest {
    pub fn new(
        summary: impl Into<String>,
        description: impl Into<String>,
        issue_type: impl Into<String>,
    ) -> Self {
        Self {
            summary: summary.into(),
            description: description.into(),
            issue_type: issue_type.into(),
        }
    }

    /// Check every field against the creation rules.
    ///
    /// All rules are evaluated; the error lists every violation rather
    /// than stopping at the first one.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();

        let summary = self.summary.trim();
        if summary.is_empty() {
            violations.push("summary required".to_string());
        } else if summary.chars().count() > MAX_SUMMARY_CHARS {
            violations.push("summary too long".to_string());
        }

        if self.description.trim().is_empty() {
            violations.push("description required".to_string());
        }

        if self.issue_type.trim().is_empty() {
            violations.push("issue type required".to_string());
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }
}

/// One or more issue request fields failed validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid issue request: {}", .violations.join("; "))]
pub struct ValidationError {
    /// Every violated rule, in field order.
    pub violations: Vec<String>,
}
