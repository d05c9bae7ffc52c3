//! Batch processing of story records into JIRA issues.
//!
//! Records are processed strictly in order, one at a time. Entries
//! missing required fields are skipped without a client call; entries
//! whose creation fails are recorded and never abort the batch. Every
//! record ends up in exactly one of the three result buckets.

use std::future::Future;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::types::CreatedIssue;
use crate::error::AppError;
use crate::issue::{IssueRequest, DEFAULT_ISSUE_TYPE};

/// Skip reason for records without a usable summary.
pub const SKIP_MISSING_SUMMARY: &str = "missing user_story";

/// Skip reason for records without usable deliverables.
pub const SKIP_MISSING_DESCRIPTION: &str = "missing deliverables";

/// A raw story record from the batch input.
#[derive(Debug, Clone, Deserialize)]
pub struct StoryRecord {
    /// The user story text; becomes the issue summary.
    #[serde(default)]
    pub user_story: String,
    /// The deliverables text; becomes the issue description.
    #[serde(default)]
    pub deliverables: String,
    /// Optional issue type override. Absent means "Story"; a blank
    /// value is passed through and rejected by validation, matching
    /// how a blank override should not silently become the default.
    #[serde(default)]
    pub issue_type: Option<String>,
}

impl StoryRecord {
    /// Whether this record carries both required fields.
    pub fn is_submittable(&self) -> bool {
        !self.user_story.trim().is_empty() && !self.deliverables.trim().is_empty()
    }

    fn to_request(&self) -> IssueRequest {
        IssueRequest::new(
            self.user_story.trim(),
            self.deliverables.trim(),
            self.issue_type
                .as_deref()
                .map(str::trim)
                .unwrap_or(DEFAULT_ISSUE_TYPE),
        )
    }
}

/// A successfully created issue.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreatedEntry {
    /// 1-based position in the input batch.
    pub entry: usize,
    /// The key assigned by JIRA.
    pub issue_key: String,
    /// The submitted summary.
    pub summary: String,
}

/// An entry whose creation failed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FailedEntry {
    /// 1-based position in the input batch.
    pub entry: usize,
    /// The failure message.
    pub error: String,
    /// The submitted summary.
    pub summary: String,
}

/// An entry deliberately not submitted.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SkippedEntry {
    /// 1-based position in the input batch.
    pub entry: usize,
    /// Why the entry was skipped.
    pub reason: String,
}

/// Aggregated outcome of one batch run.
///
/// Entries appear in input order within each bucket, and the bucket
/// sizes always sum to the input length.
#[derive(Debug, Default, Serialize)]
pub struct BatchResult {
    /// Issues created, in input order.
    pub created: Vec<CreatedEntry>,
    /// Entries that failed validation or creation, in input order.
    pub failed: Vec<FailedEntry>,
    /// Entries skipped for missing fields, in input order.
    pub skipped: Vec<SkippedEntry>,
}

impl BatchResult {
    /// Total number of entries accounted for.
    pub fn total(&self) -> usize {
        self.created.len() + self.failed.len() + self.skipped.len()
    }

    /// Whether anything was submitted (created or failed).
    pub fn has_submissions(&self) -> bool {
        !self.created.is_empty() || !self.failed.is_empty()
    }
}

/// Process records in order, delegating creation to `create_issue`.
///
/// `create_issue` is expected to be the connected client's create
/// call; any error it returns is recorded against that entry and the
/// batch moves on.
pub async fn process_batch<F, Fut>(records: &[StoryRecord], mut create_issue: F) -> BatchResult
where
    F: FnMut(IssueRequest) -> Fut,
    Fut: Future<Output = Result<CreatedIssue, AppError>>,
{
    let mut result = BatchResult::default();

    for (idx, record) in records.iter().enumerate() {
        let entry = idx + 1;
        let summary = record.user_story.trim();

        if summary.is_empty() {
            warn!(entry, "skipping record: {}", SKIP_MISSING_SUMMARY);
            result.skipped.push(SkippedEntry {
                entry,
                reason: SKIP_MISSING_SUMMARY.to_string(),
            });
            continue;
        }

        if record.deliverables.trim().is_empty() {
            warn!(entry, "skipping record: {}", SKIP_MISSING_DESCRIPTION);
            result.skipped.push(SkippedEntry {
                entry,
                reason: SKIP_MISSING_DESCRIPTION.to_string(),
            });
            continue;
        }

        info!(entry, summary, "processing record");

        match create_issue(record.to_request()).await {
            Ok(created) => {
                info!(entry, issue_key = %created.key, "created issue");
                result.created.push(CreatedEntry {
                    entry,
                    issue_key: created.key,
                    summary: summary.to_string(),
                });
            }
            Err(e) => {
                warn!(entry, error = %e, "record failed");
                result.failed.push(FailedEntry {
                    entry,
                    error: e.to_string(),
                    summary: summary.to_string(),
                });
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ApiError;
    use crate::retry::RetryExhausted;
    use std::cell::RefCell;

    fn record(user_story: &str, deliverables: &str, issue_type: Option<&str>) -> StoryRecord {
        StoryRecord {
            user_story: user_story.to_string(),
            deliverables: deliverables.to_string(),
            issue_type: issue_type.map(String::from),
        }
    }

    fn created(n: usize) -> CreatedIssue {
        CreatedIssue {
            key: format!("TEST-{}", n),
            self_url: String::new(),
        }
    }

    /// Mirrors the client contract: validate, then succeed.
    async fn accept(request: IssueRequest, n: usize) -> Result<CreatedIssue, AppError> {
        request.validate()?;
        Ok(created(n))
    }

    #[tokio::test]
    async fn test_mixed_batch_against_succeeding_client() {
        let records = vec![
            record("A", "B", None),
            record("", "C", None),
            record("D", "E", Some("Bug")),
        ];

        let seen = RefCell::new(Vec::new());
        let result = process_batch(&records, |request| {
            let n = {
                let mut s = seen.borrow_mut();
                s.push(request.clone());
                s.len()
            };
            async move { accept(request, n).await }
        })
        .await;

        assert_eq!(result.total(), 3);
        assert_eq!(
            result.created,
            vec![
                CreatedEntry {
                    entry: 1,
                    issue_key: "TEST-1".to_string(),
                    summary: "A".to_string(),
                },
                CreatedEntry {
                    entry: 3,
                    issue_key: "TEST-2".to_string(),
                    summary: "D".to_string(),
                },
            ]
        );
        assert_eq!(
            result.skipped,
            vec![SkippedEntry {
                entry: 2,
                reason: SKIP_MISSING_SUMMARY.to_string(),
            }]
        );
        assert!(result.failed.is_empty());

        // The default issue type applies only where none was given.
        let seen = seen.into_inner();
        assert_eq!(seen[0].issue_type, "Story");
        assert_eq!(seen[1].issue_type, "Bug");
    }

    #[tokio::test]
    async fn test_missing_deliverables_skipped_without_client_call() {
        let records = vec![record("A", "   ", None)];

        let calls = RefCell::new(0u32);
        let result = process_batch(&records, |request| {
            *calls.borrow_mut() += 1;
            async move { accept(request, 1).await }
        })
        .await;

        assert_eq!(*calls.borrow(), 0);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].reason, SKIP_MISSING_DESCRIPTION);
    }

    #[tokio::test]
    async fn test_one_failing_entry_does_not_abort_batch() {
        let records = vec![
            record("first", "d", None),
            record("doomed", "d", None),
            record("third", "d", None),
        ];

        let counter = RefCell::new(0usize);
        let result = process_batch(&records, |request| {
            let n = {
                let mut c = counter.borrow_mut();
                *c += 1;
                *c
            };
            async move {
                if request.summary == "doomed" {
                    Err(AppError::IssueCreation(RetryExhausted {
                        attempts: 4,
                        cause: ApiError::ServerError("HTTP 503".to_string()),
                    }))
                } else {
                    Ok(created(n))
                }
            }
        })
        .await;

        assert_eq!(result.total(), 3);
        assert_eq!(result.created.len(), 2);
        assert_eq!(result.failed.len(), 1);

        let failed = &result.failed[0];
        assert_eq!(failed.entry, 2);
        assert_eq!(failed.summary, "doomed");
        assert!(failed.error.contains("after 4 attempts"));
    }

    #[tokio::test]
    async fn test_blank_issue_type_override_fails_validation() {
        // A present-but-blank issue_type must not fall back to the
        // default; the validator rejects it and the entry lands in
        // the failed bucket.
        let records = vec![record("A", "B", Some("   "))];

        let result = process_batch(&records, |request| async move { accept(request, 1).await })
            .await;

        assert_eq!(result.failed.len(), 1);
        assert!(result.failed[0].error.contains("issue type required"));
        assert!(result.created.is_empty());
    }

    #[tokio::test]
    async fn test_empty_batch_yields_empty_result() {
        let result = process_batch(&[], |request| async move { accept(request, 1).await }).await;
        assert_eq!(result.total(), 0);
        assert!(!result.has_submissions());
    }

    #[test]
    fn test_record_deserialization_defaults() {
        let json = r#"{"user_story": "A"}"#;
        let record: StoryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.user_story, "A");
        assert_eq!(record.deliverables, "");
        assert!(record.issue_type.is_none());
        assert!(!record.is_submittable());
    }
}
