//! JIRA API request and response types.
//!
//! These types model the slices of the JIRA REST API v3 this tool
//! touches: the current-user probe, project metadata, and the
//! create-issue call.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::issue::IssueRequest;

/// The current authenticated user.
///
/// Returned by `GET /rest/api/3/myself`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    /// The user's account ID.
    pub account_id: String,
    /// The user's display name.
    pub display_name: String,
}

/// Project metadata.
///
/// Returned by `GET /rest/api/3/project/{projectKey}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    /// The project key (e.g. "TEST").
    pub key: String,
    /// The project display name.
    pub name: String,
    /// The project description, if any.
    #[serde(default)]
    pub description: Option<String>,
    /// The project lead, if assigned.
    #[serde(default)]
    pub lead: Option<ProjectLead>,
}

impl Project {
    /// The project description, or a placeholder when unset.
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("No description")
    }

    /// The lead's display name, or a placeholder when unassigned.
    pub fn lead_name(&self) -> &str {
        self.lead
            .as_ref()
            .map(|l| l.display_name.as_str())
            .unwrap_or("No lead assigned")
    }
}

/// The lead of a project.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectLead {
    /// The lead's display name.
    pub display_name: String,
}

/// Reference to a newly created issue.
///
/// Returned by `POST /rest/api/3/issue`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedIssue {
    /// The issue key (e.g. "TEST-123").
    pub key: String,
    /// URL of the created issue resource.
    #[serde(rename = "self", default)]
    pub self_url: String,
}

/// Body for `POST /rest/api/3/issue`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateIssuePayload {
    fields: CreateIssueFields,
}

#[derive(Debug, Clone, Serialize)]
struct CreateIssueFields {
    project: ProjectRef,
    summary: String,
    description: AtlassianDoc,
    issuetype: IssueTypeRef,
}

#[derive(Debug, Clone, Serialize)]
struct ProjectRef {
    key: String,
}

#[derive(Debug, Clone, Serialize)]
struct IssueTypeRef {
    name: String,
}

impl CreateIssuePayload {
    /// Build the creation body from a validated request.
    ///
    /// Fields are trimmed here so the wire payload matches what the
    /// validator measured.
    pub fn new(project_key: &str, request: &IssueRequest) -> Self {
        Self {
            fields: CreateIssueFields {
                project: ProjectRef {
                    key: project_key.to_string(),
                },
                summary: request.summary.trim().to_string(),
                description: AtlassianDoc::from_text(request.description.trim()),
                issuetype: IssueTypeRef {
                    name: request.issue_type.trim().to_string(),
                },
            },
        }
    }
}

/// Atlassian Document Format (ADF) content.
///
/// The v3 API requires rich text fields like the issue description to
/// be ADF documents rather than plain strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlassianDoc {
    /// The document type (always "doc" for root documents).
    #[serde(rename = "type")]
    pub doc_type: String,
    /// The document version (typically 1).
    pub version: u32,
    /// The content nodes within the document.
    pub content: Vec<serde_json::Value>,
}

impl AtlassianDoc {
    /// Wrap plain text into a document, one paragraph per line.
    pub fn from_text(text: &str) -> Self {
        let content = text
            .lines()
            .map(|line| {
                if line.trim().is_empty() {
                    // ADF forbids empty text nodes; a bare paragraph
                    // renders as a blank line.
                    json!({ "type": "paragraph" })
                } else {
                    json!({
                        "type": "paragraph",
                        "content": [{ "type": "text", "text": line }],
                    })
                }
            })
            .collect();

        Self {
            doc_type: "doc".to_string(),
            version: 1,
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_current_user() {
        let json = r#"{
            "accountId": "5b10a2844c20165700ede21g",
            "displayName": "Mia Krystof",
            "emailAddress": "mia@example.com",
            "active": true
        }"#;

        let user: CurrentUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.account_id, "5b10a2844c20165700ede21g");
        assert_eq!(user.display_name, "Mia Krystof");
    }

    #[test]
    fn test_parse_project_with_lead() {
        let json = r#"{
            "key": "TEST",
            "name": "Test Project",
            "description": "A test project",
            "lead": { "displayName": "John Doe" }
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.key, "TEST");
        assert_eq!(project.name, "Test Project");
        assert_eq!(project.description_text(), "A test project");
        assert_eq!(project.lead_name(), "John Doe");
    }

    #[test]
    fn test_parse_minimal_project() {
        let json = r#"{ "key": "PROJ", "name": "Bare" }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.description_text(), "No description");
        assert_eq!(project.lead_name(), "No lead assigned");
    }

    #[test]
    fn test_parse_created_issue() {
        let json = r#"{
            "id": "10001",
            "key": "TEST-123",
            "self": "https://company.atlassian.net/rest/api/3/issue/10001"
        }"#;

        let created: CreatedIssue = serde_json::from_str(json).unwrap();
        assert_eq!(created.key, "TEST-123");
        assert!(created.self_url.ends_with("/issue/10001"));
    }

    #[test]
    fn test_create_payload_shape() {
        let request = IssueRequest::new("  Fix the Dodo  ", "It takes too long to lift off", "Bug");
        let payload = CreateIssuePayload::new("TEST", &request);

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["fields"]["project"]["key"], "TEST");
        assert_eq!(value["fields"]["summary"], "Fix the Dodo");
        assert_eq!(value["fields"]["issuetype"]["name"], "Bug");
        assert_eq!(value["fields"]["description"]["type"], "doc");
        assert_eq!(value["fields"]["description"]["version"], 1);
        assert_eq!(
            value["fields"]["description"]["content"][0]["content"][0]["text"],
            "It takes too long to lift off"
        );
    }

    #[test]
    fn test_adf_from_multiline_text() {
        let doc = AtlassianDoc::from_text("first\n\nsecond");
        assert_eq!(doc.content.len(), 3);
        assert_eq!(doc.content[0]["content"][0]["text"], "first");
        assert!(doc.content[1].get("content").is_none());
        assert_eq!(doc.content[2]["content"][0]["text"], "second");
    }
}
