//! JIRA API client implementation.
//!
//! The client is constructed by [`JiraClient::connect`], which probes
//! the instance under the retry policy; a value of this type therefore
//! always represents an established connection. Issue creation runs
//! each request through validation and the same retry policy.

use std::time::Duration;

use reqwest::{header, Client, Response, StatusCode};
use tracing::{debug, error, info, warn};

use super::auth::Auth;
use super::error::{ApiError, Result as ApiResult};
use super::types::{CreateIssuePayload, CreatedIssue, CurrentUser, Project};
use crate::config::Credentials;
use crate::error::AppError;
use crate::issue::IssueRequest;
use crate::retry::{self, RetryPolicy};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A connected JIRA client.
///
/// Holds the live HTTP handle, credentials, and the retry policy used
/// for connection establishment and issue creation.
#[derive(Debug)]
pub struct JiraClient {
    /// The HTTP client.
    http: Client,
    /// The base URL for the JIRA instance.
    base_url: String,
    /// Authentication credentials.
    auth: Auth,
    /// Key of the project issues are created in.
    project_key: String,
    /// Retry policy applied to connect and create calls.
    policy: RetryPolicy,
}

impl JiraClient {
    /// Connect to JIRA with the given credentials and retry policy.
    ///
    /// The connection is established by fetching the current user, so
    /// a returned client is known to have valid credentials and a
    /// reachable instance. Attempts follow `policy`; once exhausted
    /// this fails with [`AppError::Connection`] carrying the attempt
    /// count and the last underlying failure.
    pub async fn connect(credentials: &Credentials, policy: RetryPolicy) -> Result<Self, AppError> {
        info!("connecting to JIRA at {}", credentials.base_url());

        let client = Self {
            http: build_http_client()?,
            base_url: normalize_base_url(credentials.base_url()),
            auth: Auth::new(credentials.email(), credentials.api_token()),
            project_key: credentials.project_key().to_string(),
            policy,
        };

        let user = retry::execute(&client.policy, "connect", || client.fetch_current_user())
            .await
            .map_err(AppError::Connection)?;

        info!("connected to JIRA as {}", user.display_name);
        Ok(client)
    }

    /// Create an issue in the configured project.
    ///
    /// The request is validated first; a validation failure is
    /// returned immediately without any network call or retry. The
    /// creation call itself runs under the retry policy and fails with
    /// [`AppError::IssueCreation`] once attempts are exhausted.
    pub async fn create_issue(&self, request: IssueRequest) -> Result<CreatedIssue, AppError> {
        request.validate()?;

        let payload = CreateIssuePayload::new(&self.project_key, &request);
        let url = format!("{}/rest/api/3/issue", self.base_url);

        let created: CreatedIssue =
            retry::execute(&self.policy, "create_issue", || self.post_json(&url, &payload))
                .await
                .map_err(AppError::IssueCreation)?;

        info!("created issue {} ({})", created.key, created.self_url);
        Ok(created)
    }

    /// Best-effort connection probe.
    ///
    /// Fetches the current user once and reports whether it worked;
    /// failures are logged, never raised.
    pub async fn test_connection(&self) -> bool {
        debug!("testing JIRA connection");
        match self.fetch_current_user().await {
            Ok(user) => {
                info!(
                    account_id = %user.account_id,
                    "connection test successful, current user: {}",
                    user.display_name
                );
                true
            }
            Err(e) => {
                error!("connection test failed: {}", e);
                false
            }
        }
    }

    /// Best-effort fetch of the configured project's metadata.
    ///
    /// Returns `None` on any failure; failures are logged, never
    /// raised.
    pub async fn get_project_info(&self) -> Option<Project> {
        debug!("fetching project info for {}", self.project_key);

        let url = format!(
            "{}/rest/api/3/project/{}",
            self.base_url,
            urlencoding::encode(&self.project_key)
        );

        match self.get::<Project>(&url).await {
            Ok(project) => {
                info!("retrieved project info for {}", project.name);
                Some(project)
            }
            Err(e) => {
                warn!("failed to fetch project info: {}", e);
                None
            }
        }
    }

    /// Fetch the current authenticated user (`GET /rest/api/3/myself`).
    async fn fetch_current_user(&self) -> ApiResult<CurrentUser> {
        let url = format!("{}/rest/api/3/myself", self.base_url);
        self.get(&url).await
    }

    /// Perform a single authenticated GET request.
    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .http
            .get(url)
            .header(header::AUTHORIZATION, self.auth.header_value())
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        handle_response(response).await
    }

    /// Perform a single authenticated POST request with a JSON body.
    async fn post_json<T, B>(&self, url: &str, body: &B) -> ApiResult<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize,
    {
        let response = self
            .http
            .post(url)
            .header(header::AUTHORIZATION, self.auth.header_value())
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;

        handle_response(response).await
    }
}

/// Build the HTTP client with appropriate settings.
fn build_http_client() -> ApiResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .build()
        .map_err(ApiError::Network)
}

/// Check an HTTP response for errors and parse the JSON body.
async fn handle_response<T: serde::de::DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    let url = response.url().to_string();

    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("failed to parse response: {}", e)))
    } else {
        let error_body = response.text().await.unwrap_or_default();
        debug!("error response body: {}", error_body);

        Err(error_from_response(status, &url, &error_body))
    }
}

/// Create an appropriate error from an HTTP error response.
///
/// JIRA error bodies usually carry `errorMessages` and/or a field-keyed
/// `errors` object; both are folded into the error context when
/// present.
fn error_from_response(status: StatusCode, url: &str, body: &str) -> ApiError {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        let mut details: Vec<String> = Vec::new();

        if let Some(messages) = json.get("errorMessages").and_then(|m| m.as_array()) {
            details.extend(messages.iter().filter_map(|v| v.as_str()).map(String::from));
        }

        if let Some(errors) = json.get("errors").and_then(|e| e.as_object()) {
            details.extend(errors.iter().map(|(k, v)| format!("{}: {}", k, v)));
        }

        if !details.is_empty() {
            return ApiError::from_status(status, &details.join(", "));
        }
    }

    ApiError::from_status(status, url)
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');

    // Warn if not HTTPS (but don't enforce for localhost/testing)
    if !url.starts_with("https://") && !url.contains("localhost") {
        warn!(
            "URL does not use HTTPS: {}. This is insecure for production use.",
            url
        );
    }

    url.to_string()
}
