//! JIRA credentials loaded from the environment.

use std::env;
use std::fmt;

use super::{ConfigError, Result};

/// Environment variable holding the JIRA instance URL.
pub const ENV_BASE_URL: &str = "JIRA_BASE_URL";
/// Environment variable holding the account email.
pub const ENV_EMAIL: &str = "JIRA_EMAIL";
/// Environment variable holding the API token.
pub const ENV_API_TOKEN: &str = "JIRA_API_TOKEN";
/// Environment variable holding the target project key.
pub const ENV_PROJECT_KEY: &str = "JIRA_PROJECT_KEY";

/// Connection credentials for a JIRA instance.
///
/// Immutable once constructed; [`Credentials::from_env`] refuses to
/// build a value unless all four fields are present and non-blank.
#[derive(Clone)]
pub struct Credentials {
    base_url: String,
    email: String,
    api_token: String,
    project_key: String,
}

impl Credentials {
    /// Load credentials from the process environment.
    ///
    /// Collects every missing or blank variable before failing, so the
    /// error names all of them at once.
    pub fn from_env() -> Result<Self> {
        let base_url = read_var(ENV_BASE_URL);
        let email = read_var(ENV_EMAIL);
        let api_token = read_var(ENV_API_TOKEN);
        let project_key = read_var(ENV_PROJECT_KEY);

        let missing: Vec<String> = [
            (ENV_BASE_URL, &base_url),
            (ENV_EMAIL, &email),
            (ENV_API_TOKEN, &api_token),
            (ENV_PROJECT_KEY, &project_key),
        ]
        .iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name.to_string())
        .collect();

        match (base_url, email, api_token, project_key) {
            (Some(base_url), Some(email), Some(api_token), Some(project_key)) => Ok(Self {
                base_url,
                email,
                api_token,
                project_key,
            }),
            _ => Err(ConfigError::MissingVariables(missing)),
        }
    }

    /// The JIRA instance URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The account email used for Basic auth.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The API token used for Basic auth.
    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    /// The key of the project issues are created in.
    pub fn project_key(&self) -> &str {
        &self.project_key
    }
}

// Manual Debug so the token never lands in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .field("api_token", &"<redacted>")
            .field("project_key", &self.project_key)
            .finish()
    }
}

/// Read an environment variable, treating blank values as absent.
fn read_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
