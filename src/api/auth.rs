//! Basic auth handling for the JIRA API.
//!
//! JIRA Cloud authenticates REST requests with Basic auth built from
//! the account email and an API token.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// Authentication credentials for JIRA.
///
/// The token is encoded into the header value at construction and the
/// raw token is not stored.
#[derive(Debug, Clone)]
pub struct Auth {
    auth_header: String,
}

impl Auth {
    /// Create new authentication credentials from email and token.
    pub fn new(email: &str, token: &str) -> Self {
        Self {
            auth_header: build_auth_header(email, token),
        }
    }

    /// The complete "Basic ..." header value for HTTP requests.
    pub fn header_value(&self) -> &str {
        &self.auth_header
    }
}

/// Encode "email:token" in Base64 and prepend "Basic ".
fn build_auth_header(email: &str, token: &str) -> String {
    let credentials = format!("{}:{}", email, token);
    let encoded = BASE64.encode(credentials.as_bytes());
    format!("Basic {}", encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_auth_header() {
        let header = build_auth_header("user@example.com", "api_token_here");
        assert!(header.starts_with("Basic "));

        // Decode and verify
        let encoded = header.strip_prefix("Basic ").unwrap();
        let decoded = BASE64.decode(encoded).unwrap();
        let decoded_str = String::from_utf8(decoded).unwrap();
        assert_eq!(decoded_str, "user@example.com:api_token_here");
    }

    #[test]
    fn test_auth_header_value_format() {
        let auth = Auth::new("test@test.com", "token123");
        let header = auth.header_value();

        // Should be valid Base64 after "Basic "
        let encoded = header.strip_prefix("Basic ").unwrap();
        assert!(BASE64.decode(encoded).is_ok());
    }

    #[test]
    fn test_auth_does_not_expose_raw_token() {
        let auth = Auth::new("user@example.com", "secret_token");
        let debug_output = format!("{:?}", auth);

        // Token should not appear in debug output
        assert!(!debug_output.contains("secret_token"));
    }
}
