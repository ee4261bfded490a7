//! User-facing error banners.
//!
//! Every terminal failure renders as a categorized banner: a title, a
//! plain-language cause, remediation hints, and the raw technical message
//! kept behind a collapsed disclosure.

use lexipane_protocols::error::ExplainError;

/// Categorized, user-facing rendering of a pipeline failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    pub title: String,
    pub cause: String,
    pub hints: Vec<String>,
    /// Raw technical message, shown only on request.
    pub technical: String,
}

impl ErrorBanner {
    pub fn from_error(error: &ExplainError) -> Self {
        let technical = error.to_string();
        match error {
            ExplainError::Network(_) => Self {
                title: "Network error".to_string(),
                cause: "Could not connect to the explanation service.".to_string(),
                hints: vec![
                    "Check your network connection".to_string(),
                    "Confirm the API server address is correct".to_string(),
                    "Check for firewall or proxy restrictions".to_string(),
                ],
                technical,
            },
            ExplainError::Timeout(_) => Self {
                title: "Request timed out".to_string(),
                cause: "The explanation request took too long, possibly a network issue \
                    or a busy server."
                    .to_string(),
                hints: vec![
                    "Check your network connection".to_string(),
                    "Try again in a moment".to_string(),
                ],
                technical,
            },
            ExplainError::Auth(_) => Self {
                title: "Authentication failed".to_string(),
                cause: "The API key looks invalid or expired.".to_string(),
                hints: vec![
                    "Check that the API key was entered correctly".to_string(),
                    "Try generating a new API key".to_string(),
                    "Or switch to the free API option".to_string(),
                ],
                technical,
            },
            ExplainError::RateLimited(_) => Self {
                title: "Too many requests".to_string(),
                cause: "The API rate limit was exceeded or the account balance is \
                    insufficient."
                    .to_string(),
                hints: vec![
                    "Top up the account balance".to_string(),
                    "Switch to another API provider".to_string(),
                    "Or try the free API option".to_string(),
                ],
                technical,
            },
            ExplainError::MalformedResponse(_) => Self {
                title: "Unexpected reply".to_string(),
                cause: "The provider answered in a format that could not be understood."
                    .to_string(),
                hints: vec![
                    "Try again in a moment".to_string(),
                    "Try a different provider or model".to_string(),
                ],
                technical,
            },
            ExplainError::SettingsUnavailable(_) => Self {
                title: "Could not load settings".to_string(),
                cause: "The extension settings could not be read.".to_string(),
                hints: vec![
                    "Reload the page and try again".to_string(),
                    "Reinstall the extension if the problem persists".to_string(),
                ],
                technical,
            },
            ExplainError::Http { .. } | ExplainError::ProviderUnavailable => Self {
                title: "API call failed".to_string(),
                cause: "The explanation service is currently unavailable.".to_string(),
                hints: vec![
                    "Try again later".to_string(),
                    "Or try the free API option".to_string(),
                ],
                technical,
            },
            ExplainError::ConcurrentRequest => Self {
                title: "Request in progress".to_string(),
                cause: "A previous request is still being processed.".to_string(),
                hints: vec!["Wait for the current explanation to finish".to_string()],
                technical,
            },
        }
    }

    /// One-line form prefixed onto the stub explanation's meaning.
    pub fn headline(&self) -> String {
        format!("{}: {}", self.title, self.cause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_banner() {
        let banner = ErrorBanner::from_error(&ExplainError::Auth("bad key".to_string()));
        assert_eq!(banner.title, "Authentication failed");
        assert!(banner.technical.contains("bad key"));
        assert!(!banner.hints.is_empty());
        assert!(banner.headline().starts_with("Authentication failed:"));
    }

    #[test]
    fn test_rate_limit_banner() {
        let banner =
            ErrorBanner::from_error(&ExplainError::RateLimited("Insufficient Balance".to_string()));
        assert_eq!(banner.title, "Too many requests");
        assert!(banner.technical.contains("Insufficient Balance"));
    }

    #[test]
    fn test_settings_banner() {
        let banner = ErrorBanner::from_error(&ExplainError::SettingsUnavailable(
            "transport failed".to_string(),
        ));
        assert_eq!(banner.title, "Could not load settings");
    }

    #[test]
    fn test_timeout_banner() {
        let banner = ErrorBanner::from_error(&ExplainError::Timeout(30));
        assert_eq!(banner.title, "Request timed out");
        assert!(banner.technical.contains("30"));
    }

    #[test]
    fn test_every_variant_has_hints() {
        let errors = [
            ExplainError::Network("x".to_string()),
            ExplainError::Timeout(30),
            ExplainError::Auth("x".to_string()),
            ExplainError::RateLimited("x".to_string()),
            ExplainError::Http { status: 500, message: "x".to_string() },
            ExplainError::MalformedResponse("x".to_string()),
            ExplainError::SettingsUnavailable("x".to_string()),
            ExplainError::ConcurrentRequest,
            ExplainError::ProviderUnavailable,
        ];
        for error in &errors {
            let banner = ErrorBanner::from_error(error);
            assert!(!banner.title.is_empty());
            assert!(!banner.hints.is_empty(), "no hints for {error:?}");
            assert_eq!(banner.technical, error.to_string());
        }
    }
}
