// Error types for providers and the resolution entry point

use std::time::Duration;

use thiserror::Error;

/// Failure of a single provider attempt
///
/// These never leave the orchestrator on their own; they are collected
/// into [`ExhaustedProviders`] once every provider has been tried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Network failure or non-success HTTP status
    #[error("{reason}")]
    Transport {
        provider: &'static str,
        reason: String,
    },

    /// Attempt exceeded the configured bound
    #[error("{provider} timed out after {secs}s", secs = .after.as_secs())]
    Timeout {
        provider: &'static str,
        after: Duration,
    },

    /// Response arrived but no usable data could be located in it
    #[error("{reason}")]
    Parse {
        provider: &'static str,
        reason: String,
    },

    /// Provider answered, but the result carried no media URL at all
    #[error("{provider} rejected: no usable media")]
    Rejected { provider: &'static str },
}

impl ProviderError {
    pub fn transport(provider: &'static str, reason: impl Into<String>) -> Self {
        Self::Transport {
            provider,
            reason: reason.into(),
        }
    }

    pub fn parse(provider: &'static str, reason: impl Into<String>) -> Self {
        Self::Parse {
            provider,
            reason: reason.into(),
        }
    }

    /// Map a reqwest failure to a transport or timeout error
    pub fn from_request(provider: &'static str, err: &reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                provider,
                after: timeout,
            }
        } else {
            Self::transport(provider, format!("{} request failed: {}", provider, err))
        }
    }

    /// Identifier of the provider that produced this error
    pub fn provider(&self) -> &'static str {
        match self {
            Self::Transport { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::Parse { provider, .. }
            | Self::Rejected { provider } => *provider,
        }
    }

    /// Transport-class failures (network, status, timeout)
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }
}

/// Every failure recorded while walking the provider chain, in attempt order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExhaustedProviders {
    attempts: Vec<ProviderError>,
}

impl ExhaustedProviders {
    pub fn new(attempts: Vec<ProviderError>) -> Self {
        Self { attempts }
    }

    /// Most recent failure; the caller-facing summary
    pub fn last(&self) -> Option<&ProviderError> {
        self.attempts.last()
    }

    pub fn attempts(&self) -> &[ProviderError] {
        &self.attempts
    }

    /// Text of the last failure, empty when no provider was configured
    pub fn detail(&self) -> String {
        self.last().map(|e| e.to_string()).unwrap_or_default()
    }
}

/// Errors visible to callers of the entry point
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No reference supplied at all
    #[error("Missing ?url")]
    MissingReference,

    /// Reference does not look like a supported video link
    #[error("Provide a valid TikTok link")]
    InvalidReference(String),

    /// Reference was valid but no provider could resolve it
    #[error("All providers failed")]
    AllProvidersExhausted(ExhaustedProviders),
}

impl ResolveError {
    /// Client-side fault; no provider was contacted
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingReference | Self::InvalidReference(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_uses_last_attempt() {
        let exhausted = ExhaustedProviders::new(vec![
            ProviderError::transport("tiklydown", "tiklydown 503"),
            ProviderError::parse("vxtiktok", "vx no mp4"),
        ]);

        assert_eq!(exhausted.detail(), "vx no mp4");
        assert_eq!(exhausted.attempts().len(), 2);
        assert_eq!(exhausted.last().map(|e| e.provider()), Some("vxtiktok"));
    }

    #[test]
    fn test_empty_chain_has_empty_detail() {
        assert_eq!(ExhaustedProviders::default().detail(), "");
    }

    #[test]
    fn test_timeout_is_transport() {
        let err = ProviderError::Timeout {
            provider: "tikwm",
            after: Duration::from_secs(15),
        };
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "tikwm timed out after 15s");
        assert!(!ProviderError::Rejected { provider: "tikwm" }.is_transport());
    }

    #[test]
    fn test_validation_errors() {
        assert!(ResolveError::MissingReference.is_validation());
        assert!(ResolveError::InvalidReference("x".into()).is_validation());
        assert!(!ResolveError::AllProvidersExhausted(ExhaustedProviders::default()).is_validation());
    }
}
