// Orchestrator with fallback logic
//
// Providers are tried strictly in the configured order, one at a time.
// The first result that passes the success predicate wins; every failure
// (including a rejected result) is kept so the caller can see all of them.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::errors::{ExhaustedProviders, ProviderError};
use super::models::{CanonicalResult, ResolutionOutcome};
use super::providers::build_provider;
use super::reference::MediaReference;
use super::traits::MediaProvider;
use super::utils::build_http_client;
use crate::config::{AppConfig, ConfigError};

pub struct Resolver {
    providers: Vec<Arc<dyn MediaProvider>>,
    attempt_timeout: Option<Duration>,
}

impl Resolver {
    /// Chain over `providers`, in priority order
    pub fn new(providers: Vec<Arc<dyn MediaProvider>>) -> Self {
        Self {
            providers,
            attempt_timeout: None,
        }
    }

    /// Bound every provider attempt by `timeout`
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = Some(timeout);
        self
    }

    /// Default chain built from `config.providers.order`
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let client = build_http_client(&config.network)?;
        let providers = config
            .providers
            .order
            .iter()
            .map(|kind| build_provider(*kind, config, &client))
            .collect();

        Ok(Self::new(providers).with_attempt_timeout(config.network.timeout()))
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub async fn resolve(&self, reference: &MediaReference) -> ResolutionOutcome {
        let mut failures = Vec::new();

        for provider in &self.providers {
            debug!(provider = provider.name(), reference = %reference, "trying provider");

            match self.attempt(provider.as_ref(), reference).await {
                Ok(result) if result.is_acceptable() => {
                    info!(provider = provider.name(), "resolved");
                    return ResolutionOutcome::Success(result);
                }
                Ok(_) => {
                    warn!(provider = provider.name(), "result rejected: no usable media");
                    failures.push(ProviderError::Rejected {
                        provider: provider.name(),
                    });
                }
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "provider failed");
                    failures.push(e);
                }
            }
        }

        warn!(attempts = failures.len(), "all providers failed");
        ResolutionOutcome::Exhausted(ExhaustedProviders::new(failures))
    }

    async fn attempt(
        &self,
        provider: &dyn MediaProvider,
        reference: &MediaReference,
    ) -> Result<CanonicalResult, ProviderError> {
        match self.attempt_timeout {
            Some(limit) => tokio::time::timeout(limit, provider.resolve(reference))
                .await
                .unwrap_or(Err(ProviderError::Timeout {
                    provider: provider.name(),
                    after: limit,
                })),
            None => provider.resolve(reference).await,
        }
    }
}
