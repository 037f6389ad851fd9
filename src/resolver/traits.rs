// Provider trait definition

use async_trait::async_trait;

use super::errors::ProviderError;
use super::models::CanonicalResult;
use super::reference::MediaReference;

/// One upstream resolution service
///
/// Implementations only map the upstream response into a [`CanonicalResult`];
/// deciding whether that result is good enough belongs to the orchestrator.
#[async_trait]
pub trait MediaProvider: Send + Sync {
    /// Name of the provider (reported as `source` and in logs)
    fn name(&self) -> &'static str;

    /// Query the upstream service for `reference`
    async fn resolve(&self, reference: &MediaReference) -> Result<CanonicalResult, ProviderError>;
}
