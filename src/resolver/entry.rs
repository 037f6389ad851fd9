// Resolution entry point: validate, delegate, translate

use tracing::info;

use super::errors::ResolveError;
use super::models::{CanonicalResult, ResolutionOutcome};
use super::orchestrator::Resolver;
use super::reference::MediaReference;

/// Resolve a raw link. Invalid input never reaches the providers.
pub async fn resolve_link(resolver: &Resolver, raw: Option<&str>) -> Result<CanonicalResult, ResolveError> {
    let reference = MediaReference::parse(raw.unwrap_or_default())?;
    info!(reference = %reference, "resolving");

    match resolver.resolve(&reference).await {
        ResolutionOutcome::Success(result) => Ok(result),
        ResolutionOutcome::Exhausted(exhausted) => Err(ResolveError::AllProvidersExhausted(exhausted)),
    }
}
