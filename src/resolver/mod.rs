// Resolver module - provider chain that turns a video link into media URLs

pub mod entry;
pub mod errors;
pub mod models;
pub mod orchestrator;
pub mod providers;
pub mod reference;
pub mod traits;
pub mod utils;
pub mod value_walk;

pub use entry::resolve_link;
pub use errors::{ExhaustedProviders, ProviderError, ResolveError};
pub use models::{Audio, Author, CanonicalResult, ResolutionOutcome, VideoVariants};
pub use orchestrator::Resolver;
pub use reference::MediaReference;
pub use traits::MediaProvider;
