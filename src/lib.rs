pub mod config;
pub mod feedback;
pub mod resolver;
pub mod server;
pub mod telemetry;

pub use config::AppConfig;
pub use resolver::{resolve_link, CanonicalResult, Resolver};
pub use server::{router, serve, AppState};
