// Upstream providers

pub mod tiklydown;
pub mod tikwm;
pub mod vxtiktok;

use std::sync::Arc;

use reqwest::Client;

pub use tiklydown::TiklydownProvider;
pub use tikwm::TikwmProvider;
pub use vxtiktok::VxTiktokProvider;

use super::traits::MediaProvider;
use crate::config::{AppConfig, ProviderKind};

/// Instantiate one provider from configuration
pub fn build_provider(kind: ProviderKind, config: &AppConfig, client: &Client) -> Arc<dyn MediaProvider> {
    let timeout = config.network.timeout();
    match kind {
        ProviderKind::Tiklydown => Arc::new(TiklydownProvider::new(
            client.clone(),
            config.providers.tiklydown_endpoint.clone(),
            timeout,
        )),
        ProviderKind::Tikwm => Arc::new(TikwmProvider::new(
            client.clone(),
            config.providers.tikwm_endpoint.clone(),
            timeout,
        )),
        ProviderKind::Vxtiktok => Arc::new(VxTiktokProvider::new(
            client.clone(),
            config.providers.vxtiktok_base.clone(),
            config.network.user_agent.clone(),
            timeout,
        )),
    }
}
