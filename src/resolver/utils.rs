// Helper functions for provider implementations

use reqwest::{Client, Response};
use tracing::debug;

use super::errors::ProviderError;
use crate::config::{ConfigError, NetworkConfig};

/// Build the HTTP client shared by every provider (timeout + optional proxy)
pub fn build_http_client(config: &NetworkConfig) -> Result<Client, ConfigError> {
    let mut builder = Client::builder().timeout(config.timeout());

    if let Some(proxy_url) = config.proxy.as_deref() {
        let proxy = reqwest::Proxy::all(proxy_url)
            .map_err(|e| ConfigError::HttpClient(format!("invalid proxy {}: {}", proxy_url, e)))?;
        debug!(proxy = proxy_url, "routing provider traffic through proxy");
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| ConfigError::HttpClient(e.to_string()))
}

/// Turn a non-success status into `"<label> <status>"`
pub fn ensure_success(
    provider: &'static str,
    label: &str,
    response: Response,
) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ProviderError::transport(
            provider,
            format!("{} {}", label, status.as_u16()),
        ))
    }
}

/// Read the body as JSON, mapping failures to a parse error
pub async fn read_json(
    provider: &'static str,
    response: Response,
) -> Result<serde_json::Value, ProviderError> {
    let text = response
        .text()
        .await
        .map_err(|e| ProviderError::transport(provider, format!("{} body read failed: {}", provider, e)))?;
    serde_json::from_str(&text)
        .map_err(|e| ProviderError::parse(provider, format!("{} invalid JSON: {}", provider, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_without_proxy() {
        assert!(build_http_client(&NetworkConfig::default()).is_ok());
    }

    #[test]
    fn test_client_with_socks_proxy() {
        let config = NetworkConfig {
            proxy: Some("socks5h://127.0.0.1:1080".to_string()),
            ..NetworkConfig::default()
        };
        assert!(build_http_client(&config).is_ok());
    }

    #[test]
    fn test_invalid_proxy_is_config_error() {
        let config = NetworkConfig {
            proxy: Some("http://[::1".to_string()),
            ..NetworkConfig::default()
        };
        assert!(matches!(
            build_http_client(&config),
            Err(ConfigError::HttpClient(_))
        ));
    }
}
