// tikwm provider - documented flat schema under `data`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::resolver::errors::ProviderError;
use crate::resolver::models::{Audio, Author, CanonicalResult, VideoVariants};
use crate::resolver::reference::MediaReference;
use crate::resolver::traits::MediaProvider;
use crate::resolver::utils::{ensure_success, read_json};
use crate::resolver::value_walk::as_text;

const NAME: &str = "tikwm";

pub struct TikwmProvider {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

/// First non-empty field among `keys`
fn field(obj: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| as_text(&obj[*key]))
}

impl TikwmProvider {
    pub fn new(client: Client, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        }
    }

    /// Map the response body; fails only when `data` is missing
    pub fn map_response(body: &Value) -> Result<CanonicalResult, ProviderError> {
        let data = body
            .get("data")
            .filter(|d| d.is_object())
            .ok_or_else(|| ProviderError::parse(NAME, "tikwm no data"))?;
        let author = &data["author"];

        Ok(CanonicalResult {
            source: NAME.to_string(),
            title: field(data, &["title"]).unwrap_or_default(),
            id: field(data, &["id", "aweme_id"]).unwrap_or_default(),
            author: Author {
                username: field(author, &["unique_id", "uniqueId"]).unwrap_or_default(),
                display_name: field(author, &["nickname"]).unwrap_or_default(),
                avatar_url: field(author, &["avatar", "avatar_thumb"]),
            },
            cover: field(data, &["cover", "origin_cover", "dynamic_cover"]),
            audio: field(data, &["music"]).map(|mp3_url| Audio { mp3_url }),
            video: VideoVariants {
                hd: field(data, &["hdplay"]),
                nowm: field(data, &["play"]),
                wm: field(data, &["wmplay"]),
            },
        })
    }
}

#[async_trait]
impl MediaProvider for TikwmProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn resolve(&self, reference: &MediaReference) -> Result<CanonicalResult, ProviderError> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("url", reference.as_str()), ("hd", "1")])
            .send()
            .await
            .map_err(|e| ProviderError::from_request(NAME, &e, self.timeout))?;

        let response = ensure_success(NAME, NAME, response)?;
        let body = read_json(NAME, response).await?;

        Self::map_response(&body)
    }
}
