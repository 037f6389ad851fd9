// tiklydown provider - undocumented JSON, searched by shape
//
// The response layout changes without notice, so nothing here relies on
// field paths: every URL in the document is collected and classified by
// extension, and metadata is looked up by candidate key names.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::resolver::errors::ProviderError;
use crate::resolver::models::{Audio, Author, CanonicalResult, VideoVariants};
use crate::resolver::reference::MediaReference;
use crate::resolver::traits::MediaProvider;
use crate::resolver::utils::{ensure_success, read_json};
use crate::resolver::value_walk::{first_by_key_names, UrlPartition};

const NAME: &str = "tiklydown";

const TITLE_KEYS: &[&str] = &["title", "desc", "description"];
const ID_KEYS: &[&str] = &["id", "video_id", "item_id"];
const USERNAME_KEYS: &[&str] = &["author", "uniqueId"];
const DISPLAY_NAME_KEYS: &[&str] = &["nickname", "author_name"];

pub struct TiklydownProvider {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl TiklydownProvider {
    pub fn new(client: Client, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        }
    }

    /// Map an arbitrary response document into a result.
    /// Never fails; a document without media yields an empty result.
    pub fn map_document(doc: &Value) -> CanonicalResult {
        let partition = UrlPartition::from_value(doc);
        let hd = partition.pick_hd().map(str::to_string);
        debug!(
            videos = partition.videos.len(),
            audios = partition.audios.len(),
            images = partition.images.len(),
            "tiklydown urls classified"
        );

        let text = |keys: &[&str]| first_by_key_names(doc, keys).unwrap_or_default();

        CanonicalResult {
            source: NAME.to_string(),
            title: text(TITLE_KEYS),
            id: text(ID_KEYS),
            author: Author {
                username: text(USERNAME_KEYS),
                display_name: text(DISPLAY_NAME_KEYS),
                avatar_url: None,
            },
            cover: partition.images.first().cloned(),
            audio: partition.audios.first().map(|mp3| Audio {
                mp3_url: mp3.clone(),
            }),
            video: VideoVariants {
                nowm: hd.clone(),
                hd,
                wm: partition.pick_watermarked().map(str::to_string),
            },
        }
    }
}

#[async_trait]
impl MediaProvider for TiklydownProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn resolve(&self, reference: &MediaReference) -> Result<CanonicalResult, ProviderError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("url", reference.as_str())])
            .send()
            .await
            .map_err(|e| ProviderError::from_request(NAME, &e, self.timeout))?;

        let response = ensure_success(NAME, NAME, response)?;
        let doc = read_json(NAME, response).await?;

        Ok(Self::map_document(&doc))
    }
}
