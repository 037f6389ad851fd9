// vxtiktok provider - scrapes the embed mirror page
//
// Media URL rules, first match wins:
// 1. <source src="...mp4">
// 2. "contentUrl": "...mp4" (structured data)
// 3. any bare http(s) URL ending in .mp4

use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;

use crate::resolver::errors::ProviderError;
use crate::resolver::models::{Author, CanonicalResult, VideoVariants};
use crate::resolver::reference::MediaReference;
use crate::resolver::traits::MediaProvider;
use crate::resolver::utils::ensure_success;

const NAME: &str = "vxtiktok";

lazy_static::lazy_static! {
    static ref HOST_RE: Regex = Regex::new(r"(?i)https?://(www\.)?tiktok\.com").unwrap();
    static ref MEDIA_RULES: Vec<(Regex, usize)> = vec![
        (Regex::new(r#"(?i)<source[^>]+src=["']([^"']+\.mp4[^"']*)"#).unwrap(), 1),
        (Regex::new(r#"(?i)"contentUrl"\s*:\s*"([^"]+\.mp4[^"]*)""#).unwrap(), 1),
        (Regex::new(r#"(?i)https?://[^"'<>]+\.mp4[^"'<>]*"#).unwrap(), 0),
    ];
    static ref OG_IMAGE_RE: Regex =
        Regex::new(r#"(?i)<meta\s+property=["']og:image["']\s+content=["']([^"']+)"#).unwrap();
    static ref OG_TITLE_RE: Regex =
        Regex::new(r#"(?i)<meta\s+property=["']og:title["']\s+content=["']([^"']+)"#).unwrap();
}

pub struct VxTiktokProvider {
    client: Client,
    base: String,
    user_agent: String,
    timeout: Duration,
}

fn capture(re: &Regex, html: &str, group: usize) -> Option<String> {
    re.captures(html)
        .and_then(|caps| caps.get(group))
        .map(|m| m.as_str().to_string())
}

impl VxTiktokProvider {
    pub fn new(
        client: Client,
        base: impl Into<String>,
        user_agent: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            base: base.into(),
            user_agent: user_agent.into(),
            timeout,
        }
    }

    /// Reference with the tiktok.com host swapped for the mirror
    pub fn mirror_url(&self, reference: &MediaReference) -> String {
        let base = self.base.trim_end_matches('/');
        HOST_RE
            .replace(reference.as_str(), regex::NoExpand(base))
            .into_owned()
    }

    /// Media URL from the page, trying each rule in order
    pub fn extract_media_url(html: &str) -> Option<String> {
        MEDIA_RULES
            .iter()
            .find_map(|(re, group)| capture(re, html, *group))
    }

    /// Map the page into a result; no media URL is a parse error
    pub fn map_page(html: &str, reference: &MediaReference) -> Result<CanonicalResult, ProviderError> {
        let media = Self::extract_media_url(html)
            .ok_or_else(|| ProviderError::parse(NAME, "vx no mp4"))?;

        Ok(CanonicalResult {
            source: NAME.to_string(),
            title: capture(&OG_TITLE_RE, html, 1).unwrap_or_default(),
            id: reference.video_id().unwrap_or_default().to_string(),
            author: Author::default(),
            cover: capture(&OG_IMAGE_RE, html, 1),
            audio: None,
            video: VideoVariants {
                hd: Some(media.clone()),
                nowm: Some(media),
                wm: None,
            },
        })
    }
}

#[async_trait]
impl MediaProvider for VxTiktokProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn resolve(&self, reference: &MediaReference) -> Result<CanonicalResult, ProviderError> {
        let url = self.mirror_url(reference);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| ProviderError::from_request(NAME, &e, self.timeout))?;

        let response = ensure_success(NAME, "vx", response)?;
        let html = response
            .text()
            .await
            .map_err(|e| ProviderError::from_request(NAME, &e, self.timeout))?;

        Self::map_page(&html, reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn reference() -> MediaReference {
        MediaReference::parse("https://www.tiktok.com/@user/video/123").unwrap()
    }

    #[test]
    fn test_rule_order() {
        let html = r#"
            <script>{"contentUrl": "https://cdn.example/structured.mp4"}</script>
            <video><source type="video/mp4" src="https://cdn.example/source.mp4?sig=1"></video>
        "#;
        assert_eq!(
            VxTiktokProvider::extract_media_url(html).as_deref(),
            Some("https://cdn.example/source.mp4?sig=1")
        );

        let structured = r#"{"contentUrl" : "https://cdn.example/structured.mp4"}"#;
        assert_eq!(
            VxTiktokProvider::extract_media_url(structured).as_deref(),
            Some("https://cdn.example/structured.mp4")
        );

        let bare = "<p>watch at https://cdn.example/bare.mp4</p>";
        assert_eq!(
            VxTiktokProvider::extract_media_url(bare).as_deref(),
            Some("https://cdn.example/bare.mp4")
        );
    }

    #[test]
    fn test_bare_url_runs_to_markup_boundary() {
        let html = "<p>https://cdn.example/clip.mp4?a=1 b</p>";
        assert_eq!(
            VxTiktokProvider::extract_media_url(html).as_deref(),
            Some("https://cdn.example/clip.mp4?a=1 b")
        );
    }

    #[test]
    fn test_no_match_is_parse_error() {
        let html = r#"<html><meta property="og:title" content="hello"></html>"#;
        let err = VxTiktokProvider::map_page(html, &reference()).unwrap_err();
        assert_eq!(err, ProviderError::parse("vxtiktok", "vx no mp4"));
    }

    #[test]
    fn test_map_page_metadata() {
        let html = r#"
            <meta property="og:title" content="A clip">
            <meta property="og:image" content="https://cdn.example/thumb.jpg">
            <source src="https://cdn.example/v.mp4">
        "#;
        let result = VxTiktokProvider::map_page(html, &reference()).unwrap();
        assert_eq!(result.title, "A clip");
        assert_eq!(result.id, "123");
        assert_eq!(result.cover.as_deref(), Some("https://cdn.example/thumb.jpg"));
        assert_eq!(result.video.hd, result.video.nowm);
        assert_eq!(result.video.wm, None);
        assert!(result.audio.is_none());
    }

    #[test]
    fn test_mirror_url() {
        let provider = VxTiktokProvider::new(
            Client::new(),
            "https://vxtiktok.com/",
            "Mozilla/5.0",
            Duration::from_secs(5),
        );
        assert_eq!(
            provider.mirror_url(&reference()),
            "https://vxtiktok.com/@user/video/123"
        );

        let short = MediaReference::parse("https://vm.tiktok.com/ZMabc/").unwrap();
        assert_eq!(provider.mirror_url(&short), "https://vm.tiktok.com/ZMabc/");
    }

    #[tokio::test]
    async fn test_resolve_fetches_mirror_with_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/@user/video/123"))
            .and(header("user-agent", "Mozilla/5.0"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"<source src="https://cdn.example/v.mp4">"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let provider =
            VxTiktokProvider::new(Client::new(), server.uri(), "Mozilla/5.0", Duration::from_secs(5));
        let result = provider.resolve(&reference()).await.unwrap();
        assert_eq!(result.source, "vxtiktok");
        assert_eq!(result.video.hd.as_deref(), Some("https://cdn.example/v.mp4"));
    }

    #[tokio::test]
    async fn test_resolve_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let provider =
            VxTiktokProvider::new(Client::new(), server.uri(), "Mozilla/5.0", Duration::from_secs(5));
        let err = provider.resolve(&reference()).await.unwrap_err();
        assert_eq!(err.to_string(), "vx 404");
    }
}
