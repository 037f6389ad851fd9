// Common data models for the resolver

use serde::{Deserialize, Serialize};

use super::errors::ExhaustedProviders;

/// Uploader information; every field may be empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub username: String,
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(rename = "avatar")]
    pub avatar_url: Option<String>,
}

/// Audio track of the video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audio {
    #[serde(rename = "mp3")]
    pub mp3_url: String,
}

/// Renditions of the same underlying video; any subset may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoVariants {
    /// High-definition rendition
    pub hd: Option<String>,
    /// Rendition without the platform watermark
    pub nowm: Option<String>,
    /// Watermarked rendition
    pub wm: Option<String>,
}

impl VideoVariants {
    pub fn is_empty(&self) -> bool {
        self.hd.is_none() && self.nowm.is_none() && self.wm.is_none()
    }
}

/// Provider-agnostic description of a resolved video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalResult {
    /// Identifier of the provider that produced this result
    pub source: String,
    pub title: String,
    pub id: String,
    pub author: Author,
    /// Thumbnail image
    pub cover: Option<String>,
    pub audio: Option<Audio>,
    pub video: VideoVariants,
}

impl CanonicalResult {
    /// Empty result attributed to `source`
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            title: String::new(),
            id: String::new(),
            author: Author::default(),
            cover: None,
            audio: None,
            video: VideoVariants::default(),
        }
    }

    /// Success predicate: at least one downloadable asset is present.
    /// Metadata (title, author) is never required.
    pub fn is_acceptable(&self) -> bool {
        !self.video.is_empty() || self.audio.is_some()
    }
}

/// What the orchestrator hands back to the entry point
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    Success(CanonicalResult),
    Exhausted(ExhaustedProviders),
}

impl ResolutionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}
