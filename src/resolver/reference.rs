// Input reference validation

use std::fmt;

use regex::Regex;

use super::errors::ResolveError;

lazy_static::lazy_static! {
    static ref HOST_RE: Regex =
        Regex::new(r"(?i)tiktok\.com/|https?://(vm|vt)\.tiktok\.com/").unwrap();
    static ref VIDEO_ID_RE: Regex = Regex::new(r"/video/(\d+)").unwrap();
}

/// A link that passed the host check. Only constructed through [`MediaReference::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaReference(String);

impl MediaReference {
    pub fn parse(raw: &str) -> Result<Self, ResolveError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ResolveError::MissingReference);
        }
        if !HOST_RE.is_match(trimmed) {
            return Err(ResolveError::InvalidReference(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric id from a `/video/<id>` path segment
    pub fn video_id(&self) -> Option<&str> {
        VIDEO_ID_RE
            .captures(&self.0)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

impl fmt::Display for MediaReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
