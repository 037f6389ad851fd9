// Shape-agnostic searches over parsed JSON
//
// Used by providers whose response layout is undocumented. Object keys are
// visited in document order (serde_json is built with `preserve_order`), so
// every search here is deterministic for a given document.

use std::collections::VecDeque;

use regex::Regex;
use serde_json::Value;

lazy_static::lazy_static! {
    static ref HTTP_URL_RE: Regex = Regex::new(r"(?i)^https?://").unwrap();
    static ref VIDEO_EXT_RE: Regex = Regex::new(r"(?i)\.mp4").unwrap();
    static ref AUDIO_EXT_RE: Regex = Regex::new(r"(?i)\.mp3").unwrap();
    static ref IMAGE_EXT_RE: Regex = Regex::new(r"(?i)\.(jpg|jpeg|png|webp)").unwrap();
    static ref HD_HINT_RE: Regex = Regex::new(r"(?i)no.?wm|nowm|hd|1080").unwrap();
    static ref WATERMARK_RE: Regex = Regex::new(r"(?i)wm|watermark").unwrap();
}

/// Every HTTP(S) string in `value`, depth-first, in visitation order
pub fn collect_urls(value: &Value) -> Vec<String> {
    let mut urls = Vec::new();
    walk(value, &mut urls);
    urls
}

fn walk(value: &Value, urls: &mut Vec<String>) {
    match value {
        Value::String(s) => {
            if HTTP_URL_RE.is_match(s) {
                urls.push(s.clone());
            }
        }
        Value::Array(items) => items.iter().for_each(|item| walk(item, urls)),
        Value::Object(map) => map.values().for_each(|item| walk(item, urls)),
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

/// URLs split by file-extension heuristic
///
/// A URL lands in every bucket whose extension it mentions; order inside
/// each bucket is discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlPartition {
    pub videos: Vec<String>,
    pub audios: Vec<String>,
    pub images: Vec<String>,
}

impl UrlPartition {
    pub fn from_urls(urls: &[String]) -> Self {
        let pick = |re: &Regex| urls.iter().filter(|u| re.is_match(u)).cloned().collect();
        Self {
            videos: pick(&VIDEO_EXT_RE),
            audios: pick(&AUDIO_EXT_RE),
            images: pick(&IMAGE_EXT_RE),
        }
    }

    pub fn from_value(value: &Value) -> Self {
        Self::from_urls(&collect_urls(value))
    }

    /// Preferred rendition: first URL hinting at HD / no watermark,
    /// otherwise the first video found
    pub fn pick_hd(&self) -> Option<&str> {
        self.videos
            .iter()
            .find(|u| HD_HINT_RE.is_match(u))
            .or_else(|| self.videos.first())
            .map(String::as_str)
    }

    /// First URL mentioning `wm` or `watermark`. A no-watermark URL matches
    /// too, so it can come back as the watermarked variant.
    pub fn pick_watermarked(&self) -> Option<&str> {
        self.videos
            .iter()
            .find(|u| WATERMARK_RE.is_match(u))
            .map(String::as_str)
    }
}

/// Level-order search for the first non-empty text stored under one of `keys`
///
/// Within a node the keys are tried in the given order before any child is
/// looked at, so shallower matches always win. Numbers are rendered as text
/// (ids are often numeric); objects, arrays and booleans never match.
pub fn first_by_key_names(value: &Value, keys: &[&str]) -> Option<String> {
    let mut queue = VecDeque::from([value]);

    while let Some(node) = queue.pop_front() {
        match node {
            Value::Object(map) => {
                for key in keys {
                    if let Some(found) = map.get(*key).and_then(as_text) {
                        return Some(found);
                    }
                }
                queue.extend(map.values().filter(|v| v.is_object() || v.is_array()));
            }
            Value::Array(items) => {
                queue.extend(items.iter().filter(|v| v.is_object() || v.is_array()));
            }
            _ => {}
        }
    }

    None
}

/// Non-empty string or number rendered as text
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "status": 200,
            "video": {
                "noWatermark": "https://cdn.example/v/nowm_720.mp4",
                "watermark": "https://cdn.example/v/wm_720.mp4",
                "cover": "https://cdn.example/img/cover.jpeg?x=1",
                "extra": [null, true, 3, "not a url", "ftp://cdn.example/f.mp4"]
            },
            "music": { "play_url": "https://cdn.example/a/track.MP3" },
            "author": { "unique_id": "someone" }
        })
    }

    #[test]
    fn test_collects_only_http_urls_in_order() {
        let urls = collect_urls(&sample());
        assert_eq!(
            urls,
            vec![
                "https://cdn.example/v/nowm_720.mp4",
                "https://cdn.example/v/wm_720.mp4",
                "https://cdn.example/img/cover.jpeg?x=1",
                "https://cdn.example/a/track.MP3",
            ]
        );
    }

    #[test]
    fn test_partition_and_picks() {
        let partition = UrlPartition::from_value(&sample());
        assert_eq!(partition.videos.len(), 2);
        assert_eq!(partition.audios, vec!["https://cdn.example/a/track.MP3"]);
        assert_eq!(partition.images, vec!["https://cdn.example/img/cover.jpeg?x=1"]);
        assert_eq!(partition.pick_hd(), Some("https://cdn.example/v/nowm_720.mp4"));
        assert_eq!(partition.pick_watermarked(), Some("https://cdn.example/v/nowm_720.mp4"));
    }

    #[test]
    fn test_watermarked_pick_accepts_no_watermark_url() {
        let doc = json!({ "video": { "noWatermark": "https://cdn.example/v/nowm.mp4" } });
        let partition = UrlPartition::from_value(&doc);
        assert_eq!(partition.pick_watermarked(), Some("https://cdn.example/v/nowm.mp4"));

        let partition = UrlPartition::from_urls(&[
            "https://cdn.example/v/plain.mp4".to_string(),
            "https://cdn.example/v/Watermark.mp4".to_string(),
        ]);
        assert_eq!(partition.pick_watermarked(), Some("https://cdn.example/v/Watermark.mp4"));
    }

    #[test]
    fn test_pick_hd_falls_back_to_first_video() {
        let partition = UrlPartition::from_urls(&[
            "https://cdn.example/a.mp4".to_string(),
            "https://cdn.example/b.mp4".to_string(),
        ]);
        assert_eq!(partition.pick_hd(), Some("https://cdn.example/a.mp4"));
        assert_eq!(partition.pick_watermarked(), None);
        assert_eq!(UrlPartition::default().pick_hd(), None);
    }

    #[test]
    fn test_partition_is_deterministic() {
        let doc = sample();
        let first = UrlPartition::from_value(&doc);
        let second = UrlPartition::from_value(&doc);
        assert_eq!(first, second);
        assert_eq!(first.pick_hd(), second.pick_hd());
    }

    #[test]
    fn test_key_order_follows_document() {
        let doc: Value = serde_json::from_str(
            r#"{"z": "https://cdn.example/z.mp4", "a": "https://cdn.example/a.mp4"}"#,
        )
        .unwrap();
        assert_eq!(
            UrlPartition::from_value(&doc).pick_hd(),
            Some("https://cdn.example/z.mp4")
        );
    }

    #[test]
    fn test_first_by_key_names_prefers_shallow_match() {
        let doc = json!({
            "data": { "title": "nested title", "id": 42 },
            "meta": { "desc": "deep desc" },
            "desc": ""
        });
        assert_eq!(
            first_by_key_names(&doc, &["title", "desc"]),
            Some("nested title".to_string())
        );
        assert_eq!(first_by_key_names(&doc, &["id"]), Some("42".to_string()));
        assert_eq!(first_by_key_names(&doc, &["missing"]), None);
    }

    #[test]
    fn test_first_by_key_names_key_priority_within_node() {
        let doc = json!({ "desc": "from desc", "title": "from title" });
        assert_eq!(
            first_by_key_names(&doc, &["title", "desc"]),
            Some("from title".to_string())
        );
    }

    #[test]
    fn test_first_by_key_names_skips_object_values() {
        let doc = json!({
            "author": { "uniqueId": "handle", "nickname": "Nick" }
        });
        assert_eq!(
            first_by_key_names(&doc, &["author", "uniqueId"]),
            Some("handle".to_string())
        );
    }

    #[test]
    fn test_first_by_key_names_searches_arrays() {
        let doc = json!({ "items": [ { "other": 1 }, { "item_id": "99" } ] });
        assert_eq!(first_by_key_names(&doc, &["item_id"]), Some("99".to_string()));
    }
}
