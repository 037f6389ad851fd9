// User feedback records
//
// Stateless: a record is sanitised, stamped and written to the operator's
// sink. Nothing here touches the resolver.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tokio::io::AsyncWriteExt;
use tracing::info;

const TYPE_MAX: usize = 30;
const MESSAGE_MAX: usize = 4000;
const CONTACT_MAX: usize = 200;
const PATH_MAX: usize = 200;
const UA_MAX: usize = 400;

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("failed to write feedback: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode feedback: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub contact: String,
    pub path: String,
    pub ua: String,
    pub ts: String,
}

/// Field as text; missing, null, "", false and 0 count as absent
fn coerce(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(display_text(other)),
    }
}

/// Plain-text rendering: whole floats drop the fraction, arrays join their
/// items with commas and objects collapse to a placeholder
fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Value::Array(items) => items.iter().map(display_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// First `max` characters of `s`
fn clip(s: String, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s,
    }
}

impl FeedbackRecord {
    /// Build a sanitised record from an arbitrary JSON body, stamped with `now`
    pub fn from_json(body: &Value, now: OffsetDateTime) -> Result<Self, FeedbackError> {
        let field = |key: &str| coerce(body.get(key));

        Ok(Self {
            kind: clip(field("type").unwrap_or_else(|| "other".to_string()), TYPE_MAX),
            message: clip(field("message").unwrap_or_default(), MESSAGE_MAX),
            contact: clip(field("contact").unwrap_or_default(), CONTACT_MAX),
            path: clip(field("path").unwrap_or_default(), PATH_MAX),
            ua: clip(
                field("ua").or_else(|| field("user-agent")).unwrap_or_default(),
                UA_MAX,
            ),
            ts: now.format(&Rfc3339)?,
        })
    }
}

/// Where feedback ends up: always the log, optionally a JSON-lines file
#[derive(Debug, Clone, Default)]
pub struct FeedbackSink {
    log_file: Option<PathBuf>,
}

impl FeedbackSink {
    pub fn new(log_file: Option<PathBuf>) -> Self {
        Self { log_file }
    }

    pub async fn write(&self, record: &FeedbackRecord) -> Result<(), FeedbackError> {
        info!(
            target: "feedback",
            kind = %record.kind,
            message = %record.message,
            contact = %record.contact,
            path = %record.path,
            ua = %record.ua,
            ts = %record.ts,
            "feedback"
        );

        if let Some(path) = &self.log_file {
            let mut line = serde_json::to_vec(record)?;
            line.push(b'\n');
            let mut file = tokio::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .await?;
            file.write_all(&line).await?;
        }

        Ok(())
    }
}
