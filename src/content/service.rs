use std::path::{Path, PathBuf};

use super::loader::load_collection;
use super::normalize::Normalizer;
use super::record::{ContentRecord, ContentType};
use super::ContentError;

/// Lists and looks up records. Every call re-reads the content directory.
#[derive(Debug, Clone)]
pub struct ContentService {
    base_dir: PathBuf,
    normalizer: Normalizer,
}

impl ContentService {
    pub fn new(base_dir: impl Into<PathBuf>, normalizer: Normalizer) -> Self {
        Self {
            base_dir: base_dir.into(),
            normalizer,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub async fn list_by_type(&self, content_type: &str) -> Result<Vec<ContentRecord>, ContentError> {
        let content_type: ContentType = content_type.parse()?;
        self.list(content_type).await
    }

    pub async fn list(&self, content_type: ContentType) -> Result<Vec<ContentRecord>, ContentError> {
        let dir = self.base_dir.join(content_type.as_str());
        load_collection(&dir, content_type, &self.normalizer).await
    }

    pub async fn get_by_id(&self, content_type: &str, id: &str) -> Result<ContentRecord, ContentError> {
        let content_type: ContentType = content_type.parse()?;
        let records = self.list(content_type).await?;

        parse_id(id)
            .and_then(|id| records.into_iter().find(|r| i64::from(r.id) == id))
            .ok_or_else(|| ContentError::NotFound(content_type.to_string()))
    }
}

/// Reads a leading integer the way JavaScript's `parseInt` does without a
/// radix: `" 42abc"` is 42, `"0x1f"` is 31, `"abc"` is nothing.
pub fn parse_id(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    let value = i64::from_str_radix(&digits[..end], radix).ok()?;
    Some(if negative { -value } else { value })
}
