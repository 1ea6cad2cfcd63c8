use std::{io, path::Path};
use tokio::fs;

use super::frontmatter;
use super::id::MARKDOWN_EXT;
use super::normalize::Normalizer;
use super::record::{ContentRecord, ContentType};
use super::ContentError;

/// Loads every `.md` file directly inside `dir`, newest first.
///
/// A missing directory is an empty collection. Files that fail to read or
/// parse are logged and skipped.
pub async fn load_collection(
    dir: &Path,
    content_type: ContentType,
    normalizer: &Normalizer,
) -> Result<Vec<ContentRecord>, ContentError> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::info!(target: "content",
                dir = dir.display().to_string();
                "content directory not found",
            );
            return Ok(Vec::new());
        }
        Err(err) => return Err(err.into()),
    };

    let mut files: Vec<String> = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        match entry.file_name().into_string() {
            Ok(name) if name.ends_with(MARKDOWN_EXT) => files.push(name),
            _ => {}
        }
    }
    // read_dir order is platform dependent
    files.sort();

    let mut records = Vec::with_capacity(files.len());
    for name in files {
        let path = dir.join(&name);
        match load_file(&path, &name, content_type, normalizer).await {
            Ok(record) => records.push(record),
            Err(err) => {
                log::warn!(target: "content",
                    file = path.display().to_string(),
                    error = err.to_string();
                    "failed to process content file",
                );
            }
        }
    }

    sort_newest_first(&mut records);
    Ok(records)
}

async fn load_file(
    path: &Path,
    name: &str,
    content_type: ContentType,
    normalizer: &Normalizer,
) -> Result<ContentRecord, ContentError> {
    let text = fs::read_to_string(path).await?;
    let fm = frontmatter::parse(&text)?;
    normalizer.normalize(name, content_type, &fm)
}

/// Stable sort by descending date; equal dates keep their order.
pub fn sort_newest_first(records: &mut [ContentRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}
