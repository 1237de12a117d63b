//! JSON-file backed store for one topic.

use crate::error::{CrewError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Characters shown per entry by [`TopicCache::summary`].
const PREVIEW_CHARS: usize = 100;

/// Role key to output text.
type Document = BTreeMap<String, String>;

/// Why the backing document could not be loaded.
#[derive(Debug, thiserror::Error)]
enum LoadError {
    #[error("read failed: {0}")]
    Io(std::io::Error),
    #[error("corrupt JSON: {0}")]
    Corrupt(serde_json::Error),
}

/// File name of the cache document for `topic`.
///
/// The topic is lower-cased. Path separators are percent-escaped (and `%`
/// itself), so the document always lands directly inside the cache directory
/// and distinct topics never share a file.
pub fn cache_file_name(topic: &str) -> String {
    let mut key = String::with_capacity(topic.len());
    for c in topic.to_lowercase().chars() {
        match c {
            '%' => key.push_str("%25"),
            '/' => key.push_str("%2f"),
            '\\' => key.push_str("%5c"),
            c => key.push(c),
        }
    }
    format!("{}_cache.json", key)
}

/// Cache store for a single topic.
#[derive(Debug, Clone)]
pub struct TopicCache {
    topic: String,
    path: PathBuf,
}

/// Length and preview of one cached entry, for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSummary {
    pub role: String,
    pub chars: usize,
    pub preview: String,
}

impl TopicCache {
    /// Open the cache for `topic` under `cache_dir`.
    ///
    /// Creates the directory and an empty document if needed. Re-opening an
    /// existing topic keeps its contents, including a corrupt document (it is
    /// replaced on the next `put`).
    pub fn open<P: AsRef<Path>>(cache_dir: P, topic: &str) -> Result<Self> {
        let cache_dir = cache_dir.as_ref();
        let path = cache_dir.join(cache_file_name(topic));

        std::fs::create_dir_all(cache_dir).map_err(|e| {
            CrewError::CacheError(format!(
                "failed to create cache directory '{}': {}",
                cache_dir.display(),
                e
            ))
        })?;

        let cache = Self {
            topic: topic.to_string(),
            path,
        };

        if !cache.path.exists() {
            cache.save(&Document::new()).map_err(|e| {
                CrewError::CacheError(format!(
                    "failed to initialize cache file '{}': {}",
                    cache.path.display(),
                    e
                ))
            })?;
            info!(topic = %cache.topic, path = %cache.path.display(), "created topic cache");
        } else {
            debug!(topic = %cache.topic, path = %cache.path.display(), "reusing topic cache");
        }

        Ok(cache)
    }

    /// Topic as given to [`TopicCache::open`].
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Path of the backing JSON document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Store `text` under `role`, replacing any previous value.
    ///
    /// Returns true only after the document has been written and read back
    /// with `role` holding exactly `text`.
    pub fn put(&self, role: &str, text: &str) -> bool {
        let mut doc = match self.load() {
            Ok(doc) => doc,
            Err(LoadError::Corrupt(e)) => {
                warn!(
                    topic = %self.topic,
                    path = %self.path.display(),
                    error = %e,
                    "cache document is corrupt; starting from an empty document"
                );
                Document::new()
            }
            Err(LoadError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(topic = %self.topic, path = %self.path.display(), "cache document missing; recreating");
                Document::new()
            }
            Err(e) => {
                error!(topic = %self.topic, role, error = %e, "failed to load cache before write");
                return false;
            }
        };

        doc.insert(role.to_string(), text.to_string());

        if let Err(e) = self.save(&doc) {
            error!(topic = %self.topic, role, error = %e, "failed to write cache document");
            return false;
        }

        match self.load() {
            Ok(written) if written.get(role).map(String::as_str) == Some(text) => {
                info!(topic = %self.topic, role, chars = text.chars().count(), "cached agent output");
                true
            }
            Ok(_) => {
                error!(topic = %self.topic, role, "cache verification failed: value does not match");
                false
            }
            Err(e) => {
                error!(topic = %self.topic, role, error = %e, "cache verification failed");
                false
            }
        }
    }

    /// Cached output for `role`, or `None` if absent or unreadable.
    pub fn get(&self, role: &str) -> Option<String> {
        match self.load() {
            Ok(mut doc) => {
                let value = doc.remove(role);
                if value.is_some() {
                    debug!(topic = %self.topic, role, "cache hit");
                } else {
                    debug!(topic = %self.topic, role, "cache miss");
                }
                value
            }
            Err(e) => {
                warn!(topic = %self.topic, role, error = %e, "cache read failed");
                None
            }
        }
    }

    /// Reset the document to an empty mapping. The file itself is kept.
    pub fn clear(&self) -> bool {
        match self.save(&Document::new()) {
            Ok(()) => {
                info!(topic = %self.topic, "cleared topic cache");
                true
            }
            Err(e) => {
                error!(topic = %self.topic, error = %e, "failed to clear cache");
                false
            }
        }
    }

    /// Every cached entry, or `None` if the document cannot be read.
    pub fn entries(&self) -> Option<BTreeMap<String, String>> {
        match self.load() {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!(topic = %self.topic, error = %e, "cache read failed");
                None
            }
        }
    }

    /// Per-role length and preview, ordered by role key.
    pub fn summary(&self) -> Option<Vec<CacheSummary>> {
        let entries = self.entries()?;
        Some(
            entries
                .into_iter()
                .map(|(role, text)| CacheSummary {
                    role,
                    chars: text.chars().count(),
                    preview: text.chars().take(PREVIEW_CHARS).collect(),
                })
                .collect(),
        )
    }

    fn load(&self) -> std::result::Result<Document, LoadError> {
        let content = std::fs::read_to_string(&self.path).map_err(LoadError::Io)?;
        serde_json::from_str(&content).map_err(LoadError::Corrupt)
    }

    fn save(&self, doc: &Document) -> std::io::Result<()> {
        let content = serde_json::to_string_pretty(doc).map_err(std::io::Error::other)?;
        crate::fs::atomic_write_file(&self.path, &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_messages() {
        let io = LoadError::Io(std::io::Error::other("disk gone"));
        assert_eq!(io.to_string(), "read failed: disk gone");

        let json_err = serde_json::from_str::<Document>("{oops").unwrap_err();
        let corrupt = LoadError::Corrupt(json_err);
        assert!(corrupt.to_string().starts_with("corrupt JSON: "));
    }
}
