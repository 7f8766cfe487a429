use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::config::ColoringConfig;

/// Errors that can occur while storing or reading saved artwork
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage quota exceeded saving {key}: need {needed} bytes, {available} available")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },

    #[error("Stored artwork is not a PNG data URL")]
    NotADataUrl,

    #[error("Stored artwork is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage key for a template's saved artwork
pub fn storage_key(template_id: &str) -> String {
    format!("coloring_{}", template_id)
}

/// Saved artwork keyed by template id, each entry a PNG data URL.
///
/// Behaves like browser local storage: string values under a byte quota
/// that counts keys and values. Persisted with the rest of the app state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtworkShelf {
    entries: BTreeMap<String, String>,
    quota_bytes: usize,
}

impl Default for ArtworkShelf {
    fn default() -> Self {
        Self::with_quota(ColoringConfig::default().storage_quota_bytes)
    }
}

impl ArtworkShelf {
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            quota_bytes,
        }
    }

    pub fn set_quota(&mut self, quota_bytes: usize) {
        self.quota_bytes = quota_bytes;
    }

    /// Store a data URL, replacing any earlier save for the same template
    pub fn put(&mut self, template_id: &str, data_url: String) -> StorageResult<()> {
        let key = storage_key(template_id);
        let replaced = self.entries.get(&key).map_or(0, |old| key.len() + old.len());
        let available = self.quota_bytes.saturating_sub(self.used_bytes() - replaced);
        let needed = key.len() + data_url.len();
        if needed > available {
            return Err(StorageError::QuotaExceeded {
                key,
                needed,
                available,
            });
        }
        self.entries.insert(key, data_url);
        Ok(())
    }

    pub fn get(&self, template_id: &str) -> Option<&str> {
        self.entries.get(&storage_key(template_id)).map(String::as_str)
    }

    pub fn remove(&mut self, template_id: &str) -> Option<String> {
        self.entries.remove(&storage_key(template_id))
    }

    /// Keep only entries whose template id passes `keep`
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.entries
            .retain(|key, _| key.strip_prefix("coloring_").is_some_and(|id| keep(id)));
    }

    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format() {
        assert_eq!(storage_key("sun"), "coloring_sun");
    }

    #[test]
    fn test_quota_counts_keys_and_values() {
        let mut shelf = ArtworkShelf::with_quota(20);
        // "coloring_a" is 10 bytes
        shelf.put("a", "0123456789".to_owned()).unwrap();
        assert_eq!(shelf.used_bytes(), 20);

        let err = shelf.put("b", "x".to_owned()).unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { needed: 11, available: 0, .. }));
        assert_eq!(shelf.get("b"), None);
    }

    #[test]
    fn test_replacing_frees_the_old_entry() {
        let mut shelf = ArtworkShelf::with_quota(20);
        shelf.put("a", "0123456789".to_owned()).unwrap();
        shelf.put("a", "abcdefghij".to_owned()).unwrap();
        assert_eq!(shelf.get("a"), Some("abcdefghij"));
        assert_eq!(shelf.len(), 1);
    }

    #[test]
    fn test_retain_drops_other_templates() {
        let mut shelf = ArtworkShelf::default();
        shelf.put("sun", "a".to_owned()).unwrap();
        shelf.put("imported", "b".to_owned()).unwrap();
        shelf.retain(|id| id == "sun");
        assert_eq!(shelf.len(), 1);
        assert_eq!(shelf.get("sun"), Some("a"));
    }

    #[test]
    fn test_state_round_trips_through_json() {
        let mut shelf = ArtworkShelf::default();
        shelf.put("house", "data:image/png;base64,AAAA".to_owned()).unwrap();
        let json = serde_json::to_string(&shelf).unwrap();
        let restored: ArtworkShelf = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, shelf);
    }
}
