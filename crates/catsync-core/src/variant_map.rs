//! The slug → variant-id mapping persisted between the publisher and the
//! injector.
//!
//! The on-disk form is a flat JSON object. Keys are sorted for a stable,
//! diffable artifact; presentation order is the catalog's concern, not the
//! map's.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading or writing the variant map artifact.
#[derive(Debug, Error)]
pub enum MapError {
    /// The artifact does not exist; the publisher has not run yet.
    #[error("variant map not found at {path}; run `catsync publish` first")]
    NotFound { path: String },

    #[error("failed to read variant map at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse variant map at {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize variant map: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write variant map at {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Mapping from catalog slug to provider-assigned variant id.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantMap(BTreeMap<String, String>);

impl VariantMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, slug: impl Into<String>, variant_id: impl Into<String>) {
        self.0.insert(slug.into(), variant_id.into());
    }

    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&str> {
        self.0.get(slug).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read the artifact from `path`.
    ///
    /// # Errors
    ///
    /// [`MapError::NotFound`] when the file does not exist (the injector's
    /// fail-fast signal), [`MapError::Io`]/[`MapError::Parse`] otherwise.
    pub fn load(path: &Path) -> Result<Self, MapError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(MapError::NotFound {
                    path: path.display().to_string(),
                });
            }
            Err(e) => {
                return Err(MapError::Io {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        };

        serde_json::from_str(&content).map_err(|e| MapError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Write the artifact to `path` as pretty-printed JSON, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Write`] on any filesystem failure.
    pub fn save(&self, path: &Path) -> Result<(), MapError> {
        let wrap_write = |source: std::io::Error| MapError::Write {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(wrap_write)?;
            }
        }

        let mut body = serde_json::to_string_pretty(&self.0)
            .map_err(|e| MapError::Serialize { source: e })?;
        body.push('\n');

        std::fs::write(path, body).map_err(wrap_write)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get_roundtrips() {
        let mut map = VariantMap::new();
        map.insert("janus", "998877");
        assert_eq!(map.get("janus"), Some("998877"));
        assert_eq!(map.get("cv-guru"), None);
        assert_eq!(map.len(), 1);
        assert!(!map.is_empty());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("variant-map.json");

        let mut map = VariantMap::new();
        map.insert("janus", "998877");
        map.insert("cv-guru", "112233");
        map.save(&path).expect("save should succeed");

        let loaded = VariantMap::load(&path).expect("load should succeed");
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get("janus"), Some("998877"));
        assert_eq!(loaded.get("cv-guru"), Some("112233"));
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested/deeper/variant-map.json");

        VariantMap::new().save(&path).expect("save should succeed");
        assert!(path.exists());
    }

    #[test]
    fn on_disk_form_is_a_flat_sorted_object() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("variant-map.json");

        let mut map = VariantMap::new();
        map.insert("zeta", "2");
        map.insert("alpha", "1");
        map.save(&path).expect("save should succeed");

        let body = std::fs::read_to_string(&path).expect("read");
        let alpha = body.find("\"alpha\"").expect("alpha key present");
        let zeta = body.find("\"zeta\"").expect("zeta key present");
        assert!(alpha < zeta, "keys should be sorted: {body}");
        assert!(body.ends_with('\n'));
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("does-not-exist.json");

        let err = VariantMap::load(&path).expect_err("expected NotFound");
        assert!(matches!(err, MapError::NotFound { .. }), "got: {err:?}");
        assert!(err.to_string().contains("catsync publish"));
    }

    #[test]
    fn load_malformed_json_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("variant-map.json");
        std::fs::write(&path, "{not json").expect("write");

        let err = VariantMap::load(&path).expect_err("expected Parse");
        assert!(matches!(err, MapError::Parse { .. }), "got: {err:?}");
    }
}
