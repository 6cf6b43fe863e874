//! # State Store
//!
//! Key-value persistence for small records. The container only ever stores
//! one key, but the store doesn't care.
//!
//! - [`FileStore`]: one JSON file per key under a state directory
//!   (`~/.blogdeck/state/` by default). Writes go through `.tmp` + `rename()`
//!   so a crash mid-write leaves the previous record intact.
//! - [`MemoryStore`]: a `HashMap`, used with `--no-persist` and in tests.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

#[derive(Debug)]
pub enum StoreError {
    Read { key: String, source: io::Error },
    Write { key: String, source: io::Error },
    Encode(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Read { key, source } => write!(f, "failed to read '{key}': {source}"),
            StoreError::Write { key, source } => write!(f, "failed to write '{key}': {source}"),
            StoreError::Encode(e) => write!(f, "failed to encode state: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Read { source, .. } | StoreError::Write { source, .. } => Some(source),
            StoreError::Encode(e) => Some(e),
        }
    }
}

pub trait StateStore {
    /// `Ok(None)` when nothing is stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns `~/.blogdeck/state`.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".blogdeck").join("state"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }
}

/// Keep keys to a portable file-name alphabet. Anything else, including
/// `%` itself, becomes `%HH` per UTF-8 byte, so distinct keys never share a
/// file.
fn sanitize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'_' | b'-') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

impl StateStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.key_path(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.key_path(key);
        let tmp_path = path.with_extension("tmp");
        let to_write_error = |source| StoreError::Write {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(to_write_error)?;
        fs::write(&tmp_path, value).map_err(to_write_error)?;
        fs::rename(&tmp_path, &path).map_err(to_write_error)?;
        debug!("Wrote {} ({} bytes)", path.display(), value.len());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Write {
                key: key.to_string(),
                source,
            }),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "blogdeck-store-{}-{}",
            std::process::id(),
            name
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.read("k").unwrap(), None);
        store.write("k", "v").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.read("k").unwrap(), None);
    }

    #[test]
    fn test_file_store_missing_key_is_none() {
        let store = FileStore::new(temp_dir("missing"));
        assert_eq!(store.read("nothing").unwrap(), None);
    }

    #[test]
    fn test_file_store_write_creates_dir_and_reads_back() {
        let dir = temp_dir("write");
        let mut store = FileStore::new(&dir);
        store.write("tab_state", "{\"a\":1}").unwrap();
        assert!(dir.join("tab_state.json").exists());
        assert!(!dir.join("tab_state.tmp").exists());
        assert_eq!(store.read("tab_state").unwrap().as_deref(), Some("{\"a\":1}"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_store_overwrites() {
        let dir = temp_dir("overwrite");
        let mut store = FileStore::new(&dir);
        store.write("k", "first").unwrap();
        store.write("k", "second").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("second"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_store_remove_missing_is_ok() {
        let mut store = FileStore::new(temp_dir("remove"));
        assert!(store.remove("never-written").is_ok());
    }

    #[test]
    fn test_sanitize_key() {
        assert_eq!(sanitize_key("blog_container.tab_state"), "blog_container.tab_state");
        assert_eq!(sanitize_key("../etc/passwd"), "..%2Fetc%2Fpasswd");
        assert_eq!(sanitize_key("a b:c"), "a%20b%3Ac");
        assert_eq!(sanitize_key("é"), "%C3%A9");
    }

    #[test]
    fn test_escaped_keys_do_not_collide() {
        assert_ne!(sanitize_key("a b"), sanitize_key("a_b"));
        assert_ne!(sanitize_key("a%20b"), sanitize_key("a b"));

        let dir = temp_dir("collide");
        let mut store = FileStore::new(&dir);
        store.write("a b", "spaced").unwrap();
        store.write("a_b", "underscored").unwrap();
        assert_eq!(store.read("a b").unwrap().as_deref(), Some("spaced"));
        assert_eq!(store.read("a_b").unwrap().as_deref(), Some("underscored"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_write_into_file_path_fails() {
        let dir = temp_dir("blocked");
        fs::create_dir_all(dir.parent().unwrap()).unwrap();
        // A regular file where the state directory should be
        fs::write(&dir, "not a directory").unwrap();
        let mut store = FileStore::new(&dir);
        let err = store.write("k", "v").unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
        let _ = fs::remove_file(&dir);
    }
}
