use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};
use std::time::{Duration, Instant, SystemTime};

use tracing::{debug, warn};

use crate::domain::repositories::{PreferenceError, PreferenceStore};

/// How long lookups are served from memory before the file's mtime is checked.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, Default)]
struct Snapshot {
    values: BTreeMap<String, String>,
    modified: Option<SystemTime>,
    checked_at: Option<Instant>,
}

/// Preferences kept in a flat JSON object on disk.
///
/// Lookups are answered from an in-memory snapshot. Once the snapshot is
/// older than the refresh interval the file's modification time is checked
/// and the file is re-read only if it changed, so edits made by the
/// `portfolio-admin` tool still reach a running server. Writes replace the
/// file through a temporary sibling and a rename, then refresh the snapshot.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    refresh_interval: Duration,
    snapshot: RwLock<Snapshot>,
    write_lock: Mutex<()>,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_refresh_interval(path, DEFAULT_REFRESH_INTERVAL)
    }

    pub fn with_refresh_interval(path: impl Into<PathBuf>, refresh_interval: Duration) -> Self {
        let path = path.into();
        debug!(path = %path.display(), "Using file preference store");
        Self {
            path,
            refresh_interval,
            snapshot: RwLock::new(Snapshot::default()),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn modified(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).and_then(|m| m.modified()).ok()
    }

    fn load(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, values: &BTreeMap<String, String>) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(values)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn is_fresh(&self, snapshot: &Snapshot, now: Instant) -> bool {
        snapshot
            .checked_at
            .is_some_and(|at| now.duration_since(at) < self.refresh_interval)
    }

    /// Re-reads the file if the snapshot is stale and the file changed.
    fn refresh(&self) -> Result<(), PreferenceError> {
        let now = Instant::now();
        if self
            .snapshot
            .read()
            .map_err(|_| PreferenceError::Unavailable("lock poisoned".into()))
            .map(|snapshot| self.is_fresh(&snapshot, now))?
        {
            return Ok(());
        }

        let mut snapshot = self
            .snapshot
            .write()
            .map_err(|_| PreferenceError::Unavailable("lock poisoned".into()))?;
        if self.is_fresh(&snapshot, now) {
            return Ok(());
        }
        let modified = self.modified();
        if snapshot.checked_at.is_none() || modified != snapshot.modified {
            // Checked even on failure, so a broken file is not re-parsed on every lookup.
            snapshot.checked_at = Some(now);
            snapshot.values.clear();
            snapshot.values = self.load()?;
            snapshot.modified = modified;
        }
        snapshot.checked_at = Some(now);
        Ok(())
    }

    fn update(
        &self,
        apply: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), PreferenceError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| PreferenceError::Unavailable("lock poisoned".into()))?;
        let mut values = self.load()?;
        apply(&mut values);
        self.store(&values)?;

        let mut snapshot = self
            .snapshot
            .write()
            .map_err(|_| PreferenceError::Unavailable("lock poisoned".into()))?;
        *snapshot = Snapshot {
            values,
            modified: self.modified(),
            checked_at: Some(Instant::now()),
        };
        Ok(())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        if let Err(e) = self.refresh() {
            warn!(path = %self.path.display(), error = %e, "Failed to read preferences");
            return None;
        }
        self.snapshot.read().ok()?.values.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.update(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), PreferenceError> {
        self.update(|values| {
            values.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferenceStore::new(dir.path().join("prefs.json"));

        assert_eq!(store.get("default-landing-domain"), None);
    }

    #[test]
    fn test_values_survive_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        FilePreferenceStore::new(&path)
            .set("default-landing-domain", "mechanical")
            .unwrap();

        let reopened = FilePreferenceStore::new(&path);
        assert_eq!(
            reopened.get("default-landing-domain").as_deref(),
            Some("mechanical")
        );
    }

    #[test]
    fn test_remove_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferenceStore::new(dir.path().join("prefs.json"));

        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.remove("a").unwrap();

        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b").as_deref(), Some("2"));
    }

    #[test]
    fn test_corrupt_file_reads_as_absent_and_rejects_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();
        let store = FilePreferenceStore::new(&path);

        assert_eq!(store.get("a"), None);
        assert!(matches!(store.set("a", "1"), Err(PreferenceError::Format(_))));
    }

    #[test]
    fn test_lookups_are_served_from_memory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let store = FilePreferenceStore::with_refresh_interval(&path, Duration::from_secs(3600));
        store.set("a", "1").unwrap();

        fs::write(&path, r#"{"a":"changed"}"#).unwrap();

        assert_eq!(store.get("a").as_deref(), Some("1"));
        fs::remove_file(&path).unwrap();
        assert_eq!(store.get("a").as_deref(), Some("1"));
    }

    #[test]
    fn test_stale_snapshot_picks_up_external_edits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let store = FilePreferenceStore::with_refresh_interval(&path, Duration::ZERO);
        assert_eq!(store.get("a"), None);

        // Another process, such as the admin tool, writes the file.
        FilePreferenceStore::new(&path).set("a", "external").unwrap();

        assert_eq!(store.get("a").as_deref(), Some("external"));
    }
}
