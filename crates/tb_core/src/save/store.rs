//! File-backed match history store.

use super::error::HistoryError;
use crate::engine::history::HistoryEntry;
use std::fs::{rename, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Append-and-trim store for generated pairings.
///
/// The on-disk format is a JSON array of name lists; every generated match
/// contributes two consecutive entries (team A, then team B), trimmed to the
/// most recent `2 x max_history` on each save. Mutations run read-modify-write
/// under a single writer lock; out-of-process writers are not coordinated and
/// can lose updates.
pub struct HistoryStore {
    path: PathBuf,
    max_history: usize,
    write_lock: Mutex<()>,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>, max_history: usize) -> Self {
        Self { path: path.into(), max_history, write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    /// Load the history, oldest entry first. A missing, empty or unreadable
    /// file yields an empty history; generation must not fail because last
    /// week's file is corrupt.
    pub fn load(&self) -> Vec<HistoryEntry> {
        match self.read() {
            Ok(history) => history,
            Err(err) => {
                log::warn!("history read failed ({}), starting empty", err);
                Vec::new()
            }
        }
    }

    fn read(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw).map_err(HistoryError::Deserialization)
    }

    /// Append one generated match (both sides) and trim to the history cap.
    pub fn append_match(
        &self,
        team_a: HistoryEntry,
        team_b: HistoryEntry,
    ) -> Result<(), HistoryError> {
        let _guard = self.write_lock.lock().unwrap();
        let mut history = self.load();
        history.push(team_a);
        history.push(team_b);
        let cap = self.max_history * 2;
        if history.len() > cap {
            history.drain(..history.len() - cap);
        }
        self.write(&history)?;
        log::debug!("history saved: {} match(es)", history.len() / 2);
        Ok(())
    }

    /// Reset the persisted history to empty.
    pub fn clear(&self) -> Result<(), HistoryError> {
        let _guard = self.write_lock.lock().unwrap();
        self.write(&[])?;
        log::info!("history cleared");
        Ok(())
    }

    fn write(&self, history: &[HistoryEntry]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_vec_pretty(history).map_err(HistoryError::Serialization)?;

        // Atomic save: write to temp file, then rename.
        let temp_path = self.path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&data)?;
            file.flush()?;
            file.sync_all()?;
        }
        rename(&temp_path, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn side(names: &[&str]) -> HistoryEntry {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn store_in(dir: &TempDir, max_history: usize) -> HistoryStore {
        HistoryStore::new(dir.path().join("history.json"), max_history)
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        assert!(store_in(&dir, 5).load().is_empty());
    }

    #[test]
    fn corrupt_file_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, 5);
        std::fs::write(store.path(), "not json at all").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn append_keeps_match_order() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, 5);
        store.append_match(side(&["A", "B"]), side(&["C", "D"])).unwrap();
        let history = store.load();
        assert_eq!(history, vec![side(&["A", "B"]), side(&["C", "D"])]);
    }

    #[test]
    fn trim_keeps_most_recent_matches() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, 1);
        store.append_match(side(&["old A"]), side(&["old B"])).unwrap();
        store.append_match(side(&["new A"]), side(&["new B"])).unwrap();
        let history = store.load();
        assert_eq!(history, vec![side(&["new A"]), side(&["new B"])]);
    }

    #[test]
    fn clear_always_empties() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, 5);
        store.append_match(side(&["A"]), side(&["B"])).unwrap();
        store.clear().unwrap();
        assert!(store.load().is_empty());
        // Clearing an already-empty store stays empty.
        store.clear().unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn saves_are_atomic() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, 5);
        store.append_match(side(&["A"]), side(&["B"])).unwrap();
        assert!(store.path().exists());
        assert!(!store.path().with_extension("tmp").exists());
    }
}
