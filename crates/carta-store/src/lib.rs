pub mod error;

pub use error::{Error, Result};

use std::fs;
use std::path::{Path, PathBuf};

use carta_types::{ItemId, SelectionSet};

const SUGGESTION_EXT: &str = "txt";

/// Named saved selections, one comma-separated id list per file.
///
/// `save` merges with any existing file of the same name (union of id
/// sets); `load` replaces the in-memory selection wholesale. A missing
/// file or directory reads as an empty list, never as an error.
pub struct SuggestionStore {
    dir: PathBuf,
}

impl SuggestionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the backing directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(dir);
        fs::create_dir_all(&store.dir)?;
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Saved suggestion names, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == SUGGESTION_EXT))
            .filter_map(|path| {
                path.file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
            .collect();
        names.sort();
        Ok(names)
    }

    /// Persist a selection under a name, merging with any existing list of
    /// the same name.
    pub fn save(&self, name: &str, selection: &SelectionSet) -> Result<()> {
        let path = self.path_for(name)?;
        fs::create_dir_all(&self.dir)?;

        let mut merged = self.load(name)?;
        merged.union_with(selection);

        let ids: Vec<String> = merged.iter().map(|id| id.raw().to_string()).collect();
        fs::write(&path, ids.join(","))?;
        Ok(())
    }

    /// Read a saved suggestion. Missing file means an empty selection;
    /// unparseable tokens are skipped rather than fatal.
    pub fn load(&self, name: &str) -> Result<SelectionSet> {
        let path = self.path_for(name)?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SelectionSet::new());
            }
            Err(err) => return Err(err.into()),
        };

        Ok(raw
            .split(',')
            .filter_map(|token| token.trim().parse::<u64>().ok())
            .map(ItemId::new)
            .collect())
    }

    /// Remove a saved suggestion. Deleting a name that was never saved is
    /// a no-op.
    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.path_for(name)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn path_for(&self, name: &str) -> Result<PathBuf> {
        let name = name.trim();
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            return Err(Error::InvalidName(name.to_string()));
        }
        Ok(self.dir.join(format!("{}.{}", name, SUGGESTION_EXT)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn ids(raw: &[u64]) -> SelectionSet {
        raw.iter().map(|r| ItemId::new(*r)).collect()
    }

    #[test]
    fn save_then_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = SuggestionStore::new(dir.path());

        store.save("cliente_a", &ids(&[3, 1, 2])).unwrap();
        let loaded = store.load("cliente_a").unwrap();

        let raw: Vec<u64> = loaded.iter().map(|id| id.raw()).collect();
        assert_eq!(raw, vec![1, 2, 3]);
    }

    #[test]
    fn save_merges_with_existing_list() {
        let dir = tempdir().unwrap();
        let store = SuggestionStore::new(dir.path());

        store.save("carta", &ids(&[1, 2])).unwrap();
        store.save("carta", &ids(&[2, 9])).unwrap();

        let merged = store.load("carta").unwrap();
        let raw: Vec<u64> = merged.iter().map(|id| id.raw()).collect();
        assert_eq!(raw, vec![1, 2, 9]);
    }

    #[test]
    fn load_of_unknown_name_is_empty() {
        let dir = tempdir().unwrap();
        let store = SuggestionStore::new(dir.path());
        assert!(store.load("nunca_salva").unwrap().is_empty());
    }

    #[test]
    fn list_names_saved_suggestions_sorted() {
        let dir = tempdir().unwrap();
        let store = SuggestionStore::new(dir.path());
        store.save("zeta", &ids(&[1])).unwrap();
        store.save("alfa", &ids(&[2])).unwrap();

        assert_eq!(store.list().unwrap(), vec!["alfa", "zeta"]);
    }

    #[test]
    fn list_on_missing_directory_is_empty() {
        let store = SuggestionStore::new("/nonexistent/sugestoes");
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn delete_removes_the_file_and_tolerates_absence() {
        let dir = tempdir().unwrap();
        let store = SuggestionStore::new(dir.path());
        store.save("efemera", &ids(&[1])).unwrap();

        store.delete("efemera").unwrap();
        assert!(store.list().unwrap().is_empty());
        store.delete("efemera").unwrap();
    }

    #[test]
    fn bad_tokens_are_skipped_on_load() {
        let dir = tempdir().unwrap();
        let store = SuggestionStore::new(dir.path());
        std::fs::write(dir.path().join("suja.txt"), "1, x, ,3,").unwrap();

        let loaded = store.load("suja").unwrap();
        let raw: Vec<u64> = loaded.iter().map(|id| id.raw()).collect();
        assert_eq!(raw, vec![1, 3]);
    }

    #[test]
    fn path_separators_in_names_are_rejected() {
        let dir = tempdir().unwrap();
        let store = SuggestionStore::new(dir.path());
        assert!(matches!(
            store.save("../fora", &ids(&[1])),
            Err(Error::InvalidName(_))
        ));
    }
}
