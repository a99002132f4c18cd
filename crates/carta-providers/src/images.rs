use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Optional product photo resolution by item code.
///
/// Absence is a normal outcome, never an error: an item without a photo
/// renders with the narrow row height and moves on.
pub trait ImageLookup {
    fn find_image(&self, code: &str) -> Option<PathBuf>;
}

const EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "PNG", "JPG", "JPEG"];

/// Directory-backed photo store, one file per item code.
///
/// Tries an exact `<code>.<ext>` probe across the common extensions, then
/// falls back to the first directory entry whose name starts with the
/// code. A missing directory behaves like an empty one.
pub struct ImageDir {
    root: PathBuf,
}

impl ImageDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageLookup for ImageDir {
    fn find_image(&self, code: &str) -> Option<PathBuf> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }

        for ext in EXTENSIONS {
            let candidate = self.root.join(format!("{}.{}", code, ext));
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        WalkDir::new(&self.root)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .find(|entry| entry.file_name().to_string_lossy().starts_with(code))
            .map(|entry| entry.into_path())
    }
}

/// Lookup that never finds a photo. Used when photo insertion is toggled
/// off, so the rest of the pipeline stays on one code path.
pub struct NoImages;

impl ImageLookup for NoImages {
    fn find_image(&self, _code: &str) -> Option<PathBuf> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn exact_extension_probe_wins() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("407.png"), b"png").unwrap();
        fs::write(dir.path().join("407-old.jpg"), b"jpg").unwrap();

        let store = ImageDir::new(dir.path());
        let found = store.find_image("407").unwrap();
        assert_eq!(found.file_name().unwrap(), "407.png");
    }

    #[test]
    fn starts_with_fallback_scan() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("212_garrafa.webp"), b"img").unwrap();

        let store = ImageDir::new(dir.path());
        let found = store.find_image("212").unwrap();
        assert_eq!(found.file_name().unwrap(), "212_garrafa.webp");
    }

    #[test]
    fn absence_is_none_not_an_error() {
        let dir = tempdir().unwrap();
        let store = ImageDir::new(dir.path());
        assert!(store.find_image("999").is_none());
        assert!(store.find_image("").is_none());
    }

    #[test]
    fn missing_directory_behaves_like_empty() {
        let store = ImageDir::new("/nonexistent/imagens");
        assert!(store.find_image("407").is_none());
    }

    #[test]
    fn no_images_always_misses() {
        assert!(NoImages.find_image("407").is_none());
    }
}
