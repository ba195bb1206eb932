use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Tracks the temporary segment files created by one pipeline run.
///
/// All files live in a dedicated temp directory owned by the registry, so
/// a run can never leak segments into another run's workspace. Cleanup is
/// best-effort: removal errors are logged and swallowed, and the backing
/// directory is removed when the registry is dropped regardless.
pub struct TempFileRegistry {
    dir: TempDir,
    files: Vec<PathBuf>,
}

impl TempFileRegistry {
    pub fn new() -> Result<Self, std::io::Error> {
        Ok(Self {
            dir: TempDir::with_prefix("scribe_segments_")?,
            files: Vec::new(),
        })
    }

    /// Reserve a path for the segment with the given index and track it.
    ///
    /// The file itself is created later by whoever exports the segment.
    pub fn allocate(&mut self, index: usize) -> PathBuf {
        let path = self.dir.path().join(format!("segment_{index:04}.wav"));
        self.files.push(path.clone());
        path
    }

    pub fn tracked(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn base_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Remove every tracked file. Errors are logged and ignored.
    pub fn cleanup(&mut self) {
        for path in self.files.drain(..) {
            if !path.exists() {
                continue;
            }
            if let Err(e) = fs::remove_file(&path) {
                log::warn!("Failed to remove temp segment {}: {e}", path.display());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_paths_are_indexed_and_distinct() {
        let mut registry = TempFileRegistry::new().unwrap();
        let a = registry.allocate(0);
        let b = registry.allocate(1);
        assert_ne!(a, b);
        assert!(a.to_string_lossy().contains("segment_0000"));
        assert!(b.to_string_lossy().contains("segment_0001"));
        assert_eq!(registry.tracked().len(), 2);
    }

    #[test]
    fn test_allocated_paths_live_under_base_dir() {
        let mut registry = TempFileRegistry::new().unwrap();
        let path = registry.allocate(0);
        assert!(path.starts_with(registry.base_dir()));
    }

    #[test]
    fn test_cleanup_removes_created_files() {
        let mut registry = TempFileRegistry::new().unwrap();
        let a = registry.allocate(0);
        let b = registry.allocate(1);
        fs::write(&a, b"pcm").unwrap();
        fs::write(&b, b"pcm").unwrap();

        registry.cleanup();

        assert!(!a.exists());
        assert!(!b.exists());
        assert!(registry.tracked().is_empty());
    }

    #[test]
    fn test_cleanup_tolerates_missing_files() {
        let mut registry = TempFileRegistry::new().unwrap();
        let a = registry.allocate(0);
        // Never created on disk.
        registry.cleanup();
        assert!(!a.exists());
    }

    #[test]
    fn test_drop_removes_base_dir() {
        let base;
        {
            let mut registry = TempFileRegistry::new().unwrap();
            let a = registry.allocate(0);
            fs::write(&a, b"pcm").unwrap();
            base = registry.base_dir().to_path_buf();
        }
        assert!(!base.exists());
    }
}
