//! Filesystem scratch directory for cached clipboard payloads

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Local};

use crate::application::ports::{CacheError, CacheStore};

/// Prefix of every file this cache creates
const FILE_PREFIX: &str = "clip_";

/// Cache store backed by a process-scoped directory.
///
/// The directory is created on first save. Files are named
/// `clip_<YYYYmmdd_HHMMSS_micros>.<ext>`, with `_<n>` appended when two
/// captures share a timestamp.
pub struct ScratchDirCache {
    dir: PathBuf,
    disposed: AtomicBool,
}

impl ScratchDirCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            disposed: AtomicBool::new(false),
        }
    }

    fn file_stem(captured_at: DateTime<Local>) -> String {
        format!("{}{}", FILE_PREFIX, captured_at.format("%Y%m%d_%H%M%S_%6f"))
    }

    fn ensure_dir(&self) -> Result<(), CacheError> {
        fs::create_dir_all(&self.dir).map_err(|e| CacheError::CreateDir {
            path: self.dir.clone(),
            message: e.to_string(),
        })
    }

    fn is_cache_file(path: &Path) -> bool {
        path.is_file()
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(FILE_PREFIX))
    }
}

impl CacheStore for ScratchDirCache {
    fn save(
        &self,
        bytes: &[u8],
        extension: &str,
        captured_at: DateTime<Local>,
    ) -> Result<PathBuf, CacheError> {
        if self.disposed.load(Ordering::SeqCst) {
            return Err(CacheError::Disposed);
        }
        self.ensure_dir()?;

        let stem = Self::file_stem(captured_at);
        let mut suffix = 0u32;
        loop {
            let name = if suffix == 0 {
                format!("{}.{}", stem, extension)
            } else {
                format!("{}_{}.{}", stem, suffix, extension)
            };
            let path = self.dir.join(name);

            // create_new makes the collision check and the create one step
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    return file.write_all(bytes).map(|()| path.clone()).map_err(|e| {
                        let _ = fs::remove_file(&path);
                        CacheError::Write {
                            path,
                            message: e.to_string(),
                        }
                    });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => suffix += 1,
                Err(e) => {
                    return Err(CacheError::Write {
                        path,
                        message: e.to_string(),
                    })
                }
            }
        }
    }

    fn delete(&self, path: &Path) -> Result<(), CacheError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::Delete {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    fn clear(&self) -> Result<(), CacheError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(CacheError::Delete {
                    path: self.dir.clone(),
                    message: e.to_string(),
                })
            }
        };

        // Keep going past individual failures, report the first one
        let mut first_err = None;
        for path in entries.flatten().map(|entry| entry.path()) {
            if !Self::is_cache_file(&path) {
                continue;
            }
            if let Err(e) = self.delete(&path) {
                first_err.get_or_insert(e);
            }
        }

        first_err.map_or(Ok(()), Err)
    }

    fn dispose(&self) -> Result<(), CacheError> {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        self.clear()?;
        match fs::remove_dir(&self.dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::Delete {
                path: self.dir.clone(),
                message: e.to_string(),
            }),
        }
    }

    fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    fn cache() -> (tempfile::TempDir, ScratchDirCache) {
        let root = tempfile::tempdir().unwrap();
        let cache = ScratchDirCache::new(root.path().join("scratch"));
        (root, cache)
    }

    #[test]
    fn directory_is_created_lazily() {
        let (_root, cache) = cache();
        assert!(!cache.dir().exists());

        cache.save(b"png", "png", fixed_time()).unwrap();
        assert!(cache.dir().is_dir());
    }

    #[test]
    fn file_name_uses_timestamp_and_extension() {
        let (_root, cache) = cache();
        let path = cache.save(b"pdf", "pdf", fixed_time()).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            "clip_20240309_140507_000000.pdf"
        );
        assert_eq!(fs::read(&path).unwrap(), b"pdf");
    }

    #[test]
    fn same_timestamp_gets_suffix() {
        let (_root, cache) = cache();
        let first = cache.save(b"a", "png", fixed_time()).unwrap();
        let second = cache.save(b"b", "png", fixed_time()).unwrap();

        assert_ne!(first, second);
        assert_eq!(
            second.file_name().unwrap().to_string_lossy(),
            "clip_20240309_140507_000000_1.png"
        );
    }

    #[test]
    fn delete_missing_file_is_ok() {
        let (_root, cache) = cache();
        assert!(cache.delete(&cache.dir().join("clip_gone.png")).is_ok());
    }

    #[test]
    fn clear_removes_cached_files_only() {
        let (_root, cache) = cache();
        let cached = cache.save(b"a", "rtf", fixed_time()).unwrap();
        let foreign = cache.dir().join("notes.txt");
        fs::write(&foreign, b"keep").unwrap();

        cache.clear().unwrap();
        assert!(!cached.exists());
        assert!(foreign.exists());
    }

    #[test]
    fn dispose_removes_directory_once() {
        let (_root, cache) = cache();
        cache.save(b"a", "png", fixed_time()).unwrap();

        cache.dispose().unwrap();
        assert!(!cache.dir().exists());
        assert!(cache.dispose().is_ok());
        assert!(matches!(
            cache.save(b"a", "png", fixed_time()),
            Err(CacheError::Disposed)
        ));
    }

    #[test]
    fn dispose_without_directory_is_ok() {
        let (_root, cache) = cache();
        assert!(cache.dispose().is_ok());
    }
}
