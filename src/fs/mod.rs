// src/fs/mod.rs

//! Filesystem abstraction for the persisted-state stores.
//!
//! The stores only need a handful of operations, so the trait is kept small.
//! `write` has atomic-replace semantics: after a crash the target file holds
//! either the previous contents or the new contents, never a partial write.

use std::fmt::Debug;
use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

pub mod mock;

pub use mock::MockFileSystem;

/// Abstract filesystem interface.
pub trait FileSystem: Send + Sync + Debug {
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Atomically replace the file at `path` with `contents`.
    ///
    /// Parent directories are created as needed.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;

    fn exists(&self, path: &Path) -> bool;

    fn remove_file(&self, path: &Path) -> Result<()>;
}

/// Implementation that uses `std::fs`.
///
/// Atomicity is achieved by writing to a sibling temp file and renaming it
/// over the target; rename within a directory is atomic on the platforms we
/// care about.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("reading file {:?}", path))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating dir {:?}", parent))?;
            }
        }

        let tmp = sibling_tmp_path(path);
        {
            let mut file = fs::File::create(&tmp)
                .with_context(|| format!("creating temp file {:?}", tmp))?;
            file.write_all(contents)
                .with_context(|| format!("writing to temp file {:?}", tmp))?;
            file.sync_all()
                .with_context(|| format!("syncing temp file {:?}", tmp))?;
        }
        fs::rename(&tmp, path)
            .with_context(|| format!("renaming {:?} over {:?}", tmp, path))?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).with_context(|| format!("removing file {:?}", path))
    }
}

fn sibling_tmp_path(path: &Path) -> std::path::PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn tmp_path_is_a_sibling() {
        let tmp = sibling_tmp_path(Path::new("runs/site.state.json"));
        assert_eq!(tmp, PathBuf::from("runs/site.state.json.tmp"));
    }

    #[test]
    fn real_fs_write_then_read_roundtrip() {
        let dir = std::env::temp_dir().join(format!("flowdag-fs-{}", std::process::id()));
        let path = dir.join("nested/state.json");
        let fs = RealFileSystem;

        fs.write(&path, b"{\"ok\":true}").unwrap();
        assert!(fs.exists(&path));
        assert_eq!(fs.read_to_string(&path).unwrap(), "{\"ok\":true}");
        assert!(!fs.exists(&sibling_tmp_path(&path)));

        fs.remove_file(&path).unwrap();
        assert!(!fs.exists(&path));
        let _ = std::fs::remove_dir_all(dir);
    }
}
