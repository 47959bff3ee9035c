//! Filesystem access used by the materializer
//!
//! `DiskSink` writes real files. `MemorySink` records directories and files
//! in memory, optionally treating whatever already exists on disk as taken;
//! dry runs and tests go through it.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{ExportError, ExportResult};

/// The filesystem operations an export needs
pub trait Sink {
    /// Whether anything (file, directory, dangling link) occupies `path`
    fn exists(&self, path: &Path) -> bool;

    /// Create a single new directory; fails if it already exists
    fn create_dir(&mut self, path: &Path) -> ExportResult<()>;

    /// Create a new file holding `contents`; never overwrites
    fn write_new(&mut self, path: &Path, contents: &str) -> ExportResult<()>;
}

/// Writes documents to the real filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskSink;

impl Sink for DiskSink {
    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn create_dir(&mut self, path: &Path) -> ExportResult<()> {
        fs::create_dir(path).map_err(|e| ExportError::filesystem("create directory", path, e))
    }

    fn write_new(&mut self, path: &Path, contents: &str) -> ExportResult<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| ExportError::filesystem("create", path, e))?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ExportError::filesystem("write", path, e))?;

        file.flush()
            .map_err(|e| ExportError::filesystem("flush", path, e))
    }
}

/// Records an export without touching disk
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, String>,
    over_disk: bool,
}

impl MemorySink {
    /// An empty in-memory filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// An in-memory layer on top of the real filesystem
    ///
    /// Existing paths on disk count as taken, so names allocated here match
    /// what a real export would pick.
    pub fn over_disk() -> Self {
        Self {
            over_disk: true,
            ..Self::default()
        }
    }

    pub fn dirs(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }

    pub fn files(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.files
            .iter()
            .map(|(path, contents)| (path.as_path(), contents.as_str()))
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    fn already_exists(path: &Path) -> ExportError {
        let err = std::io::Error::from(std::io::ErrorKind::AlreadyExists);
        ExportError::filesystem("create", path, err)
    }

    /// Over disk, a path's parent must exist in memory or on disk
    fn check_parent(&self, action: &str, path: &Path) -> ExportResult<()> {
        if !self.over_disk {
            return Ok(());
        }
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => return Ok(()),
        };
        if self.dirs.contains(parent) || parent.is_dir() {
            return Ok(());
        }
        let err = std::io::Error::from(std::io::ErrorKind::NotFound);
        Err(ExportError::filesystem(action, path, err))
    }
}

impl Sink for MemorySink {
    fn exists(&self, path: &Path) -> bool {
        self.dirs.contains(path)
            || self.files.contains_key(path)
            || (self.over_disk && fs::symlink_metadata(path).is_ok())
    }

    fn create_dir(&mut self, path: &Path) -> ExportResult<()> {
        if self.exists(path) {
            return Err(Self::already_exists(path));
        }
        self.check_parent("create directory", path)?;
        self.dirs.insert(path.to_path_buf());
        Ok(())
    }

    fn write_new(&mut self, path: &Path, contents: &str) -> ExportResult<()> {
        if self.exists(path) {
            return Err(Self::already_exists(path));
        }
        self.check_parent("create", path)?;
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}
