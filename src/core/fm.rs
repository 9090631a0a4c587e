//! Directory reading for ils.
//!
//! Provides the [FileInfo] capability set that the listing engine and the icon resolver
//! work against, the [FileEntry] struct that implements it for real filesystem entries,
//! and [browse_dir] which reads one directory into a vector of entries.

use crate::error::{IlsError, Result};

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::fs::{self, Metadata};
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Ownership and link information taken from the raw OS stat record.
///
/// Not every platform provides it, so [FileInfo::raw_stat] returns an Option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawStat {
    pub nlink: u64,
    pub uid: u32,
    pub gid: u32,
}

/// What the listing engine and the icon resolver need to know about a directory entry.
///
/// Implemented by [FileEntry] for real entries and by test doubles.
pub trait FileInfo {
    fn name(&self) -> Cow<'_, str>;
    fn is_dir(&self) -> bool;
    fn size(&self) -> u64;
    /// Unix permission bits. Only the low nine bits are rendered.
    fn mode(&self) -> u32;
    fn modified(&self) -> Option<SystemTime>;
    fn raw_stat(&self) -> Option<RawStat>;

    /// Dotfiles are hidden unless `-a` is given.
    #[inline]
    fn is_hidden(&self) -> bool {
        self.name().starts_with('.')
    }
}

/// Represents a single entry in a directory listing.
/// Created and populated by the [browse_dir] function.
#[derive(Debug, Clone)]
pub struct FileEntry {
    name: Box<OsStr>,
    is_dir: bool,
    size: u64,
    mode: u32,
    modified: Option<SystemTime>,
    stat: Option<RawStat>,
}

impl FileEntry {
    pub fn new(
        name: impl Into<OsString>,
        is_dir: bool,
        size: u64,
        mode: u32,
        modified: Option<SystemTime>,
    ) -> Self {
        FileEntry {
            name: name.into().into_boxed_os_str(),
            is_dir,
            size,
            mode,
            modified,
            stat: None,
        }
    }

    pub fn with_stat(mut self, stat: RawStat) -> Self {
        self.stat = Some(stat);
        self
    }

    /// Builds an entry from metadata obtained without following symlinks.
    pub(crate) fn from_metadata(name: OsString, md: &Metadata) -> Self {
        let entry = FileEntry::new(name, md.is_dir(), md.len(), mode_bits(md), md.modified().ok());
        match raw_stat(md) {
            Some(stat) => entry.with_stat(stat),
            None => entry,
        }
    }

    #[inline]
    pub fn os_name(&self) -> &OsStr {
        &self.name
    }
}

impl FileInfo for FileEntry {
    #[inline]
    fn name(&self) -> Cow<'_, str> {
        self.name.to_string_lossy()
    }

    #[inline]
    fn is_dir(&self) -> bool {
        self.is_dir
    }

    #[inline]
    fn size(&self) -> u64 {
        self.size
    }

    #[inline]
    fn mode(&self) -> u32 {
        self.mode
    }

    #[inline]
    fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    #[inline]
    fn raw_stat(&self) -> Option<RawStat> {
        self.stat
    }
}

#[cfg(unix)]
fn mode_bits(md: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    md.permissions().mode()
}

#[cfg(not(unix))]
fn mode_bits(md: &Metadata) -> u32 {
    if md.permissions().readonly() {
        0o444
    } else {
        0o666
    }
}

#[cfg(unix)]
fn raw_stat(md: &Metadata) -> Option<RawStat> {
    use std::os::unix::fs::MetadataExt;
    Some(RawStat {
        nlink: md.nlink(),
        uid: md.uid(),
        gid: md.gid(),
    })
}

#[cfg(not(unix))]
fn raw_stat(_md: &Metadata) -> Option<RawStat> {
    None
}

fn access_error(path: &Path, source: io::Error) -> IlsError {
    IlsError::DirectoryAccess {
        path: path.to_path_buf(),
        source,
    }
}

/// Reads the contents of the provided directory in the order the OS returns them.
///
/// Symlinks are not followed, so a link to a directory is reported as a plain entry.
/// Entries whose metadata cannot be read are skipped; failing to open or read the
/// directory itself is a [IlsError::DirectoryAccess].
pub fn browse_dir(path: &Path) -> Result<Vec<FileEntry>> {
    let mut entries = Vec::with_capacity(64);

    for entry in fs::read_dir(path).map_err(|e| access_error(path, e))? {
        let entry = entry.map_err(|e| access_error(path, e))?;
        let name = entry.file_name();
        let md = match entry.metadata() {
            Ok(md) => md,
            Err(e) => {
                tracing::debug!(name = ?name, error = %e, "skipping unreadable entry");
                continue;
            }
        };
        entries.push(FileEntry::from_metadata(name, &md));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn file_entry_accessors() {
        let fe_file = FileEntry::new("file.txt", false, 12, 0o644, None);
        assert!(!fe_file.is_dir());
        assert!(!fe_file.is_hidden());
        assert_eq!(fe_file.name(), "file.txt");
        assert_eq!(fe_file.raw_stat(), None);

        let stat = RawStat {
            nlink: 2,
            uid: 0,
            gid: 0,
        };
        let fe_dir = FileEntry::new(".hidden_folder", true, 0, 0o755, None).with_stat(stat);
        assert!(fe_dir.is_dir());
        assert!(fe_dir.is_hidden());
        assert_eq!(fe_dir.raw_stat(), Some(stat));
    }

    #[test]
    fn browse_reads_files_and_dirs() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let mut file = File::create(tmp.path().join("hello.txt"))?;
        write!(file, "abc123")?;
        fs::create_dir(tmp.path().join("nested"))?;

        let mut entries = browse_dir(tmp.path())?;
        entries.sort_by(|a, b| a.os_name().cmp(b.os_name()));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name(), "hello.txt");
        assert!(!entries[0].is_dir());
        assert_eq!(entries[0].size(), 6);
        assert!(entries[0].modified().is_some());
        assert_eq!(entries[1].name(), "nested");
        assert!(entries[1].is_dir());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn browse_does_not_follow_dir_symlinks() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        fs::create_dir(tmp.path().join("real"))?;
        std::os::unix::fs::symlink(tmp.path().join("real"), tmp.path().join("link"))?;

        let entries = browse_dir(tmp.path())?;
        let link = entries
            .iter()
            .find(|e| e.name() == "link")
            .ok_or("link entry missing")?;
        assert!(!link.is_dir());
        assert!(link.raw_stat().is_some());
        Ok(())
    }

    #[test]
    fn browse_nonexistent() {
        let path = PathBuf::from("/path/does/not/exist");
        let result = browse_dir(&path);
        assert!(matches!(result, Err(IlsError::DirectoryAccess { .. })));
    }
}
