//! Icon catalogs for ils.
//!
//! An [IconCatalog] maps lookup keys (file names, extensions or folder names) to the
//! [IconEntry] that declared them. Payloads are read lazily from the theme's [IconSource],
//! base64 encoded, and kept in the catalog's own cache for the life of the theme.

use crate::error::{IlsError, Result};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Key every catalog must be able to resolve.
pub const DEFAULT_ICON: &str = "default";

/// One icon declaration of a theme: several aliases sharing one payload file.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IconEntry {
    pub names: Vec<String>,
    pub filename: String,
}

/// Where a theme's document and icon payloads are read from.
pub trait IconSource {
    /// Location reported in errors and logs.
    fn location(&self) -> &Path;
    fn read(&self, file: &str) -> io::Result<Vec<u8>>;
}

/// Theme stored as a directory on disk.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl IconSource for DirSource {
    fn location(&self) -> &Path {
        &self.root
    }

    fn read(&self, file: &str) -> io::Result<Vec<u8>> {
        fs::read(self.root.join(file))
    }
}

/// Whether a catalog folds its keys to lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCase {
    /// Keys are stored lowercased; callers look up with lowercased names.
    Insensitive,
    Exact,
}

/// Encoded payloads by requested key. Insert-only.
type IconCache = RefCell<HashMap<String, Rc<str>>>;

/// Lookup table for one kind of icon with its own payload cache.
pub struct IconCatalog {
    icons: HashMap<String, IconEntry>,
    cache: IconCache,
    source: Rc<dyn IconSource>,
}

impl IconCatalog {
    /// Expands every alias of every entry into the lookup table.
    /// When two entries declare the same key, the later one wins.
    pub fn new(entries: Vec<IconEntry>, case: KeyCase, source: Rc<dyn IconSource>) -> Self {
        let mut icons = HashMap::with_capacity(entries.len());
        for entry in entries {
            for name in &entry.names {
                let key = match case {
                    KeyCase::Insensitive => name.to_lowercase(),
                    KeyCase::Exact => name.clone(),
                };
                icons.insert(key, entry.clone());
            }
        }
        Self {
            icons,
            cache: RefCell::new(HashMap::new()),
            source,
        }
    }

    /// Number of lookup keys, counting every alias.
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&IconEntry> {
        self.icons.get(key)
    }

    /// Returns the base64 payload for `key`, from the cache when possible.
    ///
    /// Failed reads are not cached, so a later call with the same key tries again.
    pub fn load(&self, key: &str) -> Result<Rc<str>> {
        if let Some(payload) = self.cache.borrow().get(key) {
            tracing::trace!(key, "icon cache hit");
            return Ok(Rc::clone(payload));
        }

        let entry = self.icons.get(key).ok_or_else(|| IlsError::IconNotFound {
            key: key.to_string(),
        })?;

        let bytes = self
            .source
            .read(&entry.filename)
            .map_err(|source| IlsError::IconLoad {
                file: entry.filename.clone(),
                source,
            })?;
        tracing::debug!(key, file = %entry.filename, "icon loaded");

        let payload: Rc<str> = STANDARD.encode(bytes).into();
        self.cache
            .borrow_mut()
            .insert(key.to_string(), Rc::clone(&payload));
        Ok(payload)
    }
}
