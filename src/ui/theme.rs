//! Icon themes for ils.
//!
//! A theme directory holds a document (`theme.toml` or `theme.json`) with three lists of
//! icon declarations, plus the image files they reference. [Theme] turns the lists into
//! extension, folder and file catalogs and resolves a directory entry to its icon payload.
//!
//! # Examples
//! ```toml
//! [[extensions]]
//! names = ["default"]
//! filename = "file.png"
//!
//! [[extensions]]
//! names = ["rs"]
//! filename = "rust.png"
//!
//! [[folders]]
//! names = ["default"]
//! filename = "folder.png"
//!
//! [[files]]
//! names = ["default", "readme"]
//! filename = "file.png"
//! ```

use crate::core::FileInfo;
use crate::error::{IlsError, Result};
use crate::ui::icons::{DEFAULT_ICON, DirSource, IconCatalog, IconEntry, IconSource, KeyCase};

use serde::Deserialize;

use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Theme document names, in lookup order.
pub const THEME_TOML: &str = "theme.toml";
pub const THEME_JSON: &str = "theme.json";

/// The three icon lists as declared in the theme document.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct ThemeDocument {
    pub extensions: Vec<IconEntry>,
    pub folders: Vec<IconEntry>,
    pub files: Vec<IconEntry>,
}

impl ThemeDocument {
    /// Reads the theme document from `source`, preferring the toml form.
    pub fn read(source: &dyn IconSource) -> Result<Self> {
        let load_error = |reason: String| IlsError::ThemeLoad {
            path: source.location().to_path_buf(),
            reason,
        };

        match source.read(THEME_TOML) {
            Ok(bytes) => {
                let text = String::from_utf8(bytes)
                    .map_err(|e| load_error(format!("{}: {}", THEME_TOML, e)))?;
                return toml::from_str(&text)
                    .map_err(|e| load_error(format!("{}: {}", THEME_TOML, e)));
            }
            Err(e) if e.kind() != io::ErrorKind::NotFound => {
                return Err(load_error(format!("{}: {}", THEME_TOML, e)));
            }
            Err(_) => {}
        }

        let bytes = source
            .read(THEME_JSON)
            .map_err(|e| load_error(format!("{}: {}", THEME_JSON, e)))?;
        serde_json::from_slice(&bytes).map_err(|e| load_error(format!("{}: {}", THEME_JSON, e)))
    }
}

/// Extension, folder and file catalogs of one loaded theme.
///
/// Each catalog caches its own payloads, so several themes can coexist.
pub struct Theme {
    location: PathBuf,
    extensions: IconCatalog,
    folders: IconCatalog,
    files: IconCatalog,
}

impl Theme {
    /// Loads the theme stored in the directory at `location`.
    pub fn load(location: impl AsRef<Path>) -> Result<Self> {
        Self::from_source(Rc::new(DirSource::new(location.as_ref())))
    }

    /// Loads the theme document from `source` and checks that every catalog can
    /// resolve [DEFAULT_ICON].
    pub fn from_source(source: Rc<dyn IconSource>) -> Result<Self> {
        let doc = ThemeDocument::read(source.as_ref())?;
        Self::from_document(doc, source)
    }

    pub fn from_document(doc: ThemeDocument, source: Rc<dyn IconSource>) -> Result<Self> {
        let location = source.location().to_path_buf();
        let theme = Theme {
            extensions: IconCatalog::new(doc.extensions, KeyCase::Insensitive, Rc::clone(&source)),
            folders: IconCatalog::new(doc.folders, KeyCase::Exact, Rc::clone(&source)),
            files: IconCatalog::new(doc.files, KeyCase::Insensitive, source),
            location,
        };

        for (kind, catalog) in theme.catalogs() {
            catalog.load(DEFAULT_ICON).map_err(|e| IlsError::ThemeLoad {
                path: theme.location.clone(),
                reason: format!("{} catalog: {}", kind, e),
            })?;
        }

        tracing::info!(
            location = %theme.location.display(),
            extensions = theme.extensions.len(),
            folders = theme.folders.len(),
            files = theme.files.len(),
            "theme loaded"
        );
        Ok(theme)
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    fn catalogs(&self) -> [(&'static str, &IconCatalog); 3] {
        [
            ("extensions", &self.extensions),
            ("folders", &self.folders),
            ("files", &self.files),
        ]
    }

    /// Resolves the icon payload for a directory entry.
    ///
    /// Directories: exact folder name, then the folder default.
    /// Files: lowercased file name, then the lowercased text after the last `.`
    /// in the extension catalog, then the file default.
    ///
    /// A missing key falls through to the next tier; a payload that cannot be read is returned
    /// as an error.
    pub fn icon<E: FileInfo + ?Sized>(&self, entry: &E) -> Result<Rc<str>> {
        let name = entry.name();

        if entry.is_dir() {
            if let Some(icon) = found(self.folders.load(&name))? {
                return Ok(icon);
            }
            tracing::debug!(name = %name, "folder icon falls back to default");
            return self.folders.load(DEFAULT_ICON);
        }

        if let Some(icon) = found(self.files.load(&name.to_lowercase()))? {
            return Ok(icon);
        }

        if let Some((_, ext)) = name.rsplit_once('.')
            && let Some(icon) = found(self.extensions.load(&ext.to_lowercase()))?
        {
            return Ok(icon);
        }

        tracing::debug!(name = %name, "file icon falls back to default");
        self.files.load(DEFAULT_ICON)
    }
}

/// Turns a lookup miss into None so the caller can try the next tier.
fn found(res: Result<Rc<str>>) -> Result<Option<Rc<str>>> {
    match res {
        Ok(icon) => Ok(Some(icon)),
        Err(IlsError::IconNotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}
