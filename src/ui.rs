//! Icon handling for ils.
//!
//! - [icons]: icon declarations, the theme backing store and the cached catalogs.
//! - [theme]: theme document loading and icon resolution for directory entries.

pub mod icons;
pub mod theme;

pub use icons::{DEFAULT_ICON, DirSource, IconCatalog, IconEntry, IconSource};
pub use theme::{Theme, ThemeDocument};
