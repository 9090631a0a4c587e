//! Core listing logic for ils.
//!
//! This module contains the non-UI pieces of the command:
//! - [fm]: directory reading and the [FileInfo] capability set (see [browse_dir], [FileEntry]).
//! - [formatter]: sort/filter policy and the permission, size and icon escape formatting.
//! - [listing]: the [Listing] engine that renders and recurses.
//! - [terminal]: terminal width probing for line wrapping.
//! - [users]: owner and group names for long listings.

pub mod fm;
pub mod formatter;
pub mod listing;
pub mod terminal;
pub mod users;

pub use fm::{FileEntry, FileInfo, RawStat, browse_dir};
pub use formatter::{
    Formatter, SortOrder, display_name, format_human_size, format_permissions, format_size,
    inline_image,
};
pub use listing::Listing;
