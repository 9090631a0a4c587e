//! The listing engine of ils.
//!
//! [Listing] reads a directory, orders and filters its entries with the [Formatter],
//! renders them in the bare (icon + name, tab separated, wrapped to the terminal) or long
//! (`-l`) form, and walks into subdirectories with `-R`.
//!
//! All output goes to a caller supplied writer so the engine can be driven by tests.

use crate::core::formatter::{display_name, format_permissions, format_size, inline_image};
use crate::core::users::{group_name, user_name};
use crate::core::{FileInfo, Formatter, browse_dir, terminal};
use crate::error::Result;
use crate::ui::Theme;
use crate::utils::cli::ListingRequest;

use std::ffi::OsStr;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

/// Columns reserved for the inline icon when wrapping the bare listing.
const ICON_WIDTH: usize = 4;
/// Columns a tab is assumed to advance when wrapping the bare listing.
const TAB_SIZE: usize = 8;

/// One ils invocation: a theme, a location and the flags to list it with.
pub struct Listing<'t> {
    theme: &'t Theme,
    request: ListingRequest,
    formatter: Formatter,
    line_width: Option<usize>,
}

impl<'t> Listing<'t> {
    /// Parses `args` into a [ListingRequest] and probes the terminal width.
    ///
    /// Unknown flag characters are ignored, so this cannot fail once the theme exists.
    pub fn new<I, S>(theme: &'t Theme, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Self::from_request(theme, ListingRequest::from_args(args))
    }

    pub fn from_request(theme: &'t Theme, request: ListingRequest) -> Self {
        let formatter = Formatter::new(request.flags.sort_order(), request.flags.show_hidden);
        Listing {
            theme,
            request,
            formatter,
            line_width: terminal::line_width(),
        }
    }

    /// Overrides the probed terminal width. `None` disables wrapping.
    pub fn with_line_width(mut self, line_width: Option<usize>) -> Self {
        self.line_width = line_width;
        self
    }

    #[inline]
    pub fn request(&self) -> &ListingRequest {
        &self.request
    }

    /// Lists the requested location, recursing when `-R` is set.
    /// Stops at the first directory that cannot be read.
    pub fn execute<W: Write>(&self, out: &mut W) -> Result<()> {
        self.list_dir(&self.request.location, out)
    }

    fn list_dir<W: Write>(&self, dir: &Path, out: &mut W) -> Result<()> {
        let mut entries = browse_dir(dir)?;
        self.formatter.filter_entries(&mut entries);

        self.render(&entries, out)?;

        if self.request.flags.recurse {
            for entry in entries.iter().filter(|e| e.is_dir()) {
                let next = child_path(dir, entry.os_name());
                writeln!(out, "\n{}", next.display())?;
                tracing::debug!(path = %next.display(), "entering directory");
                self.list_dir(&next, out)?;
            }
        }
        Ok(())
    }

    /// Renders already filtered and ordered entries in the form selected by the flags.
    pub fn render<E: FileInfo, W: Write>(&self, entries: &[E], out: &mut W) -> Result<()> {
        if self.request.flags.long_format {
            self.render_long(entries, out)
        } else {
            self.render_bare(entries, out)
        }
    }

    fn render_bare<E: FileInfo, W: Write>(&self, entries: &[E], out: &mut W) -> Result<()> {
        let reveal = self.request.flags.reveal_nature;
        let mut printed = 0;

        for entry in entries {
            let name = display_name(entry, reveal);
            let icon = inline_image(&self.theme.icon(entry)?);

            if let Some(width) = self.line_width {
                printed += name.chars().count() + ICON_WIDTH;
                if printed > width {
                    writeln!(out)?;
                    printed = 0;
                } else {
                    printed += TAB_SIZE;
                }
            }

            write!(out, "{}{}\t", icon, name)?;
        }
        writeln!(out)?;
        Ok(())
    }

    fn render_long<E: FileInfo, W: Write>(&self, entries: &[E], out: &mut W) -> Result<()> {
        let flags = &self.request.flags;
        writeln!(out, "total {}", entries.len())?;

        for entry in entries {
            let stat = entry.raw_stat();
            let nlink = stat.map_or(0, |s| s.nlink);
            let owner = stat.map(|s| user_name(s.uid)).unwrap_or_default();
            let group = stat.map(|s| group_name(s.gid)).unwrap_or_default();
            let icon = inline_image(&self.theme.icon(entry)?);

            writeln!(
                out,
                "{}\t{:>4}\t{:>8}\t{:>8}\t{:>10}\t{}{}",
                format_permissions(entry.mode()),
                nlink,
                owner,
                group,
                format_size(entry.size(), flags.human_size),
                icon,
                display_name(entry, flags.reveal_nature),
            )?;
        }
        Ok(())
    }
}

/// Joins `name` onto `dir` without `.` components, so `.` and `sub` give `sub`.
fn child_path(dir: &Path, name: &OsStr) -> PathBuf {
    dir.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect::<PathBuf>()
        .join(name)
}
