//! Sorting, filtering, and display formatting for directory entries in ils.
//!
//! The [Formatter] struct holds the ordering and visibility rules derived from the
//! command flags and prepares each directory's entry list before it is rendered.
//!
//! Also holds the small formatting helpers used by the renderers: permission strings,
//! sizes, display names and the inline image escape sequence.

use crate::core::FileInfo;

use std::borrow::Cow;

/// Escape sequence template of the iTerm2 inline image protocol, split around the payload.
const INLINE_IMAGE_PREFIX: &str = " \x1b]1337;File=inline=1;height=1:";
const INLINE_IMAGE_SUFFIX: &str = "\x07";

const SIZE_UNITS: [&str; 7] = ["B", "K", "M", "G", "T", "P", "E"];
const SIZE_BASE: u64 = 1000;

/// Order in which a directory's entries are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Keep the order the directory was read in (`-f`).
    Unsorted,
    Name,
    /// Oldest modification first (`-t`).
    Modified,
}

/// Formatter struct to handle sorting and filtering of directory entries.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    order: SortOrder,
    show_hidden: bool,
}

impl Formatter {
    pub fn new(order: SortOrder, show_hidden: bool) -> Self {
        Self { order, show_hidden }
    }

    /// Sorts the given entries in place. Both orders are stable.
    pub fn sort_entries<E: FileInfo>(&self, entries: &mut [E]) {
        match self.order {
            SortOrder::Unsorted => {}
            SortOrder::Name => entries.sort_by(|a, b| a.name().cmp(&b.name())),
            SortOrder::Modified => entries.sort_by_key(|e| e.modified()),
        }
    }

    /// Sorts the entries, then removes hidden ones unless they are shown.
    /// Removed entries are neither rendered nor recursed into.
    pub fn filter_entries<E: FileInfo>(&self, entries: &mut Vec<E>) {
        self.sort_entries(entries);
        if !self.show_hidden {
            entries.retain(|e| !e.is_hidden());
        }
    }
}

/// Formats the nine permission bits as `rwxrwxrwx`, with `-` for every clear bit.
///
/// # Examples
/// `format_permissions(0o644)` is `"rw-r--r--"`.
pub fn format_permissions(mode: u32) -> String {
    let mut chars = ['-'; 9];
    for (i, &shift) in [6, 3, 0].iter().enumerate() {
        let base = i * 3;
        if (mode >> (shift + 2)) & 1 != 0 {
            chars[base] = 'r';
        }
        if (mode >> (shift + 1)) & 1 != 0 {
            chars[base + 1] = 'w';
        }
        if (mode >> shift) & 1 != 0 {
            chars[base + 2] = 'x';
        }
    }
    chars.iter().collect()
}

/// Formats a byte count with base-1000 units.
///
/// Values under 10 print as `"9 B"`. Larger values are scaled to their magnitude, rounded to
/// one decimal, and keep that decimal only while the scaled value stays under 10
/// (`"2.0K"`, `"9.9M"`, `"83M"`).
pub fn format_human_size(bytes: u64) -> String {
    if bytes < 10 {
        return format!("{} B", bytes);
    }

    let mut exp = 0;
    let mut divisor = 1u64;
    while exp < SIZE_UNITS.len() - 1 && bytes / divisor >= SIZE_BASE {
        divisor *= SIZE_BASE;
        exp += 1;
    }

    let val = (bytes as f64 / divisor as f64 * 10.0 + 0.5).floor() / 10.0;
    if val < 10.0 {
        format!("{:.1}{}", val, SIZE_UNITS[exp])
    } else {
        format!("{:.0}{}", val, SIZE_UNITS[exp])
    }
}

/// Size column for long listings: human readable with `-h`, plain bytes otherwise.
pub fn format_size(bytes: u64, human: bool) -> String {
    if human {
        format_human_size(bytes)
    } else {
        bytes.to_string()
    }
}

/// Entry name as printed. With `-F`, directories get a trailing `/`.
pub fn display_name<E: FileInfo + ?Sized>(entry: &E, reveal: bool) -> Cow<'_, str> {
    let name = entry.name();
    if reveal && entry.is_dir() {
        Cow::Owned(name.into_owned() + "/")
    } else {
        name
    }
}

/// Wraps a base64 payload in the inline image escape sequence.
pub fn inline_image(payload: &str) -> String {
    let mut out =
        String::with_capacity(INLINE_IMAGE_PREFIX.len() + payload.len() + INLINE_IMAGE_SUFFIX.len());
    out.push_str(INLINE_IMAGE_PREFIX);
    out.push_str(payload);
    out.push_str(INLINE_IMAGE_SUFFIX);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FileEntry;

    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    fn file(name: &str, secs: u64) -> FileEntry {
        let mtime: SystemTime = UNIX_EPOCH + Duration::from_secs(secs);
        FileEntry::new(name, false, 0, 0o644, Some(mtime))
    }

    fn names(entries: &[FileEntry]) -> Vec<String> {
        entries.iter().map(|e| e.name().into_owned()).collect()
    }

    #[test]
    fn human_size_literals() {
        let cases = [
            (0, "0 B"),
            (1, "1 B"),
            (9, "9 B"),
            (10, "10B"),
            (999, "999B"),
            (2048, "2.0K"),
            (9_900_000, "9.9M"),
            (82_854_982, "83M"),
            (10_000_000_000, "10G"),
            (u64::MAX, "18E"),
        ];
        for (bytes, expected) in cases {
            assert_eq!(format_human_size(bytes), expected, "bytes = {}", bytes);
        }
    }

    #[test]
    fn size_column_switches_on_human_flag() {
        assert_eq!(format_size(2048, false), "2048");
        assert_eq!(format_size(2048, true), "2.0K");
    }

    #[test]
    fn permission_literals() {
        assert_eq!(format_permissions(0o644), "rw-r--r--");
        assert_eq!(format_permissions(0o600), "rw-------");
        assert_eq!(format_permissions(0o706), "rwx---rw-");
        assert_eq!(format_permissions(0o40755), "rwxr-xr-x");
    }

    #[test]
    fn name_sort_is_ascending() {
        let mut entries = vec![file("b.txt", 1), file("B.txt", 2), file("a.txt", 3)];
        Formatter::new(SortOrder::Name, true).filter_entries(&mut entries);
        assert_eq!(names(&entries), ["B.txt", "a.txt", "b.txt"]);
    }

    #[test]
    fn time_sort_is_ascending_and_stable() {
        let mut entries = vec![
            file("new", 300),
            file("tie_first", 100),
            file("old", 50),
            file("tie_second", 100),
        ];
        Formatter::new(SortOrder::Modified, true).filter_entries(&mut entries);
        assert_eq!(names(&entries), ["old", "tie_first", "tie_second", "new"]);
    }

    #[test]
    fn unsorted_keeps_read_order() {
        let mut entries = vec![file("c", 3), file("a", 1), file("b", 2)];
        Formatter::new(SortOrder::Unsorted, true).filter_entries(&mut entries);
        assert_eq!(names(&entries), ["c", "a", "b"]);
    }

    #[test]
    fn hidden_entries_are_removed() {
        let mut entries = vec![file("b.txt", 0), file(".hidden", 0), file("a.txt", 0)];
        Formatter::new(SortOrder::Name, false).filter_entries(&mut entries);
        assert_eq!(names(&entries), ["a.txt", "b.txt"]);

        let mut entries = vec![file("b.txt", 0), file(".hidden", 0), file("a.txt", 0)];
        Formatter::new(SortOrder::Name, true).filter_entries(&mut entries);
        assert_eq!(names(&entries), [".hidden", "a.txt", "b.txt"]);
    }

    #[test]
    fn display_name_reveals_directories() {
        let dir = FileEntry::new("src", true, 0, 0o755, None);
        let plain = FileEntry::new("main.rs", false, 0, 0o644, None);
        assert_eq!(display_name(&dir, true), "src/");
        assert_eq!(display_name(&dir, false), "src");
        assert_eq!(display_name(&plain, true), "main.rs");
    }

    #[test]
    fn inline_image_is_byte_exact() {
        assert_eq!(
            inline_image("icon"),
            " \u{1b}]1337;File=inline=1;height=1:icon\u{7}"
        );
    }
}
