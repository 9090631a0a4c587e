//! Command-line argument handling for ils.
//!
//! The grammar is `ils [flags...] [location]`. Flags are single-dash tokens whose characters
//! each toggle one switch, so `-la` and `-l -a` are the same. Unknown characters are ignored.
//! Any other token is the location; the last one wins and it defaults to `.`.

use crate::core::SortOrder;

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

/// Listing location used when no positional argument is given.
pub const DEFAULT_LOCATION: &str = ".";

/// The switches of one ils invocation. Parsed once and never changed afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// `-l`: permissions, links, owner, group and size per entry.
    pub long_format: bool,
    /// `-f`: keep directory read order.
    pub no_sort: bool,
    /// `-F`: append `/` to directory names.
    pub reveal_nature: bool,
    /// `-a`: include dotfiles.
    pub show_hidden: bool,
    /// `-R`: list subdirectories recursively.
    pub recurse: bool,
    /// `-t`: sort by modification time instead of name.
    pub sort_by_time: bool,
    /// `-h`: human readable sizes in long listings.
    pub human_size: bool,
}

impl Flags {
    /// Applies every character after the leading dash of `token`.
    ///
    /// # Returns
    /// How many characters were recognized. Repeated characters count each time.
    pub fn parse_token(&mut self, token: &str) -> usize {
        let chars = token.strip_prefix('-').unwrap_or(token);
        let mut matched = 0;
        for c in chars.chars() {
            match c {
                'l' => self.long_format = true,
                'f' => self.no_sort = true,
                'F' => self.reveal_nature = true,
                'a' => self.show_hidden = true,
                'R' => self.recurse = true,
                't' => self.sort_by_time = true,
                'h' => self.human_size = true,
                _ => continue,
            }
            matched += 1;
        }
        matched
    }

    pub fn sort_order(&self) -> SortOrder {
        if self.no_sort {
            SortOrder::Unsorted
        } else if self.sort_by_time {
            SortOrder::Modified
        } else {
            SortOrder::Name
        }
    }
}

/// A target location plus the flags to list it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    pub location: PathBuf,
    pub flags: Flags,
}

impl ListingRequest {
    /// Classifies each argument as a flag token or a location.
    ///
    /// Locations keep their raw bytes, so names that are not valid UTF-8 can be listed.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut flags = Flags::default();
        let mut location = None;
        for arg in args {
            let arg = arg.as_ref();
            if arg.as_encoded_bytes().starts_with(b"-") {
                flags.parse_token(&arg.to_string_lossy());
            } else {
                location = Some(PathBuf::from(arg));
            }
        }
        ListingRequest {
            location: location.unwrap_or_else(|| PathBuf::from(DEFAULT_LOCATION)),
            flags,
        }
    }
}

/// Arguments of the current process, without the program name.
pub fn handle_args() -> Vec<OsString> {
    std::env::args_os().skip(1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_flags_in_one_token() {
        let mut flags = Flags::default();
        assert_eq!(flags.parse_token("-lfFaRth"), 7);
        assert_eq!(
            flags,
            Flags {
                long_format: true,
                no_sort: true,
                reveal_nature: true,
                show_hidden: true,
                recurse: true,
                sort_by_time: true,
                human_size: true,
            }
        );
    }

    #[test]
    fn bare_dash_matches_nothing() {
        let mut flags = Flags::default();
        assert_eq!(flags.parse_token("-"), 0);
        assert_eq!(flags, Flags::default());
    }

    #[test]
    fn order_and_duplicates_do_not_matter() {
        let mut grouped = Flags::default();
        let mut reversed = Flags::default();
        assert_eq!(grouped.parse_token("-la"), 2);
        assert_eq!(reversed.parse_token("-all"), 3);
        assert_eq!(grouped, reversed);
    }

    #[test]
    fn unknown_characters_are_ignored() {
        let mut flags = Flags::default();
        assert_eq!(flags.parse_token("-xlz9"), 1);
        assert!(flags.long_format);
        assert!(!flags.show_hidden);
    }

    #[test]
    fn grouped_and_split_tokens_agree() {
        let grouped = ListingRequest::from_args(["-la"]);
        let split = ListingRequest::from_args(["-l", "-a"]);
        assert_eq!(grouped, split);
    }

    #[test]
    fn location_defaults_and_last_wins() {
        let req = ListingRequest::from_args(Vec::<String>::new());
        assert_eq!(req.location, PathBuf::from(DEFAULT_LOCATION));

        let req = ListingRequest::from_args(["location", "-l"]);
        assert_eq!(req.location, PathBuf::from("location"));
        assert!(req.flags.long_format);

        let req = ListingRequest::from_args(["first", "-R", "second"]);
        assert_eq!(req.location, PathBuf::from("second"));
        assert!(req.flags.recurse);
    }

    #[cfg(unix)]
    #[test]
    fn location_keeps_raw_bytes() {
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"caf\xe9");
        let req = ListingRequest::from_args([OsStr::new("-l"), raw]);
        assert_eq!(req.location.as_os_str().as_bytes(), b"caf\xe9");
        assert!(req.flags.long_format);
    }

    #[test]
    fn sort_order_precedence() {
        let mut flags = Flags::default();
        assert_eq!(flags.sort_order(), SortOrder::Name);
        flags.parse_token("-t");
        assert_eq!(flags.sort_order(), SortOrder::Modified);
        flags.parse_token("-f");
        assert_eq!(flags.sort_order(), SortOrder::Unsorted);
    }
}
