//! Terminal width probing for the bare listing.
//!
//! Asks `stty size` on the inherited stdin first, which keeps working when stdout is piped,
//! and falls back to crossterm. `None` disables line wrapping.

use std::process::{Command, Stdio};

/// Returns the terminal width in columns, or None when it cannot be determined.
pub fn line_width() -> Option<usize> {
    stty_width().or_else(|| match crossterm::terminal::size() {
        Ok((cols, _)) if cols > 0 => Some(cols as usize),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(error = %e, "terminal size unavailable, wrapping disabled");
            None
        }
    })
}

fn stty_width() -> Option<usize> {
    let output = Command::new("stty")
        .arg("size")
        .stdin(Stdio::inherit())
        .stderr(Stdio::null())
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    parse_stty_size(&String::from_utf8_lossy(&output.stdout))
}

/// Parses the `rows cols` line printed by `stty size` and returns the column count.
pub(crate) fn parse_stty_size(out: &str) -> Option<usize> {
    let mut fields = out.split_whitespace();
    let _rows: usize = fields.next()?.parse().ok()?;
    let cols: usize = fields.next()?.parse().ok()?;
    (cols > 0).then_some(cols)
}
