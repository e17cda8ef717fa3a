//! Console progress reporting.
//!
//! The generator narrates its run: one green line per discovered block,
//! indented detail lines for every override that fired, and cyan status
//! lines for run-level events.

use console::style;

/// Announce a discovered leaf block.
pub fn block(id: &str) {
    println!("{}", style(id).green());
}

/// Print an indented detail line below the current block.
pub fn detail(msg: impl AsRef<str>) {
    println!(" -> {}", msg.as_ref());
}

/// Print a run-level status line.
pub fn status(msg: impl AsRef<str>) {
    println!("{}", style(msg.as_ref()).cyan());
}
