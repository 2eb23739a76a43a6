//! Clipboard helper for copying console text to the system clipboard
//!
//! Uses `arboard` crate for cross-platform support (Windows, macOS, Linux).
//! The clipboard is created fresh each time to avoid holding resources.

use anyhow::{bail, Context, Result};
use arboard::Clipboard;

/// Copy text to the system clipboard
///
/// Empty text is refused rather than clearing the user's clipboard.
/// Common failure cases: no display server (headless Linux), permission denied.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    if text.is_empty() {
        bail!("Console is empty, nothing to copy");
    }
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}
