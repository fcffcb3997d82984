use anyhow::{Context, Result};
use std::io;
use std::path::Path;

use crate::console::Console;

/// Open `path` with the platform's default application
/// (`open` on macOS, the shell on Windows, `xdg-open` and friends elsewhere).
///
/// A missing file is reported on the error channel and is not an error.
pub fn open_file(path: &Path, console: &dyn Console) -> Result<()> {
    open_file_with(path, console, |p| open::that(p))
}

pub fn open_file_with<F>(path: &Path, console: &dyn Console, launch: F) -> Result<()>
where
    F: FnOnce(&Path) -> io::Result<()>,
{
    if !path.exists() {
        console.error(&format!("Error: {} does not exist.", path.display()));
        return Ok(());
    }

    log::debug!("Opening {}", path.display());

    if let Err(e) = launch(path) {
        console.error(&format!(
            "An error occurred when opening {}!\n\
             This can happen when the host application runs as an AppImage.\n\
             Please install it directly.",
            path.display()
        ));
        return Err(e).with_context(|| format!("Failed to open {}", path.display()));
    }

    Ok(())
}
