//! Writing results to disk verbatim.

use std::path::{Path, PathBuf};

/// Write glyph text to `dest`, creating parent directories.
pub fn write_text(dest: &Path, text: &str) -> Result<PathBuf, std::io::Error> {
    write_bytes(dest, text.as_bytes())
}

/// Write the original encoded image bytes to `dest`, creating parent
/// directories.
pub fn write_image(dest: &Path, bytes: &[u8]) -> Result<PathBuf, std::io::Error> {
    write_bytes(dest, bytes)
}

fn write_bytes(dest: &Path, bytes: &[u8]) -> Result<PathBuf, std::io::Error> {
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(dest, bytes)?;
    log::info!("Wrote {} bytes to {}", bytes.len(), dest.display());
    Ok(dest.to_path_buf())
}
