//! Image writer.
//!
//! This module handles writing the final flash image to disk. The bytes are
//! written to a temporary file next to the destination and renamed into place
//! once complete, so a failed write never leaves a truncated image behind.

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::layout::Image;

/// Write a flash image to `output_path`, replacing any existing file.
pub fn write_image(output_path: &Path, image: &Image) -> Result<()> {
    let dir = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|e| Error::storage(output_path, e))?;
    file.write_all(image.as_bytes())
        .and_then(|()| file.as_file().sync_all())
        .map_err(|e| Error::storage(output_path, e))?;

    // Temporary files are created owner-only; images are ordinary artifacts.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o644);
        file.as_file()
            .set_permissions(perms)
            .map_err(|e| Error::storage(output_path, e))?;
    }

    file.persist(output_path)
        .map_err(|e| Error::storage(output_path, e.error))?;

    tracing::debug!("Wrote {} bytes to {}", image.len(), output_path.display());
    Ok(())
}
