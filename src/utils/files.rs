use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Largest library file the loader accepts (50 MiB)
pub const MAX_LIBRARY_SIZE_BYTES: u64 = 50 * 1024 * 1024;

/// Checks an already opened file against [`MAX_LIBRARY_SIZE_BYTES`].
///
/// Works on the open handle so the size checked is the size of the file that is read.
pub fn validate_file_size(file: &File, path: &Path) -> Result<()> {
    let size = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?
        .len();

    if size > MAX_LIBRARY_SIZE_BYTES {
        bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            size,
            MAX_LIBRARY_SIZE_BYTES
        );
    }

    Ok(())
}
