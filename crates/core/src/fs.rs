//! Filesystem utilities

use std::fs;
use std::path::Path;

use log::info;

/// Create the parent directory of `path` (and its ancestors) if it is missing
///
/// Used before opening the SQLite file so a fresh `db_path` such as
/// `./data/temps.db` works without manual setup.
pub fn ensure_parent_dir(path: &str) -> std::io::Result<()> {
    let Some(parent) = Path::new(path).parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent.exists() {
        return Ok(());
    }
    fs::create_dir_all(parent)?;
    info!("Created directory: {}", parent.display());
    Ok(())
}

/// Check if a path exists
pub fn path_exists(path: &str) -> bool {
    Path::new(path).exists()
}
