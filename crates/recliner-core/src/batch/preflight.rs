use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ReclinerError, Result};
use crate::io::{check_output_names, locate_photos};

/// Fail unless `dest` is absent and its parent directory exists.
pub fn check_destination(dest: &Path) -> Result<()> {
    if dest.try_exists()? {
        return Err(ReclinerError::DestinationExists(dest.to_path_buf()));
    }
    let parent = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    if !parent.is_dir() {
        return Err(ReclinerError::DestinationParentMissing(dest.to_path_buf()));
    }
    Ok(())
}

/// Create the destination directory. Parents are never created.
pub fn create_destination(dest: &Path) -> Result<()> {
    fs::create_dir(dest).map_err(|err| match err.kind() {
        ErrorKind::AlreadyExists => ReclinerError::DestinationExists(dest.to_path_buf()),
        ErrorKind::NotFound => ReclinerError::DestinationParentMissing(dest.to_path_buf()),
        _ => ReclinerError::Io(err),
    })
}

/// Everything that must hold before any photo is processed: a fresh
/// destination, at least one JPEG, and unique output names.
///
/// The destination is created only when all checks pass, so a failed
/// pre-flight leaves the filesystem untouched. Returns the photos to process.
pub fn prepare_batch(source: &Path, dest: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    check_destination(dest)?;

    let photos = locate_photos(source, recursive);
    if photos.is_empty() {
        return Err(ReclinerError::NoInput(source.to_path_buf()));
    }
    check_output_names(&photos)?;

    create_destination(dest)?;
    info!(
        photos = photos.len(),
        source = %source.display(),
        dest = %dest.display(),
        "Batch prepared"
    );
    Ok(photos)
}
