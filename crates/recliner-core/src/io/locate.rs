use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{ReclinerError, Result};
use crate::photo::base_name;

use super::image_io::is_jpeg;

/// Collect the JPEG photos under `source`.
///
/// Only files directly inside `source` are considered unless `recursive` is
/// set. A file qualifies when its content sniffs as JPEG; the extension is
/// ignored. Unreadable entries are skipped, so the result is simply empty
/// when nothing qualifies. Paths are returned sorted by file name per
/// directory so reports come out in a stable order.
pub fn locate_photos(source: &Path, recursive: bool) -> Vec<PathBuf> {
    let max_depth = if recursive { usize::MAX } else { 1 };

    WalkDir::new(source)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.into_path()),
            Err(err) => {
                debug!(error = %err, "Skipping unreadable entry");
                None
            }
        })
        .filter(|path| path.is_file() && is_jpeg(path))
        .collect()
}

/// Reject photo lists in which two photos would be written to the same
/// output file name.
pub fn check_output_names(photos: &[PathBuf]) -> Result<()> {
    let mut seen: HashMap<String, &PathBuf> = HashMap::with_capacity(photos.len());
    for photo in photos {
        let name = base_name(photo);
        if let Some(first) = seen.get(&name) {
            return Err(ReclinerError::DuplicateOutputName {
                name,
                first: (*first).clone(),
                second: photo.clone(),
            });
        }
        seen.insert(name, photo);
    }
    Ok(())
}
