//! Candidate file discovery
//!
//! Recursive folder walk that picks out files by extension.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// List every regular file under `root` whose extension matches one of
/// `extensions` (case-insensitive, given without the dot)
///
/// Entries are visited in file-name order within each directory, so two
/// scans of an unchanged tree return the same sequence. A missing or
/// unreadable `root` is an error; unreadable entries below it are skipped.
/// Returned paths are absolute.
pub fn enumerate_candidate_files(
    root: &Path,
    extensions: &[String],
    follow_links: bool,
) -> Result<Vec<PathBuf>> {
    // Absolute paths in the catalog; a bad root errors instead of scanning nothing
    let root = root.canonicalize()?;
    let root = root.as_path();

    let mut candidates = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(follow_links)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if has_candidate_extension(entry.path(), extensions) {
            candidates.push(entry.into_path());
        }
    }

    tracing::debug!(
        "Found {} candidate files under {}",
        candidates.len(),
        root.display()
    );

    Ok(candidates)
}

/// Case-insensitive extension check
pub fn has_candidate_extension(path: &Path, extensions: &[String]) -> bool {
    match path.extension() {
        Some(ext) => {
            let ext = ext.to_string_lossy();
            extensions.iter().any(|candidate| ext.eq_ignore_ascii_case(candidate))
        }
        None => false,
    }
}
