//! Language file discovery in the workspace root.

use std::path::Path;

use globset::{
    Glob,
    GlobMatcher,
};
use ignore::WalkBuilder;

use super::StoreError;
use crate::types::LanguageId;

/// Compile the glob that selects language files.
///
/// # Errors
/// Returns `StoreError::Scan` if the pattern is not a valid glob.
pub fn compile_file_pattern(file_pattern: &str) -> Result<GlobMatcher, StoreError> {
    Glob::new(file_pattern).map(|glob| glob.compile_matcher()).map_err(|e| {
        StoreError::Scan(format!("Invalid translation file pattern '{file_pattern}': {e}"))
    })
}

/// Find language files directly inside `root`.
///
/// Only regular files whose name matches `matcher` are returned. Hidden files
/// are skipped and sub-directories are not descended into. The result is
/// sorted by file name.
///
/// # Errors
/// Returns `StoreError::Scan` if `root` cannot be read.
pub fn find_language_files(
    root: &Path,
    matcher: &GlobMatcher,
) -> Result<Vec<LanguageId>, StoreError> {
    if !root.is_dir() {
        return Err(StoreError::Scan(format!("{} is not a directory", root.display())));
    }

    let mut found = Vec::new();

    for result in WalkBuilder::new(root)
        .max_depth(Some(1))
        .hidden(true)
        .ignore(false)
        .parents(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if entry.depth() == 0 || !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let Some(file_name) = entry.file_name().to_str() else {
            tracing::warn!(path = %entry.path().display(), "Skipping non UTF-8 file name");
            continue;
        };

        if matcher.is_match(file_name) {
            found.push(LanguageId::from(file_name));
        }
    }

    found.sort();
    tracing::debug!(root = %root.display(), count = found.len(), "Discovered language files");

    Ok(found)
}
