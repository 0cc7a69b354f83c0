use std::path::{Path, PathBuf};

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use walkdir::WalkDir;

use crate::SlimeError;

/// File name suffixes picked up when a directory is given.
pub const IMAGE_SUFFIXES: &[&str] = &[".png", ".jpg", ".jpeg", ".bmp"];

pub fn is_image_name(name: &str) -> bool {
    IMAGE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// Resolves the file to render.
///
/// A file is returned as-is, without looking at its extension. A directory
/// yields one of its immediate image files, chosen uniformly at random.
pub fn resolve_input<R: Rng + ?Sized>(path: &Path, rng: &mut R) -> Result<PathBuf, SlimeError> {
    if !path.exists() {
        return Err(SlimeError::PathNotFound(path.to_path_buf()));
    }

    if !path.is_dir() {
        return Ok(path.to_path_buf());
    }

    let mut candidates = Vec::new();
    for entry in WalkDir::new(path).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|err| SlimeError::Io {
            path: err.path().unwrap_or(path).to_path_buf(),
            source: err.into(),
        })?;
        if !entry.file_name().to_str().is_some_and(is_image_name) {
            continue;
        }
        // Follows symlinks; a dangling link is not a file.
        if entry.path().is_file() {
            candidates.push(entry.into_path());
        }
    }
    candidates.sort();

    let chosen = candidates
        .choose(rng)
        .cloned()
        .ok_or_else(|| SlimeError::EmptyDirectory(path.to_path_buf()))?;
    debug!("picked {} out of {} images in {}", chosen.display(), candidates.len(), path.display());

    Ok(chosen)
}
