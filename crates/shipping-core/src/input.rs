//! Input resolution: an explicit path, or the newest export in the downloads folder

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::config::BatchConfig;
use crate::error::ShippingError;

/// Resolve which order export to process
///
/// An explicit path must point at an existing file. Without one, the newest
/// file in the downloads directory matching the configured prefix and
/// extension is used.
pub fn resolve_input(
    explicit: Option<&Path>,
    batch: &BatchConfig,
) -> Result<PathBuf, ShippingError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(ShippingError::InputNotFound(path.to_path_buf()));
        }
        return Ok(path.to_path_buf());
    }

    let dir = downloads_dir(batch);
    match newest_matching(&dir, &batch.input_prefix, &batch.input_extension)? {
        Some(path) => {
            tracing::info!("Using newest order export {}", path.display());
            Ok(path)
        }
        None => Err(ShippingError::NoInput(dir)),
    }
}

/// Directory searched for exports when no path is given
pub fn downloads_dir(batch: &BatchConfig) -> PathBuf {
    if let Some(dir) = &batch.downloads_dir {
        return dir.clone();
    }

    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("downloads")))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Most recently modified file in `dir` named `<prefix>*.<extension>`
///
/// A missing directory is treated as empty.
pub fn newest_matching(
    dir: &Path,
    prefix: &str,
    extension: &str,
) -> Result<Option<PathBuf>, ShippingError> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Ok(None);
    };

    let mut newest: Option<(SystemTime, PathBuf)> = None;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !matches_pattern(&path, prefix, extension) {
            continue;
        }

        let modified = entry.metadata()?.modified()?;
        let is_newer = newest
            .as_ref()
            .map_or(true, |(current, _)| modified > *current);
        if is_newer {
            newest = Some((modified, path));
        }
    }

    Ok(newest.map(|(_, path)| path))
}

fn matches_pattern(path: &Path, prefix: &str, extension: &str) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let suffix = format!(".{}", extension);
    name.starts_with(prefix) && name.ends_with(&suffix)
}
