use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub fn normalize_path(path: &str) -> String {
    let path = Path::new(path);
    let normalized_path = path.strip_prefix("./").unwrap_or(path);

    normalized_path.to_string_lossy().replace('\\', "/")
}

/// Relative, forward-slash form of `path` under `root`, or `None` if it lies outside.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    path.strip_prefix(root)
        .ok()
        .map(|rel| normalize_path(&rel.to_string_lossy()))
        .filter(|rel| !rel.is_empty())
}

fn is_glob_pattern(entry: &str) -> bool {
    entry.contains(&['*', '?', '['][..])
}

/// Validates an explicit file list against `root`.
///
/// Relative entries are resolved against `root`. An entry that does not name an
/// existing path but contains glob metacharacters is expanded. Anything
/// missing, outside the root or not a regular file is skipped with a warning.
/// The result keeps input order without duplicates.
pub fn resolve_explicit_files(root: &Path, entries: &[String]) -> Vec<String> {
    let canonical_root = match root.canonicalize() {
        Ok(root) => root,
        Err(e) => {
            warn!("Cannot resolve repository root {}: {}", root.display(), e);
            return Vec::new();
        }
    };

    let mut resolved: Vec<String> = Vec::new();
    for entry in entries {
        let joined = if Path::new(entry).is_absolute() {
            PathBuf::from(entry)
        } else {
            canonical_root.join(entry)
        };

        let paths = if is_glob_pattern(entry) && !joined.exists() {
            expand_pattern(&joined)
        } else {
            vec![joined]
        };
        if paths.is_empty() {
            warn!("Pattern '{}' matched no files, skipping", entry);
        }

        for path in paths {
            if let Some(rel) = validate_explicit_file(&canonical_root, entry, &path) {
                if !resolved.contains(&rel) {
                    resolved.push(rel);
                }
            }
        }
    }
    debug!("Resolved explicit files: {:?}", resolved);
    resolved
}

fn expand_pattern(pattern: &Path) -> Vec<PathBuf> {
    let pattern = pattern.to_string_lossy();
    match glob::glob(&pattern) {
        Ok(paths) => paths
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("Error processing pattern {}: {:?}", pattern, e);
                    None
                }
            })
            .collect(),
        Err(e) => {
            warn!("Invalid pattern '{}': {}", pattern, e);
            Vec::new()
        }
    }
}

fn validate_explicit_file(canonical_root: &Path, entry: &str, path: &Path) -> Option<String> {
    let canonical = match path.canonicalize() {
        Ok(canonical) => canonical,
        Err(_) => {
            warn!("File '{}' does not exist, skipping", entry);
            return None;
        }
    };
    if !canonical.is_file() {
        warn!("'{}' is not a regular file, skipping", entry);
        return None;
    }
    match relative_path(canonical_root, &canonical) {
        Some(rel) => Some(rel),
        None => {
            warn!("File '{}' is outside the repository root, skipping", entry);
            None
        }
    }
}
