use crate::config::{ExtensionFilter, ALWAYS_EXCLUDED_DIRS};
use crate::errors::BundleError;
use crate::gitignore::IgnorePatterns;
use crate::utils::relative_path;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

/// A relative, forward-slash file path eligible for selection.
pub type Candidate = String;

/// Walks a source tree and yields the files that may be bundled.
pub struct PathFilter {
    root: PathBuf,
    excluded_dirs: HashSet<String>,
    extensions: ExtensionFilter,
}

impl PathFilter {
    pub fn new<I, S>(
        root: impl Into<PathBuf>,
        excluded_dirs: I,
        extensions: ExtensionFilter,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut excluded_dirs: HashSet<String> =
            excluded_dirs.into_iter().map(Into::into).collect();
        excluded_dirs.extend(ALWAYS_EXCLUDED_DIRS.iter().map(|d| d.to_string()));
        PathFilter {
            root: root.into(),
            excluded_dirs,
            extensions,
        }
    }

    /// Collects candidates in walk order. Excluded and ignored directories are
    /// pruned, so nothing beneath them is ever visited.
    pub fn collect_candidates(&self) -> Result<Vec<Candidate>, BundleError> {
        let ignore = IgnorePatterns::load(&self.root)?;
        let mut candidates = Vec::new();

        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| self.keep_entry(entry, &ignore));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable path: {}", e);
                    continue;
                }
            };
            // Symlinked files count; symlinked directories are not followed.
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy();
            if !self.extensions.matches(&file_name) {
                trace!("Extension filter rejected {}", entry.path().display());
                continue;
            }
            if let Some(rel) = relative_path(&self.root, entry.path()) {
                trace!("Candidate: {}", rel);
                candidates.push(rel);
            }
        }

        debug!("Collected {} candidates under {}", candidates.len(), self.root.display());
        Ok(candidates)
    }

    fn keep_entry(&self, entry: &DirEntry, ignore: &IgnorePatterns) -> bool {
        if entry.depth() == 0 {
            return true;
        }
        let is_dir = entry.file_type().is_dir();
        if is_dir && self.excluded_dirs.contains(&*entry.file_name().to_string_lossy()) {
            debug!("Pruning excluded directory {}", entry.path().display());
            return false;
        }
        match relative_path(&self.root, entry.path()) {
            Some(rel) if ignore.should_ignore(&rel, is_dir) => {
                trace!("Ignored by .gitignore: {}", rel);
                false
            }
            _ => true,
        }
    }
}
