use crate::errors::BundleError;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;
use tracing::{debug, warn};

pub const GITIGNORE_FILE: &str = ".gitignore";

/// Patterns from the root `.gitignore`, matched against root-relative paths.
pub struct IgnorePatterns {
    matcher: Gitignore,
}

impl IgnorePatterns {
    /// Loads `<root>/.gitignore`. A missing file yields a matcher that ignores nothing.
    pub fn load(root: &Path) -> Result<Self, BundleError> {
        let mut builder = GitignoreBuilder::new(root);
        let gitignore_path = root.join(GITIGNORE_FILE);
        if gitignore_path.is_file() {
            debug!("Loading ignore patterns from {}", gitignore_path.display());
            // Unparseable lines are reported and skipped; the rest still apply.
            if let Some(e) = builder.add(&gitignore_path) {
                warn!("Some patterns in {} were skipped: {}", gitignore_path.display(), e);
            }
        }
        let matcher = builder.build()?;
        Ok(IgnorePatterns { matcher })
    }

    pub fn should_ignore<P: AsRef<Path>>(&self, relative_path: P, is_dir: bool) -> bool {
        self.matcher
            .matched_path_or_any_parents(relative_path.as_ref(), is_dir)
            .is_ignore()
    }
}
