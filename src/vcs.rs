use crate::errors::BundleError;
use crate::filter::Candidate;
use crate::utils::normalize_path;
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, info, trace};

/// The two questions the bundler asks of version control.
#[async_trait]
pub trait VersionControl {
    /// Unified diff between `reference` and the working tree.
    async fn diff(&self, reference: &str) -> Result<String, BundleError>;

    /// Paths changed between `reference` and the working tree, relative to the scanned root.
    async fn changed_files(&self, reference: &str) -> Result<Vec<String>, BundleError>;
}

/// Talks to the `git` binary found on `PATH`.
pub struct GitCli {
    root: PathBuf,
}

impl GitCli {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        GitCli { root: root.into() }
    }

    async fn run_git(&self, args: &[&str]) -> Result<String, BundleError> {
        trace!("Running git {:?} in {}", args, self.root.display());
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .await
            .map_err(|e| BundleError::VcsError(format!("failed to run git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BundleError::VcsError(format!(
                "git {} exited with {}: {}",
                args.join(" "),
                output.status,
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl VersionControl for GitCli {
    async fn diff(&self, reference: &str) -> Result<String, BundleError> {
        self.run_git(&["diff", reference, "--"]).await
    }

    async fn changed_files(&self, reference: &str) -> Result<Vec<String>, BundleError> {
        // -z keeps non-ASCII names unquoted.
        let stdout = self
            .run_git(&["diff", "--name-only", "-z", "--relative", reference, "--"])
            .await?;
        Ok(stdout
            .split('\0')
            .filter(|path| !path.is_empty())
            .map(normalize_path)
            .collect())
    }
}

/// Candidates changed since `reference`. Any version-control failure yields an empty set.
pub async fn detect_changes<V: VersionControl + ?Sized>(
    vcs: &V,
    reference: &str,
    candidates: &[Candidate],
) -> HashSet<Candidate> {
    let changed: HashSet<String> = match vcs.changed_files(reference).await {
        Ok(files) => files.into_iter().collect(),
        Err(e) => {
            info!("No pre-selection available for '{}'", reference);
            debug!("Change detection failed: {}", e);
            return HashSet::new();
        }
    };

    let prechecked: HashSet<Candidate> = candidates
        .iter()
        .filter(|candidate| changed.contains(candidate.as_str()))
        .cloned()
        .collect();
    debug!(
        "{} of {} changed files are candidates",
        prechecked.len(),
        changed.len()
    );
    prechecked
}
