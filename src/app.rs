use crate::bundle::{diff_section, Bundler};
use crate::clipboard::{publish_file, ClipboardPublisher};
use crate::config::BundleConfig;
use crate::errors::BundleError;
use crate::filter::{Candidate, PathFilter};
use crate::reporting::{count_tokens, print_stats};
use crate::ui::{build_choices, Selector};
use crate::utils::{relative_path, resolve_explicit_files};
use crate::vcs::{detect_changes, VersionControl};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// How a run ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    NoCandidates,
    NoSelection,
    Done { output: PathBuf, files: Vec<String> },
}

/// Collects candidates, lets `selector` pick (unless an explicit file list is
/// configured), writes the bundle to the output file and publishes it.
pub async fn run<V, S, C>(
    config: &BundleConfig,
    vcs: &V,
    selector: &mut S,
    clipboard: &mut C,
) -> Result<RunOutcome, BundleError>
where
    V: VersionControl + ?Sized,
    S: Selector + ?Sized,
    C: ClipboardPublisher + ?Sized,
{
    let root = config.root.canonicalize().map_err(|e| {
        BundleError::IoError(format!("cannot open {}: {}", config.root.display(), e))
    })?;
    if !root.is_dir() {
        return Err(BundleError::IoError(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    let selected = match &config.files {
        Some(entries) => {
            let files = resolve_explicit_files(&root, entries);
            if files.is_empty() {
                return Err(BundleError::NoValidFiles);
            }
            files
        }
        None => {
            let candidates = collect_candidates(config, &root)?;
            if candidates.is_empty() {
                debug!("No candidate files found under {}", root.display());
                return Ok(RunOutcome::NoCandidates);
            }

            let prechecked = if config.preselect {
                detect_changes(vcs, &config.reference, &candidates).await
            } else {
                HashSet::new()
            };

            let chosen = selector.select(build_choices(&candidates, &prechecked))?;
            let chosen: Vec<String> = chosen
                .into_iter()
                .filter(|path| candidates.contains(path))
                .collect();
            if chosen.is_empty() {
                debug!("Selection came back empty");
                return Ok(RunOutcome::NoSelection);
            }
            chosen
        }
    };

    let diff = if config.include_diff {
        Some(diff_section(vcs, &config.reference).await)
    } else {
        None
    };

    let bundle = Bundler::new(&root)
        .build(&selected, diff, config.message.clone())
        .await;
    bundle.write_to(&config.output).await?;

    if !config.no_stats {
        match count_tokens(&config.model, &bundle.records) {
            Ok(counts) => print_stats(&counts),
            Err(e) => warn!("Skipping token statistics: {}", e),
        }
    }

    publish_file(clipboard, &config.output).await?;
    debug!("Published {} to the clipboard", config.output.display());

    Ok(RunOutcome::Done {
        output: config.output.clone(),
        files: selected,
    })
}

fn collect_candidates(config: &BundleConfig, root: &Path) -> Result<Vec<Candidate>, BundleError> {
    let filter = PathFilter::new(
        root,
        config.excluded_dirs.iter().cloned(),
        config.extensions.clone(),
    );
    let mut candidates = filter.collect_candidates()?;

    // A previous bundle written inside the tree must not be bundled again.
    if let Some(output_rel) = output_relative_to(root, &config.output) {
        debug!("Leaving output file {} out of the candidates", output_rel);
        candidates.retain(|candidate| *candidate != output_rel);
    }
    Ok(candidates)
}

fn output_relative_to(root: &Path, output: &Path) -> Option<String> {
    let absolute = if output.is_absolute() {
        output.to_path_buf()
    } else {
        std::env::current_dir().ok()?.join(output)
    };
    let parent = absolute.parent()?.canonicalize().ok()?;
    let file_name = absolute.file_name()?;
    relative_path(root, &parent.join(file_name))
}
