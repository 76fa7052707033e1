use crate::errors::BundleError;
use crate::vcs::VersionControl;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs as async_fs;
use tracing::{debug, info, trace, warn};

/// Fence tags keyed by lowercase file extension.
static LANGUAGE_TAGS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("py", "python"),
        ("md", "markdown"),
        ("txt", "plaintext"),
        ("rs", "rust"),
        ("js", "javascript"),
        ("jsx", "jsx"),
        ("ts", "typescript"),
        ("tsx", "tsx"),
        ("go", "go"),
        ("java", "java"),
        ("kt", "kotlin"),
        ("c", "c"),
        ("h", "c"),
        ("cpp", "cpp"),
        ("hpp", "cpp"),
        ("cs", "csharp"),
        ("rb", "ruby"),
        ("php", "php"),
        ("swift", "swift"),
        ("scala", "scala"),
        ("lua", "lua"),
        ("sh", "bash"),
        ("sql", "sql"),
        ("html", "html"),
        ("css", "css"),
        ("scss", "scss"),
        ("toml", "toml"),
        ("yaml", "yaml"),
        ("yml", "yaml"),
        ("json", "json"),
    ]
    .into_iter()
    .collect()
});

pub fn language_tag(path: &str) -> Option<&'static str> {
    let ext = Path::new(path).extension()?.to_str()?.to_ascii_lowercase();
    LANGUAGE_TAGS.get(ext.as_str()).copied()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleRecord {
    pub path: String,
    pub language: Option<&'static str>,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffBody {
    Diff(String),
    /// Explanation shown in place of a diff that could not be produced.
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSection {
    pub reference: String,
    pub body: DiffBody,
}

/// The assembled output: file records, then an optional diff, then an optional note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bundle {
    pub records: Vec<BundleRecord>,
    pub diff: Option<DiffSection>,
    pub message: Option<String>,
}

impl Bundle {
    pub fn render(&self) -> String {
        let mut out = String::new();

        for record in &self.records {
            out.push_str(&record.path);
            out.push('\n');
            out.push_str("```");
            out.push_str(record.language.unwrap_or(""));
            out.push('\n');
            out.push_str(&record.content);
            out.push_str("\n```\n\n");
        }

        if let Some(diff) = &self.diff {
            out.push_str(&format!(
                "This is the diff of the commit '{}':\n",
                diff.reference
            ));
            match &diff.body {
                DiffBody::Diff(text) => {
                    out.push_str("```diff\n");
                    out.push_str(text.trim_end_matches('\n'));
                    out.push_str("\n```\n\n");
                }
                DiffBody::Unavailable(reason) => {
                    out.push_str(reason);
                    out.push_str("\n\n");
                }
            }
        }

        if let Some(message) = &self.message {
            out.push_str(message);
            out.push('\n');
        }

        out
    }

    /// Writes the rendered bundle, replacing anything already at `path`.
    pub async fn write_to(&self, path: &Path) -> Result<(), BundleError> {
        let rendered = self.render();
        trace!("Writing {} bytes to {}", rendered.len(), path.display());
        async_fs::write(path, rendered).await.map_err(|e| {
            BundleError::IoError(format!("cannot write {}: {}", path.display(), e))
        })
    }
}

pub struct Bundler {
    root: PathBuf,
}

impl Bundler {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Bundler { root: root.into() }
    }

    /// Reads each selected file. An unreadable file keeps its record with an empty body.
    pub async fn read_records(&self, selected: &[String]) -> Vec<BundleRecord> {
        let mut records = Vec::with_capacity(selected.len());
        for path in selected {
            debug!("Processing file: {}", path);
            let content = match async_fs::read_to_string(self.root.join(path)).await {
                Ok(content) => content,
                Err(e) => {
                    warn!("Failed to read file {}: {}", path, e);
                    String::new()
                }
            };
            records.push(BundleRecord {
                path: path.clone(),
                language: language_tag(path),
                content,
            });
        }
        records
    }

    pub async fn build(
        &self,
        selected: &[String],
        diff: Option<DiffSection>,
        message: Option<String>,
    ) -> Bundle {
        Bundle {
            records: self.read_records(selected).await,
            diff,
            message,
        }
    }
}

/// Asks `vcs` for the diff against `reference`, turning failure into a placeholder.
pub async fn diff_section<V: VersionControl + ?Sized>(vcs: &V, reference: &str) -> DiffSection {
    let body = match vcs.diff(reference).await {
        Ok(text) => DiffBody::Diff(text),
        Err(e) => {
            info!("Diff against '{}' is unavailable", reference);
            debug!("Diff failed: {}", e);
            DiffBody::Unavailable(format!(
                "Could not compute the diff for '{}': {}",
                reference, e
            ))
        }
    };
    DiffSection {
        reference: reference.to_owned(),
        body,
    }
}
