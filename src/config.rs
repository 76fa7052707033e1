use std::path::PathBuf;

/// Reference used for diffs and pre-selection when none is given.
pub const DEFAULT_REFERENCE: &str = "HEAD~1";

pub const DEFAULT_OUTPUT: &str = "code.txt";

pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Directories that are never walked, on top of the user's exclusions.
pub const ALWAYS_EXCLUDED_DIRS: &[&str] = &[".git"];

pub const DEFAULT_EXTENSIONS: &[&str] = &[
    // Source
    ".py", ".rs", ".js", ".jsx", ".ts", ".tsx", ".go", ".java", ".kt", ".c", ".h", ".cpp",
    ".hpp", ".cs", ".rb", ".php", ".swift", ".scala", ".lua", ".sh", ".sql",
    // Web
    ".html", ".css", ".scss",
    // Docs
    ".md", ".rst", ".txt",
    // Config
    ".toml", ".yaml", ".yml", ".json", ".ini", ".cfg",
];

/// Which file names are eligible to become candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionFilter {
    /// Every file passes (`--all`).
    All,
    /// File name must end with one of these suffixes, each starting with `.`.
    Suffixes(Vec<String>),
}

impl ExtensionFilter {
    pub fn from_args(extensions: Option<Vec<String>>, all: bool) -> Self {
        if all {
            return ExtensionFilter::All;
        }
        let suffixes = match extensions {
            Some(exts) if !exts.is_empty() => {
                exts.iter().map(|e| normalize_extension(e)).collect()
            }
            _ => DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        };
        ExtensionFilter::Suffixes(suffixes)
    }

    pub fn matches(&self, file_name: &str) -> bool {
        match self {
            ExtensionFilter::All => true,
            ExtensionFilter::Suffixes(suffixes) => {
                suffixes.iter().any(|suffix| file_name.ends_with(suffix.as_str()))
            }
        }
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        ExtensionFilter::from_args(None, false)
    }
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim();
    if ext.starts_with('.') {
        ext.to_owned()
    } else {
        format!(".{}", ext)
    }
}

#[derive(Debug, Clone)]
pub struct BundleConfig {
    pub root: PathBuf,
    pub output: PathBuf,
    pub excluded_dirs: Vec<String>,
    pub extensions: ExtensionFilter,
    pub message: Option<String>,
    pub reference: String,
    pub include_diff: bool,
    pub files: Option<Vec<String>>,
    pub preselect: bool,
    pub no_stats: bool,
    pub model: String,
}

impl BundleConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        BundleConfig {
            root: root.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            excluded_dirs: Vec::new(),
            extensions: ExtensionFilter::default(),
            message: None,
            reference: DEFAULT_REFERENCE.to_owned(),
            include_diff: false,
            files: None,
            preselect: true,
            no_stats: false,
            model: DEFAULT_MODEL.to_owned(),
        }
    }
}
