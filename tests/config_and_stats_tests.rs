use ctxpack::bundle::BundleRecord;
use ctxpack::config::{BundleConfig, ExtensionFilter, DEFAULT_REFERENCE};
use ctxpack::reporting::{count_tokens, render_stats};
use ctxpack::utils::{normalize_path, relative_path};
use ctxpack::BundleError;
use std::path::Path;

#[test]
fn test_extensions_are_normalized_to_dotted_suffixes() {
    let filter = ExtensionFilter::from_args(Some(vec!["py".to_string(), ".md".to_string()]), false);
    assert_eq!(
        filter,
        ExtensionFilter::Suffixes(vec![".py".to_string(), ".md".to_string()])
    );
    assert!(filter.matches("main.py"));
    assert!(filter.matches("README.md"));
    assert!(!filter.matches("happy"));
    assert!(!filter.matches("main.rs"));
}

#[test]
fn test_default_extensions_cover_common_sources() {
    let filter = ExtensionFilter::default();
    for name in ["a.py", "b.md", "c.txt", "lib.rs", "Cargo.toml", "app.tsx"] {
        assert!(filter.matches(name), "{name} should match");
    }
    assert!(!filter.matches("logo.png"));
    assert!(!filter.matches(".gitignore"));
}

#[test]
fn test_all_flag_wins_over_extension_list() {
    let filter = ExtensionFilter::from_args(Some(vec![".py".to_string()]), true);
    assert_eq!(filter, ExtensionFilter::All);
    assert!(filter.matches("anything.bin"));
}

#[test]
fn test_config_defaults() {
    let config = BundleConfig::new(".");
    assert_eq!(config.output, Path::new("code.txt"));
    assert_eq!(config.reference, DEFAULT_REFERENCE);
    assert!(!config.include_diff);
    assert!(config.preselect);
    assert!(config.files.is_none());
}

#[test]
fn test_path_normalization() {
    assert_eq!(normalize_path("./src/main.rs"), "src/main.rs");
    assert_eq!(normalize_path("src\\lib.rs"), "src/lib.rs");
    assert_eq!(
        relative_path(Path::new("/repo"), Path::new("/repo/src/a.py")),
        Some("src/a.py".to_string())
    );
    assert_eq!(relative_path(Path::new("/repo"), Path::new("/other/a.py")), None);
    assert_eq!(relative_path(Path::new("/repo"), Path::new("/repo")), None);
}

#[test]
fn test_stats_tree_sums_directories() {
    let counts = vec![
        ("src/main.rs".to_string(), 40),
        ("src/ui/state.rs".to_string(), 10),
        ("README.md".to_string(), 5),
    ];

    let lines = render_stats(&counts);

    assert_eq!(
        lines,
        vec![
            "Overall (55 tokens)".to_string(),
            "┣━━ README.md (5 tokens)".to_string(),
            "┗━━ 📂 src (50 tokens)".to_string(),
            "     ┣━━ main.rs (40 tokens)".to_string(),
            "     ┗━━ 📂 ui (10 tokens)".to_string(),
            "          ┗━━ state.rs (10 tokens)".to_string(),
        ]
    );
}

#[test]
fn test_token_counts_per_record() -> Result<(), BundleError> {
    let records = vec![
        BundleRecord {
            path: "a.py".to_string(),
            language: Some("python"),
            content: "print('hello world')".to_string(),
        },
        BundleRecord {
            path: "empty.txt".to_string(),
            language: Some("plaintext"),
            content: String::new(),
        },
    ];

    let counts = count_tokens("gpt-4", &records)?;

    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].0, "a.py");
    assert!(counts[0].1 > 0);
    assert_eq!(counts[1], ("empty.txt".to_string(), 0));
    Ok(())
}

#[test]
fn test_unknown_tokenizer_model_is_an_error() {
    let result = count_tokens("not-a-model", &[]);
    assert!(matches!(result, Err(BundleError::TokenizerError(_))));
}
