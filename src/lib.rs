pub mod app;
pub mod bundle;
pub mod clipboard;
pub mod config;
pub mod errors;
pub mod filter;
pub mod gitignore;
pub mod logger;
pub mod reporting;
pub mod trie;
pub mod ui;
pub mod utils;
pub mod vcs;

pub use app::{run, RunOutcome};
pub use config::BundleConfig;
pub use errors::BundleError;
pub use gitignore::IgnorePatterns;
