use clap::Parser;
use ctxpack::clipboard::SystemClipboard;
use ctxpack::config::{
    BundleConfig, ExtensionFilter, DEFAULT_MODEL, DEFAULT_OUTPUT, DEFAULT_REFERENCE,
};
use ctxpack::logger::initialize_logger;
use ctxpack::ui::TerminalSelector;
use ctxpack::vcs::GitCli;
use ctxpack::{run, BundleError, RunOutcome};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Bundle selected source files into one file and copy it to the clipboard.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Path to the repository
    path: PathBuf,
    /// Output file name
    #[arg(short = 'o', long, env = "CTXPACK_OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
    /// Directory names to exclude from the walk
    #[arg(short = 'e', long, num_args = 0..)]
    exclude: Vec<String>,
    /// Note appended to the end of the output
    #[arg(short = 'm', long)]
    message: Option<String>,
    /// File extensions to include (e.g. .py .md)
    #[arg(long, num_args = 1..)]
    extensions: Option<Vec<String>>,
    /// Include every file regardless of extension
    #[arg(long)]
    all: bool,
    /// Git reference for the diff and pre-selection
    #[arg(long, default_value = DEFAULT_REFERENCE)]
    commit: String,
    /// Append the diff against --commit to the output
    #[arg(long)]
    diff: bool,
    /// Bundle these files without the interactive selection
    #[arg(long, num_args = 1..)]
    files: Option<Vec<String>>,
    /// Start with nothing checked instead of recently changed files
    #[arg(long)]
    no_preselect: bool,
    /// Skip the token statistics report
    #[arg(short = 's', long)]
    no_stats: bool,
    /// Tokenizer model used for statistics
    #[arg(short = 'M', long, env = "CTXPACK_MODEL", default_value = DEFAULT_MODEL)]
    model: String,
}

impl From<CliArgs> for BundleConfig {
    fn from(args: CliArgs) -> Self {
        BundleConfig {
            root: args.path,
            output: args.output,
            excluded_dirs: args.exclude,
            extensions: ExtensionFilter::from_args(args.extensions, args.all),
            message: args.message,
            reference: args.commit,
            include_diff: args.diff,
            files: args.files,
            preselect: !args.no_preselect,
            no_stats: args.no_stats,
            model: args.model,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli_args = CliArgs::parse();
    initialize_logger();

    let config = BundleConfig::from(cli_args);
    let vcs = GitCli::new(&config.root);
    let mut selector = TerminalSelector::new();
    let mut clipboard = match SystemClipboard::new() {
        Ok(clipboard) => clipboard,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&config, &vcs, &mut selector, &mut clipboard).await {
        Ok(RunOutcome::Done { output, files }) => {
            println!(
                "Wrote {} files to {} and copied it to the clipboard.",
                files.len(),
                output.display()
            );
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::NoCandidates) => {
            println!("No candidate files found.");
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::NoSelection) => {
            println!("No files selected.");
            ExitCode::SUCCESS
        }
        Err(BundleError::Interrupted) => {
            info!("Interrupted");
            ExitCode::from(130)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
