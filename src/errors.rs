use thiserror::Error;

#[derive(Error, Debug)]
pub enum BundleError {
    #[error("Clipboard initialization failed: {0}")]
    ClipboardInitError(String),

    #[error("Clipboard write failed: {0}")]
    ClipboardWriteError(String),

    #[error("Terminal error: {0}")]
    TerminalError(String),

    #[error("IO Error: {0}")]
    IoError(String),

    #[error("File read failed: {0}")]
    FileReadError(String),

    #[error("Ignore file error: {0}")]
    IgnoreError(String),

    #[error("Version control error: {0}")]
    VcsError(String),

    #[error("Tokenizer Error: {0}")]
    TokenizerError(String),

    #[error("No valid files to bundle")]
    NoValidFiles,

    #[error("Selection interrupted")]
    Interrupted,
}

impl From<std::io::Error> for BundleError {
    fn from(err: std::io::Error) -> Self {
        BundleError::IoError(err.to_string())
    }
}

impl From<ignore::Error> for BundleError {
    fn from(err: ignore::Error) -> Self {
        BundleError::IgnoreError(err.to_string())
    }
}
