use crate::errors::BundleError;
use arboard::Clipboard;
use std::path::Path;
use tokio::fs as async_fs;
use tracing::{debug, trace};

pub trait ClipboardPublisher {
    fn publish(&mut self, text: &str) -> Result<(), BundleError>;
}

/// The system clipboard, opened once up front so a missing clipboard
/// service is reported before any output is written.
pub struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, BundleError> {
        debug!("Initializing clipboard");
        let clipboard =
            Clipboard::new().map_err(|e| BundleError::ClipboardInitError(e.to_string()))?;
        Ok(SystemClipboard { clipboard })
    }
}

impl ClipboardPublisher for SystemClipboard {
    fn publish(&mut self, text: &str) -> Result<(), BundleError> {
        self.clipboard
            .set_text(text)
            .map_err(|e| BundleError::ClipboardWriteError(e.to_string()))
    }
}

/// Reads `path` back in full and places it on the clipboard. Returns the published text.
pub async fn publish_file<C: ClipboardPublisher + ?Sized>(
    clipboard: &mut C,
    path: &Path,
) -> Result<String, BundleError> {
    let text = async_fs::read_to_string(path)
        .await
        .map_err(|e| BundleError::FileReadError(format!("{}: {}", path.display(), e)))?;
    trace!("Publishing {} bytes to clipboard", text.len());
    clipboard.publish(&text)?;
    Ok(text)
}
