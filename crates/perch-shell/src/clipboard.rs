use std::io;

/// Write access to the system clipboard.
pub trait ClipboardAccess: Send + Sync {
    fn set_text(&self, text: &str) -> io::Result<()>;
}

/// System clipboard backed by `arboard`.
pub struct SystemClipboard;

impl ClipboardAccess for SystemClipboard {
    fn set_text(&self, text: &str) -> io::Result<()> {
        arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(text))
            .map_err(io::Error::other)
    }
}
