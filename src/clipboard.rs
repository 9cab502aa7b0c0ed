//! Clipboard access
//!
//! The dashboard's copy action writes through [`ClipboardSink`]. The system
//! clipboard is only available with the `clipboard` feature.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::errors::{Result, TinylinkError};

pub trait ClipboardSink: Send + Sync {
    fn set_text(&self, text: &str) -> Result<()>;
}

/// System clipboard via arboard
///
/// A new handle is opened per copy; arboard handles are not `Send` on every
/// platform.
#[cfg(feature = "clipboard")]
#[derive(Default)]
pub struct SystemClipboard;

#[cfg(feature = "clipboard")]
impl SystemClipboard {
    pub fn arc() -> Arc<Self> {
        Arc::new(Self)
    }
}

#[cfg(feature = "clipboard")]
impl ClipboardSink for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| TinylinkError::storage(format!("Clipboard unavailable: {}", e)))?;
        clipboard
            .set_text(text)
            .map_err(|e| TinylinkError::storage(format!("Clipboard write failed: {}", e)))
    }
}

/// Keeps copied text in memory (headless environments, tests)
#[derive(Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().clone()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        *self.contents.lock() = Some(text.to_string());
        Ok(())
    }
}

/// The best clipboard available in this build
pub fn default_clipboard() -> Arc<dyn ClipboardSink> {
    #[cfg(feature = "clipboard")]
    {
        SystemClipboard::arc()
    }
    #[cfg(not(feature = "clipboard"))]
    {
        MemoryClipboard::arc()
    }
}
