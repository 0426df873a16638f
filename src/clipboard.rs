use anyhow::{Context, Result};
use std::time::{Duration, Instant};

/// How long a card shows "Copied" after a successful copy.
pub const COPIED_INDICATOR: Duration = Duration::from_millis(1200);

/// Write-only sink for snippet code.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard, opened on first use.
///
/// The handle is kept for the life of the process: on X11 the copied text
/// is only served while the owning `arboard::Clipboard` is alive.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if self.inner.is_none() {
            self.inner = Some(arboard::Clipboard::new().context("Failed to open clipboard")?);
        }

        match self.inner.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text.to_string())
                .context("Failed to write to clipboard"),
            None => Ok(()),
        }
    }
}

/// One-shot "Copied" state for a single snippet.
#[derive(Debug, Default, Clone)]
pub struct CopyFeedback {
    active: Option<(String, Instant)>,
}

impl CopyFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_copied(&mut self, snippet_id: &str, now: Instant) {
        self.active = Some((snippet_id.to_string(), now + COPIED_INDICATOR));
    }

    pub fn is_copied(&self, snippet_id: &str, now: Instant) -> bool {
        matches!(&self.active, Some((id, deadline)) if id == snippet_id && now < *deadline)
    }

    /// Expires the indicator once its deadline passes. Returns true when the
    /// visible state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let expired = matches!(&self.active, Some((_, deadline)) if now >= *deadline);
        if expired {
            self.active = None;
        }
        expired
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_ref().map(|(id, _)| id.as_str())
    }
}

/// Copies `code` and updates `feedback`. Failures are logged only.
pub fn copy_snippet(
    sink: &mut dyn ClipboardSink,
    feedback: &mut CopyFeedback,
    snippet_id: &str,
    code: &str,
    now: Instant,
) -> bool {
    match sink.set_text(code) {
        Ok(()) => {
            log::debug!("Copied snippet '{}' ({} bytes)", snippet_id, code.len());
            feedback.mark_copied(snippet_id, now);
            true
        }
        Err(e) => {
            log::error!("Copy failed for snippet '{}': {:#}", snippet_id, e);
            false
        }
    }
}
