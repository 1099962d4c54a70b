//! Capture session: the store that owns the quick-add input buffer.
//!
//! # Responsibility
//! - Hold the raw input text and the parsed preview derived from it.
//! - Reparse from scratch on every edit (replace-on-edit, no diffing).
//! - Move the current preview into committed storage on explicit commit.
//!
//! # Invariants
//! - The preview always reflects the current buffer; `set_text` is the
//!   only mutation and reparses synchronously.
//! - Commit re-parses the buffer immediately before persisting, so a stale
//!   preview can never be committed.
//! - The buffer is cleared only after the whole batch persisted; on error
//!   the user's input is kept.
//! - The session never decides *when* to commit; the caller owns the
//!   trigger (the return key on the capture screen).
//!
//! # See also
//! - docs/architecture/capture-flow.md

use crate::parse::entry::{parse_entries, ContactDraft, ParseResult, Tag};
use crate::repo::contact_repo::{ContactRecord, ContactRepository};
use crate::service::contact_service::{ContactService, ContactServiceError};
use log::info;

/// Externally-owned store for the capture screen's edit/commit lifecycle.
#[derive(Debug, Default)]
pub struct CaptureSession {
    text: String,
    parsed: ParseResult,
}

impl CaptureSession {
    /// Creates an empty session with an empty preview.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the buffer wholesale and reparses it.
    ///
    /// Returns the fresh preview so keystroke handlers can render it
    /// without a second call.
    pub fn set_text(&mut self, text: impl Into<String>) -> &ParseResult {
        self.text = text.into();
        self.parsed = parse_entries(&self.text);
        &self.parsed
    }

    /// Returns the current raw buffer.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the full parse result for the current buffer.
    pub fn parsed(&self) -> &ParseResult {
        &self.parsed
    }

    /// Returns the parsed-but-uncommitted drafts for preview rendering.
    pub fn preview(&self) -> &[ContactDraft] {
        &self.parsed.drafts
    }

    /// Returns the tags discovered in the current buffer.
    pub fn tags(&self) -> &[Tag] {
        &self.parsed.tags
    }

    /// Commits the current preview into the persisted contact list.
    ///
    /// # Contract
    /// - The buffer is re-parsed synchronously before persisting.
    /// - On success the buffer and preview are cleared and the committed
    ///   records are returned (possibly empty, mirroring the capture
    ///   screen's return-key behavior on blank input).
    /// - On error the buffer is left untouched so no input is lost.
    pub fn commit<R: ContactRepository>(
        &mut self,
        service: &mut ContactService<R>,
    ) -> Result<Vec<ContactRecord>, ContactServiceError> {
        let parsed = parse_entries(&self.text);
        let committed = service.commit_drafts(&parsed.drafts)?;

        info!(
            "event=capture_commit module=capture status=ok drafts={} tags={}",
            committed.len(),
            parsed.tags.len()
        );
        self.text.clear();
        self.parsed = ParseResult::default();
        Ok(committed)
    }
}
