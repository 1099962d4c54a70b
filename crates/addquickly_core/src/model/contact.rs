//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical committed-contact record.
//! - Provide lifecycle helpers for soft-delete semantics.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another contact.
//! - `name` is non-blank for every persisted contact; the parser already
//!   refuses to emit empty-name drafts and storage enforces it again.
//! - Tags and notes are linked by contact id in storage, never embedded
//!   here, so records stay cycle-free value types.
//!
//! # See also
//! - docs/architecture/data-model.md

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a committed contact.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ContactId = Uuid;

/// Validation failures for contact records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactValidationError {
    /// The nil UUID is reserved and never a valid identity.
    NilUuid,
    /// Contact names must contain at least one non-whitespace character.
    EmptyName,
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "contact uuid must not be nil"),
            Self::EmptyName => write!(f, "contact name must not be empty"),
        }
    }
}

impl Error for ContactValidationError {}

/// Canonical committed-contact record.
///
/// This is the original capture-screen contact reduced to plain values:
/// photo and crop state belong to the UI layer and are not modeled here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Stable global ID used for linking tags and notes.
    pub uuid: ContactId,
    /// Display name parsed from capture text.
    pub name: String,
    /// Free-form one-line summary.
    pub summary: String,
    /// Marks contacts imported from long-ago acquaintances.
    pub met_long_ago: bool,
    /// Optional grouping label; empty string means ungrouped.
    pub group: String,
    /// Soft delete tombstone preserving history.
    pub is_deleted: bool,
}

impl Contact {
    /// Creates a new contact with a generated stable ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates a contact with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally. The
    /// constructor does not validate; write paths call [`Contact::validate`].
    pub fn with_id(uuid: ContactId, name: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
            summary: String::new(),
            met_long_ago: false,
            group: String::new(),
            is_deleted: false,
        }
    }

    /// Checks record invariants before persistence.
    ///
    /// # Errors
    /// - [`ContactValidationError::NilUuid`] for the reserved nil identity.
    /// - [`ContactValidationError::EmptyName`] for blank names.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.uuid.is_nil() {
            return Err(ContactValidationError::NilUuid);
        }
        if self.name.trim().is_empty() {
            return Err(ContactValidationError::EmptyName);
        }
        Ok(())
    }

    /// Marks this contact as softly deleted (tombstoned).
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
    }

    /// Clears the soft delete flag.
    pub fn restore(&mut self) {
        self.is_deleted = false;
    }

    /// Returns whether this contact should be considered visible/active.
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}
