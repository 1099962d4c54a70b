//! Contact use-case service.
//!
//! # Responsibility
//! - Provide contact create/commit/get/list APIs over repositories.
//! - Normalize tags for storage and validate user-supplied fields.
//!
//! # Invariants
//! - Committed drafts are persisted in draft order, one transaction each.
//! - Contact list is always in insertion (commit) order.
//! - Tag names are normalized to lowercase and deduplicated before
//!   persistence; the parse pass stays case-sensitive.
//!
//! # See also
//! - docs/architecture/capture-flow.md

use crate::model::contact::{Contact, ContactId};
use crate::parse::entry::ContactDraft;
use crate::repo::contact_repo::{
    normalize_contact_limit, normalize_tag, normalize_tags, ContactListQuery, ContactNote,
    ContactRecord, ContactRepository, RepoError, RepoResult,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for contact use-cases.
#[derive(Debug)]
pub enum ContactServiceError {
    /// Contact name is blank after trimming.
    InvalidName(String),
    /// Note content is blank after trimming.
    InvalidNote(String),
    /// Tag input contains blank values.
    InvalidTag(String),
    /// Target contact does not exist.
    ContactNotFound(ContactId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for ContactServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(value) => write!(f, "invalid contact name: `{value}`"),
            Self::InvalidNote(value) => write!(f, "invalid note content: `{value}`"),
            Self::InvalidTag(value) => write!(f, "invalid tag: `{value}`"),
            Self::ContactNotFound(id) => write!(f, "contact not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent contact state: {details}"),
        }
    }
}

impl Error for ContactServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ContactServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::ContactNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// List result envelope used by service callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactsListResult {
    /// List items in insertion (commit) order.
    pub items: Vec<ContactRecord>,
    /// Effective normalized limit used by the query.
    pub applied_limit: u32,
}

/// Contact service facade over repository implementations.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one contact from a display name.
    pub fn create_contact(
        &mut self,
        name: impl Into<String>,
    ) -> Result<ContactRecord, ContactServiceError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ContactServiceError::InvalidName(name));
        }

        let contact = Contact::new(name);
        let id = self.repo.create_contact_with_tags(&contact, &[])?;
        self.read_back(id, "created contact not found in read-back")
    }

    /// Persists one parsed draft batch in draft order.
    ///
    /// # Contract
    /// - Each draft becomes one contact row plus its tag links, written in
    ///   a single transaction per draft.
    /// - Tag names are storage-normalized (lowercase, deduplicated); parse
    ///   order is not preserved in storage, which sorts tags by name.
    /// - A failure aborts the remaining batch; drafts persisted before the
    ///   failure stay committed.
    pub fn commit_drafts(
        &mut self,
        drafts: &[ContactDraft],
    ) -> Result<Vec<ContactRecord>, ContactServiceError> {
        let mut committed = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let contact = Contact::new(draft.name.clone());
            let tag_names = draft
                .tags
                .iter()
                .map(|tag| tag.name.clone())
                .collect::<Vec<_>>();
            let normalized = normalize_tags(&tag_names);
            let id = self.repo.create_contact_with_tags(&contact, &normalized)?;
            committed.push(self.read_back(id, "committed draft not found in read-back")?);
        }
        Ok(committed)
    }

    /// Gets one active contact by stable ID.
    pub fn get_contact(&self, id: ContactId) -> RepoResult<Option<ContactRecord>> {
        self.repo.get_contact(id)
    }

    /// Lists contacts using optional group/tag filters and pagination.
    pub fn list_contacts(
        &self,
        group: Option<String>,
        tag: Option<String>,
        limit: Option<u32>,
        offset: u32,
    ) -> Result<ContactsListResult, ContactServiceError> {
        let normalized_tag = tag.and_then(|value| normalize_tag(value.as_str()));
        let normalized_group = group.filter(|value| !value.trim().is_empty());
        let applied_limit = normalize_contact_limit(limit);
        let query = ContactListQuery {
            group: normalized_group,
            tag: normalized_tag,
            include_deleted: false,
            limit: Some(applied_limit),
            offset,
        };
        let items = self.repo.list_contacts(&query)?;
        Ok(ContactsListResult {
            items,
            applied_limit,
        })
    }

    /// Replaces all scalar fields of an existing contact.
    pub fn update_contact(&self, contact: &Contact) -> Result<(), ContactServiceError> {
        self.repo.update_contact(contact).map_err(Into::into)
    }

    /// Atomically replaces the full tag set for one contact.
    pub fn set_contact_tags(
        &mut self,
        id: ContactId,
        tags: Vec<String>,
    ) -> Result<ContactRecord, ContactServiceError> {
        for tag in &tags {
            if tag.trim().is_empty() {
                return Err(ContactServiceError::InvalidTag(tag.clone()));
            }
        }

        let normalized = normalize_tags(&tags);
        self.repo.set_contact_tags(id, &normalized)?;
        self.read_back(id, "contact missing after tag replacement")
    }

    /// Appends one free-form note to a contact.
    pub fn add_note(
        &self,
        id: ContactId,
        content: impl Into<String>,
    ) -> Result<i64, ContactServiceError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ContactServiceError::InvalidNote(content));
        }
        self.repo.add_note(id, content.as_str()).map_err(Into::into)
    }

    /// Lists a contact's notes in creation order.
    pub fn list_notes(&self, id: ContactId) -> RepoResult<Vec<ContactNote>> {
        self.repo.list_notes(id)
    }

    /// Lists normalized tags known by storage.
    pub fn list_tags(&self) -> RepoResult<Vec<String>> {
        self.repo.list_tags()
    }

    /// Soft-deletes a contact by ID.
    pub fn soft_delete_contact(&self, id: ContactId) -> Result<(), ContactServiceError> {
        self.repo.soft_delete_contact(id).map_err(Into::into)
    }

    fn read_back(
        &self,
        id: ContactId,
        details: &'static str,
    ) -> Result<ContactRecord, ContactServiceError> {
        self.repo
            .get_contact(id)?
            .ok_or(ContactServiceError::InconsistentState(details))
    }
}
