//! Domain model for committed contacts.
//!
//! # Responsibility
//! - Define the value records persisted by the contact repository.
//! - Keep identity and lifecycle rules in one place.
//!
//! # Invariants
//! - Every contact is identified by a stable `ContactId`.
//! - Deletion is represented by soft-delete tombstones, not hard delete.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod contact;
