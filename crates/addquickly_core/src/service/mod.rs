//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate parser and repository calls into use-case level APIs.
//! - Keep UI/FFI layers decoupled from parsing and storage details.
//!
//! # See also
//! - docs/architecture/capture-flow.md

pub mod capture;
pub mod contact_service;
