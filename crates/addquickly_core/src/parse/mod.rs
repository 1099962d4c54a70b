//! Capture-text parsing entry points.
//!
//! # Responsibility
//! - Turn the raw capture buffer into tag + contact-draft previews.
//! - Keep parsing pure and total so UI layers can call it per keystroke.
//!
//! # See also
//! - docs/architecture/capture-flow.md

pub mod entry;
