//! Text-to-entities parser for the capture buffer.
//!
//! # Responsibility
//! - Split raw capture text on commas into candidate contact entries.
//! - Discover hashtag tokens anywhere in the text as a shared tag set.
//! - Stay total: every input string maps to a (possibly empty) result.
//!
//! # Invariants
//! - A draft's `name` is never empty; entries that reduce to nothing after
//!   hashtag removal produce no draft at all.
//! - Tag names are unique within one parse pass, first occurrence wins,
//!   compared case-sensitively.
//! - Every draft from one pass carries the same tag sequence, in the order
//!   tags first appear in the raw input.
//!
//! # See also
//! - docs/architecture/capture-flow.md

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// \p{P} mirrors the Unicode punctuation set the mobile field trims with,
// so `#tag!` becomes `tag` while interior characters stay untouched.
static EDGE_PUNCTUATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{P}+|\p{P}+$").expect("valid punctuation regex"));

/// One hashtag discovered in capture text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name without the leading `#`, edge punctuation stripped.
    pub name: String,
}

/// A parsed-but-uncommitted contact candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    /// Display name joined from the entry's non-hashtag words.
    pub name: String,
    /// Tags shared by every draft of the same parse pass.
    pub tags: Vec<Tag>,
}

/// Output of one full parse pass over the capture buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Tags in first-occurrence order, deduplicated case-sensitively.
    pub tags: Vec<Tag>,
    /// Drafts in comma-segment order; empty-name segments are omitted.
    pub drafts: Vec<ContactDraft>,
}

impl ParseResult {
    /// Returns whether the pass produced neither tags nor drafts.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.drafts.is_empty()
    }
}

/// Parses one capture buffer into tags and contact drafts.
///
/// # Contract
/// - Tags are discovered over the whole input first, scanning space-split
///   tokens in order; each draft then carries that full shared sequence.
/// - Entries are the comma-separated segments of the input, trimmed;
///   hashtag tokens never contribute to an entry's name.
/// - Never fails: malformed input degrades to an empty result.
pub fn parse_entries(input: &str) -> ParseResult {
    let tags = discover_tags(input);
    let drafts = input
        .split(',')
        .filter_map(|entry| draft_from_entry(entry, &tags))
        .collect();

    ParseResult { tags, drafts }
}

/// Collects unique hashtags over the whole input in first-occurrence order.
fn discover_tags(input: &str) -> Vec<Tag> {
    let mut tags: Vec<Tag> = Vec::new();

    // Split on the space character only; a `#` inside a word is not a tag.
    for word in space_words(input) {
        let Some(candidate) = word.strip_prefix('#') else {
            continue;
        };
        let name = EDGE_PUNCTUATION_RE.replace_all(candidate, "");
        if name.is_empty() || tags.iter().any(|tag| tag.name == name) {
            continue;
        }
        tags.push(Tag {
            name: name.into_owned(),
        });
    }

    tags
}

/// Builds one draft from a comma-separated entry, or `None` when no name
/// survives hashtag removal.
fn draft_from_entry(entry: &str, tags: &[Tag]) -> Option<ContactDraft> {
    let name = space_words(entry.trim())
        .filter(|word| !word.starts_with('#'))
        .collect::<Vec<_>>()
        .join(" ");

    if name.is_empty() {
        return None;
    }

    Some(ContactDraft {
        name,
        tags: tags.to_vec(),
    })
}

fn space_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|word| !word.is_empty())
}
