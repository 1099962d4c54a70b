//! FFI use-case API for the capture screen.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to the mobile UI via FRB.
//! - Keep error semantics simple for early-stage UI integration.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - `capture_parse` stays pure so the UI can call it on every keystroke.
//! - Return values are UTF-8 strings/structs with stable meaning.
//!
//! # See also
//! - docs/architecture/capture-flow.md

use addquickly_core::db::open_db;
use addquickly_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, parse_entries,
    ping as ping_inner, ContactService, ContactServiceError, SqliteContactRepository,
};
use log::info;
use std::path::PathBuf;
use std::sync::OnceLock;

const CAPTURE_DB_FILE_NAME: &str = "addquickly.sqlite3";
static CAPTURE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Exposes the core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One parsed-but-uncommitted contact, shaped for preview rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureDraftView {
    /// Display name joined from the entry's non-hashtag words.
    pub name: String,
    /// Shared tag names in first-occurrence order.
    pub tags: Vec<String>,
}

/// Parse preview envelope returned for every keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturePreviewResponse {
    /// Tags discovered anywhere in the text, first occurrence first.
    pub tags: Vec<String>,
    /// Drafts in comma-segment order; empty-name segments are omitted.
    pub drafts: Vec<CaptureDraftView>,
}

/// Commit result envelope for the return-key flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureCommitResponse {
    /// Whether the whole batch persisted.
    pub ok: bool,
    /// Stable ids of the committed contacts, in commit order.
    pub contact_ids: Vec<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

/// Contact list item shaped for the home screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactView {
    /// Stable contact id in string form.
    pub contact_id: String,
    /// Display name.
    pub name: String,
    /// Free-form one-line summary.
    pub summary: String,
    /// Grouping label; empty string means ungrouped.
    pub group: String,
    /// Marks contacts imported from long-ago acquaintances.
    pub met_long_ago: bool,
    /// Storage-normalized tag names sorted alphabetically.
    pub tags: Vec<String>,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
}

/// Contact list envelope with the effective pagination limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactListResponse {
    /// List items in commit order (empty on error).
    pub items: Vec<ContactView>,
    /// Human-readable response message for diagnostics.
    pub message: String,
    /// Effective applied list limit.
    pub applied_limit: u32,
}

/// Parses capture text into the live preview shown under the contact list.
///
/// # FFI contract
/// - Sync call, pure computation, no I/O; safe to call per keystroke.
/// - Never panics; any string yields a (possibly empty) preview.
#[flutter_rust_bridge::frb(sync)]
pub fn capture_parse(text: String) -> CapturePreviewResponse {
    let parsed = parse_entries(text.as_str());
    CapturePreviewResponse {
        tags: parsed.tags.iter().map(|tag| tag.name.clone()).collect(),
        drafts: parsed
            .drafts
            .into_iter()
            .map(|draft| CaptureDraftView {
                name: draft.name,
                tags: draft.tags.into_iter().map(|tag| tag.name).collect(),
            })
            .collect(),
    }
}

/// Commits the current capture text into the persisted contact list.
///
/// The UI triggers this when the user presses return; the text is parsed
/// here, synchronously, so a stale preview can never be committed.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns committed contact ids in commit order.
#[flutter_rust_bridge::frb(sync)]
pub fn capture_commit(text: String) -> CaptureCommitResponse {
    let parsed = parse_entries(text.as_str());
    let result = with_contact_service(|service| service.commit_drafts(&parsed.drafts));

    match result {
        Ok(committed) => {
            info!(
                "event=capture_commit module=ffi status=ok drafts={}",
                committed.len()
            );
            CaptureCommitResponse {
                ok: true,
                contact_ids: committed
                    .iter()
                    .map(|record| record.contact_id.to_string())
                    .collect(),
                message: format!("Committed {} contact(s).", committed.len()),
            }
        }
        Err(err) => CaptureCommitResponse {
            ok: false,
            contact_ids: Vec::new(),
            message: format!("capture_commit failed: {err}"),
        },
    }
}

/// Lists committed contacts for the home screen grid.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns a deterministic envelope with the applied limit.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_list(
    group: Option<String>,
    tag: Option<String>,
    limit: Option<u32>,
    offset: u32,
) -> ContactListResponse {
    let result =
        with_contact_service(|service| service.list_contacts(group, tag, limit, offset));

    match result {
        Ok(listed) => {
            let items = listed
                .items
                .into_iter()
                .map(to_contact_view)
                .collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No contacts.".to_string()
            } else {
                format!("Found {} contact(s).", items.len())
            };
            ContactListResponse {
                items,
                message,
                applied_limit: listed.applied_limit,
            }
        }
        Err(message) => ContactListResponse {
            items: Vec::new(),
            message: format!("contact_list failed: {message}"),
            applied_limit: 0,
        },
    }
}

fn resolve_capture_db_path() -> PathBuf {
    CAPTURE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("ADDQUICKLY_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(CAPTURE_DB_FILE_NAME)
        })
        .clone()
}

fn with_contact_service<T>(
    f: impl FnOnce(
        &mut ContactService<SqliteContactRepository<'_>>,
    ) -> Result<T, ContactServiceError>,
) -> Result<T, String> {
    let db_path = resolve_capture_db_path();
    let mut conn = open_db(&db_path).map_err(|err| format!("capture DB open failed: {err}"))?;
    let repo = SqliteContactRepository::try_new(&mut conn)
        .map_err(|err| format!("capture repo init failed: {err}"))?;
    let mut service = ContactService::new(repo);
    f(&mut service).map_err(|err| err.to_string())
}

fn to_contact_view(record: addquickly_core::ContactRecord) -> ContactView {
    ContactView {
        contact_id: record.contact_id.to_string(),
        name: record.name,
        summary: record.summary,
        group: record.group,
        met_long_ago: record.met_long_ago,
        tags: record.tags,
        created_at: record.created_at,
    }
}
